use crate::algorithm::collapse::Decision;
use crate::spatial::grid::GridSnapshot;
use std::collections::VecDeque;

/// A decision paired with the grid state immediately before it
///
/// Pairing the two keeps decision and snapshot indices aligned by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Grid state before the decision was applied
    pub snapshot: GridSnapshot,
    /// The decision itself
    pub decision: Decision,
}

/// Stack of past decisions used to undo the solver's own choices
///
/// With a depth limit the oldest entries are discarded first, which bounds
/// memory at the cost of unwinding that reaches past the retained depth
/// turning into a full restart.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: Option<usize>,
}

impl History {
    /// Create an unbounded history
    pub const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            limit: None,
        }
    }

    /// Create a history retaining at most `limit` entries
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: Some(limit),
        }
    }

    /// Configured depth limit
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are retained
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a decision together with the state it was made from
    pub fn push(&mut self, snapshot: GridSnapshot, decision: Decision) {
        self.entries.push_back(HistoryEntry { snapshot, decision });
        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.entries.pop_front();
            }
        }
    }

    /// Remove the `count` most recent entries, newest first
    ///
    /// Returns `None` without touching the history when fewer than `count`
    /// entries are retained.
    pub fn pop_many(&mut self, count: usize) -> Option<Vec<HistoryEntry>> {
        if count > self.entries.len() {
            return None;
        }
        let mut popped = Vec::with_capacity(count);
        for _ in 0..count {
            popped.extend(self.entries.pop_back());
        }
        Some(popped)
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
