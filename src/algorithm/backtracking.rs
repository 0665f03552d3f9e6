use crate::algorithm::history::History;
use crate::io::configuration::{
    DEEP_UNWIND_DEPTH, MEDIUM_UNWIND_DEPTH, MEDIUM_UNWIND_LIMIT, RESTART_THRESHOLD,
    SHALLOW_UNWIND_DEPTH, SHALLOW_UNWIND_LIMIT,
};
use crate::spatial::Grid;
use std::fmt;

/// Recovery chosen for a contradiction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Undo this many recent decisions
    Unwind(usize),
    /// Discard all progress and reinitialize the grid
    Restart,
}

impl Recovery {
    /// Escalation schedule keyed by consecutive contradictions
    ///
    /// `attempts` counts contradictions since the last successful collapse,
    /// including the current one: 1–4 unwind one decision, 5–9 unwind two,
    /// 10–19 unwind five, and the 20th restarts.
    pub const fn for_attempt(attempts: usize) -> Self {
        if attempts < SHALLOW_UNWIND_LIMIT {
            Self::Unwind(SHALLOW_UNWIND_DEPTH)
        } else if attempts < MEDIUM_UNWIND_LIMIT {
            Self::Unwind(MEDIUM_UNWIND_DEPTH)
        } else if attempts < RESTART_THRESHOLD {
            Self::Unwind(DEEP_UNWIND_DEPTH)
        } else {
            Self::Restart
        }
    }
}

/// Why a full restart happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartReason {
    /// The escalation schedule ran out of unwinding bands
    Escalated,
    /// More decisions were requested than history retains
    HistoryExhausted,
    /// A decision targeted a cell already collapsed in the restored state
    Desynchronized,
}

impl fmt::Display for RestartReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Escalated => "repeated contradictions",
            Self::HistoryExhausted => "history exhausted",
            Self::Desynchronized => "history out of step with grid",
        };
        f.write_str(reason)
    }
}

/// Result of trying to undo recent decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnwindOutcome {
    /// The grid was rolled back and this many failed choices excluded
    Unwound(usize),
    /// Incremental repair is impossible; the caller must restart
    NeedsRestart(RestartReason),
}

/// Undo the `count` most recent decisions and exclude their tiles
///
/// The grid is restored to the snapshot taken just before the earliest undone
/// decision. Each undone tile is then removed from its cell's candidates, in
/// the order the decisions were undone, so the same failing choice is not
/// immediately repeated. Asking for more decisions than history holds, or
/// finding a targeted cell already collapsed after the restore, yields
/// `NeedsRestart` and leaves the grid for the caller to rebuild.
pub fn unwind(grid: &mut Grid, history: &mut History, count: usize) -> UnwindOutcome {
    if count == 0 {
        return UnwindOutcome::Unwound(0);
    }

    let Some(mut undone) = history.pop_many(count) else {
        return UnwindOutcome::NeedsRestart(RestartReason::HistoryExhausted);
    };

    // Newest first, so the earliest decision's snapshot is last
    let Some(earliest) = undone.pop() else {
        return UnwindOutcome::NeedsRestart(RestartReason::HistoryExhausted);
    };
    let earliest_decision = earliest.decision;
    grid.restore(earliest.snapshot);

    let decisions = undone
        .iter()
        .map(|entry| entry.decision)
        .chain(std::iter::once(earliest_decision));

    let mut excluded = 0;
    for decision in decisions {
        let Some(cell) = grid.cell_mut(decision.x, decision.y) else {
            return UnwindOutcome::NeedsRestart(RestartReason::Desynchronized);
        };
        if cell.is_collapsed() {
            return UnwindOutcome::NeedsRestart(RestartReason::Desynchronized);
        }
        cell.exclude(decision.tile);
        excluded += 1;
    }

    UnwindOutcome::Unwound(excluded)
}
