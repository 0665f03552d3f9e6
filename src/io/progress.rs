//! Terminal progress display for a generation run

use crate::algorithm::executor::SolverStats;
use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_REFRESH_STEPS};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks resolved cells against the grid size
///
/// The bar position follows the number of collapsed cells, so it moves
/// backwards on backtracks and drops to zero on restarts.
pub struct ProgressReporter {
    bar: ProgressBar,
    last_refresh: usize,
}

impl ProgressReporter {
    /// Create a visible progress bar for a grid of `total_cells`
    pub fn new(total_cells: usize) -> Self {
        let bar = ProgressBar::new(total_cells as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        Self {
            bar,
            last_refresh: 0,
        }
    }

    /// Create a reporter that draws nothing
    pub fn hidden(total_cells: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_cells as u64);
        Self {
            bar,
            last_refresh: 0,
        }
    }

    /// Current bar position
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Report the solver state after a step
    ///
    /// Redraws at most once every `PROGRESS_REFRESH_STEPS` steps unless
    /// `force` is set.
    pub fn update(&mut self, collapsed: usize, stats: &SolverStats, force: bool) {
        if !force && stats.steps < self.last_refresh + PROGRESS_REFRESH_STEPS {
            return;
        }
        self.last_refresh = stats.steps;
        self.bar.set_position(collapsed as u64);
        self.bar.set_message(Self::summary(stats));
    }

    /// Finish the bar with final statistics
    pub fn finish(&self, stats: &SolverStats) {
        self.bar
            .finish_with_message(format!("done: {}", Self::summary(stats)));
    }

    /// Clear the bar after a failed run
    pub fn abandon(&self) {
        self.bar.abandon();
    }

    fn summary(stats: &SolverStats) -> String {
        format!(
            "steps {} contradictions {} restarts {}",
            stats.steps, stats.contradictions, stats.restarts
        )
    }
}
