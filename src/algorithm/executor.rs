use crate::{
    algorithm::backtracking::{Recovery, RestartReason, UnwindOutcome, unwind},
    algorithm::collapse::{Decision, collapse_cell},
    algorithm::history::History,
    algorithm::propagation::propagate,
    algorithm::selection::{EntropyMode, select_cell},
    io::configuration::DEFAULT_SEED,
    io::error::{AlgorithmError, Result},
    io::tilemap::Tilemap,
    spatial::grid::validate_dimensions,
    spatial::{Grid, PlacementPolicy, TileCatalog},
};
use rand::{SeedableRng, rngs::StdRng};

/// Runtime parameters for one generation run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Seed for the solver's random number generator
    pub seed: u64,
    /// Entropy measure used for cell selection
    pub entropy: EntropyMode,
    /// Candidate exclusion applied on every (re)initialization
    pub policy: PlacementPolicy,
    /// Upper bound on loop iterations for `solve`; unbounded when `None`
    pub max_steps: Option<usize>,
    /// Upper bound on retained history entries; unbounded when `None`
    pub history_limit: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            entropy: EntropyMode::default(),
            policy: PlacementPolicy::default(),
            max_steps: None,
            history_limit: None,
        }
    }
}

/// Counters describing how a run progressed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Loop iterations executed
    pub steps: usize,
    /// Successful collapses
    pub collapses: usize,
    /// Contradicted cells encountered
    pub contradictions: usize,
    /// Incremental unwinds performed
    pub backtracks: usize,
    /// Decisions undone across all unwinds
    pub unwound_decisions: usize,
    /// Full grid reinitializations
    pub restarts: usize,
}

/// What a single loop iteration did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A cell was resolved and its neighbors constrained
    Collapsed(Decision),
    /// A contradiction was repaired by undoing recent decisions
    Backtracked {
        /// Decisions undone
        unwound: usize,
    },
    /// A contradiction forced a full reinitialization
    Restarted(RestartReason),
    /// Every cell is resolved
    Complete,
}

/// Wave function collapse solver owning all working state for one run
///
/// The catalog is borrowed read-only; the grid, history and random number
/// generator belong to this instance alone, so independent solvers never
/// share state.
pub struct WaveSolver<'a> {
    catalog: &'a TileCatalog,
    config: SolverConfig,
    grid: Grid,
    history: History,
    rng: StdRng,
    backtrack_attempts: usize,
    complete: bool,
    stats: SolverStats,
}

impl<'a> WaveSolver<'a> {
    /// Validate parameters and build the initial grid
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or too large, or the
    /// placement policy does not fit the grid and catalog
    pub fn new(
        catalog: &'a TileCatalog,
        width: usize,
        height: usize,
        config: SolverConfig,
    ) -> Result<Self> {
        validate_dimensions(width, height)?;
        let grid = Grid::initialize(catalog, width, height, &config.policy)?;
        let history = config
            .history_limit
            .map_or_else(History::new, History::with_limit);
        let rng = StdRng::seed_from_u64(config.seed);

        Ok(Self {
            catalog,
            config,
            grid,
            history,
            rng,
            backtrack_attempts: 0,
            complete: false,
            stats: SolverStats::default(),
        })
    }

    /// Current working grid
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Retained decision history
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Catalog the solver reads rules from
    pub const fn catalog(&self) -> &TileCatalog {
        self.catalog
    }

    /// Configuration of this run
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Counters for this run
    pub const fn stats(&self) -> SolverStats {
        self.stats
    }

    /// Contradictions since the last successful collapse
    pub const fn backtrack_attempts(&self) -> usize {
        self.backtrack_attempts
    }

    /// Whether every cell has been resolved
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Run one iteration of the collapse loop
    ///
    /// # Errors
    ///
    /// Returns an error only on contract violations inside the solver, or if
    /// reinitialization fails
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.complete {
            return Ok(StepOutcome::Complete);
        }
        self.stats.steps += 1;

        let Some((x, y)) = select_cell(&self.grid, self.config.entropy, &mut self.rng) else {
            self.complete = true;
            tracing::info!(
                steps = self.stats.steps,
                restarts = self.stats.restarts,
                contradictions = self.stats.contradictions,
                "tilemap complete"
            );
            return Ok(StepOutcome::Complete);
        };

        let contradicted = self.grid.cell(x, y).is_some_and(|cell| cell.is_contradicted());
        if contradicted {
            return self.recover_from_contradiction(x, y);
        }

        let snapshot = self.grid.snapshot();
        let decision = collapse_cell(&mut self.grid, x, y, &mut self.rng)?;
        self.history.push(snapshot, decision);
        let propagation = propagate(&mut self.grid, self.catalog, &decision)?;

        self.backtrack_attempts = 0;
        self.stats.collapses += 1;

        if !propagation.contradictions.is_empty() {
            tracing::trace!(
                x,
                y,
                tile = decision.tile,
                emptied = propagation.contradictions.len(),
                "collapse emptied neighboring cells"
            );
        }

        Ok(StepOutcome::Collapsed(decision))
    }

    /// Rule out a tile at an unresolved position
    ///
    /// The exclusion applies to the current grid only. It is not recorded in
    /// history, so unwinding past it or restarting brings the tile back.
    /// Returns whether the tile was still a candidate there.
    ///
    /// # Errors
    ///
    /// Returns a contract violation if the position lies outside the grid
    pub fn exclude(&mut self, x: usize, y: usize, tile: usize) -> Result<bool> {
        let removed = self.grid.require_cell_mut("exclude", x, y)?.exclude(tile);
        if removed {
            tracing::debug!(x, y, tile, "tile excluded");
        }
        Ok(removed)
    }

    /// Run the loop until every cell is resolved
    ///
    /// # Errors
    ///
    /// Returns `StepBudgetExhausted` if `max_steps` is reached first, or any
    /// error raised by `step`
    pub fn solve(&mut self) -> Result<&Grid> {
        self.solve_with(|_, _| {})
    }

    /// Run the loop to completion, reporting every iteration to `observer`
    ///
    /// # Errors
    ///
    /// Returns `StepBudgetExhausted` if `max_steps` is reached first, or any
    /// error raised by `step`
    pub fn solve_with<F>(&mut self, mut observer: F) -> Result<&Grid>
    where
        F: FnMut(&StepOutcome, &Self),
    {
        loop {
            if let Some(max_steps) = self.config.max_steps {
                if !self.complete && self.stats.steps >= max_steps {
                    return Err(AlgorithmError::StepBudgetExhausted {
                        steps: self.stats.steps,
                        restarts: self.stats.restarts,
                    });
                }
            }

            let outcome = self.step()?;
            observer(&outcome, self);
            if outcome == StepOutcome::Complete {
                return Ok(&self.grid);
            }
        }
    }

    /// Discard all progress and rebuild the grid from the catalog and policy
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be reinitialized
    pub fn restart(&mut self, reason: RestartReason) -> Result<()> {
        self.grid = Grid::initialize(
            self.catalog,
            self.grid.width(),
            self.grid.height(),
            &self.config.policy,
        )?;
        self.history.clear();
        self.backtrack_attempts = 0;
        self.complete = false;
        self.stats.restarts += 1;

        tracing::info!(
            %reason,
            step = self.stats.steps,
            restarts = self.stats.restarts,
            "restarting generation"
        );
        Ok(())
    }

    /// Project the finished grid into a tilemap
    ///
    /// # Errors
    ///
    /// Returns a contract violation if any cell is still unresolved
    pub fn tilemap(&self) -> Result<Tilemap> {
        Tilemap::from_grid(&self.grid)
    }

    fn recover_from_contradiction(&mut self, x: usize, y: usize) -> Result<StepOutcome> {
        self.backtrack_attempts += 1;
        self.stats.contradictions += 1;

        let recovery = Recovery::for_attempt(self.backtrack_attempts);
        tracing::debug!(
            x,
            y,
            attempts = self.backtrack_attempts,
            history = self.history.len(),
            ?recovery,
            "contradiction"
        );

        let reason = match recovery {
            Recovery::Unwind(count) => match unwind(&mut self.grid, &mut self.history, count) {
                UnwindOutcome::Unwound(unwound) => {
                    self.stats.backtracks += 1;
                    self.stats.unwound_decisions += unwound;
                    return Ok(StepOutcome::Backtracked { unwound });
                }
                UnwindOutcome::NeedsRestart(reason) => reason,
            },
            Recovery::Restart => RestartReason::Escalated,
        };

        self.restart(reason)?;
        Ok(StepOutcome::Restarted(reason))
    }
}

/// Generate a tilemap with the default configuration
///
/// # Errors
///
/// Returns an error if the dimensions are invalid
pub fn generate(catalog: &TileCatalog, width: usize, height: usize) -> Result<Tilemap> {
    generate_with(catalog, width, height, SolverConfig::default())
}

/// Generate a tilemap with an explicit configuration
///
/// # Errors
///
/// Returns an error if the dimensions or policy are invalid, or the step
/// budget runs out before the tilemap completes
pub fn generate_with(
    catalog: &TileCatalog,
    width: usize,
    height: usize,
    config: SolverConfig,
) -> Result<Tilemap> {
    let mut solver = WaveSolver::new(catalog, width, height, config)?;
    solver.solve()?;
    solver.tilemap()
}
