//! Command-line interface for generating a tilemap from a rule file

use crate::algorithm::executor::{SolverConfig, SolverStats, WaveSolver};
use crate::algorithm::selection::EntropyMode;
use crate::io::configuration::{
    DEFAULT_CLI_MAX_STEPS, DEFAULT_HEIGHT, DEFAULT_PNG_SCALE, DEFAULT_SEED, DEFAULT_WIDTH,
};
use crate::io::error::{AlgorithmError, Result};
use crate::io::image::export_tilemap_as_png;
use crate::io::progress::ProgressReporter;
use crate::io::rules::{RuleSet, load_rules};
use crate::io::tilemap::Tilemap;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Generate tilemaps by wave function collapse with backtracking"
)]
/// Command-line arguments for the tilemap generator
pub struct Cli {
    /// JSON rule file describing tiles and their neighbors
    #[arg(value_name = "RULES")]
    pub rules: PathBuf,

    /// Tilemap width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Tilemap height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Entropy measure used to pick the next cell
    #[arg(short, long, value_enum, default_value_t = EntropyMode::CandidateCount)]
    pub entropy: EntropyMode,

    /// Give up after this many solver steps (0 disables the limit)
    #[arg(short = 'm', long, default_value_t = DEFAULT_CLI_MAX_STEPS)]
    pub max_steps: usize,

    /// Keep at most this many decisions for backtracking
    #[arg(long)]
    pub history_limit: Option<usize>,

    /// Output file (.json, .png, or text); prints text rows when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pixels per cell for PNG output
    #[arg(long, default_value_t = DEFAULT_PNG_SCALE)]
    pub scale: u32,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Solver configuration for a rule set's placement policy
    pub fn solver_config(&self, rules: &RuleSet) -> SolverConfig {
        SolverConfig {
            seed: self.seed,
            entropy: self.entropy,
            policy: rules.policy.clone(),
            max_steps: (self.max_steps > 0).then_some(self.max_steps),
            history_limit: self.history_limit,
        }
    }

    /// Output format implied by the output path
    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_deref()
            .map_or(OutputFormat::Text, OutputFormat::from_path)
    }
}

/// Serialization chosen for the finished tilemap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Space-separated display values, one row per line
    Text,
    /// JSON array of display-value rows
    Json,
    /// One colored block per cell
    Png,
}

impl OutputFormat {
    /// Infer the format from a file extension, defaulting to text
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("png") => Self::Png,
            _ => Self::Text,
        }
    }
}

/// Drives one generation run from parsed arguments
pub struct Generator {
    cli: Cli,
}

impl Generator {
    /// Create a generator for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load rules, solve, and write the tilemap
    ///
    /// # Errors
    ///
    /// Returns an error if the rules cannot be loaded, the parameters are
    /// invalid, the step budget runs out, or the output cannot be written
    pub fn run(&self) -> Result<SolverStats> {
        let start_time = Instant::now();
        let rules = load_rules(&self.cli.rules)?;
        let (tilemap, stats) = self.solve(&rules)?;

        tracing::info!(
            width = tilemap.width(),
            height = tilemap.height(),
            steps = stats.steps,
            restarts = stats.restarts,
            elapsed_ms = start_time.elapsed().as_millis(),
            "generation finished"
        );

        self.write_output(&tilemap, &rules)?;
        Ok(stats)
    }

    /// Solve a rule set with the CLI's parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or the step budget runs out
    pub fn solve(&self, rules: &RuleSet) -> Result<(Tilemap, SolverStats)> {
        let config = self.cli.solver_config(rules);
        let mut solver =
            WaveSolver::new(&rules.catalog, self.cli.width, self.cli.height, config)?;

        let total_cells = self.cli.width * self.cli.height;
        let mut progress = if self.cli.should_show_progress() {
            ProgressReporter::new(total_cells)
        } else {
            ProgressReporter::hidden(total_cells)
        };

        let solved = solver
            .solve_with(|_, solver| {
                progress.update(solver.grid().collapsed_count(), &solver.stats(), false);
            })
            .map(|_| ());

        let stats = solver.stats();
        if let Err(error) = solved {
            progress.abandon();
            return Err(error);
        }

        progress.update(total_cells, &stats, true);
        progress.finish(&stats);
        Ok((solver.tilemap()?, stats))
    }

    fn write_output(&self, tilemap: &Tilemap, rules: &RuleSet) -> Result<()> {
        let Some(path) = self.cli.output.as_deref() else {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(tilemap.to_text(&rules.catalog).as_bytes())
                .map_err(|source| AlgorithmError::FileSystem {
                    path: PathBuf::from("<stdout>"),
                    operation: "write tilemap",
                    source,
                })?;
            return Ok(());
        };

        let contents = match self.cli.output_format() {
            OutputFormat::Png => {
                return export_tilemap_as_png(tilemap, &rules.catalog, path, self.cli.scale);
            }
            OutputFormat::Json => tilemap.to_json(&rules.catalog)?,
            OutputFormat::Text => tilemap.to_text(&rules.catalog),
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source,
            })?;
        }
        std::fs::write(path, contents).map_err(|source| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "write tilemap",
            source,
        })
    }
}
