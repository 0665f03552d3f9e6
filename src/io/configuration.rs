//! Solver constants and runtime configuration defaults

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default tilemap width in cells
pub const DEFAULT_WIDTH: usize = 16;
/// Default tilemap height in cells
pub const DEFAULT_HEIGHT: usize = 16;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Backtracking escalation schedule, indexed by consecutive contradictions
/// Contradictions below this count unwind a single decision
pub const SHALLOW_UNWIND_LIMIT: usize = 5;
/// Contradictions below this count unwind two decisions
pub const MEDIUM_UNWIND_LIMIT: usize = 10;
/// Contradictions at or above this count trigger a full restart
pub const RESTART_THRESHOLD: usize = 20;
/// Decisions undone per contradiction in the shallow band
pub const SHALLOW_UNWIND_DEPTH: usize = 1;
/// Decisions undone per contradiction in the medium band
pub const MEDIUM_UNWIND_DEPTH: usize = 2;
/// Decisions undone per contradiction in the deep band
pub const DEEP_UNWIND_DEPTH: usize = 5;

/// Behavior tag confined to the bottom row by the default placement policy
pub const FLOOR_BEHAVIOR: &str = "floor";

/// Step budget used by the command line when none is given
pub const DEFAULT_CLI_MAX_STEPS: usize = 1_000_000;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Steps between progress bar refreshes
pub const PROGRESS_REFRESH_STEPS: usize = 64;

/// Default pixel size of one cell in PNG output
pub const DEFAULT_PNG_SCALE: u32 = 8;
