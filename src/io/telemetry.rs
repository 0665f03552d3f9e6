//! Diagnostic logging setup for the command line

use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Map repeated `-v` flags to a log level
pub const fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Build the filter for a verbosity level; `RUST_LOG` takes precedence
pub fn build_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_from_verbosity(verbosity).into())
        .from_env_lossy()
}

/// Install a stderr subscriber for the process
///
/// Returns false if a global subscriber was already installed.
pub fn init_tracing(verbosity: u8) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
