/// Command-line argument parsing and run orchestration
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG rendering of tilemaps
pub mod image;
/// Terminal progress display
pub mod progress;
/// JSON rule loading
pub mod rules;
/// Logging setup
pub mod telemetry;
/// Tilemap projection and text output
pub mod tilemap;
