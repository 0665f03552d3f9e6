//! Error types for catalog loading, solving and tilemap export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Parameter validation failed before any grid work began
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile catalog is structurally valid but semantically unusable
    InvalidCatalog {
        /// Description of what's wrong with the catalog
        reason: String,
    },

    /// A tile index that does not exist in the catalog
    InvalidTileIndex {
        /// The unknown tile index
        index: usize,
        /// Where the index was referenced
        context: String,
    },

    /// Rule source text could not be parsed
    RuleParse {
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Failed to save a rendered tilemap to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Solver logic was asked to do something its invariants forbid
    ///
    /// These indicate a bug in the caller or the solver, never bad input data.
    ContractViolation {
        /// Operation that detected the violation
        operation: &'static str,
        /// Grid position involved (x, y)
        position: (usize, usize),
        /// Description of the violated invariant
        reason: String,
    },

    /// Generation did not complete within the configured step budget
    StepBudgetExhausted {
        /// Steps executed before giving up
        steps: usize,
        /// Full restarts performed during those steps
        restarts: usize,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidCatalog { reason } => {
                write!(f, "Invalid tile catalog: {reason}")
            }
            Self::InvalidTileIndex { index, context } => {
                write!(f, "Unknown tile index {index} referenced by {context}")
            }
            Self::RuleParse { source } => {
                write!(f, "Failed to parse tile rules: {source}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::ContractViolation {
                operation,
                position,
                reason,
            } => {
                write!(
                    f,
                    "Contract violation in {operation} at ({}, {}): {reason}",
                    position.0, position.1
                )
            }
            Self::StepBudgetExhausted { steps, restarts } => {
                write!(
                    f,
                    "Generation did not complete within {steps} steps ({restarts} restarts)"
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RuleParse { source } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<serde_json::Error> for AlgorithmError {
    fn from(err: serde_json::Error) -> Self {
        Self::RuleParse { source: err }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a contract violation error
pub fn contract_violation(
    operation: &'static str,
    position: (usize, usize),
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::ContractViolation {
        operation,
        position,
        reason: reason.to_string(),
    }
}

/// Create an invalid catalog error
pub fn invalid_catalog(reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidCatalog {
        reason: reason.to_string(),
    }
}
