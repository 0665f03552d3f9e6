//! Loading tile rules and placement policy from JSON
//!
//! The accepted document is a typed structure; unknown fields are rejected so
//! malformed entries never reach the solver.

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::{PlacementPolicy, TileCatalog, TileRule};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized form of a rule file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSource {
    /// Tile rules in catalog order
    pub tiles: Vec<TileRule>,
    /// Placement policy; the floor-on-bottom default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<PlacementPolicy>,
}

/// Validated catalog plus the policy to initialize grids with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    /// Validated tile rules
    pub catalog: TileCatalog,
    /// Placement policy from the source, or the default
    pub policy: PlacementPolicy,
}

impl TryFrom<RuleSource> for RuleSet {
    type Error = AlgorithmError;

    fn try_from(source: RuleSource) -> Result<Self> {
        Ok(Self {
            catalog: TileCatalog::new(source.tiles)?,
            policy: source.placement.unwrap_or_default(),
        })
    }
}

/// Parse and validate rules from JSON text
///
/// # Errors
///
/// Returns an error if the text is not a valid rule document or the catalog
/// fails validation
pub fn parse_rules(text: &str) -> Result<RuleSet> {
    let source: RuleSource = serde_json::from_str(text)?;
    let rules = RuleSet::try_from(source)?;
    tracing::debug!(tiles = rules.catalog.len(), "parsed tile rules");
    Ok(rules)
}

/// Read, parse and validate a rule file
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents are invalid
pub fn load_rules(path: &Path) -> Result<RuleSet> {
    let text = std::fs::read_to_string(path).map_err(|source| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "read rules",
        source,
    })?;
    parse_rules(&text)
}
