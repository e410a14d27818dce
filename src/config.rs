use serde::{Deserialize, Serialize};
use std::env;

use crate::parser::DEFAULT_MAX_DEPTH;

/// Default cap on rule text length in bytes (64 KiB)
pub const DEFAULT_MAX_RULE_LENGTH: usize = 64 * 1024;

/// Input bounds applied before and during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Longest rule text accepted, in bytes
    pub max_rule_length: usize,

    /// Deepest parenthesis nesting accepted
    pub max_nesting_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_rule_length: env::var("RULE_MAX_RULE_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_RULE_LENGTH),
            max_nesting_depth: env::var("RULE_MAX_NESTING_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_DEPTH),
        }
    }
}

/// Engine configuration, loadable from JSON.
///
/// Missing fields fall back to their defaults, which can themselves be
/// overridden through `RULE_*` environment variables:
///
/// ```
/// use rule_lang::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{"limits": {"max_nesting_depth": 8}}"#).unwrap();
/// assert_eq!(config.limits.max_nesting_depth, 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub limits: Limits,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
