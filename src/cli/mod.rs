//! CLI support for rule-lang
//!
//! Provides programmatic access to the `rule` command for embedding in
//! other tools.

mod check;
mod convert;

pub use check::{CheckOptions, CheckResult, execute_check, execute_tokens};
pub use convert::{json_to_bindings, json_to_value};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Rule failed to parse or evaluate
    Rule(crate::RuleError),
    /// JSON parsing error
    Json(serde_json::Error),
    /// Config file could not be parsed
    Config(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No variables provided
    NoInput,
    /// Variables JSON was not an object
    BindingsNotObject,
    /// JSON value with no rule equivalent
    UnsupportedValue(&'static str),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Rule(e) => write!(f, "Rule error: {}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Config(e) => write!(f, "Invalid config: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => {
                write!(f, "No variables provided. Use --vars or pipe a JSON object to stdin.")
            }
            CliError::BindingsNotObject => write!(f, "Variables must be a JSON object"),
            CliError::UnsupportedValue(kind) => {
                write!(f, "Variables cannot hold a JSON {}", kind)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Rule(e) => Some(e),
            CliError::Json(e) | CliError::Config(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::RuleError> for CliError {
    fn from(e: crate::RuleError) -> Self {
        CliError::Rule(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
