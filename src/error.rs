use thiserror::Error;

use crate::lexer::Location;

/// Errors raised anywhere in the rule pipeline.
///
/// The first error aborts the whole evaluation. Located variants render as
/// `"<message> at position <p> on line <l>"`, where the position is the byte
/// column inside the current line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// Malformed rule text (unexpected or missing tokens, unbalanced parentheses)
    #[error("{message}{}", suffix(.location))]
    Syntax {
        message: String,
        location: Option<Location>,
    },

    /// A referenced variable has no binding
    #[error("Undefined variable \"{name}\"{location}")]
    UndefinedVariable { name: String, location: Location },

    /// Free function call to a name missing from the registry
    #[error("undefined is not a function{location}")]
    UndefinedFunction { name: String, location: Location },

    /// Method call to a name missing from the registry
    #[error("undefined is not a function{location}")]
    UndefinedMethod { name: String, location: Location },

    /// Operand or argument of the wrong type
    #[error("{message}{}", suffix(.location))]
    Type {
        message: String,
        location: Option<Location>,
    },

    /// The boolean-algebra reduction met something it cannot fold
    #[error("{0}")]
    Evaluation(String),

    /// A token pattern registered at runtime failed to compile
    #[error("Invalid pattern for token {kind}: {message}")]
    InvalidPattern { kind: String, message: String },

    /// Input rejected by the configured limits
    #[error("{0}")]
    LimitExceeded(String),
}

fn suffix(location: &Option<Location>) -> String {
    location.map(|l| l.to_string()).unwrap_or_default()
}

impl RuleError {
    pub(crate) fn syntax_at(message: impl Into<String>, location: Location) -> Self {
        RuleError::Syntax {
            message: message.into(),
            location: Some(location),
        }
    }

    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        RuleError::Syntax {
            message: message.into(),
            location: None,
        }
    }

    /// Where in the rule text the error was detected, if known.
    pub fn location(&self) -> Option<Location> {
        match self {
            RuleError::Syntax { location, .. } | RuleError::Type { location, .. } => *location,
            RuleError::UndefinedVariable { location, .. }
            | RuleError::UndefinedFunction { location, .. }
            | RuleError::UndefinedMethod { location, .. } => Some(*location),
            _ => None,
        }
    }
}

/// Error returned by a built-in or registered callable.
///
/// Callables know nothing about where they were invoked; the resolver attaches
/// the call site when it turns this into a [`RuleError`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    /// The receiver does not support the method (`"abc".join is not a function`)
    #[error("{receiver}.{method} is not a function")]
    NotAFunction { receiver: String, method: String },

    /// Any other failure inside the callable
    #[error("{0}")]
    Type(String),
}
