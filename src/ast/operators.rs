use std::fmt;

use crate::ast::TokenKind;

/// Comparison operators, after alias normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    /// Loose equality (`=`, `==`, `is`)
    Equal,
    /// Strict equality (`===`)
    EqualStrict,
    /// Negated loose equality (`!=`, `<>`, `is not`)
    NotEqual,
    /// Negated strict equality (`!==`)
    NotEqualStrict,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Array membership by strict equality (`in`)
    In,
}

impl ComparisonOp {
    pub fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Equal => Some(ComparisonOp::Equal),
            TokenKind::EqualStrict => Some(ComparisonOp::EqualStrict),
            TokenKind::NotEqual => Some(ComparisonOp::NotEqual),
            TokenKind::NotEqualStrict => Some(ComparisonOp::NotEqualStrict),
            TokenKind::LessThan => Some(ComparisonOp::LessThan),
            TokenKind::LessEqual => Some(ComparisonOp::LessEqual),
            TokenKind::GreaterThan => Some(ComparisonOp::GreaterThan),
            TokenKind::GreaterEqual => Some(ComparisonOp::GreaterEqual),
            TokenKind::In => Some(ComparisonOp::In),
            _ => None,
        }
    }
}

/// Logical connectives joining comparisons.
///
/// There is no precedence between them: an unparenthesised chain folds
/// strictly left to right, so `a || b && c` means `(a || b) && c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    /// `&&` / `and`
    And,
    /// `||` / `or`
    Or,
}

impl Connective {
    pub fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::And => Some(Connective::And),
            TokenKind::Or => Some(Connective::Or),
            _ => None,
        }
    }

    /// Character used in the boolean-algebra string
    pub fn symbol(self) -> char {
        match self {
            Connective::And => '&',
            Connective::Or => '|',
        }
    }

    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            Connective::And => left & right,
            Connective::Or => left | right,
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
