use std::borrow::Cow;
use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::ast::{BoolExpr, ComparisonOp};
use crate::error::RuleError;
use crate::value::Value;

/// Comparison between two resolved operands
pub type Predicate = fn(&Value, &Value) -> Result<bool, RuleError>;

static INNERMOST_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]+)\)").expect("group pattern is valid"));

/// Maps a comparison operator to the predicate implementing it.
pub fn predicate_for(op: ComparisonOp) -> Predicate {
    match op {
        ComparisonOp::Equal => |l, r| Ok(l.loose_eq(r)),
        ComparisonOp::EqualStrict => |l, r| Ok(l.strict_eq(r)),
        ComparisonOp::NotEqual => |l, r| Ok(!l.loose_eq(r)),
        ComparisonOp::NotEqualStrict => |l, r| Ok(!l.strict_eq(r)),
        ComparisonOp::LessThan => |l, r| Ok(l.loose_cmp(r) == Some(Ordering::Less)),
        ComparisonOp::LessEqual => {
            |l, r| Ok(matches!(l.loose_cmp(r), Some(Ordering::Less | Ordering::Equal)))
        }
        ComparisonOp::GreaterThan => |l, r| Ok(l.loose_cmp(r) == Some(Ordering::Greater)),
        ComparisonOp::GreaterEqual => {
            |l, r| Ok(matches!(l.loose_cmp(r), Some(Ordering::Greater | Ordering::Equal)))
        }
        ComparisonOp::In => contains,
    }
}

fn contains(needle: &Value, haystack: &Value) -> Result<bool, RuleError> {
    match haystack {
        Value::Array(items) => Ok(items.iter().any(|item| item.strict_eq(needle))),
        other => Err(RuleError::Type {
            message: format!("Expected array, got \"{}\"", other.type_name()),
            location: None,
        }),
    }
}

/// Folds a parsed tree into its verdict. An empty rule is `false`.
pub fn evaluate(expr: &BoolExpr) -> bool {
    match expr {
        BoolExpr::Empty => false,
        BoolExpr::Leaf(b) => *b,
        BoolExpr::Group(inner) => evaluate(inner),
        BoolExpr::Binary { .. } => {
            let (first, links) = expr.chain();
            links
                .into_iter()
                .fold(evaluate(first), |acc, (op, right)| op.apply(acc, evaluate(right)))
        }
    }
}

/// Evaluates a boolean-algebra string such as `1&(0|1)`.
///
/// Innermost groups are replaced by their value until no parenthesis is
/// left, then the remaining flat string is folded left to right.
pub fn evaluate_algebra(algebra: &str) -> Result<bool, RuleError> {
    let mut current = algebra.to_string();
    loop {
        let mut failure = None;
        let reduced = INNERMOST_GROUP.replace_all(&current, |caps: &Captures| {
            match reduce_flat(&caps[1]) {
                Ok(flag) => if flag.unwrap_or(false) { "1" } else { "0" },
                Err(err) => {
                    failure.get_or_insert(err);
                    ""
                }
            }
        });
        if let Some(err) = failure {
            return Err(err);
        }
        match reduced {
            Cow::Borrowed(_) => break,
            Cow::Owned(next) => current = next,
        }
    }
    Ok(reduce_flat(&current)?.unwrap_or(false))
}

/// Folds a parenthesis-free group; `None` for an empty one.
fn reduce_flat(group: &str) -> Result<Option<bool>, RuleError> {
    let mut chars = group.chars();
    let Some(first) = chars.next() else {
        return Ok(None);
    };

    let mut flag = first == '1';
    let mut and = false;
    for c in chars {
        match c {
            '&' => and = true,
            '|' => and = false,
            '0' | '1' => {
                let bit = c == '1';
                flag = if and { flag & bit } else { flag | bit };
            }
            _ => return Err(RuleError::Evaluation(format!("Unexpected \"{}\"", c))),
        }
    }
    Ok(Some(flag))
}
