use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use rust_decimal::{Decimal, prelude::FromPrimitive};

use crate::error::CallError;

/// A value flowing through a rule: literals, bound variables and call results.
///
/// Comparison semantics follow JavaScript closely: `==` coerces strings,
/// numbers and booleans before comparing, `===` requires the same type.
/// Integers and floats compare equal under `==` only; `===` keeps them apart.
///
/// # Examples
///
/// ```
/// use rule_lang::Value;
///
/// assert!(Value::from("4").loose_eq(&Value::Integer(4)));
/// assert!(!Value::from("4").strict_eq(&Value::Integer(4)));
/// assert!(Value::Integer(4).loose_eq(&Value::Float(4.0)));
/// assert!(!Value::Integer(4).strict_eq(&Value::Float(4.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value (`undefined`), distinct from an explicit `null`
    Undefined,

    /// Explicit `null`
    Null,

    /// `true` / `false`
    Boolean(bool),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Floating-point number, including `NaN` produced by `parseInt`/`parseFloat`
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// Regular expression literal (`/^foo$/i`)
    Regex(RegexLiteral),
}

/// A `/pattern/flags` literal as written in the rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexLiteral {
    pub pattern: String,
    pub flags: String,
}

impl RegexLiteral {
    /// Splits a raw `/pattern/flags` lexeme. Returns `None` if it is not delimited by slashes.
    pub fn parse(raw: &str) -> Option<Self> {
        let body = raw.strip_prefix('/')?;
        let end = body.rfind('/')?;
        Some(RegexLiteral {
            pattern: body[..end].to_string(),
            flags: body[end + 1..].to_string(),
        })
    }

    /// `g` flag: `replace` substitutes every match instead of the first one
    pub fn is_global(&self) -> bool {
        self.flags.contains('g')
    }

    /// Builds a matcher honouring the `i`, `m` and `s` flags.
    pub fn compile(&self) -> Result<Regex, CallError> {
        RegexBuilder::new(&self.pattern)
            .case_insensitive(self.flags.contains('i'))
            .multi_line(self.flags.contains('m'))
            .dot_matches_new_line(self.flags.contains('s'))
            .build()
            .map_err(|e| CallError::Type(format!("Invalid regular expression {}: {}", self, e)))
    }
}

impl fmt::Display for RegexLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.pattern, self.flags)
    }
}

impl Value {
    /// Type name used in error messages (`Expected array, got "string"`)
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Regex(_) => "regex",
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// String conversion as JavaScript's `String(value)` performs it.
    pub fn to_js_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|v| if v.is_nullish() { String::new() } else { v.to_js_string() })
                .collect::<Vec<_>>()
                .join(","),
            Value::Regex(re) => re.to_string(),
        }
    }

    /// Numeric conversion as JavaScript's unary `+` performs it (`NaN` on failure).
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined | Value::Regex(_) => f64::NAN,
            Value::Null => 0.0,
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Integer(n) => *n as f64,
            Value::Float(n) => *n,
            Value::String(s) => parse_numeric(s),
            Value::Array(_) => parse_numeric(&self.to_js_string()),
        }
    }

    /// Exact decimal form for numeric comparison, when one exists.
    fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Integer(n) => Some(Decimal::from(*n)),
            Value::Float(n) => Decimal::from_f64(*n),
            Value::String(s) => {
                let t = s.trim();
                if t.is_empty() {
                    Some(Decimal::ZERO)
                } else {
                    Decimal::from_str(t).ok()
                }
            }
            Value::Boolean(b) => Some(Decimal::from(*b as i64)),
            Value::Null => Some(Decimal::ZERO),
            _ => None,
        }
    }

    /// Loose equality (`==`, `=`, `is`).
    pub fn loose_eq(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (a, b) if a.is_nullish() || b.is_nullish() => a.is_nullish() && b.is_nullish(),
            (String(a), String(b)) => a == b,
            (Boolean(a), Boolean(b)) => a == b,
            (Array(a), Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            (Regex(a), Regex(b)) => a == b,
            (Boolean(b), v) | (v, Boolean(b)) => Integer(*b as i64).loose_eq(v),
            (Array(_), v) | (v, Array(_)) if !matches!(v, Array(_)) => {
                String(self.array_or_self_string(other)).loose_eq(v)
            }
            (Regex(re), v) | (v, Regex(re)) => String(re.to_string()).loose_eq(v),
            (a, b) => compare_numbers(a, b) == Some(Ordering::Equal),
        }
    }

    // Picks the array side of a mixed comparison and renders it as a string.
    fn array_or_self_string(&self, other: &Value) -> String {
        match self {
            Value::Array(_) => self.to_js_string(),
            _ => other.to_js_string(),
        }
    }

    /// Strict equality (`===`): same type and same value.
    pub fn strict_eq(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Undefined, Undefined) | (Null, Null) => true,
            (Boolean(a), Boolean(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Array(a), Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_eq(y))
            }
            (Regex(a), Regex(b)) => a == b,
            _ => false,
        }
    }

    /// Ordering for `<`, `<=`, `>`, `>=`.
    ///
    /// Two strings compare lexicographically; everything else is converted to
    /// a number first. `None` means the operands are unordered (`NaN`).
    pub fn loose_cmp(&self, other: &Value) -> Option<Ordering> {
        let primitive = |v: &Value| match v {
            Value::Array(_) | Value::Regex(_) => Value::String(v.to_js_string()),
            _ => v.clone(),
        };
        match (primitive(self), primitive(other)) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(&b)),
            (a, b) => compare_numbers(&a, &b),
        }
    }
}

/// Numeric comparison that stays exact for integers and decimal strings.
fn compare_numbers(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Value::Integer(x), Value::Integer(y)) = (a, b) {
        return Some(x.cmp(y));
    }
    let (x, y) = (a.to_number(), b.to_number());
    if x.is_nan() || y.is_nan() {
        return None;
    }
    match (a.to_decimal(), b.to_decimal()) {
        (Some(x), Some(y)) => Some(x.cmp(&y)),
        _ => x.partial_cmp(&y),
    }
}

fn parse_numeric(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ => t.parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or(f64::NAN),
    }
}

/// Renders a float the way JavaScript prints numbers (`1` rather than `1.0`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let s = if n > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i128)
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            other => write!(f, "{}", other.to_js_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}
