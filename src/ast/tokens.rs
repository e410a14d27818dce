use std::fmt;

use crate::lexer::Location;
use crate::value::Value;

/// Fine-grained token type assigned by the grammar table.
///
/// Several kinds share a [`TokenGroup`], which is what the resolver and the
/// parser dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Values
    /// Integer literal, optionally negative
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -1
    /// ```
    Integer,

    /// Float literal
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// -0.5
    /// ```
    Float,

    /// Single- or double-quoted string literal
    ///
    /// # Examples
    /// ```text
    /// "MA"
    /// 'whaddup yall'
    /// ```
    String,

    /// `true` / `false`
    Boolean,

    /// `null`
    Null,

    /// `undefined`
    Undefined,

    /// Regular expression literal
    ///
    /// # Examples
    /// ```text
    /// /^foo$/i
    /// ```
    Regex,

    /// Variable name, resolved from the bindings (case-insensitive)
    ///
    /// # Examples
    /// ```text
    /// COUNTRY
    /// totalamount
    /// ```
    Variable,

    /// Array value; produced by the resolver from `[a, b]` literals
    Array,

    // Comparison operators
    /// `=`, `==` or `is`
    Equal,
    /// `===`
    EqualStrict,
    /// `!=`, `<>` or `is not`
    NotEqual,
    /// `!==`
    NotEqualStrict,
    /// `<`
    LessThan,
    /// `<=`
    LessEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterEqual,
    /// `in`
    In,

    // Logical connectives
    /// `&&` or `and`
    And,
    /// `||` or `or`
    Or,

    // Delimiters
    ParenOpen,
    ParenClose,
    BracketOpen,
    BracketClose,
    Comma,

    // Calls
    /// Method call head
    ///
    /// # Examples
    /// ```text
    /// .split(
    /// .toUpperCase (
    /// ```
    Method,

    /// Free function call head
    ///
    /// # Examples
    /// ```text
    /// parseInt(
    /// ```
    Function,

    // Trivia
    Space,
    Newline,
    /// `// ...`, `# ...` or `/* ... */`
    Comment,

    /// Anything the grammar table did not recognise
    Unknown,
}

/// Coarse classification the parser works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenGroup {
    Value,
    Operator,
    Logical,
    ParenOpen,
    ParenClose,
    BracketOpen,
    BracketClose,
    Comma,
    Method,
    Function,
    Space,
    Newline,
    Comment,
    Unknown,
}

impl TokenKind {
    pub fn group(self) -> TokenGroup {
        use TokenKind::*;
        match self {
            Integer | Float | String | Boolean | Null | Undefined | Regex | Variable | Array => {
                TokenGroup::Value
            }
            Equal | EqualStrict | NotEqual | NotEqualStrict | LessThan | LessEqual
            | GreaterThan | GreaterEqual | In => TokenGroup::Operator,
            And | Or => TokenGroup::Logical,
            ParenOpen => TokenGroup::ParenOpen,
            ParenClose => TokenGroup::ParenClose,
            BracketOpen => TokenGroup::BracketOpen,
            BracketClose => TokenGroup::BracketClose,
            Comma => TokenGroup::Comma,
            Method => TokenGroup::Method,
            Function => TokenGroup::Function,
            Space => TokenGroup::Space,
            Newline => TokenGroup::Newline,
            Comment => TokenGroup::Comment,
            Unknown => TokenGroup::Unknown,
        }
    }

    /// Name used when registering token patterns by name.
    pub fn name(self) -> &'static str {
        use TokenKind::*;
        match self {
            Integer => "integer",
            Float => "float",
            String => "string",
            Boolean => "bool",
            Null => "null",
            Undefined => "undefined",
            Regex => "regex",
            Variable => "variable",
            Array => "array",
            Equal => "equal",
            EqualStrict => "equal_strict",
            NotEqual => "not_equal",
            NotEqualStrict => "not_equal_strict",
            LessThan => "smaller",
            LessEqual => "smaller_equal",
            GreaterThan => "greater",
            GreaterEqual => "greater_equal",
            In => "in",
            And => "and",
            Or => "or",
            ParenOpen => "opening_parenthesis",
            ParenClose => "closing_parenthesis",
            BracketOpen => "opening_array",
            BracketClose => "closing_array",
            Comma => "comma",
            Method => "method",
            Function => "function",
            Space => "space",
            Newline => "newline",
            Comment => "comment",
            Unknown => "unknown",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        use TokenKind::*;
        const ALL: [TokenKind; 31] = [
            Integer, Float, String, Boolean, Null, Undefined, Regex, Variable, Array, Equal,
            EqualStrict, NotEqual, NotEqualStrict, LessThan, LessEqual, GreaterThan,
            GreaterEqual, In, And, Or, ParenOpen, ParenClose, BracketOpen, BracketClose, Comma,
            Method, Function, Space, Newline, Comment, Unknown,
        ];
        ALL.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexeme.
///
/// Tokens are never mutated once produced; the resolver creates new value
/// tokens for call results and keeps the receiver's location on them.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Text exactly as it appeared in the rule
    pub raw: String,
    /// Typed literal, present on value tokens once known
    pub value: Option<Value>,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, raw: impl Into<String>, location: Location) -> Self {
        Token {
            kind,
            raw: raw.into(),
            value: None,
            location,
        }
    }

    /// A resolved value token standing at `location`.
    pub fn resolved(value: Value, raw: impl Into<String>, location: Location) -> Self {
        let kind = match &value {
            Value::Undefined => TokenKind::Undefined,
            Value::Null => TokenKind::Null,
            Value::Boolean(_) => TokenKind::Boolean,
            Value::Integer(_) => TokenKind::Integer,
            Value::Float(_) => TokenKind::Float,
            Value::String(_) => TokenKind::String,
            Value::Array(_) => TokenKind::Array,
            Value::Regex(_) => TokenKind::Regex,
        };
        Token {
            kind,
            raw: raw.into(),
            value: Some(value),
            location,
        }
    }

    pub fn group(&self) -> TokenGroup {
        self.kind.group()
    }

    /// Whitespace, newlines and comments
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self.group(),
            TokenGroup::Space | TokenGroup::Newline | TokenGroup::Comment
        )
    }

    /// Callee name of a method or function token (`.split (` → `split`).
    pub fn callee_name(&self) -> &str {
        self.raw
            .trim()
            .trim_start_matches('.')
            .trim_end_matches('(')
            .trim()
    }
}
