//! Grammar table: the ordered token rules the lexer tries at every position.
//!
//! Rules are kept sorted by descending priority; rules with equal priority
//! keep their declaration order. Multi-character operators and word aliases
//! sit above their single-character prefixes and above variable names so
//! that `===` never lexes as `==` `=` and `and` never lexes as a variable.

use regex::Regex;

use crate::ast::TokenKind;
use crate::error::RuleError;

/// One `(pattern, kind, priority)` entry.
#[derive(Debug, Clone)]
pub struct GrammarRule {
    pub kind: TokenKind,
    pub pattern: String,
    pub priority: i32,
    regex: Regex,
}

impl GrammarRule {
    fn new(kind: TokenKind, pattern: &str, priority: i32) -> Result<Self, RuleError> {
        // \A anchors the match to the lexer's current position
        let regex = Regex::new(&format!(r"\A(?:{})", pattern)).map_err(|e| {
            RuleError::InvalidPattern {
                kind: kind.name().to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(GrammarRule {
            kind,
            pattern: pattern.to_string(),
            priority,
            regex,
        })
    }

    /// Length in bytes of the match starting at the beginning of `input`.
    fn match_len(&self, input: &str) -> Option<usize> {
        self.regex.find(input).map(|m| m.end()).filter(|len| *len > 0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: Vec<GrammarRule>,
}

const JAVASCRIPT: &[(TokenKind, &str, i32)] = &[
    (TokenKind::Comment, r"//[^\r\n]*|#[^\r\n]*|/\*[\s\S]*?\*/", 150),
    (TokenKind::Newline, r"\r?\n", 145),
    (TokenKind::Space, r"[ \t\r]+", 140),
    (TokenKind::Method, r"\.\s*[a-zA-Z_]\w*\s*\(", 135),
    (TokenKind::Regex, r"/(?:\\.|[^\\/\r\n*])(?:\\.|[^\\/\r\n])*/[gimsuy]*", 130),
    (TokenKind::EqualStrict, r"===", 125),
    (TokenKind::NotEqualStrict, r"!==", 125),
    (TokenKind::Equal, r"==", 120),
    (TokenKind::NotEqual, r"!=|<>", 120),
    (TokenKind::LessEqual, r"<=", 120),
    (TokenKind::GreaterEqual, r">=", 120),
    (TokenKind::And, r"&&", 120),
    (TokenKind::Or, r"\|\|", 120),
    (TokenKind::NotEqual, r"is\s+not\b", 118),
    (TokenKind::Equal, r"is\b", 115),
    (TokenKind::In, r"in\b", 115),
    (TokenKind::And, r"and\b", 115),
    (TokenKind::Or, r"or\b", 115),
    (TokenKind::Boolean, r"(?:true|false)\b", 115),
    (TokenKind::Null, r"null\b", 115),
    (TokenKind::Undefined, r"undefined\b", 115),
    (TokenKind::Equal, r"=", 110),
    (TokenKind::LessThan, r"<", 110),
    (TokenKind::GreaterThan, r">", 110),
    (TokenKind::Function, r"[a-zA-Z_]\w*\s*\(", 105),
    (TokenKind::Float, r"-?\d+\.\d+", 100),
    (TokenKind::Integer, r"-?\d+", 95),
    (TokenKind::String, r#""(?:\\.|[^"\\])*"|'(?:\\.|[^'\\])*'"#, 90),
    (TokenKind::Variable, r"[a-zA-Z_]\w*", 85),
    (TokenKind::ParenOpen, r"\(", 80),
    (TokenKind::ParenClose, r"\)", 80),
    (TokenKind::BracketOpen, r"\[", 80),
    (TokenKind::BracketClose, r"\]", 80),
    (TokenKind::Comma, r",", 80),
];

impl Grammar {
    /// A table with no rules; every character lexes as unknown.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The JavaScript-flavoured grammar rules are written in.
    pub fn javascript() -> Self {
        let mut grammar = Grammar::empty();
        for (kind, pattern, priority) in JAVASCRIPT {
            // Built-in patterns are known to compile
            if let Ok(rule) = GrammarRule::new(*kind, pattern, *priority) {
                grammar.insert(rule);
            }
        }
        grammar
    }

    /// Adds a rule. It is tried after every existing rule of the same priority.
    ///
    /// # Examples
    ///
    /// ```
    /// use rule_lang::{Grammar, TokenKind};
    ///
    /// let mut grammar = Grammar::javascript();
    /// grammar.register(TokenKind::Equal, r"equals\b", 116).unwrap();
    /// assert!(grammar.register(TokenKind::Equal, r"(", 10).is_err());
    /// ```
    pub fn register(
        &mut self,
        kind: TokenKind,
        pattern: &str,
        priority: i32,
    ) -> Result<(), RuleError> {
        let rule = GrammarRule::new(kind, pattern, priority)?;
        log::debug!("registered token {} /{}/ with priority {}", kind, pattern, priority);
        self.insert(rule);
        Ok(())
    }

    fn insert(&mut self, rule: GrammarRule) {
        let index = self.rules.partition_point(|r| r.priority >= rule.priority);
        self.rules.insert(index, rule);
    }

    /// Rules in the order they are tried
    pub fn rules(&self) -> &[GrammarRule] {
        &self.rules
    }

    /// First rule (by priority, then declaration order) matching at the start of `input`.
    pub fn match_at(&self, input: &str) -> Option<(TokenKind, usize)> {
        self.rules
            .iter()
            .find_map(|rule| rule.match_len(input).map(|len| (rule.kind, len)))
    }
}
