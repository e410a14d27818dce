use std::fmt;

use crate::ast::{Token, TokenKind};
use crate::grammar::Grammar;
use crate::stream::TokenStream;
use crate::value::{RegexLiteral, Value};

/// Where a token starts in the rule text.
///
/// `position` is the byte column inside the current line: it resets to 0
/// after every newline token. Multi-line comments advance `line` by the
/// newlines they contain but leave the column counting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// Byte offset from the start of the rule
    pub offset: usize,
    /// Byte column within the line
    pub position: usize,
    /// 1-based line number
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " at position {} on line {}", self.position, self.line)
    }
}

/// Table-driven tokenizer.
///
/// At each offset every grammar rule is tried in priority order and the
/// first match wins. Input no rule matches becomes a one-character
/// [`TokenKind::Unknown`] token; the lexer itself never fails.
pub struct Lexer<'g> {
    grammar: &'g Grammar,
    input: &'g str,
    offset: usize,
    position: usize,
    line: usize,
}

impl<'g> Lexer<'g> {
    pub fn new(grammar: &'g Grammar, input: &'g str) -> Self {
        Lexer {
            grammar,
            input,
            offset: 0,
            position: 0,
            line: 1,
        }
    }

    fn location(&self) -> Location {
        Location {
            offset: self.offset,
            position: self.position,
            line: self.line,
        }
    }

    fn advance(&mut self, kind: TokenKind, raw: &str) {
        self.offset += raw.len();
        if kind == TokenKind::Newline {
            self.position = 0;
            self.line += 1;
        } else {
            self.position += raw.len();
            self.line += raw.matches('\n').count();
        }
    }

    pub fn next_token(&mut self) -> Option<Token> {
        let rest = &self.input[self.offset..];
        let first = rest.chars().next()?;

        let (kind, len) = self
            .grammar
            .match_at(rest)
            .unwrap_or((TokenKind::Unknown, first.len_utf8()));
        let raw = &rest[..len];

        let mut token = Token::new(kind, raw, self.location());
        token.value = literal_value(kind, raw);
        log::trace!("token {} {:?}{}", kind, raw, token.location);

        self.advance(kind, raw);
        Some(token)
    }

    /// Lexes the whole input.
    pub fn tokenize(mut self) -> TokenStream {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        TokenStream::new(tokens)
    }
}

/// Typed value of a literal lexeme. Variables stay unresolved (`None`).
fn literal_value(kind: TokenKind, raw: &str) -> Option<Value> {
    match kind {
        TokenKind::Integer => Some(
            raw.parse::<i64>()
                .map(Value::Integer)
                .or_else(|_| raw.parse::<f64>().map(Value::Float))
                .unwrap_or(Value::String(raw.to_string())),
        ),
        TokenKind::Float => Some(
            raw.parse::<f64>()
                .map(Value::Float)
                .unwrap_or(Value::String(raw.to_string())),
        ),
        TokenKind::String => Some(Value::String(unquote(raw))),
        TokenKind::Boolean => Some(Value::Boolean(raw == "true")),
        TokenKind::Null => Some(Value::Null),
        TokenKind::Undefined => Some(Value::Undefined),
        TokenKind::Regex => Some(
            RegexLiteral::parse(raw)
                .map(Value::Regex)
                .unwrap_or(Value::String(raw.to_string())),
        ),
        _ => None,
    }
}

/// Strips the quotes of a string literal and resolves escape sequences.
fn unquote(raw: &str) -> String {
    let body = ['"', '\'']
        .into_iter()
        .find_map(|q| raw.strip_prefix(q).and_then(|s| s.strip_suffix(q)))
        .unwrap_or(raw);

    let mut result = String::new();
    let mut iter = body.chars();
    while let Some(ch) = iter.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match iter.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some('u') => {
                let hex: String = iter.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(c) => result.push(c),
                    None => {
                        result.push('u');
                        result.push_str(&hex);
                    }
                }
            }
            // \" \' \\ \/ and unknown escapes yield the escaped character
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}
