//! Call resolution over the token stream.
//!
//! The resolver sits between the lexer and the parser. Every value it meets
//! (literal, variable, array literal or function call) is folded together
//! with its trailing method calls into a single resolved value token:
//!
//! ```text
//! "foo|bar".split("|").join("-")   ->   VALUE "foo-bar"
//! ```
//!
//! All other tokens pass through untouched.

use crate::ast::{Token, TokenGroup, TokenKind};
use crate::bindings::{Bindings, normalize_name};
use crate::error::{CallError, RuleError};
use crate::functions::Registry;
use crate::lexer::Location;
use crate::parser::DEFAULT_MAX_DEPTH;
use crate::stream::TokenStream;
use crate::value::Value;

pub struct Resolver<'a> {
    stream: TokenStream,
    bindings: &'a Bindings,
    registry: &'a Registry,
    depth: usize,
    max_depth: usize,
    failed: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(stream: TokenStream, bindings: &'a Bindings, registry: &'a Registry) -> Self {
        Resolver {
            stream,
            bindings,
            registry,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            failed: false,
        }
    }

    /// Caps how deeply array literals and argument lists may nest.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn starts_value(token: &Token) -> bool {
        matches!(
            token.group(),
            TokenGroup::Value | TokenGroup::BracketOpen | TokenGroup::Function
        )
    }

    /// A variable with no binding and no method call chained onto it.
    fn is_unbound_operand(&self, token: &Token) -> bool {
        token.kind == TokenKind::Variable
            && token.value.is_none()
            && !self.bindings.contains(&token.raw)
            && !matches!(self.stream.peek_significant(), Some(next) if next.kind == TokenKind::Method)
    }

    /// Resolves `token` and every method call chained onto it.
    fn resolve_value(&mut self, token: Token) -> Result<Token, RuleError> {
        let base = self.resolve_atom(token)?;
        self.resolve_calls(base)
    }

    fn resolve_atom(&mut self, token: Token) -> Result<Token, RuleError> {
        match token.kind {
            TokenKind::BracketOpen => {
                let items = self.parse_list(TokenKind::BracketClose, "]", token.location)?;
                Ok(Token::resolved(Value::Array(items), token.raw, token.location))
            }
            TokenKind::Function => {
                let registry = self.registry;
                let name = token.callee_name().to_string();
                let function = registry.function(&name).ok_or_else(|| {
                    RuleError::UndefinedFunction {
                        name: name.clone(),
                        location: token.location,
                    }
                })?;
                let args = self.parse_list(TokenKind::ParenClose, ")", token.location)?;
                log::trace!("calling {}() with {} argument(s)", name, args.len());
                let value = function
                    .call(None, &args)
                    .map_err(|e| call_failed(e, token.location))?;
                Ok(Token::resolved(value, token.raw, token.location))
            }
            TokenKind::Variable if token.value.is_none() => {
                match self.bindings.get(&token.raw) {
                    Some(value) => Ok(Token::resolved(value.clone(), token.raw, token.location)),
                    None => Err(RuleError::UndefinedVariable {
                        name: normalize_name(&token.raw),
                        location: token.location,
                    }),
                }
            }
            _ if token.value.is_some() => Ok(token),
            // Value kinds registered at runtime without a literal form
            _ => {
                let value = Value::String(token.raw.clone());
                Ok(Token::resolved(value, token.raw, token.location))
            }
        }
    }

    /// Applies `.method(...)` calls following `token` until none is left.
    fn resolve_calls(&mut self, mut token: Token) -> Result<Token, RuleError> {
        loop {
            // Probe past whitespace without consuming it
            match self.stream.peek_significant() {
                Some(next) if next.kind == TokenKind::Method => {}
                _ => return Ok(token),
            }
            let Some(method) = self.stream.next_significant() else {
                return Ok(token);
            };

            let registry = self.registry;
            let name = method.callee_name().to_string();
            let callable = registry.method(&name).ok_or_else(|| RuleError::UndefinedMethod {
                name: name.clone(),
                location: method.location,
            })?;
            let args = self.parse_list(TokenKind::ParenClose, ")", method.location)?;

            let receiver = token.value.take().unwrap_or(Value::Undefined);
            log::trace!("calling {}.{}() with {} argument(s)", receiver, name, args.len());
            let value = callable
                .call(Some(&receiver), &args)
                .map_err(|e| call_failed(e, method.location))?;
            token = Token::resolved(value, token.raw, token.location);
        }
    }

    /// Comma-separated values up to `terminator`; the opening token at `opening` is already consumed.
    fn parse_list(
        &mut self,
        terminator: TokenKind,
        closing: &str,
        opening: Location,
    ) -> Result<Vec<Value>, RuleError> {
        if self.depth >= self.max_depth {
            return Err(RuleError::syntax_at(
                format!("Maximum nesting depth of {} exceeded", self.max_depth),
                opening,
            ));
        }
        self.depth += 1;
        let items = self.parse_items(terminator, closing);
        self.depth -= 1;
        items
    }

    fn parse_items(&mut self, terminator: TokenKind, closing: &str) -> Result<Vec<Value>, RuleError> {
        let mut items = Vec::new();
        let mut comma_expected = false;

        let last = loop {
            let Some(current) = self.stream.next_token() else {
                return Err(RuleError::syntax(format!(
                    "Unexpected end of string. Expected \"{}\"",
                    closing
                )));
            };

            if current.kind == terminator {
                break current;
            } else if Self::starts_value(&current) {
                if comma_expected {
                    return Err(RuleError::syntax_at("Unexpected value", current.location));
                }
                let resolved = self.resolve_value(current)?;
                items.push(resolved.value.unwrap_or(Value::Undefined));
                comma_expected = true;
            } else if current.group() == TokenGroup::Comma {
                if !comma_expected {
                    return Err(unexpected_token(&current));
                }
                comma_expected = false;
            } else if !current.is_ignorable() {
                return Err(unexpected_token(&current));
            }
        };

        if !comma_expected && !items.is_empty() {
            return Err(RuleError::syntax_at("Unexpected token \",\"", last.location));
        }
        Ok(items)
    }
}

impl Iterator for Resolver<'_> {
    type Item = Result<Token, RuleError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let token = self.stream.next_token()?;
        let result = if self.is_unbound_operand(&token) {
            // The parser reports it once the value is known to be in operand position
            Ok(token)
        } else if Self::starts_value(&token) {
            self.resolve_value(token)
        } else {
            Ok(token)
        };
        self.failed = result.is_err();
        Some(result)
    }
}

fn unexpected_token(token: &Token) -> RuleError {
    RuleError::syntax_at(format!("Unexpected token \"{}\"", token.raw), token.location)
}

fn call_failed(error: CallError, location: Location) -> RuleError {
    RuleError::Type {
        message: error.to_string(),
        location: Some(location),
    }
}
