use crate::{
    ast::{BoolExpr, ComparisonOp, Connective, Token, TokenGroup, TokenKind},
    bindings::normalize_name,
    error::RuleError,
    evaluator,
    value::Value,
};

/// Default cap on parenthesis nesting
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Operands of one parenthesis level
#[derive(Debug, Default)]
struct Frame {
    expr: Option<BoolExpr>,
    pending: Option<Connective>,
}

/// State machine turning resolved tokens into a [`BoolExpr`].
///
/// Comparisons are evaluated as soon as both operands and the operator are
/// known, so the resulting tree only holds booleans, connectives and groups.
///
/// ```text
/// COUNTRY == "MA" && (TOTAL > 10 || TOTAL < 0)   ->   1&(0|1)
/// ```
pub struct Parser {
    values: Vec<Value>,
    operator: Option<(ComparisonOp, Token)>,
    operator_required: bool,
    incomplete_condition: bool,
    open_parens: usize,
    closed_parens: usize,
    frames: Vec<Frame>,
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(DEFAULT_MAX_DEPTH)
    }
}

impl Parser {
    pub fn new(max_depth: usize) -> Self {
        Parser {
            values: Vec::with_capacity(2),
            operator: None,
            operator_required: false,
            incomplete_condition: false,
            open_parens: 0,
            closed_parens: 0,
            frames: vec![Frame::default()],
            max_depth,
        }
    }

    /// Consumes the resolved stream; the first error aborts parsing.
    pub fn parse<I>(mut self, tokens: I) -> Result<BoolExpr, RuleError>
    where
        I: IntoIterator<Item = Result<Token, RuleError>>,
    {
        for token in tokens {
            let token = token?;
            match token.group() {
                TokenGroup::Value => {
                    self.push_value(token)?;
                    self.reduce()?;
                }
                TokenGroup::Operator => self.push_operator(token)?,
                TokenGroup::Logical => self.push_logical(token)?,
                TokenGroup::ParenOpen => self.open_group(token)?,
                TokenGroup::ParenClose => self.close_group(token)?,
                _ if token.is_ignorable() => {}
                _ => return Err(unknown_token(&token)),
            }
        }
        self.finish()
    }

    fn push_value(&mut self, token: Token) -> Result<(), RuleError> {
        if self.operator_required {
            return Err(RuleError::syntax_at("Missing operator", token.location));
        }
        let value = match token.value {
            Some(value) => value,
            None if token.kind == TokenKind::Variable => {
                return Err(RuleError::UndefinedVariable {
                    name: normalize_name(&token.raw),
                    location: token.location,
                });
            }
            None => Value::Undefined,
        };
        self.operator_required = true;
        self.incomplete_condition = false;
        self.values.push(value);
        Ok(())
    }

    fn push_operator(&mut self, token: Token) -> Result<(), RuleError> {
        if self.operator.is_some() {
            return Err(unexpected(&token));
        }
        if self.values.is_empty() {
            return Err(RuleError::syntax_at(
                format!("Incomplete expression for token \"{}\"", token.raw),
                token.location,
            ));
        }
        let Some(op) = ComparisonOp::from_kind(token.kind) else {
            return Err(unknown_token(&token));
        };
        self.operator = Some((op, token));
        self.operator_required = false;
        Ok(())
    }

    /// Evaluates the buffered comparison once it has both operands.
    fn reduce(&mut self) -> Result<(), RuleError> {
        if self.values.len() != 2 {
            return Ok(());
        }
        let Some((op, token)) = self.operator.take() else {
            return Ok(());
        };

        let predicate = evaluator::predicate_for(op);
        let result = predicate(&self.values[0], &self.values[1])?;
        log::trace!(
            "{} {} {} -> {}",
            self.values[0],
            token.raw,
            self.values[1],
            result
        );

        self.values.clear();
        self.operator_required = true;
        self.push_operand(BoolExpr::Leaf(result));
        Ok(())
    }

    fn push_logical(&mut self, token: Token) -> Result<(), RuleError> {
        // Only a finished comparison or group may precede a connective
        if !self.operator_required || !self.values.is_empty() {
            return Err(unexpected(&token));
        }
        let Some(connective) = Connective::from_kind(token.kind) else {
            return Err(unknown_token(&token));
        };
        if let Some(frame) = self.frames.last_mut() {
            frame.pending = Some(connective);
        }
        self.incomplete_condition = true;
        self.operator_required = false;
        Ok(())
    }

    fn open_group(&mut self, token: Token) -> Result<(), RuleError> {
        if self.operator_required || !self.values.is_empty() {
            return Err(RuleError::syntax_at("Unexpected token \"(\"", token.location));
        }
        if self.frames.len() > self.max_depth {
            return Err(RuleError::syntax_at(
                format!("Maximum nesting depth of {} exceeded", self.max_depth),
                token.location,
            ));
        }
        self.open_parens += 1;
        self.frames.push(Frame::default());
        Ok(())
    }

    fn close_group(&mut self, token: Token) -> Result<(), RuleError> {
        if self.closed_parens >= self.open_parens {
            return Err(RuleError::syntax_at(
                "Missing opening parenthesis",
                token.location,
            ));
        }
        if self.operator.is_some() || !self.values.is_empty() {
            return Err(RuleError::syntax_at("Incomplete expression", token.location));
        }
        if self.incomplete_condition {
            return Err(RuleError::syntax_at(
                "Incomplete and/or condition",
                token.location,
            ));
        }

        let inner = self.frames.pop().and_then(|frame| frame.expr);
        let Some(inner) = inner else {
            return Err(unexpected(&token));
        };
        self.closed_parens += 1;
        self.push_operand(BoolExpr::Group(Box::new(inner)));
        Ok(())
    }

    fn push_operand(&mut self, operand: BoolExpr) {
        let Some(frame) = self.frames.last_mut() else {
            return;
        };
        frame.expr = Some(match (frame.expr.take(), frame.pending.take()) {
            (Some(left), Some(op)) => left.join(op, operand),
            _ => operand,
        });
    }

    fn finish(mut self) -> Result<BoolExpr, RuleError> {
        if self.incomplete_condition {
            return Err(RuleError::syntax("Incomplete and/or condition"));
        }
        if self.open_parens > self.closed_parens {
            return Err(RuleError::syntax("Missing closing parenthesis"));
        }
        if self.operator.is_some() || !self.values.is_empty() {
            return Err(RuleError::syntax("Incomplete expression"));
        }
        Ok(self
            .frames
            .pop()
            .and_then(|frame| frame.expr)
            .unwrap_or(BoolExpr::Empty))
    }
}

fn unknown_token(token: &Token) -> RuleError {
    RuleError::syntax_at(format!("Unknown token \"{}\"", token.raw), token.location)
}

fn unexpected(token: &Token) -> RuleError {
    RuleError::syntax_at(format!("Unexpected \"{}\"", token.raw), token.location)
}
