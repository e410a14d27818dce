//! Rule evaluation entry points.
//!
//! An [`Engine`] owns the grammar table, the call registry and the limits.
//! Registration takes `&mut self`, so an engine cannot be extended while
//! evaluations borrow it; once set up it can be shared across threads.
//!
//! ```
//! use rule_lang::{Bindings, Engine};
//!
//! let bindings: Bindings = [("COUNTRY", "MA"), ("TOTALAMOUNT", "50001")]
//!     .into_iter()
//!     .collect();
//! let engine = Engine::new();
//! assert!(engine.evaluate(r#"country == "MA" && totalamount > 50000"#, &bindings).unwrap());
//! ```

use std::sync::OnceLock;

use crate::{
    ast::{BoolExpr, TokenKind},
    bindings::Bindings,
    config::EngineConfig,
    error::RuleError,
    evaluator,
    functions::{Callable, Registry},
    grammar::Grammar,
    lexer::Lexer,
    parser::Parser,
    resolver::Resolver,
    stream::TokenStream,
};

#[derive(Debug, Clone)]
pub struct Engine {
    grammar: Grammar,
    registry: Registry,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// JavaScript-flavoured grammar with the built-in functions and methods.
    pub fn new() -> Self {
        Engine::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Engine {
            grammar: Grammar::javascript(),
            registry: Registry::javascript(),
            config,
        }
    }

    /// Process-wide engine with the default configuration.
    pub fn shared() -> &'static Engine {
        static SHARED: OnceLock<Engine> = OnceLock::new();
        SHARED.get_or_init(Engine::new)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Lexes `text` without resolving or parsing it.
    pub fn tokenize(&self, text: &str) -> TokenStream {
        Lexer::new(&self.grammar, text).tokenize()
    }

    /// Runs the pipeline up to the boolean tree.
    pub fn parse(&self, text: &str, bindings: &Bindings) -> Result<BoolExpr, RuleError> {
        let limits = &self.config.limits;
        if text.len() > limits.max_rule_length {
            return Err(RuleError::LimitExceeded(format!(
                "Rule is {} bytes long, the maximum is {}",
                text.len(),
                limits.max_rule_length
            )));
        }

        let resolver = Resolver::new(self.tokenize(text), bindings, &self.registry)
            .with_max_depth(limits.max_nesting_depth);
        Parser::new(limits.max_nesting_depth).parse(resolver)
    }

    pub fn evaluate(&self, text: &str, bindings: &Bindings) -> Result<bool, RuleError> {
        let expr = self.parse(text, bindings)?;
        let verdict = evaluator::evaluate(&expr);
        log::debug!("rule {:?} reduced to {:?} -> {}", text, expr.to_string(), verdict);
        Ok(verdict)
    }

    /// Whether `text` parses with `bindings`; the error itself is discarded.
    pub fn is_valid(&self, text: &str, bindings: &Bindings) -> bool {
        match self.parse(text, bindings) {
            Ok(_) => true,
            Err(e) => {
                log::debug!("rule {:?} is invalid: {}", text, e);
                false
            }
        }
    }

    /// Adds a token pattern under a kind name such as `"equal"` or `"variable"`.
    ///
    /// ```
    /// use rule_lang::{Bindings, Engine};
    ///
    /// let mut engine = Engine::new();
    /// engine.register_token("equal", r"equals\b", 116).unwrap();
    /// assert!(engine.evaluate("2 equals 2", &Bindings::new()).unwrap());
    /// ```
    pub fn register_token(
        &mut self,
        name: &str,
        pattern: &str,
        priority: i32,
    ) -> Result<(), RuleError> {
        let kind = TokenKind::from_name(name).ok_or_else(|| RuleError::InvalidPattern {
            kind: name.to_string(),
            message: "unknown token type".to_string(),
        })?;
        self.grammar.register(kind, pattern, priority)
    }

    pub fn register_function(&mut self, name: &str, callable: impl Callable + 'static) {
        self.registry.register_function(name, callable);
    }

    pub fn register_method(&mut self, name: &str, callable: impl Callable + 'static) {
        self.registry.register_method(name, callable);
    }
}

/// A rule text bound to its variables.
///
/// A successful [`is_valid`](Rule::is_valid) keeps the parsed tree, so a
/// following [`is_true`](Rule::is_true) does not parse again.
pub struct Rule<'e> {
    text: String,
    bindings: Bindings,
    engine: &'e Engine,
    parsed: Option<BoolExpr>,
    error: Option<RuleError>,
}

impl Rule<'static> {
    /// Rule evaluated by [`Engine::shared`].
    pub fn new(text: impl Into<String>, bindings: Bindings) -> Self {
        Rule::with_engine(Engine::shared(), text, bindings)
    }
}

impl<'e> Rule<'e> {
    pub fn with_engine(engine: &'e Engine, text: impl Into<String>, bindings: Bindings) -> Self {
        Rule {
            text: text.into(),
            bindings,
            engine,
            parsed: None,
            error: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_true(&mut self) -> Result<bool, RuleError> {
        if self.parsed.is_none() {
            self.parsed = Some(self.engine.parse(&self.text, &self.bindings)?);
        }
        Ok(self.parsed.as_ref().is_some_and(evaluator::evaluate))
    }

    pub fn is_false(&mut self) -> Result<bool, RuleError> {
        self.is_true().map(|verdict| !verdict)
    }

    /// Parses the rule, keeping the tree on success and the error on failure.
    pub fn is_valid(&mut self) -> bool {
        match self.engine.parse(&self.text, &self.bindings) {
            Ok(expr) => {
                self.parsed = Some(expr);
                self.error = None;
                true
            }
            Err(e) => {
                log::debug!("rule {:?} is invalid: {}", self.text, e);
                self.parsed = None;
                self.error = Some(e);
                false
            }
        }
    }

    /// Message of the last validation error, empty when there is none.
    pub fn error(&self) -> String {
        self.error.as_ref().map(|e| e.to_string()).unwrap_or_default()
    }

    pub fn last_error(&self) -> Option<&RuleError> {
        self.error.as_ref()
    }
}
