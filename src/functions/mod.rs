//! Call registry for methods (`"a,b".split(",")`) and free functions
//! (`parseInt("42")`).
//!
//! Built-ins and user extensions implement the same [`Callable`] capability
//! and are looked up by name; an unknown name surfaces as
//! `undefined is not a function` at the call site.

mod globals;
mod methods;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::CallError;
use crate::value::Value;

/// Anything invokable from a rule.
///
/// Methods receive their receiver value; free functions receive `None`.
/// Closures with the matching signature implement this trait:
///
/// ```
/// use rule_lang::{CallError, Registry, Value};
///
/// let mut registry = Registry::javascript();
/// registry.register_function("double", |_: Option<&Value>, args: &[Value]| {
///     match args.first() {
///         Some(Value::Integer(n)) => Ok(Value::Integer(n * 2)),
///         _ => Err(CallError::Type("double() expects an integer".into())),
///     }
/// });
/// assert!(registry.function("double").is_some());
/// ```
pub trait Callable: Send + Sync {
    fn call(&self, receiver: Option<&Value>, args: &[Value]) -> Result<Value, CallError>;
}

impl<F> Callable for F
where
    F: Fn(Option<&Value>, &[Value]) -> Result<Value, CallError> + Send + Sync,
{
    fn call(&self, receiver: Option<&Value>, args: &[Value]) -> Result<Value, CallError> {
        self(receiver, args)
    }
}

/// Name → callable tables for methods and functions.
#[derive(Clone, Default)]
pub struct Registry {
    methods: HashMap<String, Arc<dyn Callable>>,
    functions: HashMap<String, Arc<dyn Callable>>,
}

impl Registry {
    /// Registry without any callables
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding the JavaScript built-ins.
    pub fn javascript() -> Self {
        let mut registry = Registry::empty();
        methods::register_all(&mut registry);
        globals::register_all(&mut registry);
        registry
    }

    /// Adds or replaces a method.
    pub fn register_method(&mut self, name: &str, callable: impl Callable + 'static) {
        log::debug!("registered method {}", name);
        self.methods.insert(name.to_string(), Arc::new(callable));
    }

    /// Adds or replaces a free function.
    pub fn register_function(&mut self, name: &str, callable: impl Callable + 'static) {
        log::debug!("registered function {}", name);
        self.functions.insert(name.to_string(), Arc::new(callable));
    }

    pub fn method(&self, name: &str) -> Option<&dyn Callable> {
        self.methods.get(name).map(|c| c.as_ref())
    }

    pub fn function(&self, name: &str) -> Option<&dyn Callable> {
        self.functions.get(name).map(|c| c.as_ref())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&String> = self.methods.keys().collect();
        let mut functions: Vec<&String> = self.functions.keys().collect();
        methods.sort();
        functions.sort();
        f.debug_struct("Registry")
            .field("methods", &methods)
            .field("functions", &functions)
            .finish()
    }
}

static UNDEFINED: Value = Value::Undefined;

/// Argument `index`, or `undefined` when it was omitted.
fn arg(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&UNDEFINED)
}

/// JavaScript `ToIntegerOrInfinity`: `NaN` becomes 0, fractions truncate.
fn to_integer(value: &Value) -> i64 {
    let n = value.to_number();
    if n.is_nan() {
        0
    } else {
        n.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64
    }
}
