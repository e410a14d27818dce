use std::collections::HashMap;

use crate::value::Value;

/// Variable bindings for one evaluation.
///
/// Names are case-insensitive: they are stored and looked up in upper case,
/// so `totalamount` in a rule finds a `TOTALAMOUNT` binding. Upper-casing
/// uses Unicode rules and is not locale-aware.
///
/// # Examples
///
/// ```
/// use rule_lang::{Bindings, Value};
///
/// let mut bindings = Bindings::new();
/// bindings.insert("TotalAmount", -1);
/// assert_eq!(bindings.get("TOTALAMOUNT"), Some(&Value::Integer(-1)));
/// assert!(bindings.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    vars: HashMap<String, Value>,
}

/// Canonical form of a variable name
pub fn normalize_name(name: &str) -> String {
    name.to_uppercase()
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, replacing any binding that differs only in case.
    pub fn insert(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.vars.insert(normalize_name(name), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(&normalize_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for (name, value) in iter {
            bindings.insert(name.as_ref(), value);
        }
        bindings
    }
}

impl From<HashMap<String, Value>> for Bindings {
    fn from(map: HashMap<String, Value>) -> Self {
        map.into_iter().collect()
    }
}
