//! JSON -> rule value conversion

use crate::{Bindings, Value};

use super::CliError;

/// Convert serde_json::Value to a rule Value. Objects have no rule counterpart.
pub fn json_to_value(v: serde_json::Value) -> Result<Value, CliError> {
    let value = match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(
            arr.into_iter()
                .map(json_to_value)
                .collect::<Result<_, _>>()?,
        ),
        serde_json::Value::Object(_) => return Err(CliError::UnsupportedValue("object")),
    };
    Ok(value)
}

/// Parse a JSON object of variables into bindings
pub fn json_to_bindings(json: &str) -> Result<Bindings, CliError> {
    match serde_json::from_str(json)? {
        serde_json::Value::Object(obj) => {
            let mut bindings = Bindings::new();
            for (name, value) in obj {
                bindings.insert(&name, json_to_value(value)?);
            }
            Ok(bindings)
        }
        _ => Err(CliError::BindingsNotObject),
    }
}
