//! Built-in free functions.

use std::sync::LazyLock;

use regex::Regex;

use super::{Registry, arg, to_integer};
use crate::error::CallError;
use crate::value::Value;

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("float prefix pattern is valid")
});

pub(super) fn register_all(registry: &mut Registry) {
    registry.register_function("parseInt", parse_int);
    registry.register_function("parseFloat", parse_float);
}

/// parseInt(value, radix) - leading integer of the string form, NaN when there is none
fn parse_int(_receiver: Option<&Value>, args: &[Value]) -> Result<Value, CallError> {
    let text = arg(args, 0).to_js_string();
    let mut rest = text.trim_start();

    let negative = rest.starts_with('-');
    rest = rest.strip_prefix(['-', '+']).unwrap_or(rest);

    let mut radix = match arg(args, 1) {
        Value::Undefined => 10,
        r => to_integer(r) as u32,
    };
    if radix == 0 {
        radix = 10;
    }
    if radix == 16 || args.len() < 2 {
        if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
            rest = hex;
            radix = 16;
        }
    }
    if !(2..=36).contains(&radix) {
        return Ok(Value::Float(f64::NAN));
    }

    let digits: String = rest.chars().take_while(|c| c.is_digit(radix)).collect();
    if digits.is_empty() {
        return Ok(Value::Float(f64::NAN));
    }

    let value = match i64::from_str_radix(&digits, radix) {
        Ok(n) => Value::Integer(if negative { -n } else { n }),
        Err(_) => {
            let n = digits
                .chars()
                .filter_map(|c| c.to_digit(radix))
                .fold(0f64, |acc, d| acc * radix as f64 + d as f64);
            Value::Float(if negative { -n } else { n })
        }
    };
    Ok(value)
}

/// parseFloat(value) - leading decimal number of the string form, NaN when there is none
fn parse_float(_receiver: Option<&Value>, args: &[Value]) -> Result<Value, CallError> {
    let text = arg(args, 0).to_js_string();
    let parsed = FLOAT_PREFIX
        .find(text.trim_start())
        .map(|m| match m.as_str().trim_start_matches('+') {
            "Infinity" => f64::INFINITY,
            "-Infinity" => f64::NEG_INFINITY,
            number => number.parse::<f64>().unwrap_or(f64::NAN),
        })
        .unwrap_or(f64::NAN);
    Ok(Value::Float(parsed))
}
