//! Built-in string, array and regex methods.

use super::{Registry, arg, to_integer};
use crate::error::CallError;
use crate::value::Value;

pub(super) fn register_all(registry: &mut Registry) {
    registry.register_method("charAt", char_at);
    registry.register_method("concat", concat);
    registry.register_method("endsWith", ends_with);
    registry.register_method("indexOf", index_of);
    registry.register_method("join", join);
    registry.register_method("replace", replace);
    registry.register_method("split", split);
    registry.register_method("startsWith", starts_with);
    registry.register_method("substr", substr);
    registry.register_method("test", test);
    registry.register_method("toLowerCase", to_lower_case);
    registry.register_method("toUpperCase", to_upper_case);
    registry.register_method("trim", trim);
}

fn not_a_function(receiver: Option<&Value>, method: &str) -> CallError {
    CallError::NotAFunction {
        receiver: receiver.map(|v| v.to_string()).unwrap_or_else(|| "undefined".into()),
        method: method.to_string(),
    }
}

fn string_receiver<'a>(receiver: Option<&'a Value>, method: &str) -> Result<&'a str, CallError> {
    match receiver {
        Some(Value::String(s)) => Ok(s),
        other => Err(not_a_function(other, method)),
    }
}

/// Clamps a possibly negative index into `0..=len`, counting negatives from the end.
fn relative_index(index: i64, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs() as usize)
    } else {
        (index as usize).min(len)
    }
}

/// .charAt(index) - character at index, or "" when out of range
fn char_at(receiver: Option<&Value>, args: &[Value]) -> Result<Value, CallError> {
    let s = string_receiver(receiver, "charAt")?;
    let index = to_integer(arg(args, 0));
    let ch = usize::try_from(index)
        .ok()
        .and_then(|i| s.chars().nth(i))
        .map(String::from)
        .unwrap_or_default();
    Ok(Value::String(ch))
}

/// .concat(...values) - string concatenation, or array concatenation on arrays
fn concat(receiver: Option<&Value>, args: &[Value]) -> Result<Value, CallError> {
    match receiver {
        Some(Value::String(s)) => {
            let mut result = s.clone();
            for value in args {
                result.push_str(&value.to_js_string());
            }
            Ok(Value::String(result))
        }
        Some(Value::Array(items)) => {
            let mut result = items.clone();
            for value in args {
                match value {
                    Value::Array(more) => result.extend(more.iter().cloned()),
                    other => result.push(other.clone()),
                }
            }
            Ok(Value::Array(result))
        }
        other => Err(not_a_function(other, "concat")),
    }
}

/// .indexOf(needle, from) - position of the first occurrence, -1 when absent
fn index_of(receiver: Option<&Value>, args: &[Value]) -> Result<Value, CallError> {
    let from = to_integer(arg(args, 1));
    match receiver {
        Some(Value::String(s)) => {
            let chars: Vec<char> = s.chars().collect();
            let needle: Vec<char> = arg(args, 0).to_js_string().chars().collect();
            let start = relative_index(from.max(0), chars.len());
            let found = (start..=chars.len())
                .find(|&i| chars[i..].starts_with(&needle))
                .map(|i| i as i64)
                .unwrap_or(-1);
            Ok(Value::Integer(found))
        }
        Some(Value::Array(items)) => {
            let needle = arg(args, 0);
            let start = relative_index(from, items.len());
            let found = items[start..]
                .iter()
                .position(|v| v.strict_eq(needle))
                .map(|i| (i + start) as i64)
                .unwrap_or(-1);
            Ok(Value::Integer(found))
        }
        other => Err(not_a_function(other, "indexOf")),
    }
}

/// .join(glue) - array elements joined by glue (default ",")
fn join(receiver: Option<&Value>, args: &[Value]) -> Result<Value, CallError> {
    let items = match receiver {
        Some(Value::Array(items)) => items,
        other => return Err(not_a_function(other, "join")),
    };
    let glue = match arg(args, 0) {
        Value::Undefined => ",".to_string(),
        glue => glue.to_js_string(),
    };
    let joined = items
        .iter()
        .map(|v| if v.is_nullish() { String::new() } else { v.to_js_string() })
        .collect::<Vec<_>>()
        .join(&glue);
    Ok(Value::String(joined))
}

/// .replace(search, replacement) - first match, or every match for a /g regex
fn replace(receiver: Option<&Value>, args: &[Value]) -> Result<Value, CallError> {
    let s = string_receiver(receiver, "replace")?;
    if args.is_empty() {
        return Ok(Value::String(s.to_string()));
    }
    let replacement = arg(args, 1).to_js_string();

    let result = match &args[0] {
        Value::Regex(literal) => {
            let re = literal.compile()?;
            let limit = if literal.is_global() { 0 } else { 1 };
            if re.captures_len() > 1 {
                re.replacen(s, limit, replacement.as_str()).into_owned()
            } else {
                re.replacen(s, limit, regex::NoExpand(&replacement)).into_owned()
            }
        }
        search => s.replacen(&search.to_js_string(), &replacement, 1),
    };
    Ok(Value::String(result))
}

/// .split(separator, limit) - string pieces; a regex separator is allowed
fn split(receiver: Option<&Value>, args: &[Value]) -> Result<Value, CallError> {
    let s = string_receiver(receiver, "split")?;
    let mut parts: Vec<String> = match arg(args, 0) {
        Value::Undefined => vec![s.to_string()],
        Value::Regex(literal) => literal.compile()?.split(s).map(String::from).collect(),
        separator => {
            let separator = separator.to_js_string();
            if separator.is_empty() {
                s.chars().map(String::from).collect()
            } else {
                s.split(separator.as_str()).map(String::from).collect()
            }
        }
    };
    if let limit @ (Value::Integer(_) | Value::Float(_) | Value::String(_)) = arg(args, 1) {
        parts.truncate(to_integer(limit).max(0) as usize);
    }
    Ok(Value::Array(parts.into_iter().map(Value::String).collect()))
}

/// .startsWith(search, position)
fn starts_with(receiver: Option<&Value>, args: &[Value]) -> Result<Value, CallError> {
    let s = string_receiver(receiver, "startsWith")?;
    let chars: Vec<char> = s.chars().collect();
    let start = relative_index(to_integer(arg(args, 1)).max(0), chars.len());
    let rest: String = chars[start..].iter().collect();
    Ok(Value::Boolean(rest.starts_with(&arg(args, 0).to_js_string())))
}

/// .endsWith(search, length)
fn ends_with(receiver: Option<&Value>, args: &[Value]) -> Result<Value, CallError> {
    let s = string_receiver(receiver, "endsWith")?;
    let chars: Vec<char> = s.chars().collect();
    let end = match arg(args, 1) {
        Value::Undefined => chars.len(),
        length => relative_index(to_integer(length).max(0), chars.len()),
    };
    let head: String = chars[..end].iter().collect();
    Ok(Value::Boolean(head.ends_with(&arg(args, 0).to_js_string())))
}

/// .substr(start, length) - negative start counts from the end
fn substr(receiver: Option<&Value>, args: &[Value]) -> Result<Value, CallError> {
    let s = string_receiver(receiver, "substr")?;
    let chars: Vec<char> = s.chars().collect();
    let start = relative_index(to_integer(arg(args, 0)), chars.len());
    let length = match arg(args, 1) {
        Value::Undefined => chars.len(),
        length => to_integer(length).max(0) as usize,
    };
    let end = start.saturating_add(length).min(chars.len());
    Ok(Value::String(chars[start..end].iter().collect()))
}

/// /regex/.test(subject) - whether the subject matches; false without a subject
fn test(receiver: Option<&Value>, args: &[Value]) -> Result<Value, CallError> {
    let literal = match receiver {
        Some(Value::Regex(literal)) => literal,
        other => return Err(not_a_function(other, "test")),
    };
    let subject = match args.first() {
        Some(subject) => subject.to_js_string(),
        None => return Ok(Value::Boolean(false)),
    };
    Ok(Value::Boolean(literal.compile()?.is_match(&subject)))
}

fn to_lower_case(receiver: Option<&Value>, _args: &[Value]) -> Result<Value, CallError> {
    Ok(Value::String(string_receiver(receiver, "toLowerCase")?.to_lowercase()))
}

fn to_upper_case(receiver: Option<&Value>, _args: &[Value]) -> Result<Value, CallError> {
    Ok(Value::String(string_receiver(receiver, "toUpperCase")?.to_uppercase()))
}

fn trim(receiver: Option<&Value>, _args: &[Value]) -> Result<Value, CallError> {
    Ok(Value::String(string_receiver(receiver, "trim")?.trim().to_string()))
}
