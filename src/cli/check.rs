//! Evaluate rules against JSON variables

use crate::{Bindings, Engine, EngineConfig, Token, TokenKind, Value};

use super::{CliError, json_to_bindings};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The rule to evaluate
    pub rule: String,
    /// JSON object of variables
    pub vars: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
    /// Print the boolean algebra next to the verdict
    pub explain: bool,
    pub config: EngineConfig,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Rule evaluated
    Verdict(bool),
    /// Rule evaluated, with the algebra it reduced to
    Explained { algebra: String, verdict: bool },
}

/// Execute a rule check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let engine = Engine::with_config(options.config.clone());
    let mut bindings = match &options.vars {
        Some(json) => json_to_bindings(json)?,
        None => Bindings::new(),
    };

    if options.syntax_only {
        // Unbound variables only need to exist for the structure to be checked
        for token in engine.tokenize(&options.rule).tokens() {
            if token.kind == TokenKind::Variable && !bindings.contains(&token.raw) {
                bindings.insert(&token.raw, Value::Undefined);
            }
        }
        engine.parse(&options.rule, &bindings)?;
        return Ok(CheckResult::SyntaxValid);
    }

    if options.vars.is_none() {
        return Err(CliError::NoInput);
    }

    let expr = engine.parse(&options.rule, &bindings)?;
    let verdict = crate::evaluate(&expr);
    if options.explain {
        Ok(CheckResult::Explained {
            algebra: expr.to_string(),
            verdict,
        })
    } else {
        Ok(CheckResult::Verdict(verdict))
    }
}

/// Lex a rule and describe every token, one per line
pub fn execute_tokens(rule: &str, config: &EngineConfig) -> Vec<String> {
    let engine = Engine::with_config(config.clone());
    engine
        .tokenize(rule)
        .tokens()
        .iter()
        .map(describe_token)
        .collect()
}

fn describe_token(token: &Token) -> String {
    format!(
        "{:<20} {:<24} offset {} line {} position {}",
        token.kind.name(),
        format!("{:?}", token.raw),
        token.location.offset,
        token.location.line,
        token.location.position
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(rule: &str, vars: Option<&str>) -> CheckOptions {
        CheckOptions {
            rule: rule.to_string(),
            vars: vars.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_verdicts() {
        let result = execute_check(&options("total > 10", Some(r#"{"TOTAL": 11}"#))).unwrap();
        assert_eq!(result, CheckResult::Verdict(true));

        let mut explained = options("(a = 1 || a = 2) && a = 3", Some(r#"{"a": 1}"#));
        explained.explain = true;
        assert_eq!(
            execute_check(&explained).unwrap(),
            CheckResult::Explained {
                algebra: "(1|0)&0".to_string(),
                verdict: false
            }
        );
    }

    #[test]
    fn test_syntax_only_binds_placeholders() {
        let mut check = options(r#"country == "MA" && amount > 3"#, None);
        check.syntax_only = true;
        assert_eq!(execute_check(&check).unwrap(), CheckResult::SyntaxValid);

        check.rule = "country == ".to_string();
        assert!(matches!(execute_check(&check), Err(CliError::Rule(_))));
    }

    #[test]
    fn test_missing_vars() {
        assert!(matches!(execute_check(&options("1 = 1", None)), Err(CliError::NoInput)));
    }

    #[test]
    fn test_tokens_listing() {
        let lines = execute_tokens("a\n= 1", &EngineConfig::default());
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("variable"));
        assert!(lines[2].contains("line 2 position 0"));
    }
}
