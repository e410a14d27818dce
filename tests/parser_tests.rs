// tests/parser_tests.rs

use rule_lang::{Bindings, BoolExpr, Engine, RuleError, Value};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn bindings(pairs: Vec<(&str, Value)>) -> Bindings {
    pairs.into_iter().collect()
}

fn algebra(rule: &str, vars: Vec<(&str, Value)>) -> String {
    init_logger();
    Engine::new()
        .parse(rule, &bindings(vars))
        .map(|expr| expr.to_string())
        .unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", rule, e))
}

fn parse_error(rule: &str, vars: Vec<(&str, Value)>) -> String {
    init_logger();
    match Engine::new().parse(rule, &bindings(vars)) {
        Ok(expr) => panic!("Expected {:?} to fail, got {}", rule, expr),
        Err(e) => e.to_string(),
    }
}

// ============================================================================
// Boolean Algebra Output
// ============================================================================

#[test]
fn test_comparisons_reduce_to_digits() {
    let test_cases = vec![
        ("1 = 1", "1"),
        ("1 = 2", "0"),
        ("1 = 1 && 2 = 2", "1&1"),
        ("1 = 1 and 2 = 3 or 3 = 3", "1&0|1"),
        ("(1 = 1)", "(1)"),
        ("1 = 2 || (2 = 2 && (3 = 4))", "0|(1&(0))"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(algebra(input, vec![]), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_ignorable_tokens_do_not_change_output() {
    let rule = "  1 /* a */ =\n 1 // trailing\n  && # hash\n 2 = 2";
    assert_eq!(algebra(rule, vec![]), "1&1");
}

#[test]
fn test_empty_rules() {
    init_logger();
    let engine = Engine::new();
    for rule in ["", "   ", "// only a comment", "\n\n"] {
        assert_eq!(engine.parse(rule, &Bindings::new()).unwrap(), BoolExpr::Empty);
    }
}

#[test]
fn test_variables_feed_comparisons() {
    let vars = vec![("COUNTRY", Value::from("MA")), ("TOTAL", Value::Integer(10))];
    assert_eq!(algebra(r#"country = "MA" && total > 5"#, vars), "1&1");
}

// ============================================================================
// Syntax Errors With Positions
// ============================================================================

#[test]
fn test_positioned_syntax_errors() {
    let test_cases = vec![
        (
            "(totalamount is not 3) ()",
            r#"Unexpected token "(" at position 23 on line 1"#,
        ),
        (
            r#"country is "EMD" and currency is "EUR" not"#,
            "Missing operator at position 39 on line 1",
        ),
        (r#"country is is "EMD""#, r#"Unexpected "is" at position 11 on line 1"#),
        (r#"country is = "EMD""#, r#"Unexpected "=" at position 11 on line 1"#),
        (
            r#"is "EMD""#,
            r#"Incomplete expression for token "is" at position 0 on line 1"#,
        ),
        (
            "TOTALAMOUNT = -1 TOTALAMOUNT > 10",
            "Missing operator at position 17 on line 1",
        ),
        (
            r#"customercode = 2951356 CUSTOMERCODE=="2951356""#,
            "Missing operator at position 23 on line 1",
        ),
        ("1 = 1)", "Missing opening parenthesis at position 5 on line 1"),
        ("1 = 1 && -foo = 1", r#"Unknown token "-" at position 9 on line 1"#),
        (
            r#"COUNTRY == "MA" && and"#,
            r#"Unexpected "and" at position 19 on line 1"#,
        ),
        (r#"COUNTRY == "MA" ^"#, r#"Unknown token "^" at position 16 on line 1"#),
        ("1 = 1 ,", r#"Unknown token "," at position 6 on line 1"#),
    ];

    let vars = || {
        vec![
            ("TOTALAMOUNT", Value::from("-1")),
            ("COUNTRY", Value::from("GLF")),
            ("CURRENCY", Value::from("USD")),
            ("CUSTOMERCODE", Value::from("12347")),
            ("FOO", Value::Integer(1)),
        ]
    };

    for (input, expected) in test_cases {
        assert_eq!(parse_error(input, vars()), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_end_of_input_errors() {
    let test_cases = vec![
        ("(1 = 1", "Missing closing parenthesis"),
        (r#"COUNTRY == "MA" &&"#, "Incomplete and/or condition"),
        ("1 is 1 and COUNTRY", "Incomplete expression"),
        ("1 =", "Incomplete expression"),
        ("((1 = 1) && 2 = 2 ||", "Incomplete and/or condition"),
    ];

    for (input, expected) in test_cases {
        let message = parse_error(input, vec![("COUNTRY", Value::from("MA"))]);
        assert_eq!(message, expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_undefined_variable_positions() {
    let rule = " // new line on purpose\n            foo = \"MA\"";
    assert_eq!(
        parse_error(rule, vec![]),
        r#"Undefined variable "FOO" at position 12 on line 2"#
    );
    assert_eq!(
        parse_error(r#"COUNTRY=="MA""#, vec![]),
        r#"Undefined variable "COUNTRY" at position 0 on line 1"#
    );
}

// ============================================================================
// Call Syntax Errors
// ============================================================================

#[test]
fn test_argument_list_errors() {
    let test_cases = vec![
        (r#""foo".charAt(1 2 ) === "b""#, "Unexpected value at position 15 on line 1"),
        (r#""foo".charAt(1 , ) === "b""#, r#"Unexpected token "," at position 17 on line 1"#),
        (r#""foo".charAt(1 , , ) === "b""#, r#"Unexpected token "," at position 17 on line 1"#),
        (r#""foo".charAt(1 , < , ) === "b""#, r#"Unexpected token "<" at position 17 on line 1"#),
        (r#""foo".charAt(1 , "#, r#"Unexpected end of string. Expected ")""#),
        (r#"[1, 2 === [1, 2]"#, r#"Unexpected token "===" at position 6 on line 1"#),
        (r#"[1, 2"#, r#"Unexpected end of string. Expected "]""#),
        (
            r#"/^foo$/.teddst("foo") === true"#,
            "undefined is not a function at position 7 on line 1",
        ),
        (
            r#"nothing("foo") === true"#,
            "undefined is not a function at position 0 on line 1",
        ),
    ];

    for (input, expected) in test_cases {
        assert_eq!(parse_error(input, vec![]), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_error_variants() {
    init_logger();
    let engine = Engine::new();
    let empty = Bindings::new();

    assert!(matches!(
        engine.parse("foo = 1", &empty),
        Err(RuleError::UndefinedVariable { ref name, .. }) if name == "FOO"
    ));
    assert!(matches!(
        engine.parse("nope() = 1", &empty),
        Err(RuleError::UndefinedFunction { ref name, .. }) if name == "nope"
    ));
    assert!(matches!(
        engine.parse(r#""a".nope() = 1"#, &empty),
        Err(RuleError::UndefinedMethod { ref name, .. }) if name == "nope"
    ));
    assert!(matches!(
        engine.parse(r#""a" in "b""#, &empty),
        Err(RuleError::Type { .. })
    ));
    assert!(matches!(engine.parse("(1 = 1", &empty), Err(RuleError::Syntax { location: None, .. })));

    let err = engine.parse("1 = 1 && ^", &empty).unwrap_err();
    let location = err.location().unwrap();
    assert_eq!((location.offset, location.position, location.line), (9, 9, 1));
}
