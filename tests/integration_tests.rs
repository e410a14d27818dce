use rule_lang::{Bindings, CallError, Engine, Rule, RuleError, Value};

fn eval(rule: &str, vars: Vec<(&str, Value)>) -> Result<bool, String> {
    let bindings: Bindings = vars.into_iter().collect();
    Engine::shared()
        .evaluate(rule, &bindings)
        .map_err(|e| e.to_string())
}

fn is_true(rule: &str) -> bool {
    eval(rule, vec![]).unwrap()
}

fn order() -> Vec<(&'static str, Value)> {
    vec![
        ("COUNTRY", Value::from("MA")),
        ("CURRENCY", Value::from("EGP")),
        ("TOTALAMOUNT", Value::from("50001")),
    ]
}

// ============================================================================
// Business Rules
// ============================================================================

#[test]
fn test_multiple_ands() {
    let rule = r#"COUNTRY=="MA" and CURRENCY=="EGP" && TOTALAMOUNT>50000"#;
    assert!(eval(rule, order()).unwrap());

    let rule = r#"COUNTRY = "EG" and CURRENCY=="EGP" && TOTALAMOUNT>50000"#;
    assert!(!eval(rule, order()).unwrap());

    let rule = r#"((COUNTRY=="EG") and (CURRENCY=="EGP") && (TOTALAMOUNT>50000))"#;
    assert!(!eval(rule, order()).unwrap());
}

#[test]
fn test_mixed_ors_and_ands() {
    let rule = r#"
        COUNTRY=="MA" and
        CURRENCY=="EGP" && (
        TOTALAMOUNT>50000 ||
        TOTALAMOUNT == 0)"#;
    assert!(eval(rule, order()).unwrap());
}

#[test]
fn test_null_variable_does_not_fail() {
    let rule = r#"COUNTRY == "EMD" && (PAYMENTCONDITION == "L000" || PAYMENTCONDITION=="L002"
        || PAYMENTCONDITION=="LM18" || PAYMENTCONDITION=="LM19" || PAYMENTCONDITION=="LM20")
        && (OFFERTYPE=="ZNOR" || OFFERTYPE=="ZNOD" || OFFERTYPE=="ZNOP")"#;
    let vars = vec![
        ("PAYMENTCONDITION", Value::from("LM18")),
        ("COUNTRY", Value::from("EMD")),
        ("OFFERTYPE", Value::Null),
    ];
    assert!(!eval(rule, vars).unwrap());
}

#[test]
fn test_long_rule() {
    let rule = r#"
        COUNTRY=="SA" && (CUSTOMERCODE=="0002950182" ||
        CUSTOMERCODE=="100130" || CUSTOMERCODE=="100143" ||
        CUSTOMERCODE=="100149" || CUSTOMERCODE=="0002951129" ||
        CUSTOMERCODE=="0002950746" || CUSTOMERCODE=="0002950747" ||
        CUSTOMERCODE=="0002950748" || CUSTOMERCODE=="0002950749" ||
        CUSTOMERCODE=="100392" || CUSTOMERCODE=="0002950751" ||
        CUSTOMERCODE=="0002950897" || CUSTOMERCODE=="100208" ||
        CUSTOMERCODE=="0002951140" || CUSTOMERCODE=="100209") &&
        ISDISCOUNT==1"#;
    let vars = |discount: &str| {
        vec![
            ("COUNTRY", Value::from("SA")),
            ("CUSTOMERCODE", Value::from("0002950751")),
            ("ISDISCOUNT", Value::from(discount)),
        ]
    };
    assert!(eval(rule, vars("1")).unwrap());
    assert!(!eval(rule, vars("0")).unwrap());
}

#[test]
fn test_negative_comparison() {
    let rule = r#"
        COUNTRY !== "EG" &&
        CUSTOMERCODE!="55350000" &&
        CUSTOMERCODE!="55358500" &&
        CUSTOMERCODE!="55303100" &&
        CURRENCY=="MAD" &&
        TOTALAMOUNT>500000 &&
        TOTALAMOUNT<=1000000"#;
    let vars = vec![
        ("COUNTRY", Value::from("MA")),
        ("CURRENCY", Value::from("MAD")),
        ("CUSTOMERCODE", Value::from("0002950751")),
        ("TOTALAMOUNT", Value::from("999999")),
    ];
    assert!(eval(rule, vars).unwrap());
}

#[test]
fn test_negative_numbers() {
    let rule = "TOTALAMOUNT > -1 && TOTALAMOUNT < 1";
    assert!(eval(rule, vec![("TOTALAMOUNT", Value::from("0"))]).unwrap());
    assert!(eval("TOTALAMOUNT = -1", vec![("TOTALAMOUNT", Value::Integer(-1))]).unwrap());
}

#[test]
fn test_spaces_in_values() {
    let vars = vec![("GREETING", Value::from("whaddup yall"))];
    assert!(eval(r#"GREETING is "whaddup yall""#, vars).unwrap());
}

#[test]
fn test_is_operator() {
    let amount = |v: &str| vec![("TOTALAMOUNT", Value::from(v))];
    assert!(eval("totalamount is -1", amount("-1")).unwrap());
    assert!(!eval("totalamount is 3", amount("-1")).unwrap());

    let rule = "totalamount is not 3 and 3 is not totalamount";
    assert!(eval(rule, amount("-1")).unwrap());
    assert!(!eval(rule, amount("3")).unwrap());
    assert!(eval(rule, amount("-3")).unwrap());
}

#[test]
fn test_spaces_between_tokens() {
    let rule = "totalamount   is     not   3
            and    3        is    not   totalamount
                and ( (  totalamount   is   totalamount   )
                    and   -2   <
            totalamount
        )";
    assert!(eval(rule, vec![("TOTALAMOUNT", Value::from("-1"))]).unwrap());
}

#[test]
fn test_single_line_comment_does_not_kill_the_rest() {
    let rule = " 2 > 3

            // and    3        is    not   totalamount

            or totalamount is -1
        ";
    assert!(eval(rule, vec![("totalamount", Value::from("-1"))]).unwrap());
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_all_operators() {
    let truthy = vec![
        "1 = 1", "1 is 1", "3 == 3", "4 === 4", "1 == 1.0", "1 !== 1.0", r#""4" == 4"#, "2 > 1", "1 < 2", "1 <> 2",
        "1 != 2", "1 is not 2", "1 <= 2", "2 <= 2", "3 >= 2", "2 >= 2", r#"4 !== "4""#,
    ];
    for rule in truthy {
        assert!(is_true(rule), "Expected true for: {}", rule);
    }

    let falsy = vec![
        "2 !== 2", "2 is not 2", r#""4" === 4"#, "4 !== 4", "1 === 1.0", "1.0 === 1",
    ];
    for rule in falsy {
        assert!(!is_true(rule), "Expected false for: {}", rule);
    }
}

#[test]
fn test_in_operator() {
    let foo = || vec![("foo", Value::from(vec![123, 12]))];
    assert!(eval("123 in foo", foo()).unwrap());
    assert!(!eval(r#""123" in foo"#, foo()).unwrap());
    assert!(!is_true(r#""123" in [123, 12]"#));
    assert!(is_true("123 in [123, 12]"));
    assert!(!is_true("1 in [1.0]"));
    assert!(is_true("1.5 in [1, 1.5]"));
    assert!(!eval("123 in foo", vec![("foo", Value::from(vec![123.0, 12.0]))]).unwrap());
    assert!(is_true(r#""123" in "321,123".split(",")"#));

    assert_eq!(eval(r#""123" in "foo""#, vec![]).unwrap_err(), r#"Expected array, got "string""#);
}

#[test]
fn test_comments_are_ignored() {
    assert!(!is_true("1 = 2 // or 1 = 1"));
    assert!(is_true("1 = 1 # and 2 = 1"));
    assert!(!is_true("1 = 1 /* or 2 = 1 */ and 2 != 2"));
    assert!(is_true("1 = 3 /* or 2 = 1 */ or 2 = 2"));
    assert!(is_true("1 /* test */ = 1 /* test */ and /* test */ 2 /* test */ = /* test */ 2"));
    assert!(!is_true("1 == 2 // || 1 == 1"));
    assert!(is_true("1 == 1 // && 2 == 1"));
}

#[test]
fn test_equal_operator_with_variables() {
    let foo = |n: i64| vec![("foo", Value::Integer(n))];
    assert!(eval("foo == -1", foo(-1)).unwrap());
    assert!(!eval("foo == 3", foo(-1)).unwrap());
    assert!(eval("foo != 3 && 3 != foo", foo(-1)).unwrap());
    assert!(!eval("foo != 3 && 3 != foo", foo(3)).unwrap());
    assert!(eval("foo != 3 && 3 != foo", foo(-3)).unwrap());
}

// ============================================================================
// Method and Function Calls
// ============================================================================

#[test]
fn test_method_calls() {
    let rules = vec![
        r#"1 === 2 || ("foo|bar|baz".split("|") === ["foo", "bar", "baz"] && 2 < 3)"#,
        r#""foo".toUpperCase() === "FOO""#,
        r#""HeLLo World".charAt(3) === "l".toUpperCase()"#,
        r#"["foo", "bar", "baz"] === "foo|bar|baz".split("|")"#,
        r#"["foo", "bar", "baz"].join("|") === "foo|bar|baz""#,
        r#""a,b,c".split(",").join("-") === "a-b-c""#,
        r#""  padded ".trim() === "padded""#,
        r#""Hello".startsWith("He") === true && "Hello".endsWith("lo") === true"#,
        r#""Hello".indexOf("l") === 2 && "Hello".substr(1, 3) === "ell""#,
        r#""abc".concat("def", 1) === "abcdef1""#,
        r#"/^foo$/i.test("FOO") === true"#,
        r#""a1b2c3".replace(/\d/g, "") === "abc""#,
        r#""ABC".toLowerCase() === "abc""#,
        r#"parseInt("42px") === 42 && parseFloat("3.5kg") === 3.5"#,
    ];
    for rule in rules {
        assert!(is_true(rule), "Expected true for: {}", rule);
    }

    let vars = vec![("foo", Value::Integer(3))];
    let rule = r#"foo === 3 && "bar" in "foo|bar|baz".split("|") && 4 > foo"#;
    assert!(eval(rule, vars).unwrap());
}

#[test]
fn test_multiline_rule_with_calls() {
    let rule = r#"// Something true
        1 === 1 &&
        /* And something true */
        "foo|bar|baz".split("|") === ["foo", "bar", "baz"] && (2 < 3) &&
        // bar is indeed in the array
        "bar" in "foo|bar".split("|") &&
        // More
        [1, 4, /* sneak */ 3].join("") === "143" &&
        // More
        "bar".toUpperCase() === "BAR"
        "#;
    assert!(is_true(rule));
}

#[test]
fn test_replace() {
    assert!(eval(r#"foo.replace("a", "A") === "bAr""#, vec![("foo", Value::from("bar"))]).unwrap());
    assert!(is_true(r#""bar".replace("r", "R") === "baR""#));
    assert!(is_true(r#""bar".replace() === "bar""#));
    assert!(is_true(r#""bar".replace("r") === "baundefined""#));
}

#[test]
fn test_method_on_wrong_receiver() {
    assert_eq!(
        eval(r#""abc".join("-") === "a""#, vec![]).unwrap_err(),
        r#""abc".join is not a function at position 5 on line 1"#
    );
}

#[test]
fn test_user_defined_callables() {
    let mut engine = Engine::new();
    engine.register_function("max", |_: Option<&Value>, args: &[Value]| -> Result<Value, CallError> {
        args.iter()
            .map(Value::to_number)
            .reduce(f64::max)
            .map(Value::Float)
            .ok_or_else(|| CallError::Type("max() needs arguments".into()))
    });
    engine.register_method("reverse", |receiver: Option<&Value>, _: &[Value]| -> Result<Value, CallError> {
        match receiver {
            Some(Value::String(s)) => Ok(Value::String(s.chars().rev().collect())),
            _ => Err(CallError::Type("reverse() needs a string".into())),
        }
    });

    let bindings: Bindings = [("a", 3), ("b", 9)].into_iter().collect();
    assert!(engine.evaluate("max(a, b, 4) = 9", &bindings).unwrap());
    assert!(engine.evaluate(r#""abc".reverse() === "cba""#, &bindings).unwrap());

    let err = engine.evaluate("max() = 1", &bindings).unwrap_err();
    assert_eq!(err.to_string(), "max() needs arguments at position 0 on line 1");

    // The shared engine is untouched
    assert!(Engine::shared().evaluate("max(1) = 1", &bindings).is_err());
}

// ============================================================================
// Rule API
// ============================================================================

#[test]
fn test_rule_is_true_and_false() {
    let vars: Bindings = order().into_iter().collect();
    let mut rule = Rule::new(r#"COUNTRY == "MA""#, vars.clone());
    assert!(rule.is_true().unwrap());
    assert!(!rule.is_false().unwrap());

    let mut rule = Rule::new(r#"COUNTRY == "EG""#, vars);
    assert!(rule.is_false().unwrap());
}

#[test]
fn test_rule_validation() {
    let mut rule = Rule::new("1 = 1 &&", Bindings::new());
    assert!(!rule.is_valid());
    assert_eq!(rule.error(), "Incomplete and/or condition");
    assert!(matches!(rule.last_error(), Some(RuleError::Syntax { .. })));

    let mut rule = Rule::new("2 > 1", Bindings::new());
    assert!(rule.is_valid());
    assert_eq!(rule.error(), "");
    assert!(rule.last_error().is_none());
    assert!(rule.is_true().unwrap());
}

#[test]
fn test_custom_tokens() {
    let mut engine = Engine::new();
    engine.register_token("equal", r"equals\b", 116).unwrap();
    engine.register_token("and", r"plus\b", 116).unwrap();
    assert!(engine.evaluate("1 equals 1 plus 2 equals 2", &Bindings::new()).unwrap());
    assert!(engine.register_token("equal", "(", 10).is_err());
}
