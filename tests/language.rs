use std::{cell::RefCell, fs, rc::Rc};

use imperia::{
    error::{InterpreterError, ParseError, RuntimeError},
    interpreter::{
        evaluator::core::Interpreter,
        lexer::{Token, tokenize},
        value::Value,
    },
    run_script,
};
use walkdir::WalkDir;

fn run(src: &str) -> Interpreter {
    let mut interp = Interpreter::new();
    if let Err(e) = interp.execute(src) {
        panic!("Script failed: {e}");
    }
    interp
}

fn run_capturing(src: &str) -> (Interpreter, Rc<RefCell<Vec<Value>>>) {
    let printed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&printed);
    let mut interp =
        Interpreter::with_sink(Box::new(move |v: &Value| sink.borrow_mut().push(v.clone())));

    if let Err(e) = interp.execute(src) {
        panic!("Script failed: {e}");
    }
    (interp, printed)
}

fn assert_success(src: &str) {
    if let Err(e) = run_script(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if run_script(src).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

#[test]
fn demo_scripts_work() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "imp")
                                      })
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = run_script(&content) {
            panic!("Demo script {path:?} failed:\n{content}\nError: {e}");
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}

#[test]
fn numeric_literals_tag_by_decimal_point() {
    let interp = run("SET a = 42; SET b = 3.14; SET c = 2.0;");

    assert_eq!(interp.get_variable("a"), Some(&Value::Integer(42)));
    assert_eq!(interp.get_variable("b"), Some(&Value::Real(3.14)));
    assert_eq!(interp.get_variable("c"), Some(&Value::Real(2.0)));
}

#[test]
fn precedence_and_associativity() {
    let interp = run("SET x = 2 + 3 * 4;");
    assert_eq!(interp.get_variable("x"), Some(&Value::Integer(14)));

    let interp = run("SET y = 10 - 2 - 3;");
    assert_eq!(interp.get_variable("y"), Some(&Value::Integer(5)));

    let interp = run("SET z = (1 + 2) * 3;");
    assert_eq!(interp.get_variable("z"), Some(&Value::Integer(9)));

    let interp = run("SET w = 20 / 2 / 5;");
    assert_eq!(interp.get_variable("w"), Some(&Value::Real(2.0)));

    let interp = run("SET v = 2 * 3 + 4 * 5;");
    assert_eq!(interp.get_variable("v"), Some(&Value::Integer(26)));
}

#[test]
fn string_concatenation_coerces_numbers() {
    let interp = run(r#"SET s = "a" + 1;"#);
    assert_eq!(interp.get_variable("s"), Some(&Value::Str("a1".to_string())));

    let interp = run(r#"SET s = 1 + "a";"#);
    assert_eq!(interp.get_variable("s"), Some(&Value::Str("1a".to_string())));

    let interp = run(r#"SET s = "pi is " + 3.5;"#);
    assert_eq!(interp.get_variable("s"), Some(&Value::Str("pi is 3.5".to_string())));

    let interp = run(r#"SET s = "x" + "y";"#);
    assert_eq!(interp.get_variable("s"), Some(&Value::Str("xy".to_string())));
}

#[test]
fn variables_read_and_update() {
    let interp = run("SET x = 5; SET y = x - 2;");
    assert_eq!(interp.get_variable("y"), Some(&Value::Integer(3)));

    let interp = run("SET x = 1; SET x = x + 1;");
    assert_eq!(interp.get_variable("x"), Some(&Value::Integer(2)));
}

#[test]
fn unknown_variable_fails_and_names_it() {
    let mut interp = Interpreter::new();
    let err = interp.execute("SET y = z + 1").unwrap_err();

    match err {
        InterpreterError::Runtime(RuntimeError::UnknownVariable { name, .. }) => {
            assert_eq!(name, "z");
        },
        other => panic!("Expected UnknownVariable, got {other:?}"),
    }

    // The failed assignment must leave the table untouched.
    assert_eq!(interp.get_variable("y"), None);
}

#[test]
fn show_emits_exactly_once() {
    let (_, printed) = run_capturing("SHOW(1 + 2)");
    assert_eq!(*printed.borrow(), vec![Value::Integer(3)]);

    let (_, printed) = run_capturing(r#"SHOW("hi\nthere")"#);
    assert_eq!(*printed.borrow(), vec![Value::Str("hi\nthere".to_string())]);
}

#[test]
fn failed_print_emits_nothing() {
    let printed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&printed);
    let mut interp =
        Interpreter::with_sink(Box::new(move |v: &Value| sink.borrow_mut().push(v.clone())));

    assert!(interp.execute("SHOW(missing)").is_err());
    assert!(printed.borrow().is_empty());
}

#[test]
fn round_trip_matches_statement_at_a_time() {
    let batch = run("SET a = 1; SET b = a + 2; SET c = b * b;");

    let mut single = Interpreter::new();
    for stmt in ["SET a = 1;", "SET b = a + 2;", "SET c = b * b;"] {
        single.execute(stmt).unwrap();
    }

    for name in ["a", "b", "c"] {
        assert_eq!(batch.get_variable(name), single.get_variable(name));
    }
}

#[test]
fn keyword_boundary() {
    let tokens = tokenize("SETTING").unwrap();
    assert_eq!(tokens[0].0, Token::Identifier("SETTING".to_string()));
    assert_eq!(tokens.len(), 2); // identifier + end-of-input

    // Keywords are case-sensitive; lowercase spellings are identifiers.
    let tokens = tokenize("set show").unwrap();
    assert_eq!(tokens[0].0, Token::Identifier("set".to_string()));
    assert_eq!(tokens[1].0, Token::Identifier("show".to_string()));

    let interp = run("SET SETTING = 1; SET x = SETTING + 1;");
    assert_eq!(interp.get_variable("x"), Some(&Value::Integer(2)));
}

#[test]
fn compare_lexes_before_assign() {
    let tokens = tokenize("x == 1 <= 2").unwrap();
    assert_eq!(tokens[1].0, Token::Compare("==".to_string()));
    assert_eq!(tokens[3].0, Token::Compare("<=".to_string()));

    let tokens = tokenize("=").unwrap();
    assert_eq!(tokens[0].0, Token::Assign);
}

#[test]
fn token_sequence_ends_with_single_eof() {
    let tokens = tokenize("SET x = 1;").unwrap();
    assert_eq!(tokens.last().unwrap().0, Token::Eof);
    assert_eq!(tokens.iter().filter(|(t, _)| *t == Token::Eof).count(), 1);

    let tokens = tokenize("").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].0, Token::Eof);
}

#[test]
fn whitespace_and_newlines_are_discarded() {
    let tokens = tokenize("SET x\t=\n1").unwrap();
    let kinds: Vec<&Token> = tokens.iter().map(|(t, _)| t).collect();

    assert_eq!(kinds,
               vec![&Token::Set,
                    &Token::Identifier("x".to_string()),
                    &Token::Assign,
                    &Token::Number("1".to_string()),
                    &Token::Eof]);
}

#[test]
fn illegal_character_reports_offset() {
    let err = tokenize("SET x = 1 @ 2").unwrap_err();
    match err {
        ParseError::IllegalCharacter { offset, excerpt, .. } => {
            assert_eq!(offset, 10);
            assert!(excerpt.starts_with('@'));
        },
        other => panic!("Expected IllegalCharacter, got {other:?}"),
    }

    assert_failure("SET x = 1 @ 2");
}

#[test]
fn unrecognized_statements_are_skipped() {
    assert_success("; ; ;");
    assert_success("WHILE DEFINE RETURN ELSE");
    assert_success("[ ] { } ,");

    // A skipped identifier is not looked up, so even an unknown name passes.
    let interp = run("IF z");
    assert_eq!(interp.get_variable("z"), None);

    // Skipping consumes one token at a time until a real statement appears.
    let interp = run("IF x == 1; SET y = 2;");
    assert_eq!(interp.get_variable("y"), Some(&Value::Integer(2)));
    assert_eq!(interp.get_variable("x"), None);
}

#[test]
fn operators_without_rules_stop_expressions() {
    // '%' and '?' lex as operator tokens but have no evaluation rule; the
    // expression ends before them and the leftovers fall to the skip rule.
    let interp = run("SET x = 5 % 2;");
    assert_eq!(interp.get_variable("x"), Some(&Value::Integer(5)));

    let interp = run("SET x = 5 ? 1;");
    assert_eq!(interp.get_variable("x"), Some(&Value::Integer(5)));
}

#[test]
fn subtraction_and_multiplication_require_numbers() {
    assert_failure(r#"SET x = "a" - 1;"#);
    assert_failure(r#"SET x = 2 * "a";"#);
    assert_failure(r#"SET x = "a" / 1;"#);

    let err = Interpreter::new().execute(r#"SET x = "a" - 1;"#).unwrap_err();
    assert!(matches!(err, InterpreterError::Runtime(RuntimeError::TypeError { .. })));
}

#[test]
fn division_yields_real_and_zero_fails() {
    let interp = run("SET x = 7 / 2;");
    assert_eq!(interp.get_variable("x"), Some(&Value::Real(3.5)));

    let interp = run("SET y = 6 / 3;");
    assert_eq!(interp.get_variable("y"), Some(&Value::Real(2.0)));

    let err = Interpreter::new().execute("SET x = 1 / 0").unwrap_err();
    assert!(matches!(err, InterpreterError::Runtime(RuntimeError::DivisionByZero { .. })));

    assert_failure("SET x = 1.5 / 0.0");
}

#[test]
fn integer_overflow_is_reported() {
    let err = Interpreter::new().execute("SET x = 9223372036854775807 + 1")
                                .unwrap_err();
    assert!(matches!(err, InterpreterError::Runtime(RuntimeError::Overflow { .. })));

    assert_failure("SET x = 99999999999999999999");
}

#[test]
fn mixed_numeric_arithmetic_promotes() {
    let interp = run("SET x = 1 + 2.5;");
    assert_eq!(interp.get_variable("x"), Some(&Value::Real(3.5)));

    let interp = run("SET y = 2 * 2.5;");
    assert_eq!(interp.get_variable("y"), Some(&Value::Real(5.0)));
}

#[test]
fn string_escapes_decode() {
    let interp = run(r#"SET s = "a\tb\\c\"d";"#);
    assert_eq!(interp.get_variable("s"), Some(&Value::Str("a\tb\\c\"d".to_string())));

    // Unrecognized escapes stay verbatim, backslash included.
    let interp = run(r#"SET u = "a\qb";"#);
    assert_eq!(interp.get_variable("u"), Some(&Value::Str("a\\qb".to_string())));
}

#[test]
fn empty_input_is_a_no_op() {
    assert_success("");
    assert_success("   \n  ");
}

#[test]
fn trailing_semicolon_is_optional() {
    let interp = run("SET x = 1");
    assert_eq!(interp.get_variable("x"), Some(&Value::Integer(1)));

    let interp = run("SET x = 1;");
    assert_eq!(interp.get_variable("x"), Some(&Value::Integer(1)));
}

#[test]
fn parenthesized_expressions() {
    let interp = run("SET x = (2 + 3) * (4 - 1);");
    assert_eq!(interp.get_variable("x"), Some(&Value::Integer(15)));

    let err = Interpreter::new().execute("SET x = (1 + 2").unwrap_err();
    assert!(matches!(err, InterpreterError::Parse(ParseError::ExpectedClosingParen { .. })));
}

#[test]
fn set_requires_identifier_and_assign() {
    let err = Interpreter::new().execute("SET 1 = 2").unwrap_err();
    match err {
        InterpreterError::Parse(ParseError::ExpectedToken { expected, .. }) => {
            assert_eq!(expected, "an identifier after SET");
        },
        other => panic!("Expected ExpectedToken, got {other:?}"),
    }

    assert_failure("SET x 2");
    assert_failure("SET");
}

#[test]
fn show_requires_parens() {
    assert_failure("SHOW 1 + 2");
    assert_failure("SHOW");
    assert_failure("SHOW(1 + 2");
}

#[test]
fn unary_operators_do_not_exist() {
    assert_failure("SET x = -5");
}

#[test]
fn multiple_statements_on_one_line() {
    let (interp, printed) = run_capturing("SET a = 1; SHOW(a); SET b = a + 1; SHOW(b);");

    assert_eq!(*printed.borrow(), vec![Value::Integer(1), Value::Integer(2)]);
    assert_eq!(interp.get_variable("b"), Some(&Value::Integer(2)));
}

#[test]
fn seeded_variables_are_visible_to_scripts() {
    let mut interp = Interpreter::new();
    interp.set_variable("seed".to_string(), 10.into());
    interp.execute("SET x = seed * 2;").unwrap();

    assert_eq!(interp.get_variable("x"), Some(&Value::Integer(20)));
}

#[test]
fn errors_carry_line_numbers() {
    let mut interp = Interpreter::new();
    let err = interp.execute("SET a = 1;\nSET b = missing;").unwrap_err();

    match err {
        InterpreterError::Runtime(RuntimeError::UnknownVariable { name, line }) => {
            assert_eq!(name, "missing");
            assert_eq!(line, 2);
        },
        other => panic!("Expected UnknownVariable, got {other:?}"),
    }
}

#[test]
fn interpreters_are_independent() {
    let first = run("SET x = 1;");
    let second = Interpreter::new();

    assert_eq!(first.get_variable("x"), Some(&Value::Integer(1)));
    assert_eq!(second.get_variable("x"), None);
}
