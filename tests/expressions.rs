use numera::{Error, Functions, Outcome, ParseError, RuntimeError, State, evaluate};

fn eval(expression: &str) -> Result<f64, Error> {
    let functions = Functions::new();
    evaluate(expression, &|_| None, &functions)
}

fn assert_value(expression: &str, expected: f64) {
    match eval(expression) {
        Ok(value) => assert!(
            (value - expected).abs() < 1e-9,
            "{expression} evaluated to {value}, expected {expected}"
        ),
        Err(e) => panic!("{expression} failed: {e}"),
    }
}

fn assert_fails(expression: &str) {
    assert!(eval(expression).is_err(), "{expression} succeeded but was expected to fail");
}

fn run(state: &mut State, line: &str) -> Outcome {
    state.eval_line(line).unwrap_or_else(|e| panic!("{line} failed: {e}"))
}

fn run_value(state: &mut State, line: &str) -> f64 {
    match run(state, line) {
        Outcome::Value(value) => value,
        other => panic!("{line} produced {other}"),
    }
}

#[test]
fn numeric_literals() {
    assert_value("42", 42.0);
    assert_value("3.25", 3.25);
    assert_value("0.5", 0.5);
    assert_value("1e3", 1000.0);
    assert_value("-7", -7.0);
}

#[test]
fn operator_precedence() {
    assert_value("2+3*4", 14.0);
    assert_value("(2+3)*4", 20.0);
    assert_value("2*3+4", 10.0);
    assert_value("2+3*4^2", 50.0);
    assert_value("2^3*4", 32.0);
    assert_value("8/2^2", 2.0);
}

#[test]
fn left_associative_chains() {
    assert_value("10-4-3", 3.0);
    assert_value("100/10/5", 2.0);
    assert_value("2^3^2", 64.0);
}

#[test]
fn unary_signs() {
    assert_value("-2+3", 1.0);
    assert_value("-2*3", -6.0);
    assert_value("+5", 5.0);
    assert_value("-(2+3)", -5.0);
}

#[test]
fn invalid_leading_operators() {
    assert!(matches!(
        eval("*2"),
        Err(Error::Parse(ParseError::LeadingOperator { op: '*' }))
    ));
    assert_fails("/2");
    assert_fails("^2");
}

#[test]
fn whitespace_is_removed_not_separating() {
    assert_value(" 2 + 3\t", 5.0);
    assert_value("1 2", 12.0);
}

#[test]
fn trailing_operator_is_ignored() {
    assert_value("2+", 2.0);
}

#[test]
fn consecutive_operators_fail() {
    assert!(matches!(
        eval("2++3"),
        Err(Error::Parse(ParseError::EmptyIdentifier { .. }))
    ));
    assert_fails("2+*3");
}

#[test]
fn brace_matching() {
    assert_value("((1+2)*3)", 9.0);
    assert!(matches!(
        eval("(1+2"),
        Err(Error::Parse(ParseError::UnclosedBrace { .. }))
    ));
    assert!(matches!(
        eval("1+2)"),
        Err(Error::Parse(ParseError::UnexpectedClosingBrace { .. }))
    ));
    assert_fails("()");
    assert_fails("2+()");
    assert_fails("");
}

#[test]
fn adjacent_values_need_an_operator() {
    assert!(matches!(
        eval("(2)(3)"),
        Err(Error::Parse(ParseError::MissingOperator { .. }))
    ));
    let functions = Functions::new();
    assert!(matches!(
        evaluate("(2)x", &|_| Some(1.0), &functions),
        Err(Error::Parse(ParseError::MissingOperator { .. }))
    ));
}

#[test]
fn registries_start_with_the_builtins() {
    let functions = Functions::new();
    for name in numera::BUILTIN_FUNCTIONS {
        assert!(functions.contains(name), "missing builtin {name}");
    }
    assert!(!functions.contains("missing"));
}

#[test]
fn builtin_functions() {
    assert_value("sqrt(9)", 3.0);
    assert_value("pow(2,10)", 1024.0);
    assert_value("sqrt(pow(8,2))", 8.0);
    assert_value("sqrt((4))", 2.0);
}

#[test]
fn argument_splitting_respects_nesting() {
    assert_value("pow(2,(1+2))", 8.0);
    assert_value("pow(pow(2,2),3)", 64.0);
    assert_value("pow(2,pow(1,(1+1))+1)", 4.0);
}

#[test]
fn builtin_arity_is_checked() {
    assert!(matches!(
        eval("sqrt(1,2)"),
        Err(Error::Runtime(RuntimeError::ArgumentCountMismatch { expected: 1, found: 2, .. }))
    ));
    assert_fails("sqrt()");
    assert_fails("pow(1)");
}

#[test]
fn unknown_names_fail() {
    match eval("x+1") {
        Err(Error::Runtime(RuntimeError::UnknownIdentifier { name })) => assert_eq!(name, "x"),
        other => panic!("expected unknown identifier, got {other:?}"),
    }
    assert!(matches!(
        eval("foo(1)"),
        Err(Error::Runtime(RuntimeError::UnknownFunction { .. }))
    ));
    assert_fails("2(3)");
}

#[test]
fn caller_supplied_lookup_resolves_identifiers() {
    let functions = Functions::new();
    let value = evaluate("x+1", &|id| (id == "x").then_some(41.0), &functions).unwrap();
    assert_eq!(value, 42.0);
}

#[test]
fn variable_assignment_round_trips() {
    let mut state = State::new();
    match run(&mut state, "x = 5") {
        Outcome::Assigned { name, value } => {
            assert_eq!(name, "x");
            assert_eq!(value, 5.0);
        },
        other => panic!("expected an assignment, got {other}"),
    }
    assert_eq!(run_value(&mut state, "x*2"), 10.0);

    run(&mut state, "y = x + 1");
    assert_eq!(run_value(&mut state, "y"), 6.0);
}

#[test]
fn assignment_targets_are_validated() {
    let mut state = State::new();
    assert!(matches!(
        state.eval_line("2=5"),
        Err(Error::Parse(ParseError::InvalidAssignmentTarget { .. }))
    ));
    assert!(matches!(
        state.eval_line("a=b=c"),
        Err(Error::Parse(ParseError::MultipleAssignments))
    ));
}

#[test]
fn function_declaration_round_trips() {
    let mut state = State::new();
    match run(&mut state, "f(a,b) = a*a+b") {
        Outcome::Declared { name, params, body } => {
            assert_eq!(name, "f");
            assert_eq!(params, ["a", "b"]);
            assert_eq!(body, "a*a+b");
        },
        other => panic!("expected a declaration, got {other}"),
    }
    assert_eq!(run_value(&mut state, "f(3,4)"), 13.0);
}

#[test]
fn declared_functions_call_each_other() {
    let mut state = State::new();
    run(&mut state, "f(a,b) = a*a+b");
    run(&mut state, "g(x) = f(x,x)");
    assert_eq!(run_value(&mut state, "g(2)"), 6.0);
}

#[test]
fn duplicate_declarations_are_rejected() {
    let mut state = State::new();
    run(&mut state, "f(a,b) = a*a+b");
    assert!(matches!(
        state.eval_line("f(x) = x"),
        Err(Error::Runtime(RuntimeError::FunctionAlreadyDefined { .. }))
    ));
    assert_eq!(run_value(&mut state, "f(3,4)"), 13.0);
}

#[test]
fn builtins_cannot_be_redeclared() {
    let mut state = State::new();
    assert!(state.eval_line("sqrt(a) = a").is_err());
    assert_eq!(run_value(&mut state, "sqrt(9)"), 3.0);
}

#[test]
fn declared_bodies_see_later_variables() {
    let mut state = State::new();
    run(&mut state, "inc(v) = v + base");
    run(&mut state, "base = 10");
    assert_eq!(run_value(&mut state, "inc(5)"), 15.0);
}

#[test]
fn parameters_shadow_variables() {
    let mut state = State::new();
    run(&mut state, "base = 10");
    run(&mut state, "h(base) = base*2");
    assert_eq!(run_value(&mut state, "h(7)"), 14.0);
}

#[test]
fn zero_parameter_functions() {
    let mut state = State::new();
    run(&mut state, "c() = 42");
    assert_eq!(run_value(&mut state, "c()"), 42.0);
}

#[test]
fn declared_arity_is_checked() {
    let mut state = State::new();
    run(&mut state, "f(a,b) = a*a+b");
    assert!(state.eval_line("f(1)").is_err());
    assert!(state.eval_line("f(1,2,3)").is_err());
}
