// ABOUTME: End-to-end scenarios exercising the parser and evaluator together

use wee_lisp::error::EvalError;
use wee_lisp::eval::eval;
use wee_lisp::interp::Interpreter;
use wee_lisp::parser::parse_program;
use wee_lisp::value::Value;

fn run(interp: &mut Interpreter, source: &str) -> Result<Value, String> {
    let env = interp.global_env.clone();
    let forms = parse_program(interp, source).map_err(|e| e.to_string())?;
    let mut result = Value::Null;
    for form in &forms {
        result = eval(interp, &env, form).map_err(|e| e.to_string())?;
    }
    Ok(result)
}

#[test]
fn arithmetic_and_coercion() {
    let mut interp = Interpreter::new();
    assert_eq!(run(&mut interp, "(+ 1 2)").unwrap().to_string(), "3");
    assert_eq!(run(&mut interp, "(+ 1 2.5)").unwrap().to_string(), "3.5");
    assert_eq!(run(&mut interp, "(+ \"foo\" \"bar\")").unwrap().to_string(), "\"foobar\"");
    assert!(run(&mut interp, "(+ 1 \"x\")").is_err());
}

#[test]
fn lexical_closure_captures_defining_environment() {
    let mut interp = Interpreter::new();
    let result = run(
        &mut interp,
        "(set make-adder (lambda (n) (lambda (x) (+ x n)))) (set add3 (make-adder 3)) (add3 10)",
    )
    .unwrap();
    assert_eq!(result.to_string(), "13");
}

#[test]
fn rest_parameter_collects_surplus_arguments() {
    let mut interp = Interpreter::new();
    let result = run(&mut interp, "(set f (lambda (a &rest r) r)) (f 1 2 3 4)").unwrap();
    assert_eq!(result.to_string(), "(2 3 4)");

    let mut interp2 = Interpreter::new();
    let result2 = run(&mut interp2, "(set f (lambda (a &rest r) r)) (f 1)").unwrap();
    assert_eq!(result2.to_string(), "NIL");
}

#[test]
fn macro_expansion_via_unless() {
    let mut interp = Interpreter::new();
    let result = run(
        &mut interp,
        "(defmacro unless (c body) (cons 'cond (cons (cons (cons '== (cons c (cons NIL NIL))) (cons body NIL)) NIL))) (unless NIL 42)",
    )
    .unwrap();
    assert_eq!(result.to_string(), "42");
}

#[test]
fn set_mutates_and_progn_frame_does_not_leak() {
    let mut interp = Interpreter::new();
    let result = run(&mut interp, "(set x 1) (set x 2) x").unwrap();
    assert_eq!(result.to_string(), "2");

    let mut interp2 = Interpreter::new();
    let err = run(&mut interp2, "(progn (set y 7)) y").unwrap_err();
    assert!(err.contains("unbound symbol"));
}

#[test]
fn cond_and_while_accumulate() {
    let mut interp = Interpreter::new();
    let result = run(
        &mut interp,
        "(set i 0) (set s 0) (while (< i 5) (progn (set s (+ s i)) (set i (+ i 1)))) s",
    )
    .unwrap();
    assert_eq!(result.to_string(), "10");
}

#[test]
fn eval_on_quoted_form_round_trips() {
    let mut interp = Interpreter::new();
    let result = run(&mut interp, "(eval (quote (+ 1 2)))").unwrap();
    assert_eq!(result.to_string(), "3");
}

#[test]
fn macroexpand_then_eval_matches_direct_call() {
    let mut interp = Interpreter::new();
    run(
        &mut interp,
        "(defmacro double (x) (cons '+ (cons x (cons x NIL))))",
    )
    .unwrap();
    let direct = run(&mut interp, "(double 5)").unwrap().to_string();
    let expanded = run(&mut interp, "(eval (macroexpand '(double 5)))").unwrap().to_string();
    assert_eq!(direct, expanded);
}

#[test]
fn arity_error_names_the_callable() {
    let mut interp = Interpreter::new();
    let err = run(&mut interp, "(set f (lambda (a b) a)) (f 1)").unwrap_err();
    assert!(err.contains("ArityError") || err.contains("positional arguments"));
}

#[test]
fn calling_a_non_callable_is_a_type_error() {
    let mut interp = Interpreter::new();
    let err = run(&mut interp, "(1 2 3)").unwrap_err();
    assert!(err.contains("TypeError"));
}

#[test]
fn typeof_reports_interned_type_names() {
    let mut interp = Interpreter::new();
    assert_eq!(run(&mut interp, "(typeof 1)").unwrap().to_string(), "INT");
    assert_eq!(run(&mut interp, "(typeof 1.5)").unwrap().to_string(), "FLOAT");
    assert_eq!(run(&mut interp, "(typeof \"s\")").unwrap().to_string(), "STRING");
    assert_eq!(run(&mut interp, "(typeof (cons 1 2))").unwrap().to_string(), "CONS");
}

#[test]
fn string_comparison_is_lexicographic() {
    let mut interp = Interpreter::new();
    assert_eq!(run(&mut interp, "(< \"abc\" \"abd\")").unwrap().to_string(), "T");
    assert_eq!(run(&mut interp, "(> \"abc\" \"abd\")").unwrap().to_string(), "NIL");
}

#[test]
fn small_int_literals_are_identical_across_evaluations() {
    let mut interp = Interpreter::new();
    let a = run(&mut interp, "42").unwrap();
    let b = run(&mut interp, "42").unwrap();
    assert!(a.structurally_eq(&b));
}

#[test]
fn unbound_symbol_reports_name_error() {
    let mut interp = Interpreter::new();
    let err = run(&mut interp, "undefined-name").unwrap_err();
    assert!(err.contains("NameError") || err.contains("unbound symbol"));
}

#[test]
fn call_protocol_arity_error_variant_is_reachable_directly() {
    // Sanity check that the public EvalError::Arity variant stays reachable
    // through the crate API used by the two tests above.
    let err = EvalError::Arity {
        name: "f".to_string(),
        expected: "2".to_string(),
        actual: 1,
    };
    assert!(err.to_string().contains("ArityError"));
}
