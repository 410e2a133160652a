//! Interface-level tests: parser error coverage, PALM error coverage,
//! serializer structural shape, and the CLI REPL's line-handling contract.

use std::io::Write as _;
use std::process::{Command, Stdio};

use oasis_symbolic::serialize::mathml::to_mathml;
use oasis_symbolic::serialize::palm::{parse_palm, PALMParseError};
use oasis_symbolic::serialize::tex::to_tex;
use oasis_symbolic::{parse, Expression, ParseError};

#[test]
fn precedence_and_associativity_table() {
    let plus_then_times = parse("2+3*4").expect("valid expression");
    assert!(plus_then_times.equals(&Expression::add(
        Expression::real(2.0),
        Expression::multiply(Expression::real(3.0), Expression::real(4.0))
    )));

    let right_assoc_power = parse("2^3^2").expect("valid expression");
    assert!(right_assoc_power.equals(&Expression::exponent(
        Expression::real(2.0),
        Expression::exponent(Expression::real(3.0), Expression::real(2.0))
    )));
}

#[test]
fn implicit_multiplication_does_not_split_function_keywords() {
    let doubled = parse("2x").expect("valid expression");
    assert!(doubled.equals(&Expression::multiply(
        Expression::real(2.0),
        Expression::variable("x")
    )));

    let product_of_letters = parse("xy").expect("valid expression");
    assert!(product_of_letters.equals(&Expression::multiply(
        Expression::variable("x"),
        Expression::variable("y")
    )));

    let log_call = parse("log(2,x)").expect("valid expression");
    assert!(log_call.equals(&Expression::log(
        Expression::real(2.0),
        Expression::variable("x")
    )));
}

#[test]
fn every_parse_error_variant_is_reachable() {
    assert_eq!(parse(""), Err(ParseError::IncompleteExpression));
    assert_eq!(parse("(1+2"), Err(ParseError::MissingClosingParen));
    assert_eq!(parse("1+"), Err(ParseError::UnexpectedEndOfInput));
    assert_eq!(parse(")"), Err(ParseError::UnexpectedToken));
    assert_eq!(parse("1 @ 2"), Err(ParseError::LexicalError));
    assert_eq!(parse("1 2 3"), Err(ParseError::TooManyOperands));
    assert_eq!(parse("log(2 x)"), Err(ParseError::TooFewOperands));
}

#[test]
fn palm_round_trip_and_malformed_arity_errors() {
    let text = "(+ (real 1) (var x))";
    let parsed = parse_palm(text).expect("valid PALM");
    assert!(parsed.equals(&Expression::add(
        Expression::real(1.0),
        Expression::variable("x")
    )));

    assert!(matches!(
        parse_palm("(+ (real 1))"),
        Err(PALMParseError::MissingOperands(_))
    ));

    assert!(matches!(
        parse_palm("(+ (real 1) (real 2) (real 3))"),
        Err(PALMParseError::ExtraOperands(_))
    ));
}

#[test]
fn mathml_structural_shape_per_variant() {
    let x = Expression::variable("x");
    assert_eq!(to_mathml(&Expression::real(1.0)).unwrap().tag(), "mn");
    assert_eq!(to_mathml(&x.copy()).unwrap().tag(), "mi");
    assert_eq!(
        to_mathml(&Expression::divide(x.copy(), x.copy())).unwrap().tag(),
        "mfrac"
    );
    assert_eq!(
        to_mathml(&Expression::exponent(x.copy(), Expression::real(2.0)))
            .unwrap()
            .tag(),
        "msup"
    );
    assert_eq!(
        to_mathml(&Expression::log(Expression::real(2.0), x)).unwrap().tag(),
        "mrow"
    );
}

#[test]
fn tex_structural_shape_per_variant() {
    let x = Expression::variable("x");
    assert_eq!(to_tex(&Expression::Pi).unwrap(), "\\pi");
    assert!(to_tex(&Expression::divide(x.copy(), x.copy()))
        .unwrap()
        .starts_with("\\frac"));
    assert!(to_tex(&Expression::magnitude(x.copy()))
        .unwrap()
        .starts_with("\\left|"));
    assert!(to_tex(&Expression::log(Expression::real(2.0), x))
        .unwrap()
        .starts_with("\\log_"));
}

#[test]
fn repl_evaluates_each_line_independently_and_survives_a_parse_error() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_oasis-repl"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to launch the REPL binary");

    {
        let stdin = child.stdin.as_mut().expect("piped stdin");
        writeln!(stdin, "1 + 2 * 3").expect("write succeeds");
        writeln!(stdin, ")").expect("write succeeds");
        writeln!(stdin, "x + x").expect("write succeeds");
    }

    let output = child.wait_with_output().expect("REPL exits cleanly");
    let stdout = String::from_utf8(output.stdout).expect("UTF-8 output");
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "7");
    assert!(lines[1].starts_with("parse error"));
    assert_eq!(lines[2], "(2*x)");
}
