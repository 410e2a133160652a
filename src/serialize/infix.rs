//! The infix serializer: fully parenthesized, 5-significant-digit
//! numerals, the inverse of [`crate::parser::parse`] up to associativity
//! (round-tripping does not reproduce the original parenthesization, but
//! reparsing the output reproduces an equal tree).

use crate::core::{ErrorMsg, Expression};

/// Render `expr` as a fully parenthesized infix string.
///
/// Every binary operator is wrapped as `(a+b)`; negation as `-(x)`;
/// magnitude as `|(x)|`; logs and calculus operators as `log(b,a)`,
/// `dd(f,x)`, `in(f,x)`. Numeric literals print at 5 significant digits.
pub fn to_infix(expr: &Expression) -> Result<String, ErrorMsg> {
    Ok(render(expr))
}

fn render(expr: &Expression) -> String {
    match expr {
        Expression::Real(v) => format_real(*v),
        Expression::Imaginary => "i".to_owned(),
        Expression::EulerNumber => "e".to_owned(),
        Expression::Pi => "pi".to_owned(),
        Expression::Variable(name) => name.clone(),
        Expression::Undefined => "Undefined".to_owned(),
        Expression::Matrix(m) => m.to_string(),
        Expression::Add(a, b) => format!("({}+{})", render(a), render(b)),
        Expression::Subtract(a, b) => format!("({}-{})", render(a), render(b)),
        Expression::Multiply(a, b) => format!("({}*{})", render(a), render(b)),
        Expression::Divide(a, b) => format!("({}/{})", render(a), render(b)),
        Expression::Exponent(base, power) => format!("({}^{})", render(base), render(power)),
        Expression::Log(base, arg) => format!("log({},{})", render(base), render(arg)),
        Expression::Negate(x) => format!("-({})", render(x)),
        Expression::Magnitude(x) => format!("|({})|", render(x)),
        Expression::Sine(x) => format!("sin({})", render(x)),
        Expression::Derivative(body, var) => format!("dd({},{})", render(body), render(var)),
        Expression::Integral(body, var) => format!("in({},{})", render(body), render(var)),
    }
}

/// Format `v` at 5 significant digits, trimming trailing zeros.
fn format_real(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    if v == 0.0 {
        return "0".to_owned();
    }
    let magnitude = v.abs().log10().floor() as i32;
    let decimals = (4 - magnitude).max(0) as usize;
    let formatted = format!("{v:.decimals$}");
    if formatted.contains('.') {
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        trimmed.to_owned()
    } else {
        formatted
    }
}
