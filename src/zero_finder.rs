//! Rational-root enumeration over single-variable integer-coefficient
//! polynomials, via the rational-root theorem.

use rustc_hash::FxHashSet;

use crate::core::{is_zero, Expression};
use crate::simplification::simplify;

/// Enumerate the rational roots of `expr`, treated as a polynomial in
/// `var` with integer coefficients.
///
/// Returns an empty vector if `var` is not a `Variable`, if any term of
/// `expr` has a non-integral coefficient or exponent, or if `expr` has no
/// terms at all. Every returned value is a `Divide(Real(num), Real(den))`
/// that evaluates the polynomial to within epsilon of zero; the finder
/// guarantees no false positives but does not find irrational or complex
/// roots.
#[must_use]
pub fn find_rational_roots(expr: &Expression, var: &Expression) -> Vec<Expression> {
    let Expression::Variable(name) = var else {
        return Vec::new();
    };

    let Some((constant_term, leading_coeff)) = polynomial_bounds(expr, name) else {
        return Vec::new();
    };

    let p_divisors = divisors(constant_term);
    let q_divisors = divisors(leading_coeff);

    let mut seen = FxHashSet::default();
    let mut roots = Vec::new();

    for &p in &p_divisors {
        for &q in &q_divisors {
            for sign in [1i64, -1i64] {
                let (num, den) = reduce(sign * p, q);
                if !seen.insert((num, den)) {
                    continue;
                }
                let candidate = Expression::real(num as f64 / den as f64);
                let substituted = substitute(expr, name, &candidate);
                let Ok(value) = simplify(&substituted) else {
                    continue;
                };
                if let Expression::Real(v) = value {
                    if is_zero(v) {
                        roots.push(Expression::divide(
                            Expression::real(num as f64),
                            Expression::real(den as f64),
                        ));
                    }
                }
            }
        }
    }
    roots
}

/// Substitute every free occurrence of `var` in `expr` with `value`.
#[must_use]
pub fn substitute(expr: &Expression, var: &str, value: &Expression) -> Expression {
    match expr {
        Expression::Variable(n) if n == var => value.copy(),
        Expression::Real(_)
        | Expression::Imaginary
        | Expression::EulerNumber
        | Expression::Pi
        | Expression::Undefined
        | Expression::Matrix(_)
        | Expression::Variable(_) => expr.copy(),
        Expression::Add(a, b) => {
            Expression::add(substitute(a, var, value), substitute(b, var, value))
        }
        Expression::Subtract(a, b) => {
            Expression::subtract(substitute(a, var, value), substitute(b, var, value))
        }
        Expression::Multiply(a, b) => {
            Expression::multiply(substitute(a, var, value), substitute(b, var, value))
        }
        Expression::Divide(a, b) => {
            Expression::divide(substitute(a, var, value), substitute(b, var, value))
        }
        Expression::Exponent(a, b) => {
            Expression::exponent(substitute(a, var, value), substitute(b, var, value))
        }
        Expression::Log(a, b) => {
            Expression::log(substitute(a, var, value), substitute(b, var, value))
        }
        Expression::Negate(x) => Expression::negate(substitute(x, var, value)),
        Expression::Magnitude(x) => Expression::magnitude(substitute(x, var, value)),
        Expression::Sine(x) => Expression::sine(substitute(x, var, value)),
        Expression::Derivative(a, b) => {
            Expression::derivative(substitute(a, var, value), substitute(b, var, value))
        }
        Expression::Integral(a, b) => {
            Expression::integral(substitute(a, var, value), substitute(b, var, value))
        }
    }
}

/// Classify a flattened addend as `(coefficient, exponent)` of `var`.
/// Returns `None` if the term isn't an integer-coefficient monomial in
/// `var` of non-negative integer degree.
fn classify_term(term: &Expression, var: &str) -> Option<(f64, i64)> {
    match term {
        Expression::Real(r) => {
            if r.fract() == 0.0 {
                Some((*r, 0))
            } else {
                None
            }
        }
        Expression::Variable(n) if n == var => Some((1.0, 1)),
        Expression::Negate(x) => {
            let (c, e) = classify_term(x, var)?;
            Some((-c, e))
        }
        Expression::Exponent(base, power) => {
            let Expression::Variable(n) = base.as_ref() else {
                return None;
            };
            if n != var {
                return None;
            }
            let Expression::Real(p) = power.as_ref() else {
                return None;
            };
            if p.fract() != 0.0 || *p < 0.0 {
                return None;
            }
            Some((1.0, *p as i64))
        }
        Expression::Multiply(a, b) => {
            let (ca, ea) = classify_term(a, var)?;
            let (cb, eb) = classify_term(b, var)?;
            Some((ca * cb, ea + eb))
        }
        _ => None,
    }
}

/// Collect `(constant term, leading coefficient)` of `expr` as a
/// polynomial in `var`, rejecting non-integral or malformed terms.
fn polynomial_bounds(expr: &Expression, var: &str) -> Option<(i64, i64)> {
    let mut terms = Vec::new();
    expr.flatten(&mut terms);

    let mut coeffs_by_exponent: Vec<(i64, f64)> = Vec::new();
    for term in &terms {
        let (c, e) = classify_term(term, var)?;
        if let Some(entry) = coeffs_by_exponent.iter_mut().find(|(exp, _)| *exp == e) {
            entry.1 += c;
        } else {
            coeffs_by_exponent.push((e, c));
        }
    }
    if coeffs_by_exponent.is_empty() {
        return None;
    }

    let max_exponent = coeffs_by_exponent.iter().map(|(e, _)| *e).max()?;
    let leading = coeffs_by_exponent
        .iter()
        .find(|(e, _)| *e == max_exponent)
        .map(|(_, c)| *c)?;
    let constant = coeffs_by_exponent
        .iter()
        .find(|(e, _)| *e == 0)
        .map_or(0.0, |(_, c)| *c);

    if leading.fract() != 0.0 || constant.fract() != 0.0 {
        return None;
    }
    Some((constant as i64, leading as i64))
}

/// Positive divisors of `n`, or `[0]` when `n == 0` (the only divisor
/// sentinel that matters for a missing constant or leading term).
#[allow(
    clippy::integer_division,
    reason = "quotient is only taken once n % d == 0 has confirmed it is exact"
)]
fn divisors(n: i64) -> Vec<i64> {
    if n == 0 {
        return vec![0];
    }
    let n = n.abs();
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1i64;
    while d.saturating_mul(d) <= n {
        if n % d == 0 {
            small.push(d);
            if d != n / d {
                large.push(n / d);
            }
        }
        d += 1;
    }
    large.reverse();
    small.extend(large);
    small
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    if a == 0 {
        1
    } else {
        a
    }
}

/// Reduce `num/den` to lowest terms with a non-negative denominator.
#[allow(
    clippy::integer_division,
    reason = "g is gcd(num, den) so both quotients are exact"
)]
fn reduce(num: i64, den: i64) -> (i64, i64) {
    if num == 0 {
        return (0, 1);
    }
    let g = gcd(num, den);
    let mut n = num / g;
    let mut d = den / g;
    if d < 0 {
        n = -n;
        d = -d;
    }
    (n, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_polynomial_has_single_root() {
        let x = Expression::variable("x");
        let poly = Expression::add(x, Expression::real(30.0));
        let roots = find_rational_roots(&poly, &Expression::variable("x"));
        assert_eq!(roots.len(), 1);
        assert!(roots[0].equals(&Expression::divide(
            Expression::real(-30.0),
            Expression::real(1.0)
        )));
    }

    #[test]
    fn non_polynomial_term_yields_no_roots() {
        let x = Expression::variable("x");
        let expr = Expression::add(Expression::sine(x.copy()), Expression::real(1.0));
        let roots = find_rational_roots(&expr, &x);
        assert!(roots.is_empty());
    }

    #[test]
    fn substitute_replaces_only_matching_variable() {
        let x = Expression::variable("x");
        let y = Expression::variable("y");
        let expr = Expression::add(x.copy(), y);
        let result = substitute(&expr, "x", &Expression::real(5.0));
        let expected = Expression::add(Expression::real(5.0), Expression::variable("y"));
        assert!(result.equals(&expected));
    }
}
