//! Symbolic differentiation: a partial function on [`Expression`]
//! variants, dispatched by the shape of the body. Results are returned
//! *before* simplification — callers (the simplifier's `Derivative` rule,
//! `Expression::differentiate`) simplify the output themselves.

use crate::core::Expression;

/// Differentiate `expr` with respect to `var`.
///
/// `var` must be a `Variable` for any rule below to fire; any other shape
/// is treated opaquely and yields the unevaluated `Derivative(expr, var)`.
#[must_use]
pub fn differentiate(expr: &Expression, var: &Expression) -> Expression {
    let Expression::Variable(var_name) = var else {
        return Expression::derivative(expr.clone(), var.clone());
    };

    match expr {
        Expression::Real(_)
        | Expression::Imaginary
        | Expression::EulerNumber
        | Expression::Pi
        | Expression::Undefined
        | Expression::Matrix(_) => Expression::real(0.0),

        Expression::Variable(name) => {
            if name == var_name {
                Expression::real(1.0)
            } else {
                Expression::real(0.0)
            }
        }

        Expression::Add(a, b) => Expression::add(differentiate(a, var), differentiate(b, var)),
        Expression::Subtract(a, b) => {
            Expression::subtract(differentiate(a, var), differentiate(b, var))
        }

        // Product rule: (a*b)' = a'*b + a*b'.
        Expression::Multiply(a, b) => {
            let da = differentiate(a, var);
            let db = differentiate(b, var);
            Expression::add(
                Expression::multiply(da, b.copy()),
                Expression::multiply(a.copy(), db),
            )
        }

        // Quotient rule: (a/b)' = (a'*b - a*b') / b^2.
        Expression::Divide(a, b) => {
            let da = differentiate(a, var);
            let db = differentiate(b, var);
            Expression::divide(
                Expression::subtract(
                    Expression::multiply(da, b.copy()),
                    Expression::multiply(a.copy(), db),
                ),
                Expression::multiply(b.copy(), b.copy()),
            )
        }

        Expression::Exponent(base, power) => differentiate_exponent(base, power, var),
        Expression::Log(base, arg) => differentiate_log(base, arg, var),

        Expression::Negate(x) => Expression::negate(differentiate(x, var)),

        // Placeholder per the design: not correct for complex magnitudes in
        // general, retained as specified.
        Expression::Magnitude(x) => Expression::magnitude(differentiate(x, var)),

        Expression::Sine(_) | Expression::Derivative(..) | Expression::Integral(..) => {
            Expression::derivative(expr.clone(), var.clone())
        }
    }
}

fn differentiate_exponent(base: &Expression, power: &Expression, var: &Expression) -> Expression {
    // Power rule: (base^n)' = n * base^(n-1), when base is literally var.
    if let Expression::Real(n) = power {
        if base.equals(var) {
            return Expression::multiply(
                Expression::real(*n),
                Expression::exponent(base.copy(), Expression::real(n - 1.0)),
            );
        }
    }

    let f_prime = differentiate(power, var);
    match base {
        // (e^f)' = f' * e^f.
        Expression::EulerNumber => {
            Expression::multiply(f_prime, Expression::exponent(base.copy(), power.copy()))
        }
        // (c^f)' = f' * c^f * ln(c).
        Expression::Real(c) => Expression::multiply(
            f_prime,
            Expression::multiply(
                Expression::exponent(base.copy(), power.copy()),
                Expression::log(Expression::EulerNumber, Expression::real(*c)),
            ),
        ),
        // (x^f)' = f' * x^f * ln(x).
        Expression::Variable(_) => Expression::multiply(
            f_prime,
            Expression::multiply(
                Expression::exponent(base.copy(), power.copy()),
                Expression::log(Expression::EulerNumber, base.copy()),
            ),
        ),
        _ => Expression::derivative(Expression::exponent(base.copy(), power.copy()), var.copy()),
    }
}

fn differentiate_log(base: &Expression, arg: &Expression, var: &Expression) -> Expression {
    match base {
        // (ln g)' = g'/g.
        Expression::EulerNumber => {
            let g_prime = differentiate(arg, var);
            Expression::divide(g_prime, arg.copy())
        }
        // (log_c g)' = g' / (g * ln c).
        Expression::Real(c) => {
            let g_prime = differentiate(arg, var);
            Expression::divide(
                g_prime,
                Expression::multiply(
                    arg.copy(),
                    Expression::log(Expression::EulerNumber, Expression::real(*c)),
                ),
            )
        }
        // General base: change of base to ln(g)/ln(f), then the quotient
        // rule handles the rest.
        _ => {
            let ln_g = Expression::log(Expression::EulerNumber, arg.copy());
            let ln_f = Expression::log(Expression::EulerNumber, base.copy());
            differentiate(&Expression::divide(ln_g, ln_f), var)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_differentiates_to_zero() {
        let x = Expression::variable("x");
        let d = differentiate(&Expression::real(7.0), &x);
        assert!(d.equals(&Expression::real(0.0)));
    }

    #[test]
    fn matching_variable_differentiates_to_one() {
        let x = Expression::variable("x");
        let d = differentiate(&x, &x);
        assert!(d.equals(&Expression::real(1.0)));
    }

    #[test]
    fn other_variable_differentiates_to_zero() {
        let x = Expression::variable("x");
        let y = Expression::variable("y");
        let d = differentiate(&y, &x);
        assert!(d.equals(&Expression::real(0.0)));
    }

    #[test]
    fn power_rule_shape() {
        let x = Expression::variable("x");
        let expr = Expression::exponent(x.copy(), Expression::real(3.0));
        let d = differentiate(&expr, &x);
        let expected = Expression::multiply(
            Expression::real(3.0),
            Expression::exponent(x, Expression::real(2.0)),
        );
        assert!(d.equals(&expected));
    }

    #[test]
    fn opaque_variable_parameter_yields_unevaluated_derivative() {
        let x = Expression::variable("x");
        let d = differentiate(&x, &Expression::real(1.0));
        assert!(matches!(d, Expression::Derivative(..)));
    }
}
