//! Indefinite symbolic integration: a partial function on
//! [`Expression`] variants, dispatched by the body's shape. Results are
//! returned before simplification. A literal symbolic constant of
//! integration is represented as `Variable("C")` by convention.

use crate::core::{approx_eq, Expression};

const CONSTANT_NAME: &str = "C";

/// Integrate `expr` with respect to `var`.
///
/// `var` must be a `Variable`; any other shape yields the unevaluated
/// `Integral(expr, var)`.
#[must_use]
pub fn integrate(expr: &Expression, var: &Expression) -> Expression {
    let Expression::Variable(x) = var else {
        return Expression::integral(expr.clone(), var.clone());
    };

    match expr {
        // ∫ c dx = c*x + C.
        Expression::Real(c) => {
            with_constant(Expression::multiply(Expression::real(*c), var.copy()))
        }

        // ∫ n dx: x itself integrates to x²/2 + C, any other variable n
        // is a constant with respect to x, integrating to n*x + C.
        Expression::Variable(n) => {
            if n == x {
                with_constant(Expression::divide(
                    Expression::exponent(var.copy(), Expression::real(2.0)),
                    Expression::real(2.0),
                ))
            } else {
                with_constant(Expression::multiply(expr.copy(), var.copy()))
            }
        }

        // ∫ x^p dx = x^(p+1)/(p+1) + C, or ln(x) + C when p == -1.
        Expression::Exponent(base, power) => {
            if let (Expression::Variable(n), Expression::Real(p)) =
                (base.as_ref(), power.as_ref())
            {
                if n == x {
                    if approx_eq(*p, -1.0) {
                        return with_constant(Expression::log(Expression::EulerNumber, var.copy()));
                    }
                    let exponent_plus_one = p + 1.0;
                    return with_constant(Expression::divide(
                        Expression::exponent(var.copy(), Expression::real(exponent_plus_one)),
                        Expression::real(exponent_plus_one),
                    ));
                }
            }
            Expression::integral(expr.clone(), var.clone())
        }

        Expression::Log(base, arg) => integrate_log(base, arg, var, x),

        _ => Expression::integral(expr.clone(), var.clone()),
    }
}

fn with_constant(body: Expression) -> Expression {
    Expression::add(body, Expression::variable(CONSTANT_NAME))
}

fn integrate_log(base: &Expression, arg: &Expression, var: &Expression, x: &str) -> Expression {
    match (base, arg) {
        // ∫ ln(x) dx = x*(ln(x) - 1) + C.
        (Expression::EulerNumber, Expression::Variable(n)) if n == x => with_constant(
            Expression::multiply(
                var.copy(),
                Expression::subtract(
                    Expression::log(Expression::EulerNumber, var.copy()),
                    Expression::real(1.0),
                ),
            ),
        ),

        // ∫ ln(k*x) dx = (k*x*(ln(k*x) - 1))/k + C, constant factor preserved.
        (Expression::EulerNumber, Expression::Multiply(k_expr, n_expr)) => {
            if let (Expression::Real(k), Expression::Variable(n)) =
                (k_expr.as_ref(), n_expr.as_ref())
            {
                if n == x {
                    let kx = Expression::multiply(Expression::real(*k), var.copy());
                    let inner = Expression::multiply(
                        kx.copy(),
                        Expression::subtract(
                            Expression::log(Expression::EulerNumber, kx),
                            Expression::real(1.0),
                        ),
                    );
                    return with_constant(Expression::divide(inner, Expression::real(*k)));
                }
            }
            Expression::integral(Expression::log(base.copy(), arg.copy()), var.copy())
        }

        // log_b(body) = ln(body) / ln(b); the recursive call already adds C.
        (Expression::Real(b), _) => {
            let inner = integrate(&Expression::log(Expression::EulerNumber, arg.copy()), var);
            Expression::divide(
                inner,
                Expression::log(Expression::EulerNumber, Expression::real(*b)),
            )
        }

        (Expression::Variable(v), _) if v != x => {
            let inner = integrate(&Expression::log(Expression::EulerNumber, arg.copy()), var);
            Expression::divide(
                inner,
                Expression::log(Expression::EulerNumber, base.copy()),
            )
        }

        _ => Expression::integral(Expression::log(base.copy(), arg.copy()), var.copy()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_integrates_to_linear_term() {
        let x = Expression::variable("x");
        let result = integrate(&Expression::real(5.0), &x);
        let expected = Expression::add(
            Expression::multiply(Expression::real(5.0), x),
            Expression::variable("C"),
        );
        assert!(result.equals(&expected));
    }

    #[test]
    fn matching_variable_integrates_to_half_square() {
        let x = Expression::variable("x");
        let result = integrate(&x, &x);
        let expected = Expression::add(
            Expression::divide(
                Expression::exponent(x, Expression::real(2.0)),
                Expression::real(2.0),
            ),
            Expression::variable("C"),
        );
        assert!(result.equals(&expected));
    }

    #[test]
    fn power_rule_reciprocal_is_logarithm() {
        let x = Expression::variable("x");
        let result = integrate(&Expression::exponent(x.copy(), Expression::real(-1.0)), &x);
        let expected = Expression::add(
            Expression::log(Expression::EulerNumber, x),
            Expression::variable("C"),
        );
        assert!(result.equals(&expected));
    }

    #[test]
    fn opaque_variable_parameter_yields_unevaluated_integral() {
        let x = Expression::variable("x");
        let result = integrate(&x, &Expression::real(1.0));
        assert!(matches!(result, Expression::Integral(..)));
    }

    #[test]
    fn natural_log_of_x_has_standard_antiderivative() {
        let x = Expression::variable("x");
        let result = integrate(&Expression::log(Expression::EulerNumber, x.copy()), &x);
        let expected = Expression::add(
            Expression::multiply(
                x.copy(),
                Expression::subtract(Expression::log(Expression::EulerNumber, x), Expression::real(1.0)),
            ),
            Expression::variable("C"),
        );
        assert!(result.equals(&expected));
    }
}
