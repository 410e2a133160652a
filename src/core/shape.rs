//! Structural pattern matching over [`Expression`] built from small,
//! composable combinator types instead of one large `match` per rule.
//!
//! A call site builds the shape it wants out of these building blocks and
//! calls [`Shape::try_match`]:
//!
//! ```ignore
//! type Linear = AddShape<RealShape, MultiplyShape<RealShape, VariableShape>>;
//! if let Some(m) = Linear::try_match(&expr) { /* m.0, m.1 ... */ }
//! ```

use super::expr::Expression;

/// A structural pattern that can be matched against an [`Expression`] and,
/// on success, extracts the matched pieces as owned values.
pub trait Shape: Sized {
    /// Attempt to match `expr`, returning the extracted pieces on success.
    fn try_match(expr: &Expression) -> Option<Self>;
}

/// Matches anything, capturing the whole node.
#[derive(Debug, Clone)]
pub struct AnyShape(pub Expression);

impl Shape for AnyShape {
    fn try_match(expr: &Expression) -> Option<Self> {
        Some(AnyShape(expr.clone()))
    }
}

/// Matches only `Expression::Real`, capturing the numeric value.
#[derive(Debug, Clone, Copy)]
pub struct RealShape(pub f64);

impl Shape for RealShape {
    fn try_match(expr: &Expression) -> Option<Self> {
        match expr {
            Expression::Real(v) => Some(RealShape(*v)),
            _ => None,
        }
    }
}

/// Matches only `Expression::Variable`, capturing the name.
#[derive(Debug, Clone)]
pub struct VariableShape(pub String);

impl Shape for VariableShape {
    fn try_match(expr: &Expression) -> Option<Self> {
        match expr {
            Expression::Variable(name) => Some(VariableShape(name.clone())),
            _ => None,
        }
    }
}

/// Matches `a + b` where `a` matches `A` and `b` matches `B`, trying both
/// operand orders since `Add` is commutative.
#[derive(Debug, Clone)]
pub struct AddShape<A, B>(pub A, pub B);

impl<A: Shape, B: Shape> Shape for AddShape<A, B> {
    fn try_match(expr: &Expression) -> Option<Self> {
        let Expression::Add(a, b) = expr else {
            return None;
        };
        try_commutative(a, b, AddShape)
    }
}

/// Matches `a * b` where `a` matches `A` and `b` matches `B`, trying both
/// operand orders since `Multiply` is commutative.
#[derive(Debug, Clone)]
pub struct MultiplyShape<A, B>(pub A, pub B);

impl<A: Shape, B: Shape> Shape for MultiplyShape<A, B> {
    fn try_match(expr: &Expression) -> Option<Self> {
        let Expression::Multiply(a, b) = expr else {
            return None;
        };
        try_commutative(a, b, MultiplyShape)
    }
}

/// Matches `a - b` positionally; `Subtract` is not commutative.
#[derive(Debug, Clone)]
pub struct SubtractShape<A, B>(pub A, pub B);

impl<A: Shape, B: Shape> Shape for SubtractShape<A, B> {
    fn try_match(expr: &Expression) -> Option<Self> {
        match expr {
            Expression::Subtract(a, b) => Some(SubtractShape(A::try_match(a)?, B::try_match(b)?)),
            _ => None,
        }
    }
}

/// Matches `a / b` positionally; `Divide` is not commutative.
#[derive(Debug, Clone)]
pub struct DivideShape<A, B>(pub A, pub B);

impl<A: Shape, B: Shape> Shape for DivideShape<A, B> {
    fn try_match(expr: &Expression) -> Option<Self> {
        match expr {
            Expression::Divide(a, b) => Some(DivideShape(A::try_match(a)?, B::try_match(b)?)),
            _ => None,
        }
    }
}

/// Matches `base ^ power` positionally.
#[derive(Debug, Clone)]
pub struct ExponentShape<A, B>(pub A, pub B);

impl<A: Shape, B: Shape> Shape for ExponentShape<A, B> {
    fn try_match(expr: &Expression) -> Option<Self> {
        match expr {
            Expression::Exponent(base, power) => {
                Some(ExponentShape(A::try_match(base)?, B::try_match(power)?))
            }
            _ => None,
        }
    }
}

/// Matches `log_base(arg)` positionally.
#[derive(Debug, Clone)]
pub struct LogShape<A, B>(pub A, pub B);

impl<A: Shape, B: Shape> Shape for LogShape<A, B> {
    fn try_match(expr: &Expression) -> Option<Self> {
        match expr {
            Expression::Log(base, arg) => Some(LogShape(A::try_match(base)?, B::try_match(arg)?)),
            _ => None,
        }
    }
}

/// Matches `-x`.
#[derive(Debug, Clone)]
pub struct NegateShape<A>(pub A);

impl<A: Shape> Shape for NegateShape<A> {
    fn try_match(expr: &Expression) -> Option<Self> {
        match expr {
            Expression::Negate(x) => Some(NegateShape(A::try_match(x)?)),
            _ => None,
        }
    }
}

/// Matches `|x|`.
#[derive(Debug, Clone)]
pub struct MagnitudeShape<A>(pub A);

impl<A: Shape> Shape for MagnitudeShape<A> {
    fn try_match(expr: &Expression) -> Option<Self> {
        match expr {
            Expression::Magnitude(x) => Some(MagnitudeShape(A::try_match(x)?)),
            _ => None,
        }
    }
}

/// Tries `(A on a, B on b)` first, then swaps operands and tries again.
/// Shared by the two commutative combinators, `AddShape` and
/// `MultiplyShape`.
fn try_commutative<A: Shape, B: Shape, T>(
    a: &Expression,
    b: &Expression,
    make: impl Fn(A, B) -> T,
) -> Option<T> {
    if let (Some(ma), Some(mb)) = (A::try_match(a), B::try_match(b)) {
        return Some(make(ma, mb));
    }
    if let (Some(ma), Some(mb)) = (A::try_match(b), B::try_match(a)) {
        return Some(make(ma, mb));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_shape_matches_only_real() {
        assert!(RealShape::try_match(&Expression::real(3.0)).is_some());
        assert!(RealShape::try_match(&Expression::variable("x")).is_none());
    }

    #[test]
    fn add_shape_matches_either_operand_order() {
        let x = Expression::variable("x");
        let expr = Expression::add(Expression::real(2.0), x);
        type RealThenVar = AddShape<RealShape, VariableShape>;
        type VarThenReal = AddShape<VariableShape, RealShape>;
        assert!(RealThenVar::try_match(&expr).is_some());
        assert!(VarThenReal::try_match(&expr).is_some());
    }

    #[test]
    fn subtract_shape_does_not_try_the_swapped_order() {
        let expr = Expression::subtract(Expression::real(2.0), Expression::variable("x"));
        type RealThenVar = SubtractShape<RealShape, VariableShape>;
        type VarThenReal = SubtractShape<VariableShape, RealShape>;
        assert!(RealThenVar::try_match(&expr).is_some());
        assert!(VarThenReal::try_match(&expr).is_none());
    }

    #[test]
    fn nested_shapes_compose() {
        let x = Expression::variable("x");
        let expr = Expression::exponent(
            Expression::exponent(x, Expression::real(2.0)),
            Expression::real(3.0),
        );
        type PowerOfPower = ExponentShape<ExponentShape<VariableShape, RealShape>, RealShape>;
        let ExponentShape(ExponentShape(_, RealShape(inner_power)), RealShape(outer_power)) =
            PowerOfPower::try_match(&expr).expect("shape matches");
        assert!(crate::core::approx_eq(inner_power, 2.0));
        assert!(crate::core::approx_eq(outer_power, 3.0));
    }

    #[test]
    fn any_shape_always_matches_and_clones() {
        let expr = Expression::variable("x");
        let AnyShape(captured) = AnyShape::try_match(&expr).expect("always matches");
        assert!(captured.equals(&expr));
    }
}
