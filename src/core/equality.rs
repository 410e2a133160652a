//! Semantic equality (`equals`: associative/commutative operands compare
//! as multisets, and `Undefined` is never equal to itself) and the
//! weaker `structurally_equivalent` relation used by shape recognizers.

use super::category::ExpressionCategory;
use super::expr::Expression;

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Expression {
    /// Semantic equality: deep-structural modulo flattening of
    /// associative/commutative operators into multisets.
    ///
    /// `Undefined` is never equal to anything, including another
    /// `Undefined` — this is intentional (see DESIGN.md) even though it
    /// breaks reflexivity, which is why `Expression` does not derive `Eq`.
    #[must_use]
    pub fn equals(&self, other: &Expression) -> bool {
        if matches!(self, Expression::Undefined) || matches!(other, Expression::Undefined) {
            return false;
        }
        if self.get_type() != other.get_type() {
            return false;
        }

        match (self, other) {
            (Expression::Real(a), Expression::Real(b)) => a == b,
            (Expression::Variable(a), Expression::Variable(b)) => a == b,
            (Expression::Matrix(a), Expression::Matrix(b)) => a == b,
            (Expression::Imaginary, Expression::Imaginary)
            | (Expression::EulerNumber, Expression::EulerNumber)
            | (Expression::Pi, Expression::Pi) => true,

            (Expression::Add(..), Expression::Add(..))
            | (Expression::Multiply(..), Expression::Multiply(..)) => {
                multiset_equal(self, other)
            }

            (Expression::Subtract(a1, b1), Expression::Subtract(a2, b2))
            | (Expression::Divide(a1, b1), Expression::Divide(a2, b2))
            | (Expression::Exponent(a1, b1), Expression::Exponent(a2, b2))
            | (Expression::Log(a1, b1), Expression::Log(a2, b2))
            | (Expression::Derivative(a1, b1), Expression::Derivative(a2, b2))
            | (Expression::Integral(a1, b1), Expression::Integral(a2, b2)) => {
                a1.equals(a2) && b1.equals(b2)
            }

            (Expression::Negate(a), Expression::Negate(b))
            | (Expression::Magnitude(a), Expression::Magnitude(b))
            | (Expression::Sine(a), Expression::Sine(b)) => a.equals(b),

            // get_type() already matched above, so any remaining pair is
            // Undefined, which is handled by the early return.
            _ => false,
        }
    }

    /// Weaker relation than [`Self::equals`]: true iff both trees have the
    /// same variant tag at every corresponding position, ignoring leaf
    /// values. Used by recognizers that only care about shape.
    #[must_use]
    pub fn structurally_equivalent(&self, other: &Expression) -> bool {
        if self.get_type() != other.get_type() {
            return false;
        }

        match (self, other) {
            (Expression::Add(a1, b1), Expression::Add(a2, b2))
            | (Expression::Multiply(a1, b1), Expression::Multiply(a2, b2)) => {
                (a1.structurally_equivalent(a2) && b1.structurally_equivalent(b2))
                    || (a1.structurally_equivalent(b2) && b1.structurally_equivalent(a2))
            }
            (Expression::Subtract(a1, b1), Expression::Subtract(a2, b2))
            | (Expression::Divide(a1, b1), Expression::Divide(a2, b2))
            | (Expression::Exponent(a1, b1), Expression::Exponent(a2, b2))
            | (Expression::Log(a1, b1), Expression::Log(a2, b2))
            | (Expression::Derivative(a1, b1), Expression::Derivative(a2, b2))
            | (Expression::Integral(a1, b1), Expression::Integral(a2, b2)) => {
                a1.structurally_equivalent(a2) && b1.structurally_equivalent(b2)
            }
            (Expression::Negate(a), Expression::Negate(b))
            | (Expression::Magnitude(a), Expression::Magnitude(b))
            | (Expression::Sine(a), Expression::Sine(b)) => a.structurally_equivalent(b),
            // Same tag, no operands to recurse into (leaf variants).
            _ => true,
        }
    }
}

/// Compares two associative/commutative nodes by flattening each into a
/// multiset of operands and finding a bijection under `equals`.
fn multiset_equal(a: &Expression, b: &Expression) -> bool {
    debug_assert!(a.get_category().contains(ExpressionCategory::ASSOCIATIVE));

    let mut left = Vec::new();
    a.flatten(&mut left);
    let mut right = Vec::new();
    b.flatten(&mut right);

    if left.len() != right.len() {
        return false;
    }

    let mut used = vec![false; right.len()];
    'outer: for l in &left {
        for (idx, r) in right.iter().enumerate() {
            if !used[idx] && l.equals(r) {
                used[idx] = true;
                continue 'outer;
            }
        }
        return false;
    }
    true
}
