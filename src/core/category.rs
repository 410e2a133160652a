//! Static per-variant metadata: the stable type tag and the
//! associative/commutative/arity bitmask.

/// Stable discriminant for every [`Expression`](super::Expression) variant.
///
/// Kept as a separate fieldless enum (rather than matching on `Expression`
/// itself everywhere) so recognizers and the flattener can compare tags
/// without borrowing the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionType {
    /// A real constant.
    Real,
    /// The imaginary unit.
    Imaginary,
    /// Euler's number.
    EulerNumber,
    /// The constant pi.
    Pi,
    /// A named symbolic variable.
    Variable,
    /// The "not defined" sentinel.
    Undefined,
    /// A numeric matrix leaf.
    Matrix,
    /// Binary, associative, commutative addition.
    Add,
    /// Binary, non-associative, non-commutative subtraction.
    Subtract,
    /// Binary, associative, commutative multiplication.
    Multiply,
    /// Binary, non-associative, non-commutative division.
    Divide,
    /// Binary, non-commutative exponentiation.
    Exponent,
    /// Binary, non-commutative logarithm.
    Log,
    /// Unary negation.
    Negate,
    /// Unary magnitude (absolute value / complex modulus).
    Magnitude,
    /// Unary sine.
    Sine,
    /// Unevaluated symbolic derivative.
    Derivative,
    /// Unevaluated symbolic integral.
    Integral,
}

bitflags::bitflags! {
    /// Structural properties of an [`ExpressionType`], used by the
    /// flattener and by recognizers that need to know whether an operator
    /// may be reordered or regrouped.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ExpressionCategory: u8 {
        /// The operator is associative: `(a ⊕ b) ⊕ c == a ⊕ (b ⊕ c)`.
        const ASSOCIATIVE = 0b0001;
        /// The operator is commutative: `a ⊕ b == b ⊕ a`.
        const COMMUTATIVE = 0b0010;
        /// The node has exactly two operands.
        const BINARY = 0b0100;
        /// The node has exactly one operand.
        const UNARY = 0b1000;
    }
}

impl ExpressionType {
    /// Returns the structural category for this type tag.
    #[must_use]
    pub fn category(self) -> ExpressionCategory {
        use ExpressionType::{
            Add, Derivative, Divide, EulerNumber, Exponent, Imaginary, Integral, Log, Magnitude,
            Matrix, Multiply, Negate, Pi, Real, Sine, Subtract, Undefined, Variable,
        };
        match self {
            Real | Imaginary | EulerNumber | Pi | Variable | Undefined | Matrix => {
                ExpressionCategory::empty()
            }
            Add | Multiply => {
                ExpressionCategory::ASSOCIATIVE
                    | ExpressionCategory::COMMUTATIVE
                    | ExpressionCategory::BINARY
            }
            Subtract | Divide | Exponent | Log | Derivative | Integral => {
                ExpressionCategory::BINARY
            }
            Negate | Magnitude | Sine => ExpressionCategory::UNARY,
        }
    }
}
