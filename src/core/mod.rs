//! Core expression model: the `Expression` tree, its static metadata,
//! the visitor contract, the recursive-cast matcher, and the error types
//! shared across every other module.

mod category;
mod equality;
mod error;
mod expr;
mod flatten;
mod matrix;
mod shape;
mod visitor;

pub use category::{ExpressionCategory, ExpressionType};
pub use error::ErrorMsg;
pub use expr::Expression;
pub use flatten::rebuild_balanced;
pub use matrix::Matrix;
pub use shape::{
    AddShape, AnyShape, DivideShape, ExponentShape, LogShape, MagnitudeShape, MultiplyShape,
    NegateShape, RealShape, Shape, SubtractShape, VariableShape,
};
pub use visitor::Visitor;

/// Tolerance used throughout the simplifier for coefficient comparisons.
///
/// `f32::EPSILON` widened to `f64`: tight enough to reject real
/// differences, loose enough to absorb the rounding the flatten/collect
/// passes introduce.
pub const EPSILON: f64 = f32::EPSILON as f64;

/// Returns true if `a` and `b` are within [`EPSILON`] of each other.
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// Returns true if `v` is within [`EPSILON`] of zero.
#[must_use]
pub fn is_zero(v: f64) -> bool {
    approx_eq(v, 0.0)
}

/// Returns true if `v` is within [`EPSILON`] of one.
#[must_use]
pub fn is_one(v: f64) -> bool {
    approx_eq(v, 1.0)
}
