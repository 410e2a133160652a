//! The visitor contract: one method per [`Expression`] variant,
//! dispatched exhaustively by `Expression::accept`.

use super::expr::Expression;
use super::matrix::Matrix;

/// A generic structural visitor over an [`Expression`] tree.
///
/// Implementations are monomorphic in `R`: the simplifier implements
/// `Visitor<Result<Expression, ErrorMsg>>`, the infix/TeX/PALM serializers
/// implement `Visitor<Result<String, ErrorMsg>>`, and the MathML serializer
/// implements `Visitor<Result<XmlNode, ErrorMsg>>`. Every method is
/// required (no default bodies) so the compiler flags a visitor that
/// forgets a variant when a new one is added.
pub trait Visitor<R> {
    /// Visit a [`Expression::Real`] leaf.
    fn visit_real(&mut self, value: f64) -> R;
    /// Visit the [`Expression::Imaginary`] leaf.
    fn visit_imaginary(&mut self) -> R;
    /// Visit the [`Expression::EulerNumber`] leaf.
    fn visit_euler(&mut self) -> R;
    /// Visit the [`Expression::Pi`] leaf.
    fn visit_pi(&mut self) -> R;
    /// Visit a [`Expression::Variable`] leaf.
    fn visit_variable(&mut self, name: &str) -> R;
    /// Visit the [`Expression::Undefined`] leaf.
    fn visit_undefined(&mut self) -> R;
    /// Visit a [`Expression::Matrix`] leaf.
    fn visit_matrix(&mut self, matrix: &Matrix) -> R;
    /// Visit an [`Expression::Add`] node.
    fn visit_add(&mut self, a: &Expression, b: &Expression) -> R;
    /// Visit an [`Expression::Subtract`] node.
    fn visit_subtract(&mut self, a: &Expression, b: &Expression) -> R;
    /// Visit an [`Expression::Multiply`] node.
    fn visit_multiply(&mut self, a: &Expression, b: &Expression) -> R;
    /// Visit an [`Expression::Divide`] node.
    fn visit_divide(&mut self, a: &Expression, b: &Expression) -> R;
    /// Visit an [`Expression::Exponent`] node.
    fn visit_exponent(&mut self, base: &Expression, power: &Expression) -> R;
    /// Visit a [`Expression::Log`] node.
    fn visit_log(&mut self, base: &Expression, arg: &Expression) -> R;
    /// Visit an [`Expression::Negate`] node.
    fn visit_negate(&mut self, x: &Expression) -> R;
    /// Visit an [`Expression::Magnitude`] node.
    fn visit_magnitude(&mut self, x: &Expression) -> R;
    /// Visit an [`Expression::Sine`] node.
    fn visit_sine(&mut self, x: &Expression) -> R;
    /// Visit an [`Expression::Derivative`] node.
    fn visit_derivative(&mut self, body: &Expression, var: &Expression) -> R;
    /// Visit an [`Expression::Integral`] node.
    fn visit_integral(&mut self, body: &Expression, var: &Expression) -> R;
}
