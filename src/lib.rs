//! A symbolic algebra engine: an expression tree, a rule-directed
//! simplifier, symbolic differentiation and indefinite integration, a
//! rational-root zero-finder, and text serialization in infix, MathML,
//! TeX, and PALM (parenthesized prefix) syntaxes.
//!
//! The library exposes both a free-function API (`simplify`, `parse`,
//! `to_infix`, ...) for quick use and the underlying builder types
//! (`Simplifier`, parser/serializer structs) for callers that need to
//! configure behavior.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;
pub mod differentiation;
pub mod integration;
pub mod parser;
pub mod serialize;
pub mod simplification;
pub mod zero_finder;

pub use crate::core::{
    AddShape, AnyShape, DivideShape, ErrorMsg, ExponentShape, Expression, ExpressionCategory,
    ExpressionType, LogShape, MagnitudeShape, Matrix, MultiplyShape, NegateShape, RealShape,
    Shape, SubtractShape, VariableShape, Visitor,
};
pub use crate::parser::{parse, ParseError};
pub use crate::serialize::infix::to_infix;
pub use crate::simplification::{simplify, Simplifier};
pub use crate::zero_finder::find_rational_roots;
