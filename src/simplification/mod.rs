//! The simplifier: a bottom-up, rule-directed rewriter over `Expression`
//! trees.

mod engine;
mod rules;

pub use engine::{simplify, Simplifier};
