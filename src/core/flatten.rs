//! Flattening associative operators into a run of operands, and
//! rebuilding a balanced tree from such a run.

use super::category::ExpressionCategory;
use super::expr::Expression;

impl Expression {
    /// Push the maximal run of same-tagged operands reachable from `self`
    /// through an associative operator into `into`.
    ///
    /// For an associative node (`Add`, `Multiply`) this recurses into
    /// children that share the same tag and pushes a clone of any child
    /// that doesn't. For every other variant it pushes a clone of `self`
    /// unchanged — flattening a leaf or a non-associative node is a no-op
    /// wrapped in a single-element run.
    pub fn flatten(&self, into: &mut Vec<Expression>) {
        if !self.get_category().contains(ExpressionCategory::ASSOCIATIVE) {
            into.push(self.clone());
            return;
        }

        match self {
            Expression::Add(a, b) | Expression::Multiply(a, b) => {
                flatten_same_tag(a, a.get_type() == self.get_type(), into);
                flatten_same_tag(b, b.get_type() == self.get_type(), into);
            }
            _ => into.push(self.clone()),
        }
    }
}

fn flatten_same_tag(child: &Expression, same_tag: bool, into: &mut Vec<Expression>) {
    if same_tag {
        child.flatten(into);
    } else {
        into.push(child.clone());
    }
}

/// Rebuild a balanced binary tree of `op` nodes over `operands`.
///
/// Used by the simplifier after it has flattened, collected, and reduced
/// a run of operands, so the resulting tree has depth `O(log n)` rather
/// than the `O(n)` left-leaning chain a naive fold would produce.
///
/// # Panics
/// Panics if `operands` is empty; every call site first establishes a
/// non-empty run (a run with a single leftover operand short-circuits
/// before reaching this helper).
pub fn rebuild_balanced(
    mut operands: Vec<Expression>,
    op: impl Fn(Expression, Expression) -> Expression + Copy,
) -> Expression {
    assert!(!operands.is_empty(), "rebuild_balanced requires at least one operand");

    while operands.len() > 1 {
        let mut next = Vec::with_capacity(operands.len().div_ceil(2));
        let mut iter = operands.into_iter();
        while let Some(a) = iter.next() {
            if let Some(b) = iter.next() {
                next.push(op(a, b));
            } else {
                next.push(a);
            }
        }
        operands = next;
    }

    operands
        .pop()
        .expect("loop invariant guarantees exactly one operand remains")
}
