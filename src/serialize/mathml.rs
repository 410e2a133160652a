//! The MathML serializer: builds a tree of presentation-MathML
//! elements rather than a string, so callers can embed it in a larger
//! document without reparsing.

use crate::core::{ErrorMsg, Expression};

/// A minimal MathML element tree.
///
/// Deliberately just a tag name, attributes, and children — enough to
/// print `<mrow>`/`<mn>`/`<mi>`/`<mo>`/`<mfrac>`/`<msup>`/`<msub>`/
/// `<mtable>`/`<mtr>`/`<mtd>`/`<mspace>` without pulling in a general
/// XML crate for a tree this shallow.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlNode {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<XmlChild>,
}

/// A MathML node's content is either more elements or raw text (numerals,
/// variable names, operator glyphs).
#[derive(Debug, Clone, PartialEq)]
enum XmlChild {
    Element(XmlNode),
    Text(String),
}

impl XmlNode {
    fn element(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    fn with_text(tag: &'static str, text: impl Into<String>) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: vec![XmlChild::Text(text.into())],
        }
    }

    fn with_children(tag: &'static str, children: Vec<XmlNode>) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: children.into_iter().map(XmlChild::Element).collect(),
        }
    }

    /// The element's tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.tag
    }

    /// Render as a MathML string.
    #[must_use]
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }

    fn write(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (key, value) in &self.attrs {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            match child {
                XmlChild::Element(node) => node.write(out),
                XmlChild::Text(text) => out.push_str(text),
            }
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

/// Build a MathML element tree for `expr`.
pub fn to_mathml(expr: &Expression) -> Result<XmlNode, ErrorMsg> {
    Ok(render(expr))
}

fn render(expr: &Expression) -> XmlNode {
    match expr {
        Expression::Real(v) => XmlNode::with_text("mn", v.to_string()),
        Expression::Imaginary => XmlNode::with_text("mi", "i"),
        Expression::EulerNumber => XmlNode::with_text("mi", "e"),
        Expression::Pi => XmlNode::with_text("mi", "\u{3c0}"),
        Expression::Variable(name) => XmlNode::with_text("mi", name.clone()),
        Expression::Undefined => XmlNode::with_text("mtext", "Undefined"),
        Expression::Matrix(m) => render_matrix(m),
        Expression::Add(a, b) => render_infix(a, "+", b),
        Expression::Subtract(a, b) => render_infix(a, "-", b),
        Expression::Multiply(a, b) => render_multiply(a, b),
        Expression::Divide(a, b) => XmlNode::with_children(
            "mfrac",
            vec![render(a), render(b)],
        ),
        Expression::Exponent(base, power) => XmlNode::with_children(
            "msup",
            vec![render(base), render(power)],
        ),
        Expression::Log(base, arg) => {
            let log_label = XmlNode::with_children(
                "msub",
                vec![XmlNode::with_text("mi", "log"), render(base)],
            );
            XmlNode::with_children("mrow", vec![log_label, wrap_in_parens(arg)])
        }
        Expression::Negate(x) => {
            XmlNode::with_children("mrow", vec![XmlNode::with_text("mo", "-"), render(x)])
        }
        Expression::Magnitude(x) => XmlNode::with_children(
            "mrow",
            vec![
                XmlNode::with_text("mo", "|"),
                render(x),
                XmlNode::with_text("mo", "|"),
            ],
        ),
        Expression::Sine(x) => {
            let sin_label = XmlNode::with_text("mi", "sin");
            XmlNode::with_children("mrow", vec![sin_label, wrap_in_parens(x)])
        }
        Expression::Derivative(body, var) => {
            let d_dx = XmlNode::with_children(
                "mfrac",
                vec![XmlNode::with_text("mi", "d"), render(var)],
            );
            XmlNode::with_children("mrow", vec![d_dx, wrap_in_parens(body)])
        }
        Expression::Integral(body, var) => {
            let integral_sign = XmlNode::with_text("mo", "\u{222b}");
            let d_var = XmlNode::with_children(
                "mrow",
                vec![XmlNode::with_text("mi", "d"), render(var)],
            );
            XmlNode::with_children("mrow", vec![integral_sign, wrap_in_parens(body), d_var])
        }
    }
}

fn wrap_in_parens(expr: &Expression) -> XmlNode {
    XmlNode::with_children(
        "mrow",
        vec![
            XmlNode::with_text("mo", "("),
            render(expr),
            XmlNode::with_text("mo", ")"),
        ],
    )
}

fn render_infix(a: &Expression, op: &'static str, b: &Expression) -> XmlNode {
    XmlNode::with_children("mrow", vec![render(a), XmlNode::with_text("mo", op), render(b)])
}

/// Multiplication omits the operator between a `Real, Variable, Exponent,
/// Log` factor pair and inserts `×` otherwise.
fn render_multiply(a: &Expression, b: &Expression) -> XmlNode {
    if is_implicit_product_operand(a) && is_implicit_product_operand(b) {
        XmlNode::with_children("mrow", vec![render(a), render(b)])
    } else {
        render_infix(a, "\u{d7}", b)
    }
}

fn is_implicit_product_operand(expr: &Expression) -> bool {
    matches!(
        expr,
        Expression::Real(_) | Expression::Variable(_) | Expression::Exponent(..) | Expression::Log(..)
    )
}

fn render_matrix(m: &crate::core::Matrix) -> XmlNode {
    let rows: Vec<XmlNode> = (0..m.rows())
        .map(|r| {
            let cells: Vec<XmlNode> = m.values()[r * m.cols()..(r + 1) * m.cols()]
                .iter()
                .map(|v| XmlNode::with_children("mtd", vec![XmlNode::with_text("mn", v.to_string())]))
                .collect();
            XmlNode::with_children("mtr", cells)
        })
        .collect();
    XmlNode::with_children("mtable", rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_becomes_mn() {
        let node = to_mathml(&Expression::real(2.0)).expect("infallible");
        assert_eq!(node.tag(), "mn");
    }

    #[test]
    fn variable_becomes_mi() {
        let node = to_mathml(&Expression::variable("x")).expect("infallible");
        assert_eq!(node.tag(), "mi");
    }

    #[test]
    fn divide_becomes_mfrac() {
        let expr = Expression::divide(Expression::real(1.0), Expression::real(2.0));
        let node = to_mathml(&expr).expect("infallible");
        assert_eq!(node.tag(), "mfrac");
        assert_eq!(node.children.len(), 2);
    }

    #[test]
    fn exponent_becomes_msup() {
        let expr = Expression::exponent(Expression::variable("x"), Expression::real(2.0));
        let node = to_mathml(&expr).expect("infallible");
        assert_eq!(node.tag(), "msup");
    }

    #[test]
    fn real_variable_product_omits_operator() {
        let expr = Expression::multiply(Expression::real(2.0), Expression::variable("x"));
        let node = to_mathml(&expr).expect("infallible");
        let xml = node.to_xml_string();
        assert!(!xml.contains('\u{d7}'));
    }

    #[test]
    fn matrix_becomes_mtable_of_rows() {
        let matrix = crate::core::Matrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
        let node = to_mathml(&Expression::Matrix(matrix)).expect("infallible");
        assert_eq!(node.tag(), "mtable");
        assert_eq!(node.children.len(), 2);
    }
}
