//! The TeX serializer: configurable LaTeX rendering.

use crate::core::{ErrorMsg, Expression};

/// How division is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivisionStyle {
    /// `\frac{a}{b}`
    Frac,
    /// `a \div b`
    Div,
}

/// How much whitespace surrounds operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// No extra spaces around binary operators.
    Minimal,
    /// A space on either side of each binary operator.
    Regular,
}

/// Which glyph stands for the imaginary unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImaginarySymbol {
    /// `i`
    I,
    /// `j`
    J,
}

/// Rendering options for [`to_tex`]. Only the LaTeX dialect is
/// implemented; the `dialect` field exists so a future `ConTeXt` or
/// plain-TeX variant has somewhere to hang without changing the
/// function signature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexOptions {
    /// Inter-operator whitespace.
    pub spacing: Spacing,
    /// Glyph used for the imaginary unit.
    pub imaginary_symbol: ImaginarySymbol,
    /// Decimal places shown for real literals.
    pub decimal_places: usize,
    /// How `Divide` nodes render.
    pub division_style: DivisionStyle,
}

impl Default for TexOptions {
    fn default() -> Self {
        Self {
            spacing: Spacing::Minimal,
            imaginary_symbol: ImaginarySymbol::I,
            decimal_places: 2,
            division_style: DivisionStyle::Frac,
        }
    }
}

/// Render `expr` as a LaTeX string under the default options.
pub fn to_tex(expr: &Expression) -> Result<String, ErrorMsg> {
    to_tex_with(expr, TexOptions::default())
}

/// Render `expr` as a LaTeX string under `options`.
pub fn to_tex_with(expr: &Expression, options: TexOptions) -> Result<String, ErrorMsg> {
    Ok(render(expr, &options))
}

fn op_spacer(options: &TexOptions) -> &'static str {
    match options.spacing {
        Spacing::Minimal => "",
        Spacing::Regular => " ",
    }
}

fn render(expr: &Expression, options: &TexOptions) -> String {
    let sp = op_spacer(options);
    match expr {
        Expression::Real(v) => format!("{v:.*}", options.decimal_places),
        Expression::Imaginary => match options.imaginary_symbol {
            ImaginarySymbol::I => "i".to_owned(),
            ImaginarySymbol::J => "j".to_owned(),
        },
        Expression::EulerNumber => "e".to_owned(),
        Expression::Pi => "\\pi".to_owned(),
        Expression::Variable(name) => name.clone(),
        Expression::Undefined => "\\text{Undefined}".to_owned(),
        Expression::Matrix(m) => render_matrix(m, options),
        Expression::Add(a, b) => wrap(format!(
            "{}{sp}+{sp}{}",
            render(a, options),
            render(b, options)
        )),
        Expression::Subtract(a, b) => wrap(format!(
            "{}{sp}-{sp}{}",
            render(a, options),
            render(b, options)
        )),
        Expression::Multiply(a, b) => wrap(format!(
            "{}{sp}\\cdot{sp}{}",
            render(a, options),
            render(b, options)
        )),
        Expression::Divide(a, b) => match options.division_style {
            DivisionStyle::Frac => format!("\\frac{{{}}}{{{}}}", render(a, options), render(b, options)),
            DivisionStyle::Div => wrap(format!(
                "{}{sp}\\div{sp}{}",
                render(a, options),
                render(b, options)
            )),
        },
        Expression::Exponent(base, power) => {
            format!("{}^{{{}}}", render(base, options), render(power, options))
        }
        Expression::Log(base, arg) => format!(
            "\\log_{{{}}}\\left({}\\right)",
            render(base, options),
            render(arg, options)
        ),
        Expression::Negate(x) => format!("-{}", render(x, options)),
        Expression::Magnitude(x) => format!("\\left|{}\\right|", render(x, options)),
        Expression::Sine(x) => format!("\\sin\\left({}\\right)", render(x, options)),
        Expression::Derivative(body, var) => format!(
            "\\frac{{d}}{{d{}}}\\left({}\\right)",
            render(var, options),
            render(body, options)
        ),
        Expression::Integral(body, var) => format!(
            "\\int\\left({}\\right)d{}",
            render(body, options),
            render(var, options)
        ),
    }
}

fn wrap(inner: String) -> String {
    format!("\\left({inner}\\right)")
}

fn render_matrix(m: &crate::core::Matrix, options: &TexOptions) -> String {
    let mut out = String::from("\\begin{bmatrix}");
    for r in 0..m.rows() {
        if r > 0 {
            out.push_str("\\\\");
        }
        let row: Vec<String> = m.values()[r * m.cols()..(r + 1) * m.cols()]
            .iter()
            .map(|v| format!("{v:.*}", options.decimal_places))
            .collect();
        out.push_str(&row.join(" & "));
    }
    out.push_str("\\end{bmatrix}");
    out
}
