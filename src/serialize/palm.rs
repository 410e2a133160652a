//! PALM: a whitespace-delimited parenthesized-prefix form, used as a
//! lossless serialization and the one format this crate both emits and
//! re-parses.
//!
//! `(+ (real 1) (var x))`, `(real 3.14)`, `(var x)`. Every `Expression`
//! variant has exactly one PALM shape, including `Sine` (`sin`) and
//! `Undefined` (`undefined`), so the format stays total over the whole
//! enum rather than covering only the handful of variants a minimal
//! grammar would need.

use std::fmt;

use crate::core::{ErrorMsg, Expression, Matrix};

/// A single PALM token with enough position information to point at the
/// exact byte/line/column a parse error came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PALMToken {
    /// The token's literal text.
    pub text: String,
    /// Byte offset of the token's first character in the source.
    pub offset: usize,
    /// Length of the token in bytes.
    pub length: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
    /// 0-based index into the token stream.
    pub index: usize,
}

/// Every way PALM parsing can fail, each carrying the offending token.
#[derive(Debug, Clone, PartialEq)]
pub enum PALMParseError {
    /// A `real` atom's text did not parse as `f64`.
    InvalidNumberFormat(PALMToken),
    /// A character outside the accepted alphabet, or an unrecognized
    /// operator tag.
    LexicalError(PALMToken),
    /// An operator form ran out of tokens before its required arity.
    MissingOperands(PALMToken),
    /// Tokens remained where a closing `)` was expected.
    ExtraOperands(PALMToken),
}

impl fmt::Display for PALMParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumberFormat(t) => write!(f, "invalid number format at {}:{}", t.line, t.column),
            Self::LexicalError(t) => write!(f, "lexical error at {}:{}", t.line, t.column),
            Self::MissingOperands(t) => write!(f, "missing operands near {}:{}", t.line, t.column),
            Self::ExtraOperands(t) => write!(f, "extra operands near {}:{}", t.line, t.column),
        }
    }
}

impl std::error::Error for PALMParseError {}

// ---------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------

/// Render `expr` as a PALM string.
pub fn to_palm(expr: &Expression) -> Result<String, ErrorMsg> {
    Ok(render(expr))
}

fn render(expr: &Expression) -> String {
    match expr {
        Expression::Real(v) => format!("(real {v})"),
        Expression::Imaginary => "(i)".to_owned(),
        Expression::EulerNumber => "(e)".to_owned(),
        Expression::Pi => "(pi)".to_owned(),
        Expression::Variable(name) => format!("(var {name})"),
        Expression::Undefined => "(undefined)".to_owned(),
        Expression::Matrix(m) => render_matrix(m),
        Expression::Add(a, b) => format!("(+ {} {})", render(a), render(b)),
        Expression::Subtract(a, b) => format!("(- {} {})", render(a), render(b)),
        Expression::Multiply(a, b) => format!("(* {} {})", render(a), render(b)),
        Expression::Divide(a, b) => format!("(/ {} {})", render(a), render(b)),
        Expression::Exponent(base, power) => format!("(^ {} {})", render(base), render(power)),
        Expression::Log(base, arg) => format!("(log {} {})", render(base), render(arg)),
        Expression::Negate(x) => format!("(neg {})", render(x)),
        Expression::Magnitude(x) => format!("(magnitude {})", render(x)),
        Expression::Sine(x) => format!("(sin {})", render(x)),
        Expression::Derivative(body, var) => format!("(d {} {})", render(body), render(var)),
        Expression::Integral(body, var) => format!("(int {} {})", render(body), render(var)),
    }
}

fn render_matrix(m: &Matrix) -> String {
    let cells: Vec<String> = m.values().iter().map(f64::to_string).collect();
    format!("(matrix {} {} {})", m.rows(), m.cols(), cells.join(" "))
}

// ---------------------------------------------------------------------
// Lexing
// ---------------------------------------------------------------------

fn lex(input: &str) -> Vec<PALMToken> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    let mut line = 1;
    let mut column = 1;
    let mut index = 0;
    let mut chars = input.char_indices().peekable();

    while let Some((byte_pos, c)) = chars.next() {
        if c == '\n' {
            line += 1;
            column = 1;
            offset = byte_pos + c.len_utf8();
            continue;
        }
        if c.is_whitespace() {
            column += 1;
            offset = byte_pos + c.len_utf8();
            continue;
        }
        if c == '(' || c == ')' {
            tokens.push(PALMToken {
                text: c.to_string(),
                offset: byte_pos,
                length: 1,
                line,
                column,
                index,
            });
            index += 1;
            column += 1;
            offset = byte_pos + c.len_utf8();
            continue;
        }
        let start = byte_pos;
        let start_column = column;
        let mut end = byte_pos + c.len_utf8();
        column += 1;
        while let Some(&(next_pos, next_c)) = chars.peek() {
            if next_c.is_whitespace() || next_c == '(' || next_c == ')' {
                break;
            }
            end = next_pos + next_c.len_utf8();
            column += 1;
            chars.next();
        }
        tokens.push(PALMToken {
            text: input[start..end].to_owned(),
            offset: start,
            length: end - start,
            line,
            column: start_column,
            index,
        });
        index += 1;
        offset = end;
    }
    let _ = offset;
    tokens
}

// ---------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------

/// Parse a PALM string into an `Expression`.
pub fn parse_palm(input: &str) -> Result<Expression, PALMParseError> {
    let tokens = lex(input);
    let mut cursor = Cursor { tokens: &tokens, pos: 0 };
    let expr = cursor.parse_form()?;
    if cursor.pos != tokens.len() {
        return Err(PALMParseError::ExtraOperands(tokens[cursor.pos].clone()));
    }
    Ok(expr)
}

struct Cursor<'a> {
    tokens: &'a [PALMToken],
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<&PALMToken> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&PALMToken> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn eof_token(&self) -> PALMToken {
        self.tokens.last().cloned().unwrap_or(PALMToken {
            text: String::new(),
            offset: 0,
            length: 0,
            line: 1,
            column: 1,
            index: 0,
        })
    }

    fn expect_lparen(&mut self) -> Result<(), PALMParseError> {
        match self.peek() {
            Some(t) if t.text == "(" => {
                self.next();
                Ok(())
            }
            Some(t) if t.text == ")" => Err(PALMParseError::MissingOperands(t.clone())),
            Some(t) => Err(PALMParseError::LexicalError(t.clone())),
            None => Err(PALMParseError::MissingOperands(self.eof_token())),
        }
    }

    fn expect_rparen(&mut self) -> Result<(), PALMParseError> {
        match self.next() {
            Some(t) if t.text == ")" => Ok(()),
            Some(t) => Err(PALMParseError::ExtraOperands(t.clone())),
            None => Err(PALMParseError::MissingOperands(self.eof_token())),
        }
    }

    fn expect_atom(&mut self) -> Result<PALMToken, PALMParseError> {
        match self.next() {
            Some(t) if t.text != "(" && t.text != ")" => Ok(t.clone()),
            Some(t) => Err(PALMParseError::MissingOperands(t.clone())),
            None => Err(PALMParseError::MissingOperands(self.eof_token())),
        }
    }

    fn parse_form(&mut self) -> Result<Expression, PALMParseError> {
        self.expect_lparen()?;
        let op = self.expect_atom()?;
        let expr = match op.text.as_str() {
            "real" => {
                let value_token = self.expect_atom()?;
                let value = parse_real_literal(&value_token)?;
                Expression::real(value)
            }
            "var" => {
                let name_token = self.expect_atom()?;
                Expression::variable(name_token.text)
            }
            "i" | "j" => Expression::Imaginary,
            "e" => Expression::EulerNumber,
            "pi" => Expression::Pi,
            "undefined" => Expression::Undefined,
            "matrix" => self.parse_matrix()?,
            "+" => {
                let (a, b) = self.parse_two()?;
                Expression::add(a, b)
            }
            "-" => {
                let (a, b) = self.parse_two()?;
                Expression::subtract(a, b)
            }
            "*" => {
                let (a, b) = self.parse_two()?;
                Expression::multiply(a, b)
            }
            "/" => {
                let (a, b) = self.parse_two()?;
                Expression::divide(a, b)
            }
            "^" => {
                let (a, b) = self.parse_two()?;
                Expression::exponent(a, b)
            }
            "log" => {
                let (a, b) = self.parse_two()?;
                Expression::log(a, b)
            }
            "d" => {
                let (a, b) = self.parse_two()?;
                Expression::derivative(a, b)
            }
            "int" => {
                let (a, b) = self.parse_two()?;
                Expression::integral(a, b)
            }
            "neg" => Expression::negate(self.parse_one()?),
            "magnitude" => Expression::magnitude(self.parse_one()?),
            "sin" => Expression::sine(self.parse_one()?),
            _ => return Err(PALMParseError::LexicalError(op)),
        };
        self.expect_rparen()?;
        Ok(expr)
    }

    fn parse_one(&mut self) -> Result<Expression, PALMParseError> {
        self.parse_form()
    }

    fn parse_two(&mut self) -> Result<(Expression, Expression), PALMParseError> {
        let a = self.parse_form()?;
        let b = self.parse_form()?;
        Ok((a, b))
    }

    fn parse_matrix(&mut self) -> Result<Expression, PALMParseError> {
        let rows_token = self.expect_atom()?;
        let cols_token = self.expect_atom()?;
        let rows = parse_usize_literal(&rows_token)?;
        let cols = parse_usize_literal(&cols_token)?;
        let mut values = Vec::with_capacity(rows * cols);
        for _ in 0..rows * cols {
            let value_token = self.expect_atom()?;
            values.push(parse_real_literal(&value_token)?);
        }
        Ok(Expression::Matrix(Matrix::new(rows, cols, values)))
    }
}

fn parse_real_literal(token: &PALMToken) -> Result<f64, PALMParseError> {
    match token.text.as_str() {
        "NaN" => Ok(f64::NAN),
        "Infinity" => Ok(f64::INFINITY),
        "-Infinity" => Ok(f64::NEG_INFINITY),
        text => text
            .parse()
            .map_err(|_| PALMParseError::InvalidNumberFormat(token.clone())),
    }
}

fn parse_usize_literal(token: &PALMToken) -> Result<usize, PALMParseError> {
    token
        .text
        .parse()
        .map_err(|_| PALMParseError::InvalidNumberFormat(token.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_round_trips() {
        let expr = Expression::add(Expression::real(1.0), Expression::variable("x"));
        let text = to_palm(&expr).expect("infallible");
        assert_eq!(text, "(+ (real 1) (var x))");
        let parsed = parse_palm(&text).expect("valid PALM");
        assert!(parsed.equals(&expr));
    }

    #[test]
    fn matrix_round_trips() {
        let matrix = Matrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
        let expr = Expression::Matrix(matrix);
        let text = to_palm(&expr).expect("infallible");
        let parsed = parse_palm(&text).expect("valid PALM");
        assert!(parsed.equals(&expr));
    }

    #[test]
    fn missing_operand_reports_missing_operands() {
        let err = parse_palm("(+ (real 1))").unwrap_err();
        assert!(matches!(err, PALMParseError::MissingOperands(_)));
    }

    #[test]
    fn extra_operand_reports_extra_operands() {
        let err = parse_palm("(+ (real 1) (real 2) (real 3))").unwrap_err();
        assert!(matches!(err, PALMParseError::ExtraOperands(_)));
    }

    #[test]
    fn malformed_number_reports_invalid_number_format() {
        let err = parse_palm("(real abc)").unwrap_err();
        assert!(matches!(err, PALMParseError::InvalidNumberFormat(_)));
    }

    #[test]
    fn infinity_literals_parse() {
        let parsed = parse_palm("(real Infinity)").expect("valid PALM");
        assert!(matches!(parsed, Expression::Real(v) if v.is_infinite() && v.is_sign_positive()));
    }
}
