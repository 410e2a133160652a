//! Implicit-multiplication insertion: a digit-letter, letter-digit, or
//! letter-letter adjacency with no explicit operator between them
//! implies a product, unless the letter run names a function (`log(`,
//! `dd(`, `in(`). Digit-digit and any adjacency touching a parenthesis
//! are left alone; they are not among the three spec'd pairs.

use super::lexer::Token;

fn is_function_name(name: &str) -> bool {
    matches!(name, "log" | "dd" | "in")
}

fn needs_implicit_multiply(prev: &Token, curr: &Token) -> bool {
    match (prev, curr) {
        (Token::Ident(name), _) if is_function_name(name) => false,
        (Token::Number(_), Token::Ident(_))
        | (Token::Ident(_), Token::Number(_))
        | (Token::Ident(_), Token::Ident(_)) => true,
        _ => false,
    }
}

/// Insert synthetic `Star` tokens between adjacent value-starting and
/// value-ending tokens that have no operator between them.
pub fn insert(tokens: Vec<Token>) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len() * 2);
    for (idx, token) in tokens.into_iter().enumerate() {
        if idx > 0 {
            let prev = &result[result.len() - 1];
            if needs_implicit_multiply(prev, &token) {
                result.push(Token::Star);
            }
        }
        result.push(token);
    }
    result
}
