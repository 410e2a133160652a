//! Per-variant rewrite rules, the flatten-and-collect machinery, and the
//! numeric tolerance they share.

use crate::core::{
    approx_eq, is_one, is_zero, rebuild_balanced, AnyShape, ErrorMsg, Expression, ExponentShape,
    LogShape, MultiplyShape, RealShape, Shape,
};

use super::engine::Simplifier;

/// Both `a` and `b` are `Log`s sharing the same base; extracts
/// `(base, arg_a, arg_b)` if so. Matching through [`LogShape`] rather than
/// a positional `if let` handles both operands the same way the other
/// rules below do, and generalizes for free if `Log`'s fields ever change.
fn same_base_logs(a: &Expression, b: &Expression) -> Option<(Expression, Expression, Expression)> {
    let LogShape(AnyShape(base_a), AnyShape(arg_a)) = LogShape::<AnyShape, AnyShape>::try_match(a)?;
    let LogShape(AnyShape(base_b), AnyShape(arg_b)) = LogShape::<AnyShape, AnyShape>::try_match(b)?;
    if base_a.equals(&base_b) {
        Some((base_a, arg_a, arg_b))
    } else {
        None
    }
}

impl Simplifier {
    /// Add rules. Matrix sums and same-base logs are checked explicitly;
    /// everything else (numeric folding, the additive identity, like-term
    /// collection) falls out of the generic flatten-and-collect pass,
    /// which subsumes the separate numeric/identity/like-term rules
    /// (documented in DESIGN.md).
    pub(super) fn simplify_add(
        &mut self,
        a: Expression,
        b: Expression,
    ) -> Result<Expression, ErrorMsg> {
        if let (Expression::Matrix(ma), Expression::Matrix(mb)) = (&a, &b) {
            if let Some(sum) = ma.add(mb) {
                return Ok(Expression::Matrix(sum));
            }
        }
        if let Some((base, arg_a, arg_b)) = same_base_logs(&a, &b) {
            return self.simplify_log(base, Expression::multiply(arg_a, arg_b));
        }
        Ok(collect_add(a, b))
    }

    /// Subtract rules. The general case rewrites `a - b` as
    /// `a + (-1)*b` and reuses the Add collection machinery, which
    /// recovers like-term cancellation for free.
    pub(super) fn simplify_subtract(
        &mut self,
        a: Expression,
        b: Expression,
    ) -> Result<Expression, ErrorMsg> {
        if let (Expression::Real(x), Expression::Real(y)) = (&a, &b) {
            return Ok(Expression::real(x - y));
        }
        if a.equals(&b) {
            return Ok(Expression::real(0.0));
        }
        if let (Expression::Matrix(ma), Expression::Matrix(mb)) = (&a, &b) {
            if let Some(diff) = ma.subtract(mb) {
                return Ok(Expression::Matrix(diff));
            }
        }
        if let Some((base, arg_a, arg_b)) = same_base_logs(&a, &b) {
            return self.simplify_log(base, Expression::divide(arg_a, arg_b));
        }
        let negated = self.simplify_multiply(Expression::real(-1.0), b)?;
        self.simplify_add(a, negated)
    }

    /// Multiply rules. Identity/zero, numeric folding, `i*i`, the
    /// distributive push into a `Divide`, and matrix products are
    /// checked explicitly; the remainder falls to flatten-and-collect.
    pub(super) fn simplify_multiply(
        &mut self,
        a: Expression,
        b: Expression,
    ) -> Result<Expression, ErrorMsg> {
        if is_real_zero(&a) || is_real_zero(&b) {
            return Ok(Expression::real(0.0));
        }
        if is_real_one(&a) {
            return Ok(b);
        }
        if is_real_one(&b) {
            return Ok(a);
        }
        if let (Expression::Real(x), Expression::Real(y)) = (&a, &b) {
            return Ok(Expression::real(x * y));
        }
        if matches!(a, Expression::Imaginary) && matches!(b, Expression::Imaginary) {
            return Ok(Expression::real(-1.0));
        }
        if let Expression::Real(k) = &a {
            if let Expression::Divide(p, q) = &b {
                let numerator = self.simplify_multiply(Expression::real(*k), p.copy())?;
                return self.simplify_divide(numerator, q.copy());
            }
        }
        if let Expression::Real(k) = &b {
            if let Expression::Divide(p, q) = &a {
                let numerator = self.simplify_multiply(Expression::real(*k), p.copy())?;
                return self.simplify_divide(numerator, q.copy());
            }
        }
        if let (Expression::Matrix(ma), Expression::Matrix(mb)) = (&a, &b) {
            if let Some(product) = ma.matmul(mb) {
                return Ok(Expression::Matrix(product));
            }
        }
        if let Expression::Real(k) = &a {
            if let Expression::Matrix(m) = &b {
                return Ok(Expression::Matrix(m.scale(*k)));
            }
        }
        if let Expression::Real(k) = &b {
            if let Expression::Matrix(m) = &a {
                return Ok(Expression::Matrix(m.scale(*k)));
            }
        }
        Ok(collect_multiply(a, b))
    }

    /// Divide rules: numeric division (IEEE-754 semantics, no domain
    /// guard — see the note below), log change-of-base, and a general
    /// flatten-and-cancel pass over the remaining factors.
    ///
    /// `Real(a)/Real(0)` yields an IEEE-754 infinity or NaN rather than
    /// `Undefined`; the simplifier deliberately does not coerce this, even
    /// though it is inconsistent with `Log`'s domain handling (see
    /// DESIGN.md).
    pub(super) fn simplify_divide(
        &mut self,
        a: Expression,
        b: Expression,
    ) -> Result<Expression, ErrorMsg> {
        if let (Expression::Real(x), Expression::Real(y)) = (&a, &b) {
            return Ok(Expression::real(x / y));
        }
        if let Some((_, arg_a, arg_b)) = same_base_logs(&a, &b) {
            return self.simplify_log(arg_b, arg_a);
        }

        let mut num_flat = Vec::new();
        a.flatten(&mut num_flat);
        let mut den_flat = Vec::new();
        b.flatten(&mut den_flat);

        let (num_numeric, mut buckets) = collect_factors(num_flat);
        let (den_numeric, den_buckets) = collect_factors(den_flat);

        for (base, exponent) in den_buckets {
            if let Some(entry) = buckets.iter_mut().find(|(existing, _)| existing.equals(&base)) {
                entry.1 -= exponent;
            } else {
                buckets.push((base, -exponent));
            }
        }

        let mut num_terms = Vec::new();
        let mut den_terms = Vec::new();
        for (base, exponent) in buckets {
            if is_zero(exponent) {
                continue;
            }
            if exponent > 0.0 {
                num_terms.push(power_term(base, exponent));
            } else {
                den_terms.push(power_term(base, -exponent));
            }
        }

        let net_numeric = num_numeric / den_numeric;
        if !is_one(net_numeric) || num_terms.is_empty() {
            num_terms.push(Expression::real(net_numeric));
        }

        let numerator = build_product(num_terms);
        if den_terms.is_empty() {
            return Ok(numerator);
        }
        Ok(Expression::divide(numerator, build_product(den_terms)))
    }

    /// Exponent rule table, first match wins.
    pub(super) fn simplify_exponent(
        &mut self,
        base: Expression,
        power: Expression,
    ) -> Result<Expression, ErrorMsg> {
        if is_real_zero(&power) {
            return Ok(Expression::real(1.0));
        }
        if is_real_zero(&base) {
            return Ok(Expression::real(0.0));
        }
        if let (Expression::Real(b), Expression::Real(p)) = (&base, &power) {
            return Ok(Expression::real(b.powf(*p)));
        }
        if is_real_one(&power) {
            return Ok(base);
        }
        if is_real_one(&base) {
            return Ok(Expression::real(1.0));
        }
        if matches!(base, Expression::Imaginary) {
            if let Expression::Real(n) = &power {
                if n.fract() == 0.0 {
                    return Ok(imaginary_power(*n as i64));
                }
            }
        }
        if let Some(MultiplyShape(AnyShape(k_expr), AnyShape(x_expr))) =
            MultiplyShape::<AnyShape, AnyShape>::try_match(&base)
        {
            if is_real_value(&power, 0.5) {
                if let Expression::Real(k) = &k_expr {
                    if *k < 0.0 {
                        let sqrt_neg_k = Expression::real((-k).sqrt());
                        let sqrt_x = Expression::exponent(x_expr, Expression::real(0.5));
                        let product = self.simplify_multiply(sqrt_neg_k, sqrt_x)?;
                        return self.simplify_multiply(product, Expression::Imaginary);
                    }
                }
            }
        }
        if let Some(ExponentShape(AnyShape(inner_base), AnyShape(inner_power))) =
            ExponentShape::<AnyShape, AnyShape>::try_match(&base)
        {
            let combined = self.simplify_multiply(inner_power, power)?;
            return self.simplify_exponent(inner_base, combined);
        }
        if let Some(LogShape(AnyShape(log_base), AnyShape(arg))) =
            LogShape::<AnyShape, AnyShape>::try_match(&power)
        {
            if log_base.equals(&base) {
                return Ok(arg);
            }
        }
        Ok(Expression::exponent(base, power))
    }

    /// Log rule table. `arg == 0` is the only real argument treated as
    /// undefined; a negative real argument instead routes through the
    /// complex branch (`log(|arg|) + i*pi`) rather than also being
    /// `Undefined`, since the two would otherwise contradict each other
    /// for every negative input and the complex branch is the more useful
    /// of the two (see DESIGN.md).
    pub(super) fn simplify_log(
        &mut self,
        base: Expression,
        arg: Expression,
    ) -> Result<Expression, ErrorMsg> {
        if let Expression::Real(b) = &base {
            if *b <= 0.0 || is_one(*b) {
                return Ok(Expression::Undefined);
            }
        }
        if let Expression::Real(r) = &arg {
            if is_zero(*r) {
                return Ok(Expression::Undefined);
            }
        }
        if is_real_one(&arg) {
            return Ok(Expression::real(0.0));
        }
        if base.equals(&arg) {
            return Ok(Expression::real(1.0));
        }
        if let Expression::Real(r) = &arg {
            if *r < 0.0 {
                let log_abs = self.simplify_log(base.copy(), Expression::real(r.abs()))?;
                let imaginary_term = self.simplify_multiply(Expression::Imaginary, Expression::Pi)?;
                return self.simplify_add(log_abs, imaginary_term);
            }
        }
        if let (Expression::Real(b), Expression::Real(a)) = (&base, &arg) {
            if *b > 0.0 && *a > 0.0 {
                return Ok(Expression::real(a.ln() / b.ln()));
            }
        }
        if let Some(ExponentShape(AnyShape(x), AnyShape(e))) =
            ExponentShape::<AnyShape, AnyShape>::try_match(&arg)
        {
            let log_x = self.simplify_log(base, x)?;
            return self.simplify_multiply(e, log_x);
        }
        Ok(Expression::log(base, arg))
    }

    /// `Negate(x) -> Multiply(Real(-1), x)`, then simplified.
    pub(super) fn simplify_negate(&mut self, x: Expression) -> Result<Expression, ErrorMsg> {
        self.simplify_multiply(Expression::real(-1.0), x)
    }

    /// Magnitude rules over a handful of recognizable shapes; anything
    /// else preserves `Magnitude(x)`.
    pub(super) fn simplify_magnitude(&mut self, x: Expression) -> Result<Expression, ErrorMsg> {
        match &x {
            Expression::Real(r) => return Ok(Expression::real(r.abs())),
            Expression::Imaginary => return Ok(Expression::real(1.0)),
            Expression::Matrix(m) => return Ok(Expression::real(m.frobenius_norm())),
            Expression::Multiply(..) => {
                if let Some(MultiplyShape(RealShape(k), AnyShape(other))) =
                    MultiplyShape::<RealShape, AnyShape>::try_match(&x)
                {
                    if matches!(other, Expression::Imaginary) {
                        return Ok(Expression::real(k.abs()));
                    }
                }
            }
            Expression::Add(a, b) => {
                if let Some(result) = magnitude_of_complex_sum(a, b) {
                    return Ok(result);
                }
            }
            _ => {}
        }
        Ok(Expression::magnitude(x))
    }
}

fn is_real_zero(expr: &Expression) -> bool {
    matches!(expr, Expression::Real(v) if is_zero(*v))
}

fn is_real_one(expr: &Expression) -> bool {
    matches!(expr, Expression::Real(v) if is_one(*v))
}

fn is_real_value(expr: &Expression, value: f64) -> bool {
    matches!(expr, Expression::Real(v) if approx_eq(*v, value))
}

fn imaginary_power(n: i64) -> Expression {
    match n.rem_euclid(4) {
        0 => Expression::real(1.0),
        1 => Expression::Imaginary,
        2 => Expression::real(-1.0),
        _ => Expression::multiply(Expression::real(-1.0), Expression::Imaginary),
    }
}

fn imaginary_coefficient(a: &Expression, b: &Expression) -> Option<f64> {
    match (a, b) {
        (Expression::Real(k), Expression::Imaginary) | (Expression::Imaginary, Expression::Real(k)) => {
            Some(*k)
        }
        _ => None,
    }
}

fn real_part(expr: &Expression) -> Option<f64> {
    match expr {
        Expression::Real(r) => Some(*r),
        _ => None,
    }
}

fn magnitude_of_complex_sum(a: &Expression, b: &Expression) -> Option<Expression> {
    if matches!(b, Expression::Imaginary) {
        return Some(Expression::real((real_part(a)?.powi(2) + 1.0).sqrt()));
    }
    if matches!(a, Expression::Imaginary) {
        return Some(Expression::real((real_part(b)?.powi(2) + 1.0).sqrt()));
    }
    if let Expression::Multiply(ka, kb) = b {
        if let Some(k) = imaginary_coefficient(ka, kb) {
            return Some(Expression::real((real_part(a)?.powi(2) + k * k).sqrt()));
        }
    }
    if let Expression::Multiply(ka, kb) = a {
        if let Some(k) = imaginary_coefficient(ka, kb) {
            return Some(Expression::real((real_part(b)?.powi(2) + k * k).sqrt()));
        }
    }
    None
}

/// A classified multiplicative factor: either a bare number contributing
/// to the running numeric product, or a `base^exponent` term.
enum Factor {
    Numeric(f64),
    Based { base: Expression, exponent: f64 },
}

fn classify_multiply_factor(factor: &Expression) -> Factor {
    match factor {
        Expression::Real(r) => Factor::Numeric(*r),
        Expression::Exponent(base, power) => {
            if let Expression::Real(p) = power.as_ref() {
                return Factor::Based {
                    base: base.copy(),
                    exponent: *p,
                };
            }
            Factor::Based {
                base: factor.clone(),
                exponent: 1.0,
            }
        }
        _ => Factor::Based {
            base: factor.clone(),
            exponent: 1.0,
        },
    }
}

/// Fold a flattened factor list into a running numeric product and a
/// base→exponent bucket list, combining same-base factors.
fn collect_factors(flat: Vec<Expression>) -> (f64, Vec<(Expression, f64)>) {
    let mut numeric = 1.0;
    let mut buckets: Vec<(Expression, f64)> = Vec::new();
    for factor in flat {
        match classify_multiply_factor(&factor) {
            Factor::Numeric(v) => numeric *= v,
            Factor::Based { base, exponent } => {
                if let Some(entry) = buckets.iter_mut().find(|(b, _)| b.equals(&base)) {
                    entry.1 += exponent;
                } else {
                    buckets.push((base, exponent));
                }
            }
        }
    }
    (numeric, buckets)
}

fn power_term(base: Expression, exponent: f64) -> Expression {
    if is_one(exponent) {
        base
    } else {
        Expression::exponent(base, Expression::real(exponent))
    }
}

fn build_product(mut terms: Vec<Expression>) -> Expression {
    if terms.is_empty() {
        return Expression::real(1.0);
    }
    if terms.len() == 1 {
        return terms.pop().expect("checked len == 1");
    }
    rebuild_balanced(terms, Expression::multiply)
}

/// Classify a flattened addend as `(body, coefficient)`: a bare `Real`
/// contributes to the reserved numeric bucket (`body = None`); `k*x`
/// contributes `(Some(x), k)`; anything else contributes `(Some(term), 1)`.
fn add_term_key(term: &Expression) -> (Option<Expression>, f64) {
    match term {
        Expression::Real(r) => (None, *r),
        Expression::Multiply(a, b) => {
            if let Expression::Real(k) = a.as_ref() {
                (Some(b.copy()), *k)
            } else if let Expression::Real(k) = b.as_ref() {
                (Some(a.copy()), *k)
            } else {
                (Some(term.clone()), 1.0)
            }
        }
        _ => (Some(term.clone()), 1.0),
    }
}

/// Flatten-and-collect for Add, which also covers numeric folding, the
/// additive identity, and like-term collection as special cases of the
/// same bucketing.
fn collect_add(a: Expression, b: Expression) -> Expression {
    let mut flat = Vec::new();
    a.flatten(&mut flat);
    b.flatten(&mut flat);

    let mut numeric_sum = 0.0;
    let mut buckets: Vec<(Expression, f64)> = Vec::new();

    for term in flat {
        match add_term_key(&term) {
            (None, coeff) => numeric_sum += coeff,
            (Some(body), coeff) => {
                if let Some(entry) = buckets.iter_mut().find(|(b, _)| b.equals(&body)) {
                    entry.1 += coeff;
                } else {
                    buckets.push((body, coeff));
                }
            }
        }
    }

    let mut terms: Vec<Expression> = buckets
        .into_iter()
        .filter(|(_, coeff)| !is_zero(*coeff))
        .map(|(body, coeff)| {
            if is_one(coeff) {
                body
            } else {
                Expression::multiply(Expression::real(coeff), body)
            }
        })
        .collect();

    if !is_zero(numeric_sum) || terms.is_empty() {
        terms.push(Expression::real(numeric_sum));
    }

    if terms.len() == 1 {
        terms.pop().expect("checked len == 1")
    } else {
        rebuild_balanced(terms, Expression::add)
    }
}

/// Flatten-and-collect for Multiply: buckets by base with an exponent
/// coefficient, drops `x^0` buckets, rebuilds balanced.
fn collect_multiply(a: Expression, b: Expression) -> Expression {
    let mut flat = Vec::new();
    a.flatten(&mut flat);
    b.flatten(&mut flat);

    let (numeric_product, buckets) = collect_factors(flat);

    let mut terms: Vec<Expression> = buckets
        .into_iter()
        .filter(|(_, exponent)| !is_zero(*exponent))
        .map(|(base, exponent)| power_term(base, exponent))
        .collect();

    if is_zero(numeric_product) {
        return Expression::real(0.0);
    }
    if !is_one(numeric_product) || terms.is_empty() {
        terms.push(Expression::real(numeric_product));
    }
    build_product(terms)
}

#[cfg(test)]
mod tests {
    use super::super::simplify;
    use crate::core::Expression;

    #[test]
    fn real_addition_folds() {
        let result = simplify(&Expression::add(Expression::real(1.0), Expression::real(2.0)))
            .expect("simplification does not fail on well-formed input");
        assert!(result.equals(&Expression::real(3.0)));
    }

    #[test]
    fn additive_identity_vanishes() {
        let x = Expression::variable("x");
        let result =
            simplify(&Expression::add(Expression::real(0.0), x.copy())).expect("no error");
        assert!(result.equals(&x));
    }

    #[test]
    fn like_terms_collect_with_coefficients() {
        let x = Expression::variable("x");
        let expr = Expression::add(
            Expression::multiply(Expression::real(2.0), x.copy()),
            Expression::multiply(Expression::real(5.0), x.copy()),
        );
        let result = simplify(&expr).expect("no error");
        let expected = Expression::multiply(Expression::real(7.0), x);
        assert!(result.equals(&expected));
    }

    #[test]
    fn repeated_square_collapses_to_power() {
        let x = Expression::variable("x");
        let result = simplify(&Expression::multiply(x.copy(), x)).expect("no error");
        assert!(matches!(result, Expression::Exponent(..)));
    }

    #[test]
    fn log_of_one_is_zero() {
        let result = simplify(&Expression::log(Expression::real(5.0), Expression::real(1.0)))
            .expect("no error");
        assert!(result.equals(&Expression::real(0.0)));
    }

    #[test]
    fn log_with_invalid_base_is_undefined() {
        let result = simplify(&Expression::log(Expression::real(1.0), Expression::variable("x")))
            .expect("no error");
        assert!(matches!(result, Expression::Undefined));
    }

    #[test]
    fn division_by_zero_is_ieee_infinity_not_undefined() {
        let result = simplify(&Expression::divide(Expression::real(1.0), Expression::real(0.0)))
            .expect("no error");
        assert!(matches!(result, Expression::Real(v) if v.is_infinite()));
    }
}
