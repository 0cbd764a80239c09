use crate::factorial::Factorial;

/// Probability mass `P(X = k)` for `X ~ Poisson(λ)`, evaluated in log space so that larger `k`
/// cannot overflow the intermediate power and factorial terms.
///
/// A non-positive (or `NaN`) `λ` is treated as a degenerate point mass at zero. Negative `k`
/// has no mass.
#[inline]
pub fn univariate(k: i32, lambda: f64, factorial: &impl Factorial) -> f64 {
    if k < 0 {
        return 0.0;
    }
    if lambda.is_nan() || lambda <= 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if lambda.is_infinite() {
        return 0.0;
    }
    let ln_factorial = match u8::try_from(k) {
        Ok(k) => factorial.ln(k),
        Err(_) => (2..=k).map(|i| f64::ln(i as f64)).sum(),
    };
    f64::exp(-lambda + k as f64 * lambda.ln() - ln_factorial)
}

/// Cumulative probability `P(X ≤ k)`.
pub fn cdf(k: i32, lambda: f64, factorial: &impl Factorial) -> f64 {
    let sum: f64 = (0..=k).map(|i| univariate(i, lambda, factorial)).sum();
    f64::min(1.0, sum)
}

/// Probability that both of two independent Poisson counts are non-zero.
pub fn both_nonzero(lambda_1: f64, lambda_2: f64) -> f64 {
    let (lambda_1, lambda_2) = (f64::max(0.0, lambda_1), f64::max(0.0, lambda_2));
    let prob = 1.0 - f64::exp(-lambda_1) - f64::exp(-lambda_2) + f64::exp(-(lambda_1 + lambda_2));
    prob.clamp(0.0, 1.0)
}

/// Probability that the sum of two independent Poisson counts exceeds `k`.
pub fn sum_exceeds(k: i32, lambda_1: f64, lambda_2: f64, factorial: &impl Factorial) -> f64 {
    f64::max(0.0, 1.0 - cdf(k, lambda_1 + lambda_2, factorial))
}
