//! Fractional-Kelly staking against a decimal price.

use serde::{Deserialize, Serialize};

use crate::price::MIN_DECIMAL;
use crate::probs::clamp_unit;

/// Fraction of the bankroll that maximises long-run logarithmic growth when backing an outcome of
/// probability `prob` at `decimal` odds. The result is clamped into `[0, 1]`: a position with no
/// edge is never staked against, nor is more than the full bankroll committed.
pub fn fraction(prob: f64, decimal: f64) -> f64 {
    let b = decimal - 1.0;
    if b.is_nan() || b <= 0.0 || prob.is_nan() {
        return 0.0;
    }
    let f = (b * prob - (1.0 - prob)) / b;
    clamp_unit(f)
}

/// Expected profit per unit staked.
pub fn expected_value(prob: f64, decimal: f64) -> f64 {
    prob * (decimal - 1.0) - (1.0 - prob)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stake {
    pub probability: f64,
    pub price: f64,
    pub kelly_fraction: f64,
    pub expected_value: f64,
    pub amount: f64,
}
impl Stake {
    /// Sizes a stake as `bankroll × fraction × multiplier`. Out-of-range inputs are clamped:
    /// the probability and multiplier into `[0, 1]`, the bankroll to non-negative and the price to
    /// no less than [`MIN_DECIMAL`].
    pub fn recommend(prob: f64, price: f64, bankroll: f64, multiplier: f64) -> Self {
        let probability = clamp_unit(prob);
        let price = if price.is_nan() { MIN_DECIMAL } else { f64::max(MIN_DECIMAL, price) };
        let bankroll = if bankroll.is_nan() { 0.0 } else { f64::max(0.0, bankroll) };
        let kelly_fraction = fraction(probability, price);
        Self {
            probability,
            price,
            kelly_fraction,
            expected_value: expected_value(probability, price),
            amount: bankroll * kelly_fraction * clamp_unit(multiplier),
        }
    }

    pub fn has_edge(&self) -> bool {
        self.expected_value > 0.0
    }
}
