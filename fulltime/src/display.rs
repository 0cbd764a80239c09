use std::fmt::{Display, Formatter};

/// Renders a probability as a percentage with one decimal place, e.g. `48.3%`. Values are clamped
/// into `[0, 1]`; non-finite values render as `0.0%`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percent(pub f64);

impl Display for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let value = if self.0.is_finite() { self.0.clamp(0.0, 1.0) } else { 0.0 };
        write!(f, "{:.1}%", value * 100.0)
    }
}

/// Renders a real with two decimal places; non-finite values render as `0.00`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decimal(pub f64);

impl Display for Decimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let value = if self.0.is_finite() { self.0 } else { 0.0 };
        write!(f, "{value:.2}")
    }
}

/// Renders a signed integer with an explicit `+` for positive values, as used for goal
/// differences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signed(pub i64);

impl Display for Signed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0 >= 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}
