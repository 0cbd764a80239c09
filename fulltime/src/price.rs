//! Conversions between price formats.

/// The smallest decimal price accepted from a parsed decimal quote. Keeps the implied net odds
/// `b = price − 1` strictly positive.
pub const MIN_DECIMAL: f64 = 1.000001;

/// A price that can be expressed in decimal form.
pub trait MarketPrice {
    fn decimal(&self) -> f64;
}

impl MarketPrice for f64 {
    fn decimal(&self) -> f64 {
        *self
    }
}

impl MarketPrice for str {
    fn decimal(&self) -> f64 {
        decimal_from_str(self)
    }
}

/// The smallest magnitude of a well-formed American quote.
pub const MIN_AMERICAN: f64 = 100.0;

/// Parses either an American (signed, e.g. `+150`, `-120`) or a decimal (`2.50`, `2,50`) quote
/// into decimal form. Blank or unparseable input yields `1.0`, a price carrying no payout, as does
/// a signed quote of magnitude under 100.
pub fn decimal_from_str(quote: &str) -> f64 {
    let quote = quote.trim().replace(',', ".");
    if quote.is_empty() {
        return 1.0;
    }
    if quote.starts_with('+') || quote.starts_with('-') {
        match quote.parse::<f64>() {
            Ok(american) if american.is_finite() && american.abs() >= MIN_AMERICAN => {
                decimal_from_american(american)
            }
            _ => 1.0,
        }
    } else {
        match quote.parse::<f64>() {
            Ok(decimal) if !decimal.is_nan() => f64::max(decimal, MIN_DECIMAL),
            _ => 1.0,
        }
    }
}

/// Positive American `a` pays `a` per 100 staked; negative `a` requires `|a|` to win 100.
pub fn decimal_from_american(american: f64) -> f64 {
    if american > 0.0 {
        1.0 + american / 100.0
    } else {
        1.0 + 100.0 / american.abs()
    }
}

/// The inverse of [`decimal_from_american`], rounded to the nearest whole number. A decimal price
/// of `1.0` or less carries no payout and has no American form; it maps to `0`.
pub fn american_from_decimal(decimal: f64) -> i64 {
    if decimal.is_nan() || decimal <= 1.0 {
        0
    } else if decimal >= 2.0 {
        ((decimal - 1.0) * 100.0).round() as i64
    } else {
        (-100.0 / (decimal - 1.0)).round() as i64
    }
}

/// Formats a decimal price as a signed American quote.
pub fn format_american(decimal: f64) -> String {
    let american = american_from_decimal(decimal);
    if american == 0 {
        "-".into()
    } else if american > 0 {
        format!("+{american}")
    } else {
        format!("{american}")
    }
}
