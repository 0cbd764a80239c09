//! Utilities for working with probabilities.

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn normalise(&mut self, target: f64) -> f64;
    fn scale(&mut self, factor: f64);
    fn argmax(&self) -> Option<usize>;
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    /// Scales the elements so that they sum to `target`, returning the sum prior to scaling.
    /// A slice with a non-positive or non-finite sum is left untouched.
    fn normalise(&mut self, target: f64) -> f64 {
        let sum = self.sum();
        if sum > 0.0 && sum.is_finite() {
            self.scale(target / sum);
        }
        sum
    }

    fn scale(&mut self, factor: f64) {
        for element in self {
            *element *= factor;
        }
    }

    /// Index of the largest element. The earliest index wins a tie; `NaN`s are skipped.
    fn argmax(&self) -> Option<usize> {
        let mut max: Option<(usize, f64)> = None;
        for (index, &element) in self.iter().enumerate() {
            if element.is_nan() {
                continue;
            }
            match max {
                Some((_, current)) if current >= element => {}
                _ => max = Some((index, element)),
            }
        }
        max.map(|(index, _)| index)
    }
}

/// Coerces a value into `[0, 1]`, mapping `NaN` to zero.
#[inline]
pub fn clamp_unit(prob: f64) -> f64 {
    if prob.is_nan() {
        0.0
    } else {
        prob.clamp(0.0, 1.0)
    }
}

/// Weighted mixture `w·a + (1 − w)·b`, with the weight clamped into `[0, 1]`.
#[inline]
pub fn mix(weight: f64, a: f64, b: f64) -> f64 {
    let weight = clamp_unit(weight);
    weight * a + (1.0 - weight) * b
}
