//! Numeric building blocks for pricing sporting contests: factorial kernels, the Poisson
//! distribution, probability slice utilities, a dense matrix, price conversions and
//! fractional-Kelly staking.

pub mod display;
pub mod factorial;
pub mod file;
pub mod kelly;
pub mod linear;
pub mod poisson;
pub mod price;
pub mod probs;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
