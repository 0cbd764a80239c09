//! Football match-outcome prediction: team strengths, Poisson and Dixon-Coles score grids, the
//! 1X2, both-teams-to-score and over/under markets derived from them, and staking advice.

pub mod advice;
pub mod config;
pub mod data;
pub mod domain;
pub mod market;
pub mod model;
pub mod print;
pub mod scoregrid;
pub mod strength;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
