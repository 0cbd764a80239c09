//! Human-readable guidance derived from the markets: the main pick and its confidence, leans on
//! the goal markets, caveats over thin samples, and stakes against quoted prices.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::warn;

use fulltime::display::Percent;
use fulltime::kelly::Stake;
use fulltime::linear::Matrix;

use crate::domain::{MatchOutcome, OutcomeType, TeamSeasonStats};
use crate::market::MarketProbabilities;
use crate::strength::ExpectedGoals;

pub const BALANCED_BELOW: f64 = 0.38;
pub const HIGH_ABOVE: f64 = 0.65;
pub const LEAN_YES_ABOVE: f64 = 0.58;
pub const LEAN_NO_BELOW: f64 = 0.42;
pub const ATTACKING_ABOVE: f64 = 3.2;
pub const DEFENSIVE_BELOW: f64 = 2.2;

/// The over/under line singled out for a lean, i.e., 2.5 goals.
pub const HEADLINE_LINE: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    /// No outcome stands out; a straight bet is best avoided.
    Balanced,
    Moderate,
    High,
}
impl Confidence {
    pub fn from_probability(prob: f64) -> Self {
        if prob < BALANCED_BELOW {
            Confidence::Balanced
        } else if prob > HIGH_ABOVE {
            Confidence::High
        } else {
            Confidence::Moderate
        }
    }
}

impl Display for Confidence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Balanced => write!(f, "balanced, avoid a straight bet"),
            Confidence::Moderate => write!(f, "moderate"),
            Confidence::High => write!(f, "high"),
        }
    }
}

/// A lean on a yes/no market, carrying the probability of the favoured side.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Lean {
    Yes(f64),
    No(f64),
    Neutral,
}
impl Lean {
    pub fn from_probability(prob: f64) -> Self {
        if prob > LEAN_YES_ABOVE {
            Lean::Yes(prob)
        } else if prob < LEAN_NO_BELOW {
            Lean::No(1.0 - prob)
        } else {
            Lean::Neutral
        }
    }
}

impl Display for Lean {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Lean::Yes(prob) => write!(f, "yes ({})", Percent(*prob)),
            Lean::No(prob) => write!(f, "no ({})", Percent(*prob)),
            Lean::Neutral => write!(f, "no clear lean"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalProfile {
    Attacking,
    Even,
    Defensive,
}
impl GoalProfile {
    pub fn from_total(expected_total: f64) -> Self {
        if expected_total > ATTACKING_ABOVE {
            GoalProfile::Attacking
        } else if expected_total < DEFENSIVE_BELOW {
            GoalProfile::Defensive
        } else {
            GoalProfile::Even
        }
    }
}

impl Display for GoalProfile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalProfile::Attacking => write!(f, "open, high-scoring"),
            GoalProfile::Even => write!(f, "even"),
            GoalProfile::Defensive => write!(f, "tight, low-scoring"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Caveat {
    /// Fewer games than the configured threshold.
    LowSample { team: String, games: f64 },
    /// No games recorded at all; the markets are the uniform prior.
    NoData { team: String },
}

impl Display for Caveat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Caveat::LowSample { team, games } => {
                write!(f, "{team} has played only {games} games; treat the estimate with caution")
            }
            Caveat::NoData { team } => write!(f, "{team} has no recorded games; showing the uniform prior"),
        }
    }
}

/// Flags either side whose sample is too thin to trust.
pub fn caveats(home: &TeamSeasonStats, away: &TeamSeasonStats, min_games: u32) -> Vec<Caveat> {
    let caveats = [home, away]
        .into_iter()
        .filter_map(|team| {
            if !team.has_played() {
                Some(Caveat::NoData {
                    team: team.name.clone(),
                })
            } else if team.games < min_games as f64 {
                Some(Caveat::LowSample {
                    team: team.name.clone(),
                    games: team.games,
                })
            } else {
                None
            }
        })
        .collect::<Vec<_>>();
    for caveat in &caveats {
        warn!("{caveat}");
    }
    caveats
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub pick: MatchOutcome,
    pub pick_probability: f64,
    pub confidence: Confidence,
    pub both_score: Lean,
    /// Lean on over 2.5 goals, if that line was evaluated.
    pub over: Option<Lean>,
    pub goal_profile: GoalProfile,
    /// Points-per-game of the host less that of the visitor.
    pub strength_difference: f64,
}
impl Advice {
    pub fn assess(
        markets: &MarketProbabilities,
        expected: &ExpectedGoals,
        home: &TeamSeasonStats,
        away: &TeamSeasonStats,
    ) -> Self {
        let pick = markets.favourite();
        let pick_probability = markets.get(pick);
        Self {
            pick,
            pick_probability,
            confidence: Confidence::from_probability(pick_probability),
            both_score: Lean::from_probability(markets.both_score),
            over: markets.over(HEADLINE_LINE).map(Lean::from_probability),
            goal_profile: GoalProfile::from_total(expected.total()),
            strength_difference: home.points_per_game() - away.points_per_game(),
        }
    }
}

/// Sizes a stake for every priced outcome. Outcomes outside the evaluated markets (correct
/// scores, unevaluated lines) are read off the normalised grid.
pub fn stakes(
    markets: &MarketProbabilities,
    scoregrid: &Matrix<f64>,
    prices: &[(OutcomeType, f64)],
    bankroll: f64,
    kelly_multiplier: f64,
) -> Vec<(OutcomeType, Stake)> {
    prices
        .iter()
        .map(|(outcome, price)| {
            let prob = markets
                .probability(outcome)
                .unwrap_or_else(|| outcome.gather(scoregrid));
            (outcome.clone(), Stake::recommend(prob, *price, bankroll, kelly_multiplier))
        })
        .collect()
}
