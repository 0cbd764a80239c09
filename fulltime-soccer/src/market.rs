//! Reduction of score distributions into the published market probabilities.

use ordinalizer::Ordinal;
use serde::{Deserialize, Serialize};
use strum::EnumCount;
use tracing::debug;

use fulltime::factorial::Factorial;
use fulltime::probs::{clamp_unit, mix, SliceExt};

use crate::config::{Config, ModelKind};
use crate::domain::{MatchOutcome, OutcomeType, Side};
use crate::scoregrid::{Correction, ScoreDistribution};
use crate::strength::ExpectedGoals;

/// Normalised probabilities of the 1X2, both-teams-to-score and over/under markets. The 1X2
/// triplet sums to one; every other market is an independent estimate in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketProbabilities {
    pub outcomes: [f64; MatchOutcome::COUNT],
    pub both_score: f64,
    /// `(n, P(total > n))` for each over line `n.5`, in ascending order of `n`.
    pub over: Vec<(u8, f64)>,
}
impl MarketProbabilities {
    /// The uninformed prior: an even three-way split and a coin toss on every other market.
    pub fn uniform(over_lines: &[u8]) -> Self {
        Self {
            outcomes: [1.0 / MatchOutcome::COUNT as f64; MatchOutcome::COUNT],
            both_score: 0.5,
            over: over_lines.iter().map(|&line| (line, 0.5)).collect(),
        }
    }

    /// Divides every market sum by the grid's total mass. A grid without usable mass yields the
    /// uniform prior.
    pub fn from_distribution(distribution: &ScoreDistribution) -> Self {
        let total = distribution.sums.total;
        if !(total > 0.0 && total.is_finite()) {
            return Self::uniform(&distribution.over_lines);
        }

        let mut outcomes = distribution.sums.outcomes.map(|sum| clamp_unit(sum / total));
        outcomes.normalise(1.0);
        let over = distribution
            .over_lines
            .iter()
            .zip(distribution.sums.over.iter())
            .map(|(&line, &sum)| (line, clamp_unit(sum / total)))
            .collect();
        Self {
            outcomes,
            both_score: clamp_unit(distribution.sums.both_score / total),
            over,
        }
    }

    /// `w · dixon_coles + (1 − w) · poisson` for every market, after which the 1X2 triplet is
    /// renormalised. Over lines absent from either side are dropped.
    pub fn blend(dixon_coles_weight: f64, dixon_coles: &Self, poisson: &Self) -> Self {
        let mut outcomes = [0.0; MatchOutcome::COUNT];
        for (index, outcome) in outcomes.iter_mut().enumerate() {
            *outcome = clamp_unit(mix(
                dixon_coles_weight,
                dixon_coles.outcomes[index],
                poisson.outcomes[index],
            ));
        }
        outcomes.normalise(1.0);

        let over = dixon_coles
            .over
            .iter()
            .filter_map(|&(line, dixon_coles_prob)| {
                poisson
                    .over(line)
                    .map(|poisson_prob| (line, clamp_unit(mix(dixon_coles_weight, dixon_coles_prob, poisson_prob))))
            })
            .collect();
        Self {
            outcomes,
            both_score: clamp_unit(mix(dixon_coles_weight, dixon_coles.both_score, poisson.both_score)),
            over,
        }
    }

    pub fn get(&self, outcome: MatchOutcome) -> f64 {
        self.outcomes[outcome.ordinal()]
    }

    /// The most probable 1X2 outcome. Ties resolve in the order home, draw, away.
    pub fn favourite(&self) -> MatchOutcome {
        self.outcomes
            .argmax()
            .and_then(MatchOutcome::from_ordinal)
            .unwrap_or(MatchOutcome::Draw)
    }

    pub fn not_both_score(&self) -> f64 {
        1.0 - self.both_score
    }

    /// `P(total > line)`, if the line was evaluated.
    pub fn over(&self, line: u8) -> Option<f64> {
        self.over
            .iter()
            .find(|(candidate, _)| *candidate == line)
            .map(|&(_, prob)| prob)
    }

    /// `P(total ≤ line)`, the complement of [`Self::over`].
    pub fn under(&self, line: u8) -> Option<f64> {
        self.over(line).map(|prob| 1.0 - prob)
    }

    /// The probability of a priced outcome, where the markets cover it. Correct scores are not
    /// covered; they are read off the grid instead.
    pub fn probability(&self, outcome: &OutcomeType) -> Option<f64> {
        match outcome {
            OutcomeType::Win(Side::Home) => Some(self.get(MatchOutcome::Home)),
            OutcomeType::Draw => Some(self.get(MatchOutcome::Draw)),
            OutcomeType::Win(Side::Away) => Some(self.get(MatchOutcome::Away)),
            OutcomeType::BothScore => Some(self.both_score),
            OutcomeType::NotBothScore => Some(self.not_both_score()),
            OutcomeType::Over(line) => self.over(*line),
            OutcomeType::Under(goals) => goals.checked_sub(1).and_then(|line| self.under(line)),
            OutcomeType::Score(_) => None,
        }
    }
}

/// The published markets together with the distribution they were primarily derived from.
#[derive(Clone, Debug)]
pub struct Aggregate {
    pub markets: MarketProbabilities,
    /// The Dixon-Coles correlation, where the correction took part.
    pub rho: Option<f64>,
    /// The Dixon-Coles grid, unless the model is plain Poisson.
    pub distribution: ScoreDistribution,
}

/// Builds the distribution(s) the configured model calls for and reduces them to markets.
pub fn aggregate(expected: &ExpectedGoals, config: &Config, factorial: &impl Factorial) -> Aggregate {
    let build = |correction| {
        ScoreDistribution::build(expected, correction, config.max_goals, &config.over_lines, factorial)
    };
    let rho = config.rho.evaluate(expected.home, expected.away);
    debug!("λ: {expected:?}, ρ: {rho:.4}, model: {:?}", config.model);

    match config.model {
        ModelKind::Poisson => {
            let distribution = build(Correction::None);
            Aggregate {
                markets: MarketProbabilities::from_distribution(&distribution),
                rho: None,
                distribution,
            }
        }
        ModelKind::DixonColes => {
            let distribution = build(Correction::DixonColes { rho });
            Aggregate {
                markets: MarketProbabilities::from_distribution(&distribution),
                rho: Some(rho),
                distribution,
            }
        }
        ModelKind::Blended { dixon_coles_weight } => {
            let poisson = build(Correction::None);
            let distribution = build(Correction::DixonColes { rho });
            let markets = MarketProbabilities::blend(
                dixon_coles_weight,
                &MarketProbabilities::from_distribution(&distribution),
                &MarketProbabilities::from_distribution(&poisson),
            );
            Aggregate {
                markets,
                rho: Some(rho),
                distribution,
            }
        }
    }
}
