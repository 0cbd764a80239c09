use ordinalizer::Ordinal;
use strum::EnumCount;

use fulltime::factorial::Factorial;
use fulltime::linear::Matrix;
use fulltime::poisson;
use fulltime::probs::SliceExt;

use crate::domain::{MatchOutcome, OutcomeType, Score, Side};
use crate::strength::ExpectedGoals;

/// Adjustment applied to the independent Poisson product.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Correction {
    None,
    /// Dixon-Coles low-score correction with correlation parameter `ρ`.
    DixonColes { rho: f64 },
}

/// Multiplier applied to the `(home_goals, away_goals)` cell under the Dixon-Coles correction.
/// Only the four low-score cells are affected; every other cell has a factor of `1`.
#[inline]
pub fn dixon_coles_factor(home_goals: usize, away_goals: usize, home_rate: f64, away_rate: f64, rho: f64) -> f64 {
    match (home_goals, away_goals) {
        (0, 0) => 1.0 - home_rate * away_rate * rho,
        (0, 1) => 1.0 + home_rate * rho,
        (1, 0) => 1.0 + away_rate * rho,
        (1, 1) => 1.0 - rho,
        _ => 1.0,
    }
}

/// Running sums of the raw (unnormalised) grid mass falling into each market.
#[derive(Clone, Debug, PartialEq)]
pub struct MarketSums {
    pub outcomes: [f64; MatchOutcome::COUNT],
    pub both_score: f64,
    /// One entry per over line, in the same order as [`ScoreDistribution::over_lines`].
    pub over: Vec<f64>,
    pub total: f64,
}
impl MarketSums {
    fn new(lines: usize) -> Self {
        Self {
            outcomes: [0.0; MatchOutcome::COUNT],
            both_score: 0.0,
            over: vec![0.0; lines],
            total: 0.0,
        }
    }
}

/// The joint distribution of goals over a bounded `(max_goals + 1)²` grid. The grid is not
/// normalised: truncation and the Dixon-Coles correction both leave its mass slightly off `1`.
#[derive(Clone, Debug)]
pub struct ScoreDistribution {
    pub scoregrid: Matrix<f64>,
    pub sums: MarketSums,
    pub over_lines: Vec<u8>,
}
impl ScoreDistribution {
    /// Populates the grid and accumulates the market sums in a single pass. Corrected cells are
    /// floored at zero.
    pub fn build(
        expected: &ExpectedGoals,
        correction: Correction,
        max_goals: u8,
        over_lines: &[u8],
        factorial: &impl Factorial,
    ) -> Self {
        let dim = max_goals as usize + 1;
        let home_probs = marginal(expected.home, dim, factorial);
        let away_probs = marginal(expected.away, dim, factorial);

        let mut scoregrid = Matrix::allocate(dim, dim);
        let mut sums = MarketSums::new(over_lines.len());
        for (home_goals, &home_prob) in home_probs.iter().enumerate() {
            for (away_goals, &away_prob) in away_probs.iter().enumerate() {
                let mut prob = home_prob * away_prob;
                if let Correction::DixonColes { rho } = correction {
                    let factor = dixon_coles_factor(home_goals, away_goals, expected.home, expected.away, rho);
                    prob = f64::max(0.0, prob * factor);
                }
                scoregrid[(home_goals, away_goals)] = prob;

                let score = Score::new(home_goals as u8, away_goals as u8);
                sums.outcomes[score.outcome().ordinal()] += prob;
                if score.both_scored() {
                    sums.both_score += prob;
                }
                for (index, &line) in over_lines.iter().enumerate() {
                    if score.total() > line as u16 {
                        sums.over[index] += prob;
                    }
                }
                sums.total += prob;
            }
        }

        Self {
            scoregrid,
            sums,
            over_lines: over_lines.to_vec(),
        }
    }

    pub fn max_goals(&self) -> u8 {
        (self.scoregrid.rows() - 1) as u8
    }

    /// A copy of the grid scaled to unit mass.
    pub fn normalised(&self) -> Matrix<f64> {
        let mut scoregrid = self.scoregrid.clone();
        scoregrid.flatten_mut().normalise(1.0);
        scoregrid
    }
}

fn marginal(rate: f64, dim: usize, factorial: &impl Factorial) -> Vec<f64> {
    (0..dim)
        .map(|goals| poisson::univariate(goals as i32, rate, factorial))
        .collect()
}

pub fn from_univariate_poisson(home_rate: f64, away_rate: f64, scoregrid: &mut Matrix<f64>, factorial: &impl Factorial) {
    for home_goals in 0..scoregrid.rows() {
        for away_goals in 0..scoregrid.cols() {
            let home_prob = poisson::univariate(home_goals as i32, home_rate, factorial);
            let away_prob = poisson::univariate(away_goals as i32, away_rate, factorial);
            scoregrid[(home_goals, away_goals)] = home_prob * away_prob;
        }
    }
}

/// Applies the Dixon-Coles correction in place to a grid populated by
/// [`from_univariate_poisson`].
pub fn correct_dixon_coles(home_rate: f64, away_rate: f64, rho: f64, scoregrid: &mut Matrix<f64>) {
    for home_goals in 0..usize::min(2, scoregrid.rows()) {
        for away_goals in 0..usize::min(2, scoregrid.cols()) {
            let factor = dixon_coles_factor(home_goals, away_goals, home_rate, away_rate, rho);
            let cell = &mut scoregrid[(home_goals, away_goals)];
            *cell = f64::max(0.0, *cell * factor);
        }
    }
}

pub fn home_away_expectations(scoregrid: &Matrix<f64>) -> (f64, f64) {
    let (mut home_expectation, mut away_expectation) = (0.0, 0.0);

    for home_goals in 0..scoregrid.rows() {
        for away_goals in 0..scoregrid.cols() {
            let prob = scoregrid[(home_goals, away_goals)];
            home_expectation += home_goals as f64 * prob;
            away_expectation += away_goals as f64 * prob;
        }
    }

    (home_expectation, away_expectation)
}

/// The `n` most probable scorelines, in descending order of probability.
pub fn top_scores(scoregrid: &Matrix<f64>, n: usize) -> Vec<(Score, f64)> {
    let mut scores = scoregrid
        .cells()
        .map(|((home_goals, away_goals), &prob)| (Score::new(home_goals as u8, away_goals as u8), prob))
        .collect::<Vec<_>>();
    scores.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    scores.truncate(n);
    scores
}

impl OutcomeType {
    pub fn gather(&self, scoregrid: &Matrix<f64>) -> f64 {
        match self {
            OutcomeType::Win(side) => Self::gather_win(side, scoregrid),
            OutcomeType::Draw => Self::gather_draw(scoregrid),
            OutcomeType::BothScore => Self::gather_both_score(scoregrid),
            OutcomeType::NotBothScore => scoregrid.flatten().sum() - Self::gather_both_score(scoregrid),
            OutcomeType::Under(goals) => Self::gather_goals_under(*goals, scoregrid),
            OutcomeType::Over(goals) => Self::gather_goals_over(*goals, scoregrid),
            OutcomeType::Score(score) => Self::gather_correct_score(score, scoregrid),
        }
    }

    fn gather_win(side: &Side, scoregrid: &Matrix<f64>) -> f64 {
        let mut prob = 0.0;
        match side {
            Side::Home => {
                for row in 1..scoregrid.rows() {
                    for col in 0..usize::min(row, scoregrid.cols()) {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
            Side::Away => {
                for col in 1..scoregrid.cols() {
                    for row in 0..usize::min(col, scoregrid.rows()) {
                        prob += scoregrid[(row, col)];
                    }
                }
            }
        }
        prob
    }

    fn gather_draw(scoregrid: &Matrix<f64>) -> f64 {
        let mut prob = 0.0;
        for index in 0..usize::min(scoregrid.rows(), scoregrid.cols()) {
            prob += scoregrid[(index, index)];
        }
        prob
    }

    fn gather_both_score(scoregrid: &Matrix<f64>) -> f64 {
        let mut prob = 0.0;
        for row in 1..scoregrid.rows() {
            for col in 1..scoregrid.cols() {
                prob += scoregrid[(row, col)];
            }
        }
        prob
    }

    fn gather_goals_over(goals: u8, scoregrid: &Matrix<f64>) -> f64 {
        let goals = goals as usize;
        let mut prob = 0.0;
        for row in 0..scoregrid.rows() {
            for col in 0..scoregrid.cols() {
                if row + col > goals {
                    prob += scoregrid[(row, col)];
                }
            }
        }
        prob
    }

    fn gather_goals_under(goals: u8, scoregrid: &Matrix<f64>) -> f64 {
        let goals = goals as usize;
        let mut prob = 0.0;
        for row in 0..scoregrid.rows() {
            for col in 0..scoregrid.cols() {
                if row + col < goals {
                    prob += scoregrid[(row, col)];
                }
            }
        }
        prob
    }

    fn gather_correct_score(score: &Score, scoregrid: &Matrix<f64>) -> f64 {
        if (score.home as usize) < scoregrid.rows() && (score.away as usize) < scoregrid.cols() {
            scoregrid[(score.home as usize, score.away as usize)]
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests;
