use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use fulltime::factorial::Memo;
use fulltime::kelly::Stake;
use fulltime::linear::Matrix;

use crate::advice::{caveats, stakes, Advice, Caveat};
use crate::config::Config;
use crate::domain::{League, LeagueAverages, LookupError, OutcomeType, Score, TeamSeasonStats};
use crate::market::{aggregate, MarketProbabilities};
use crate::scoregrid::top_scores;
use crate::strength::{ExpectedGoals, Rates, Strengths};

/// Number of correct scores reported with each prediction.
pub const TOP_SCORES: usize = 5;

/// The two sides of a fixture and the league that supplies their baseline. Immutable for the
/// duration of a prediction; the tuning knobs live with the [`Predictor`].
#[derive(Debug, Clone, Copy)]
pub struct MatchInput<'a> {
    pub home: &'a TeamSeasonStats,
    pub away: &'a TeamSeasonStats,
    pub league: &'a League,
}
impl<'a> MatchInput<'a> {
    /// Resolves a fixture by team names within a league.
    pub fn lookup(league: &'a League, home: &str, away: &str) -> Result<Self, LookupError> {
        let (home, away) = league.matchup(home, away)?;
        Ok(Self { home, away, league })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub home: String,
    pub away: String,
    pub averages: LeagueAverages,
    /// Absent when either side has no recorded games.
    pub strengths: Option<Strengths>,
    pub expected: ExpectedGoals,
    pub rho: Option<f64>,
    pub markets: MarketProbabilities,
    pub advice: Advice,
    pub top_scores: Vec<(Score, f64)>,
    pub caveats: Vec<Caveat>,

    /// The normalised score grid; empty under the uniform prior.
    #[serde(skip)]
    pub scoregrid: Matrix<f64>,
}
impl Prediction {
    pub fn is_uniform_prior(&self) -> bool {
        self.strengths.is_none()
    }

    pub fn stakes(&self, prices: &[(OutcomeType, f64)], config: &Config) -> Vec<(OutcomeType, Stake)> {
        stakes(&self.markets, &self.scoregrid, prices, config.bankroll, config.kelly_multiplier)
    }
}

/// The prediction engine. Holds a sanitised configuration and a factorial cache that is shared
/// by every prediction, so a single instance may serve many threads.
#[derive(Default)]
pub struct Predictor {
    config: Config,
    factorial: Memo,
}
impl Predictor {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn predict(&self, input: &MatchInput) -> Prediction {
        let start = Instant::now();
        let (home, away) = (input.home, input.away);
        let averages = input.league.averages(&self.config.league_fallback);
        let caveats = caveats(home, away, self.config.min_games);

        let prediction = if home.has_played() && away.has_played() {
            let strengths = Strengths::assess(home, away, &averages, &self.config);
            self.derive(strengths, home, away, caveats)
        } else {
            let expected = ExpectedGoals::new(averages.home_goals_for, averages.home_goals_against);
            let markets = MarketProbabilities::uniform(&self.config.over_lines);
            Prediction {
                home: home.name.clone(),
                away: away.name.clone(),
                averages,
                strengths: None,
                advice: Advice::assess(&markets, &expected, home, away),
                expected,
                rho: None,
                markets,
                top_scores: vec![],
                caveats,
                scoregrid: Matrix::allocate(0, 0),
            }
        };
        debug!(
            "predicted {} v {} in {:?}: {:?}",
            prediction.home,
            prediction.away,
            start.elapsed(),
            prediction.markets.outcomes
        );
        prediction
    }

    /// Predicts from per-game figures rather than season records.
    pub fn predict_from_rates(&self, home: &Rates, away: &Rates) -> Prediction {
        let strengths = Strengths::from_rates(home, away, &self.config);
        let (home, away) = (
            TeamSeasonStats {
                name: "Home".into(),
                ..Default::default()
            },
            TeamSeasonStats {
                name: "Away".into(),
                ..Default::default()
            },
        );
        self.derive(strengths, &home, &away, vec![])
    }

    fn derive(
        &self,
        strengths: Strengths,
        home: &TeamSeasonStats,
        away: &TeamSeasonStats,
        caveats: Vec<Caveat>,
    ) -> Prediction {
        let expected = strengths.expected_goals(&self.config);
        let aggregate = aggregate(&expected, &self.config, &self.factorial);
        let scoregrid = aggregate.distribution.normalised();
        Prediction {
            home: home.name.clone(),
            away: away.name.clone(),
            averages: strengths.averages.clone(),
            advice: Advice::assess(&aggregate.markets, &expected, home, away),
            strengths: Some(strengths),
            expected,
            rho: aggregate.rho,
            markets: aggregate.markets,
            top_scores: top_scores(&scoregrid, TOP_SCORES),
            caveats,
            scoregrid,
        }
    }
}

impl From<Config> for Predictor {
    fn from(config: Config) -> Self {
        Self {
            config: config.sanitise(),
            factorial: Memo::default(),
        }
    }
}

#[cfg(test)]
mod tests;
