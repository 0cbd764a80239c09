//! Tunable parameters of the engine. Every knob has a default; out-of-range values are clamped
//! by [`Config::sanitise`] rather than rejected.

use serde::{Deserialize, Serialize};

use crate::domain::LeagueAverages;

/// The largest supported goal-grid bound.
pub const MAX_GRID_GOALS: u8 = 30;

/// Source of the Dixon-Coles low-score correlation parameter `ρ`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Rho {
    /// `ρ = −scale · min(λh, λa) / max((λh + λa) / 2, floor)`, proportional to match intensity.
    Proportional { scale: f64, floor: f64 },

    /// A constant `ρ`, independent of the expected goals.
    Fixed(f64),
}
impl Rho {
    pub fn evaluate(&self, home_rate: f64, away_rate: f64) -> f64 {
        match self {
            Rho::Proportional { scale, floor } => {
                let intensity = f64::max((home_rate + away_rate) / 2.0, *floor);
                -scale * f64::min(home_rate, away_rate) / intensity
            }
            Rho::Fixed(rho) => *rho,
        }
    }
}

impl Default for Rho {
    fn default() -> Self {
        Rho::Proportional {
            scale: 0.15,
            floor: 1.0,
        }
    }
}

/// Which score distribution(s) the published markets are derived from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ModelKind {
    Poisson,
    DixonColes,
    /// `w · DixonColes + (1 − w) · Poisson`.
    Blended { dixon_coles_weight: f64 },
}

impl Default for ModelKind {
    fn default() -> Self {
        ModelKind::Blended {
            dixon_coles_weight: 0.7,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Multiplier applied to the host's expected goals.
    pub home_advantage: f64,

    /// Baselines used when the league offers no usable averages.
    pub league_fallback: LeagueAverages,

    pub min_lambda: f64,
    pub max_lambda: f64,

    /// Added to the venue win rate before clamping into the form band.
    pub form_offset: f64,
    pub min_form: f64,
    pub max_form: f64,

    pub rho: Rho,
    pub model: ModelKind,

    /// Goals per side are enumerated over `0..=max_goals`.
    pub max_goals: u8,

    /// Total-goal lines, each `n` denoting the over/under `n.5` market.
    pub over_lines: Vec<u8>,

    pub bankroll: f64,
    pub kelly_multiplier: f64,

    /// Teams with fewer games than this attract a low-sample caveat.
    pub min_games: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_advantage: 1.25,
            league_fallback: LeagueAverages::default(),
            min_lambda: 0.1,
            max_lambda: 6.0,
            form_offset: 0.5,
            min_form: 0.7,
            max_form: 1.5,
            rho: Rho::default(),
            model: ModelKind::default(),
            max_goals: 12,
            over_lines: vec![1, 2, 3],
            bankroll: 1000.0,
            kelly_multiplier: 0.5,
            min_games: 5,
        }
    }
}

impl Config {
    /// Clamps every parameter into its admissible range. Non-finite values revert to defaults.
    pub fn sanitise(mut self) -> Self {
        let defaults = Config::default();

        self.home_advantage = positive_or(self.home_advantage, defaults.home_advantage);
        self.league_fallback.home_goals_for = positive_or(
            self.league_fallback.home_goals_for,
            defaults.league_fallback.home_goals_for,
        );
        self.league_fallback.home_goals_against = positive_or(
            self.league_fallback.home_goals_against,
            defaults.league_fallback.home_goals_against,
        );

        self.min_lambda = positive_or(self.min_lambda, defaults.min_lambda);
        self.max_lambda = finite_or(self.max_lambda, defaults.max_lambda).max(self.min_lambda);

        self.form_offset = finite_or(self.form_offset, defaults.form_offset);
        self.min_form = positive_or(self.min_form, defaults.min_form);
        self.max_form = finite_or(self.max_form, defaults.max_form).max(self.min_form);

        self.rho = match self.rho {
            Rho::Proportional { scale, floor } => Rho::Proportional {
                scale: finite_or(scale, 0.15).max(0.0),
                floor: positive_or(floor, 1.0),
            },
            Rho::Fixed(rho) => Rho::Fixed(finite_or(rho, 0.0).clamp(-1.0, 1.0)),
        };
        self.model = match self.model {
            ModelKind::Blended { dixon_coles_weight } => ModelKind::Blended {
                dixon_coles_weight: finite_or(dixon_coles_weight, 0.7).clamp(0.0, 1.0),
            },
            other => other,
        };

        self.max_goals = self.max_goals.clamp(1, MAX_GRID_GOALS);
        self.over_lines.sort_unstable();
        self.over_lines.dedup();

        self.bankroll = finite_or(self.bankroll, 0.0).max(0.0);
        self.kelly_multiplier = finite_or(self.kelly_multiplier, defaults.kelly_multiplier).clamp(0.0, 1.0);
        self
    }
}

fn finite_or(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        default
    }
}

fn positive_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default
    }
}
