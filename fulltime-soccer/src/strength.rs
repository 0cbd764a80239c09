//! Attack and defence ratios relative to the league baseline, and the expected goals (λ) they
//! imply for a specific pairing.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::domain::{LeagueAverages, Side, TeamSeasonStats};

/// The Poisson rates of goals scored by each side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
}
impl ExpectedGoals {
    pub fn new(home: f64, away: f64) -> Self {
        Self { home, away }
    }

    pub fn total(&self) -> f64 {
        self.home + self.away
    }

    fn clamp(self, config: &Config) -> Self {
        let clamp = |lambda: f64| {
            if lambda.is_nan() {
                config.min_lambda
            } else {
                lambda.clamp(config.min_lambda, config.max_lambda)
            }
        };
        Self {
            home: clamp(self.home),
            away: clamp(self.away),
        }
    }
}

/// One side's ratios. An attack (defence) of `1` scores (concedes) at the league rate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamStrength {
    pub attack: f64,
    pub defense: f64,
    pub form: f64,
}

impl Default for TeamStrength {
    fn default() -> Self {
        Self {
            attack: 1.0,
            defense: 1.0,
            form: 1.0,
        }
    }
}

/// Per-game figures entered directly rather than derived from a season record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    pub goals_for: f64,
    pub goals_against: f64,
    /// Venue win rate, in percent.
    pub win_pct: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Strengths {
    pub home: TeamStrength,
    pub away: TeamStrength,
    pub averages: LeagueAverages,
}
impl Strengths {
    /// Rates the host on its home record and the visitor on its away record, each normalised by
    /// the league's home averages. The visitor's attack and the host's defence are measured
    /// against goals conceded by hosts; the host's attack and the visitor's defence against goals
    /// scored by hosts. A team without any recorded games is neutral.
    pub fn assess(
        home: &TeamSeasonStats,
        away: &TeamSeasonStats,
        averages: &LeagueAverages,
        config: &Config,
    ) -> Self {
        let home_strength = TeamStrength {
            attack: ratio(home.scoring_rate(Side::Home), averages.home_goals_for),
            defense: ratio(home.conceding_rate(Side::Home), averages.home_goals_against),
            form: form(home.home.win_rate(), config),
        };
        let away_strength = TeamStrength {
            attack: ratio(away.scoring_rate(Side::Away), averages.home_goals_against),
            defense: ratio(away.conceding_rate(Side::Away), averages.home_goals_for),
            form: form(away.away.win_rate(), config),
        };
        debug!("{}: {home_strength:?}, {}: {away_strength:?}", home.name, away.name);
        Self {
            home: home_strength,
            away: away_strength,
            averages: averages.clone(),
        }
    }

    /// Rates both sides from per-game figures against the configured fallback averages.
    pub fn from_rates(home: &Rates, away: &Rates, config: &Config) -> Self {
        let averages = &config.league_fallback;
        let percent = |win_pct: f64| Some(non_negative(win_pct) / 100.0);
        Self {
            home: TeamStrength {
                attack: ratio(Some(non_negative(home.goals_for)), averages.home_goals_for),
                defense: ratio(Some(non_negative(home.goals_against)), averages.home_goals_against),
                form: form(percent(home.win_pct), config),
            },
            away: TeamStrength {
                attack: ratio(Some(non_negative(away.goals_for)), averages.home_goals_against),
                defense: ratio(Some(non_negative(away.goals_against)), averages.home_goals_for),
                form: form(percent(away.win_pct), config),
            },
            averages: averages.clone(),
        }
    }

    /// `λh = attack_h · defence_a · avg_for · advantage · form_h` and
    /// `λa = attack_a · defence_h · avg_against · form_a`, both clamped into the configured band.
    pub fn expected_goals(&self, config: &Config) -> ExpectedGoals {
        let home = self.home.attack
            * self.away.defense
            * self.averages.home_goals_for
            * config.home_advantage
            * self.home.form;
        let away = self.away.attack
            * self.home.defense
            * self.averages.home_goals_against
            * self.away.form;
        ExpectedGoals { home, away }.clamp(config)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        f64::max(0.0, value)
    } else {
        0.0
    }
}

fn ratio(rate: Option<f64>, baseline: f64) -> f64 {
    match rate {
        Some(rate) if baseline > 0.0 && baseline.is_finite() => rate / baseline,
        _ => 1.0,
    }
}

fn form(win_rate: Option<f64>, config: &Config) -> f64 {
    match win_rate {
        Some(win_rate) if win_rate.is_finite() => {
            (win_rate + config.form_offset).clamp(config.min_form, config.max_form)
        }
        _ => 1.0,
    }
}
