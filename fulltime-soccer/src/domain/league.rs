use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::TeamSeasonStats;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("no league with code {0:?}")]
    League(String),

    #[error("no team named {team:?} in {league:?}")]
    Team { league: String, team: String },

    #[error("{0:?} cannot play against itself")]
    SameTeam(String),
}

/// League-wide per-game scoring baselines, measured from the host's perspective.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeagueAverages {
    /// Goals scored per game by home sides.
    pub home_goals_for: f64,

    /// Goals conceded per game by home sides; equivalently, goals scored per game by visitors.
    pub home_goals_against: f64,
}

impl Default for LeagueAverages {
    fn default() -> Self {
        Self {
            home_goals_for: 1.2,
            home_goals_against: 1.0,
        }
    }
}

/// The roster of one competition.
#[derive(Clone, Debug, Default)]
pub struct League {
    pub code: String,
    teams: Vec<TeamSeasonStats>,
    by_name: FxHashMap<String, usize>,
}
impl League {
    pub fn new(code: impl Into<String>, teams: Vec<TeamSeasonStats>) -> Self {
        let mut by_name = FxHashMap::with_capacity_and_hasher(teams.len(), Default::default());
        for (index, team) in teams.iter().enumerate() {
            by_name.entry(name_key(&team.name)).or_insert(index);
        }
        Self {
            code: code.into(),
            teams,
            by_name,
        }
    }

    pub fn teams(&self) -> &[TeamSeasonStats] {
        &self.teams
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Case-insensitive, whitespace-trimmed lookup by team name.
    pub fn team(&self, name: &str) -> Result<&TeamSeasonStats, LookupError> {
        self.by_name
            .get(&name_key(name))
            .map(|&index| &self.teams[index])
            .ok_or_else(|| LookupError::Team {
                league: self.code.clone(),
                team: name.to_string(),
            })
    }

    /// Resolves a home/away pairing, rejecting a team drawn against itself.
    pub fn matchup(
        &self,
        home: &str,
        away: &str,
    ) -> Result<(&TeamSeasonStats, &TeamSeasonStats), LookupError> {
        if name_key(home) == name_key(away) {
            return Err(LookupError::SameTeam(home.trim().to_string()));
        }
        Ok((self.team(home)?, self.team(away)?))
    }

    /// Derives per-game home scoring and conceding averages across the league. A team with an
    /// empty home split contributes half of its aggregate games and goals (rounded up). Either
    /// average falls back to its counterpart in `fallback` when the league offers no usable data.
    pub fn averages(&self, fallback: &LeagueAverages) -> LeagueAverages {
        let (mut games, mut goals_for, mut goals_against) = (0.0, 0.0, 0.0);
        for team in &self.teams {
            if team.home.is_empty() {
                games += f64::ceil(team.games / 2.0);
                goals_for += f64::ceil(team.goals_for / 2.0);
                goals_against += f64::ceil(team.goals_against / 2.0);
            } else {
                games += team.home.games;
                goals_for += team.home.goals_for;
                goals_against += team.home.goals_against;
            }
        }

        let average = |goals: f64, fallback: f64| {
            let average = goals / games;
            if games > 0.0 && average > 0.0 && average.is_finite() {
                average
            } else {
                fallback
            }
        };
        LeagueAverages {
            home_goals_for: average(goals_for, fallback.home_goals_for),
            home_goals_against: average(goals_against, fallback.home_goals_against),
        }
    }
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
