//! Boundary parsing of upstream league data. Upstream records are loosely typed: numeric fields
//! may arrive as numbers, as strings (possibly with a comma decimal separator), as `null`, or not
//! at all. Everything is coerced here, once, so that the engine only ever sees well-formed
//! [`TeamSeasonStats`].

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::{League, LookupError, TeamSeasonStats, VenueRecord};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed league data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Permissive numeric coercion. Numbers pass through; strings are trimmed and have commas
/// normalised to dots before parsing. Anything negative, non-finite or unparseable becomes `0`.
pub fn coerce(value: &Value) -> f64 {
    let number = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(string) => string.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if number.is_finite() && number >= 0.0 {
        number
    } else {
        0.0
    }
}

/// A team record as published upstream.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTeam {
    pub name: Value,
    pub rank: Value,
    pub goals_for: Value,
    pub goals_against: Value,
    pub games_played: Value,
    pub wins: Value,
    pub ties: Value,
    pub losses: Value,
    pub points: Value,
    pub goals_for_home: Value,
    pub goals_for_away: Value,
    pub goals_against_home: Value,
    pub goals_against_away: Value,
    pub games_played_home: Value,
    pub games_played_away: Value,
    pub wins_home: Value,
    pub wins_away: Value,
    pub logo_url: Value,
}
impl RawTeam {
    /// Normalises the record. Yields `None` for a record without a usable name. Missing points are
    /// reconstructed as `3·wins + ties`.
    pub fn normalise(&self) -> Option<TeamSeasonStats> {
        let name = match &self.name {
            Value::String(name) if !name.trim().is_empty() => name.trim().to_string(),
            Value::Number(number) => number.to_string(),
            _ => return None,
        };
        let wins = coerce(&self.wins);
        let draws = coerce(&self.ties);
        let points = match coerce(&self.points) {
            points if points > 0.0 => points,
            _ => 3.0 * wins + draws,
        };
        let logo_url = match &self.logo_url {
            Value::String(url) if !url.trim().is_empty() => Some(url.trim().to_string()),
            _ => None,
        };
        Some(TeamSeasonStats {
            name,
            rank: coerce(&self.rank),
            logo_url,
            games: coerce(&self.games_played),
            wins,
            draws,
            losses: coerce(&self.losses),
            points,
            goals_for: coerce(&self.goals_for),
            goals_against: coerce(&self.goals_against),
            home: VenueRecord {
                games: coerce(&self.games_played_home),
                wins: coerce(&self.wins_home),
                goals_for: coerce(&self.goals_for_home),
                goals_against: coerce(&self.goals_against_home),
            },
            away: VenueRecord {
                games: coerce(&self.games_played_away),
                wins: coerce(&self.wins_away),
                goals_for: coerce(&self.goals_for_away),
                goals_against: coerce(&self.goals_against_away),
            },
        })
    }
}

/// An upcoming fixture, carried through for display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    #[serde(alias = "liga")]
    pub league: String,
    #[serde(alias = "local")]
    pub home: String,
    #[serde(alias = "visitante")]
    pub away: String,
    #[serde(alias = "hora")]
    pub kickoff: Option<String>,
    #[serde(alias = "estadio")]
    pub venue: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LeagueFile {
    #[serde(alias = "ligas")]
    leagues: BTreeMap<String, Vec<Value>>,
    #[serde(alias = "partidosFuturos")]
    fixtures: Vec<Fixture>,
}

/// Every league loaded from one source, keyed by league code.
#[derive(Debug, Default)]
pub struct DataSet {
    pub leagues: BTreeMap<String, League>,
    pub fixtures: Vec<Fixture>,
}
impl DataSet {
    pub fn read_json_file(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let reader = BufReader::new(File::open(path)?);
        let file: LeagueFile = serde_json::from_reader(reader)?;
        Ok(Self::from_file(file))
    }

    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let file: LeagueFile = serde_json::from_str(json)?;
        Ok(Self::from_file(file))
    }

    pub fn league(&self, code: &str) -> Result<&League, LookupError> {
        self.leagues
            .get(code.trim())
            .ok_or_else(|| LookupError::League(code.to_string()))
    }

    fn from_file(file: LeagueFile) -> Self {
        let mut leagues = BTreeMap::new();
        for (code, records) in file.leagues {
            let record_count = records.len();
            let teams = records
                .into_iter()
                .filter_map(|record| serde_json::from_value::<RawTeam>(record).ok())
                .filter_map(|raw| raw.normalise())
                .collect::<Vec<_>>();
            debug!("league {code}: kept {} of {record_count} records", teams.len());
            if !teams.is_empty() {
                leagues.insert(code.clone(), League::new(code, teams));
            }
        }
        Self {
            leagues,
            fixtures: file.fixtures,
        }
    }
}
