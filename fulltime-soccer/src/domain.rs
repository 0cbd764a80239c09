use ordinalizer::Ordinal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter};

pub mod league;
pub mod team;

pub use league::{League, LeagueAverages, LookupError};
pub use team::{TeamSeasonStats, VenueRecord};

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}
impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    pub fn nil_all() -> Self {
        Self { home: 0, away: 0 }
    }

    pub fn total(&self) -> u16 {
        self.home as u16 + self.away as u16
    }

    pub fn outcome(&self) -> MatchOutcome {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => MatchOutcome::Home,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
            std::cmp::Ordering::Less => MatchOutcome::Away,
        }
    }

    pub fn both_scored(&self) -> bool {
        self.home > 0 && self.away > 0
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

/// The three-way (1X2) result of a match. Ordinals index the probability triplets.
#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, Ordinal, EnumCount, EnumIter, Display, Serialize, Deserialize,
)]
pub enum MatchOutcome {
    #[strum(serialize = "1")]
    Home,
    #[strum(serialize = "X")]
    Draw,
    #[strum(serialize = "2")]
    Away,
}
impl MatchOutcome {
    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        match ordinal {
            0 => Some(MatchOutcome::Home),
            1 => Some(MatchOutcome::Draw),
            2 => Some(MatchOutcome::Away),
            _ => None,
        }
    }
}

/// The priced outcomes of the goal-based markets.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OutcomeType {
    Win(Side),
    Draw,
    BothScore,
    NotBothScore,
    /// More than `n` total goals, i.e., over `n.5`.
    Over(u8),
    /// Fewer than `n` total goals, i.e., under `(n − 1).5`.
    Under(u8),
    Score(Score),
}
impl From<MatchOutcome> for OutcomeType {
    fn from(outcome: MatchOutcome) -> Self {
        match outcome {
            MatchOutcome::Home => OutcomeType::Win(Side::Home),
            MatchOutcome::Draw => OutcomeType::Draw,
            MatchOutcome::Away => OutcomeType::Win(Side::Away),
        }
    }
}
