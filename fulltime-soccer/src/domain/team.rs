use serde::{Deserialize, Serialize};

use super::Side;

/// Games, wins and goals accrued at one venue (home or away).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueRecord {
    pub games: f64,
    pub wins: f64,
    pub goals_for: f64,
    pub goals_against: f64,
}
impl VenueRecord {
    pub fn is_empty(&self) -> bool {
        self.games <= 0.0
    }

    pub fn win_rate(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.wins / self.games)
    }

    pub fn goal_difference(&self) -> f64 {
        self.goals_for - self.goals_against
    }
}

/// A read-only snapshot of one team's season in one competition. All counts are non-negative;
/// see [`crate::data`] for how raw upstream records are coerced into this form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonStats {
    pub name: String,
    pub rank: f64,
    pub logo_url: Option<String>,
    pub games: f64,
    pub wins: f64,
    pub draws: f64,
    pub losses: f64,
    pub points: f64,
    pub goals_for: f64,
    pub goals_against: f64,
    pub home: VenueRecord,
    pub away: VenueRecord,
}
impl TeamSeasonStats {
    pub fn venue(&self, side: Side) -> &VenueRecord {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    /// Whether any game at all has been recorded, in aggregate or at either venue.
    pub fn has_played(&self) -> bool {
        self.games > 0.0 || !self.home.is_empty() || !self.away.is_empty()
    }

    /// Goals scored per game at the given venue, falling back to the season-aggregate rate when
    /// the venue split is empty. `None` when no games have been recorded at all.
    pub fn scoring_rate(&self, side: Side) -> Option<f64> {
        let venue = self.venue(side);
        if !venue.is_empty() {
            Some(venue.goals_for / venue.games)
        } else if self.games > 0.0 {
            Some(self.goals_for / self.games)
        } else {
            None
        }
    }

    /// Goals conceded per game at the given venue, with the same fallbacks as
    /// [`Self::scoring_rate`].
    pub fn conceding_rate(&self, side: Side) -> Option<f64> {
        let venue = self.venue(side);
        if !venue.is_empty() {
            Some(venue.goals_against / venue.games)
        } else if self.games > 0.0 {
            Some(self.goals_against / self.games)
        } else {
            None
        }
    }

    pub fn points_per_game(&self) -> f64 {
        self.points / if self.games > 0.0 { self.games } else { 1.0 }
    }

    pub fn goal_difference(&self) -> f64 {
        self.goals_for - self.goals_against
    }
}
