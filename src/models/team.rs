//! Team stat lines for a single game and for a season.

use serde::{Deserialize, Serialize};

use super::{ConferenceId, FootballStats, GameDetails, GameId, RecordId, SchoolId, SeasonId};

/// A school's statistical line for one game. One per (team, game).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamGame {
    #[serde(default)]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub slug: Option<String>,

    pub team: SchoolId,

    pub game: GameId,

    #[serde(default)]
    pub details: GameDetails,

    #[serde(default)]
    pub stats: FootballStats,
}

impl TeamGame {
    pub fn new(team: SchoolId, game: GameId) -> Self {
        Self {
            id: None,
            slug: None,
            team,
            game,
            details: GameDetails::default(),
            stats: FootballStats::default(),
        }
    }

    /// Builder method to set the raw stats.
    pub fn with_stats(mut self, stats: FootballStats) -> Self {
        self.stats = stats;
        self
    }
}

/// A school's aggregate record and stats for one season.
///
/// The schedule is not stored; see [`crate::standings::schedule_for`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSeason {
    #[serde(default)]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub slug: Option<String>,

    pub team: SchoolId,

    pub season: SeasonId,

    #[serde(default)]
    pub conference: Option<ConferenceId>,

    #[serde(default)]
    pub wins: u32,

    #[serde(default)]
    pub losses: u32,

    #[serde(default)]
    pub points_for: i32,

    #[serde(default)]
    pub points_against: i32,

    /// Final conference place (1 = champion, 0 = unplaced)
    #[serde(default)]
    pub place: u32,

    #[serde(default)]
    pub conference_wins: u32,

    #[serde(default)]
    pub conference_losses: u32,

    #[serde(default)]
    pub stats: FootballStats,
}

impl TeamSeason {
    pub fn new(team: SchoolId, season: SeasonId) -> Self {
        Self {
            id: None,
            slug: None,
            team,
            season,
            conference: None,
            wins: 0,
            losses: 0,
            points_for: 0,
            points_against: 0,
            place: 0,
            conference_wins: 0,
            conference_losses: 0,
            stats: FootballStats::default(),
        }
    }

    /// Builder method to set the conference.
    pub fn with_conference(mut self, conference: ConferenceId) -> Self {
        self.conference = Some(conference);
        self
    }

    /// Builder method to set the overall record.
    pub fn with_record(mut self, wins: u32, losses: u32) -> Self {
        self.wins = wins;
        self.losses = losses;
        self
    }

    /// Builder method to set the conference record.
    pub fn with_conference_record(mut self, wins: u32, losses: u32) -> Self {
        self.conference_wins = wins;
        self.conference_losses = losses;
        self
    }

    /// Builder method to set points for and against.
    pub fn with_points(mut self, points_for: i32, points_against: i32) -> Self {
        self.points_for = points_for;
        self.points_against = points_against;
        self
    }

    /// Builder method to set the final place.
    pub fn with_place(mut self, place: u32) -> Self {
        self.place = place;
        self
    }

    /// Points scored minus points allowed.
    pub fn point_differential(&self) -> i32 {
        self.points_for - self.points_against
    }
}
