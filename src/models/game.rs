//! Football game model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{GameId, SchoolId, SeasonId};

/// Number of regulation quarters.
pub const REGULATION_PERIODS: usize = 4;

/// Maximum number of overtime periods tracked.
pub const OVERTIME_PERIODS: usize = 3;

/// Lifecycle status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Pregame,
    InProgress,
    Delayed,
    Postponed,
    Final,
}

impl GameStatus {
    /// Returns true once the score is final and counts toward records.
    pub fn is_final(&self) -> bool {
        matches!(self, GameStatus::Final)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Pregame => write!(f, "Pregame"),
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Delayed => write!(f, "Delayed"),
            GameStatus::Postponed => write!(f, "Postponed"),
            GameStatus::Final => write!(f, "Final"),
        }
    }
}

/// Which part of the schedule a game belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    #[default]
    Preseason,
    RegularSeason,
    Playoff,
}

/// Descriptive game fields shared by games and team game lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameDetails {
    pub kickoff: Option<NaiveDateTime>,
    pub status: GameStatus,
    pub status_description: Option<String>,
    pub game_type: GameType,
    pub featured_game: bool,
    pub location: Option<String>,
    pub location_address: Option<String>,
    pub location_description: Option<String>,
    pub conference_game: bool,
    pub result_headline: Option<String>,
    pub result_summary: Option<String>,
    pub live_audio: Option<String>,
    pub live_video: Option<String>,
}

/// Per-period points for one side of a game.
///
/// Unplayed overtime periods stay at 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodScores {
    pub quarters: [i32; REGULATION_PERIODS],
    pub overtimes: [i32; OVERTIME_PERIODS],
}

impl PeriodScores {
    pub fn new(quarters: [i32; REGULATION_PERIODS], overtimes: [i32; OVERTIME_PERIODS]) -> Self {
        Self {
            quarters,
            overtimes,
        }
    }

    /// Regulation-only scores.
    pub fn regulation(quarters: [i32; REGULATION_PERIODS]) -> Self {
        Self::new(quarters, [0; OVERTIME_PERIODS])
    }

    /// All periods in play order: four quarters, then overtimes.
    pub fn sequence(&self) -> [i32; REGULATION_PERIODS + OVERTIME_PERIODS] {
        let mut all = [0; REGULATION_PERIODS + OVERTIME_PERIODS];
        all[..REGULATION_PERIODS].copy_from_slice(&self.quarters);
        all[REGULATION_PERIODS..].copy_from_slice(&self.overtimes);
        all
    }

    /// True if any overtime period has points.
    pub fn went_to_overtime(&self) -> bool {
        self.overtimes.iter().any(|&p| p != 0)
    }
}

/// A single football game between a home and an away school.
///
/// Total scores are derived from the period scores on every commit and are
/// never entered directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(default)]
    pub id: Option<GameId>,

    #[serde(default)]
    pub slug: Option<String>,

    pub season: SeasonId,

    pub home_team: SchoolId,

    pub away_team: SchoolId,

    #[serde(default)]
    pub week: u32,

    #[serde(default)]
    pub game_of_the_week: bool,

    #[serde(default)]
    pub home_scores: PeriodScores,

    #[serde(default)]
    pub away_scores: PeriodScores,

    #[serde(default)]
    pub home_total_score: i32,

    #[serde(default)]
    pub away_total_score: i32,

    #[serde(default)]
    pub details: GameDetails,
}

impl Game {
    pub fn new(season: SeasonId, week: u32, home_team: SchoolId, away_team: SchoolId) -> Self {
        Self {
            id: None,
            slug: None,
            season,
            home_team,
            away_team,
            week,
            game_of_the_week: false,
            home_scores: PeriodScores::default(),
            away_scores: PeriodScores::default(),
            home_total_score: 0,
            away_total_score: 0,
            details: GameDetails::default(),
        }
    }

    /// Builder method to set both sides' period scores.
    pub fn with_scores(mut self, home: PeriodScores, away: PeriodScores) -> Self {
        self.home_scores = home;
        self.away_scores = away;
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: GameStatus) -> Self {
        self.details.status = status;
        self
    }

    /// Builder method to mark a conference game.
    pub fn with_conference_game(mut self, conference_game: bool) -> Self {
        self.details.conference_game = conference_game;
        self
    }

    /// Returns true if the team played in this game, home or away.
    pub fn involves(&self, team: SchoolId) -> bool {
        self.home_team == team || self.away_team == team
    }

    /// The opponent of `team`, or None if the team did not play.
    pub fn opponent_of(&self, team: SchoolId) -> Option<SchoolId> {
        if self.home_team == team {
            Some(self.away_team)
        } else if self.away_team == team {
            Some(self.home_team)
        } else {
            None
        }
    }

    /// Points scored and allowed by `team`, from the stored totals.
    pub fn score_for(&self, team: SchoolId) -> Option<(i32, i32)> {
        if self.home_team == team {
            Some((self.home_total_score, self.away_total_score))
        } else if self.away_team == team {
            Some((self.away_total_score, self.home_total_score))
        } else {
            None
        }
    }

    /// True if either side scored in overtime.
    pub fn went_to_overtime(&self) -> bool {
        self.home_scores.went_to_overtime() || self.away_scores.went_to_overtime()
    }

    /// Winning school of a final, non-tied game.
    pub fn winner(&self) -> Option<SchoolId> {
        if !self.details.status.is_final() {
            return None;
        }
        match self.home_total_score.cmp(&self.away_total_score) {
            std::cmp::Ordering::Greater => Some(self.home_team),
            std::cmp::Ordering::Less => Some(self.away_team),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Losing school of a final, non-tied game.
    pub fn loser(&self) -> Option<SchoolId> {
        self.winner().and_then(|w| self.opponent_of(w))
    }
}
