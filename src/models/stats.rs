//! Raw football statistics and the rates derived from them.

use serde::{Deserialize, Serialize};

/// The raw counting-stat field set shared by every team and player stat line.
///
/// Every field defaults to 0 when absent from input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootballStats {
    pub football_games: i32,

    pub rushing_rushes: i32,
    pub rushing_yards: i32,
    pub rushing_touchdowns: i32,

    pub passing_attempts: i32,
    pub passing_completions: i32,
    pub passing_yards: i32,
    pub passing_interceptions: i32,
    pub passing_touchdowns: i32,

    pub receiving_receptions: i32,
    pub receiving_yards: i32,
    pub receiving_touchdowns: i32,

    pub kicking_xp_attempts: i32,
    pub kicking_xp_made: i32,
    pub kicking_fg_attempts: i32,
    pub kicking_fg_made: i32,

    pub football_fumbles: i32,

    pub defense_tackles: i32,
    pub defense_sacks: i32,
    pub defense_interceptions: i32,
    pub defense_fumbles_recovered: i32,
    pub defense_fumbles_forced: i32,
}

/// Rates derived from a player's raw stats. Never entered directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRates {
    /// Rushing yards per rush (1 decimal)
    pub rushing_yards_per_attempt: f64,

    /// Receiving yards per reception (1 decimal)
    pub receiving_yards_per_reception: f64,

    /// Passing yards per attempt (1 decimal)
    pub passing_yards_per_attempt: f64,

    /// Completions per attempt as a fraction (3 decimals)
    pub passing_completion_percentage: f64,

    /// NCAA passer rating (1 decimal); 0.0 with no attempts
    pub passing_rating: f64,
}
