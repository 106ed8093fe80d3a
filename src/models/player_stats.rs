//! Player stat lines for a single game and for a season.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{FootballStats, GameId, PlayerId, PlayerRates, PositionId, RecordId, SeasonId};

/// A player's statistical line for one game. One per (player, game).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerGame {
    #[serde(default)]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub slug: Option<String>,

    pub player: PlayerId,

    pub game: GameId,

    #[serde(default)]
    pub stats: FootballStats,

    /// Derived on commit
    #[serde(default)]
    pub rates: PlayerRates,
}

impl PlayerGame {
    pub fn new(player: PlayerId, game: GameId) -> Self {
        Self {
            id: None,
            slug: None,
            player,
            game,
            stats: FootballStats::default(),
            rates: PlayerRates::default(),
        }
    }

    /// Builder method to set the raw stats.
    pub fn with_stats(mut self, stats: FootballStats) -> Self {
        self.stats = stats;
        self
    }
}

/// A player's aggregate line for one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeason {
    #[serde(default)]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub slug: Option<String>,

    pub player: PlayerId,

    pub season: SeasonId,

    /// Positions played during the season
    #[serde(default)]
    pub positions: BTreeSet<PositionId>,

    /// Jersey number
    #[serde(default)]
    pub number: u32,

    #[serde(default)]
    pub games: u32,

    #[serde(default)]
    pub stats: FootballStats,

    /// Derived on commit
    #[serde(default)]
    pub rates: PlayerRates,
}

impl PlayerSeason {
    pub fn new(player: PlayerId, season: SeasonId) -> Self {
        Self {
            id: None,
            slug: None,
            player,
            season,
            positions: BTreeSet::new(),
            number: 0,
            games: 0,
            stats: FootballStats::default(),
            rates: PlayerRates::default(),
        }
    }

    /// Builder method to set the raw stats.
    pub fn with_stats(mut self, stats: FootballStats) -> Self {
        self.stats = stats;
        self
    }

    /// Builder method to set the jersey number.
    pub fn with_number(mut self, number: u32) -> Self {
        self.number = number;
        self
    }

    /// Tag the player with a position. Returns false if already tagged.
    pub fn add_position(&mut self, position: PositionId) -> bool {
        self.positions.insert(position)
    }
}
