//! Record persistence.
//!
//! Records live in per-kind tables keyed by numeric id. The repository
//! derives every record right before it is stored, and persists each
//! table as a JSONL file under the data directory.

mod jsonl;
mod repository;

pub use jsonl::*;
pub use repository::*;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use crate::derive::DeriveError;
use crate::models::RecordId;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: RecordId },

    #[error("{kind} slug '{slug}' is already used by record {existing}")]
    SlugConflict {
        kind: EntityKind,
        slug: String,
        existing: RecordId,
    },

    #[error("Derivation failed: {0}")]
    Derive(#[from] DeriveError),
}

/// Kinds of stored records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Sport,
    Conference,
    Season,
    School,
    Player,
    Position,
    Game,
    TeamGame,
    TeamSeason,
    PlayerGame,
    PlayerSeason,
}

impl EntityKind {
    /// Every kind, in dependency order.
    pub const ALL: [EntityKind; 11] = [
        EntityKind::Sport,
        EntityKind::Conference,
        EntityKind::Season,
        EntityKind::School,
        EntityKind::Player,
        EntityKind::Position,
        EntityKind::Game,
        EntityKind::TeamGame,
        EntityKind::TeamSeason,
        EntityKind::PlayerGame,
        EntityKind::PlayerSeason,
    ];

    /// Kebab-case name, as used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Sport => "sport",
            EntityKind::Conference => "conference",
            EntityKind::Season => "season",
            EntityKind::School => "school",
            EntityKind::Player => "player",
            EntityKind::Position => "position",
            EntityKind::Game => "game",
            EntityKind::TeamGame => "team-game",
            EntityKind::TeamSeason => "team-season",
            EntityKind::PlayerGame => "player-game",
            EntityKind::PlayerSeason => "player-season",
        }
    }

    /// Table name, used as the file stem.
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::Sport => "sports",
            EntityKind::Conference => "conferences",
            EntityKind::Season => "seasons",
            EntityKind::School => "schools",
            EntityKind::Player => "players",
            EntityKind::Position => "positions",
            EntityKind::Game => "games",
            EntityKind::TeamGame => "team_games",
            EntityKind::TeamSeason => "team_seasons",
            EntityKind::PlayerGame => "player_games",
            EntityKind::PlayerSeason => "player_seasons",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        EntityKind::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| format!("unknown record kind: {}", s))
    }
}

/// On-disk table format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    /// One JSON object per line
    #[default]
    Jsonl,
}

impl StorageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            StorageFormat::Jsonl => "jsonl",
        }
    }
}

impl std::fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,

    /// Table file format
    pub format: StorageFormat,

    /// Rewrite a table's file on every commit
    pub sync_on_commit: bool,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            format: StorageFormat::default(),
            sync_on_commit: true,
        }
    }

    pub fn tables_dir(&self) -> PathBuf {
        self.data_dir.join("tables")
    }

    pub fn table_path(&self, kind: EntityKind) -> PathBuf {
        self.tables_dir()
            .join(format!("{}.{}", kind.table_name(), self.format.extension()))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
