//! # Preps Football
//!
//! Statistics tracking for scholastic football.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (schools, players, games, stat lines)
//! - **calculate**: Rates, passer rating and score totals
//! - **derive**: Derivation pipeline run on every record before commit
//! - **standings**: Schedule and standings views
//! - **storage**: Repository and JSONL table files
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod derive;
pub mod models;
pub mod standings;
pub mod storage;

pub use models::*;
