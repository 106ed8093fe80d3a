//! Core data models for scholastic football.

mod game;
mod ids;
mod player_stats;
mod position;
mod school;
mod sport;
mod stats;
mod team;

pub use game::*;
pub use ids::*;
pub use player_stats::*;
pub use position::*;
pub use school::*;
pub use sport::*;
pub use stats::*;
pub use team::*;
