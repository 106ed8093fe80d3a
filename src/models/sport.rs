//! Sports, conferences and seasons.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ConferenceId, SeasonId, SportId};

/// Which teams a sport is contested by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Boys,
    Girls,
    Coed,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Boys => write!(f, "Boys"),
            Gender::Girls => write!(f, "Girls"),
            Gender::Coed => write!(f, "Coed"),
        }
    }
}

/// A single sport, e.g. boys football.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sport {
    #[serde(default)]
    pub id: Option<SportId>,

    #[serde(default)]
    pub slug: Option<String>,

    pub name: String,

    #[serde(default)]
    pub gender: Gender,
}

impl Sport {
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: None,
            slug: None,
            name: name.into(),
            gender,
        }
    }

    /// Human-readable label, e.g. "Boys Football".
    pub fn label(&self) -> String {
        format!("{} {}", self.gender, self.name)
    }
}

/// A conference within a sport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conference {
    #[serde(default)]
    pub id: Option<ConferenceId>,

    #[serde(default)]
    pub slug: Option<String>,

    pub name: String,

    pub sport: SportId,
}

impl Conference {
    pub fn new(name: impl Into<String>, sport: SportId) -> Self {
        Self {
            id: None,
            slug: None,
            name: name.into(),
            sport,
        }
    }
}

/// A single season of a sport, identified by (sport, year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    #[serde(default)]
    pub id: Option<SeasonId>,

    #[serde(default)]
    pub slug: Option<String>,

    /// Year of the season, e.g. 2011
    pub year: i32,

    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    pub sport: SportId,
}

impl Season {
    pub fn new(year: i32, sport: SportId) -> Self {
        Self {
            id: None,
            slug: None,
            year,
            start_date: None,
            end_date: None,
            sport,
        }
    }

    /// Builder method to set the date range.
    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }
}
