//! Schools and players.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{PlayerId, SchoolId, SportId};

/// A single school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    #[serde(default)]
    pub id: Option<SchoolId>,

    #[serde(default)]
    pub slug: Option<String>,

    pub name: String,

    #[serde(default)]
    pub address: String,

    /// Whether the school is in the local coverage area
    #[serde(default)]
    pub local: bool,

    #[serde(default)]
    pub url: Option<Url>,

    #[serde(default)]
    pub mascot: Option<String>,

    #[serde(default)]
    pub logo_url: Option<Url>,

    #[serde(default)]
    pub use_custom_logo: bool,

    #[serde(default)]
    pub active_sports: Vec<SportId>,
}

impl School {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            slug: None,
            name: name.into(),
            address: String::new(),
            local: false,
            url: None,
            mascot: None,
            logo_url: None,
            use_custom_logo: false,
            active_sports: Vec::new(),
        }
    }

    /// Builder method to set the mascot.
    pub fn with_mascot(mut self, mascot: impl Into<String>) -> Self {
        self.mascot = Some(mascot.into());
        self
    }

    /// Builder method to set the school website.
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Human-readable label: name plus mascot when one is set.
    pub fn label(&self) -> String {
        match self.mascot.as_deref() {
            Some(mascot) if !mascot.is_empty() => format!("{} {}", self.name, mascot),
            _ => self.name.clone(),
        }
    }
}

/// A single player, belonging to exactly one school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub id: Option<PlayerId>,

    #[serde(default)]
    pub slug: Option<String>,

    pub school: SchoolId,

    pub first_name: String,

    pub last_name: String,

    #[serde(default)]
    pub middle_name: Option<String>,

    #[serde(default)]
    pub height_feet: u8,

    #[serde(default)]
    pub height_inches: u8,

    #[serde(default)]
    pub weight_pounds: u16,
}

impl Player {
    pub fn new(school: SchoolId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            slug: None,
            school,
            first_name: first_name.into(),
            last_name: last_name.into(),
            middle_name: None,
            height_feet: 0,
            height_inches: 0,
            weight_pounds: 0,
        }
    }

    /// Builder method to set height and weight.
    pub fn with_measurements(mut self, feet: u8, inches: u8, pounds: u16) -> Self {
        self.height_feet = feet;
        self.height_inches = inches;
        self.weight_pounds = pounds;
        self
    }

    /// Full name without the school.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
