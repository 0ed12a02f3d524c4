//! Locations group nodes, typically by region.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named group of nodes, usually a region or datacenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub short: String,
    pub long: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialLocation {
    pub short: String,
    pub long: Option<String>,
}

/// Fields the panel accepts when creating or updating a location.
pub trait LocationFields {
    fn short(&self) -> &str;
    fn long(&self) -> Option<&str>;

    fn to_partial_location(&self) -> PartialLocation {
        PartialLocation {
            short: self.short().to_string(),
            long: self.long().map(str::to_string),
        }
    }
}

impl LocationFields for Location {
    fn short(&self) -> &str {
        &self.short
    }
    fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }
}

impl LocationFields for PartialLocation {
    fn short(&self) -> &str {
        &self.short
    }
    fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }
}
