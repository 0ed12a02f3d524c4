//! Panel user accounts.
//!
//! # Design
//! The panel names the two-factor flag `2fa`, which is not a Rust
//! identifier; it is renamed to `two_factor` here and back on the wire.
//! `PartialUser` carries the four fields the panel requires on create and
//! update. Passwords are never part of either record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A panel user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub external_id: Option<String>,
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub language: String,
    pub root_admin: bool,
    #[serde(rename = "2fa")]
    pub two_factor: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialUser {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Fields the panel accepts when creating or updating a user.
pub trait UserFields {
    fn email(&self) -> &str;
    fn username(&self) -> &str;
    fn first_name(&self) -> &str;
    fn last_name(&self) -> &str;

    fn to_partial_user(&self) -> PartialUser {
        PartialUser {
            email: self.email().to_string(),
            username: self.username().to_string(),
            first_name: self.first_name().to_string(),
            last_name: self.last_name().to_string(),
        }
    }
}

impl UserFields for User {
    fn email(&self) -> &str {
        &self.email
    }
    fn username(&self) -> &str {
        &self.username
    }
    fn first_name(&self) -> &str {
        &self.first_name
    }
    fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl UserFields for PartialUser {
    fn email(&self) -> &str {
        &self.email
    }
    fn username(&self) -> &str {
        &self.username
    }
    fn first_name(&self) -> &str {
        &self.first_name
    }
    fn last_name(&self) -> &str {
        &self.last_name
    }
}
