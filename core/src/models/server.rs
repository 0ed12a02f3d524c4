//! Servers, their databases and the database hosts behind them.
//!
//! Read-only through this client.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::flexible_bool;
use crate::envelope::Envelope;

/// A game server managed by the panel. Read-only through this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: u32,
    pub external_id: Option<String>,
    pub uuid: Uuid,
    pub identifier: String,
    pub name: String,
    pub description: Option<String>,
    pub suspended: bool,
    pub limits: Limits,
    pub feature_limits: FeatureLimits,
    pub user: u32,
    pub node: u32,
    pub allocation: u32,
    pub nest: u32,
    pub egg: u32,
    pub container: Container,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resource limits; memory, swap and disk in MiB, cpu in percent of one core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub memory: i64,
    pub swap: i64,
    pub disk: i64,
    pub io: u32,
    pub cpu: u32,
    pub threads: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLimits {
    pub databases: u32,
    pub allocations: u32,
    pub backups: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub startup_command: String,
    pub image: String,
    #[serde(deserialize_with = "flexible_bool::deserialize")]
    pub installed: bool,
    /// Egg variables; values are whatever JSON the egg defines.
    #[serde(default)]
    pub environment: BTreeMap<String, serde_json::Value>,
}

/// A database provisioned for a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDatabase {
    pub id: u32,
    pub server: u32,
    pub host: u32,
    pub database: String,
    pub username: String,
    pub remote: String,
    pub max_connections: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present only when the request asked for `include=host,password`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<DatabaseRelationships>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseRelationships {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Envelope<DatabasePassword>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Envelope<DatabaseHost>>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabasePassword {
    pub password: String,
}

impl std::fmt::Debug for DatabasePassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePassword")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A database server that hosts server databases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseHost {
    pub id: u32,
    pub name: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    /// Node the host is linked to, if any.
    pub node: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
