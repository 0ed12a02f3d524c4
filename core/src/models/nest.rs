//! Nests and the eggs they contain.
//!
//! Egg configuration blocks vary by egg and are kept as raw JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A category of eggs, e.g. "Minecraft".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nest {
    pub id: u32,
    pub uuid: Uuid,
    pub author: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A server template: image, startup command and install script.
///
/// `config` is the daemon-side file/startup/log configuration; its shape
/// varies between eggs and is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Egg {
    pub id: u32,
    pub uuid: Uuid,
    pub name: String,
    pub nest: u32,
    pub author: String,
    pub description: Option<String>,
    pub docker_image: String,
    #[serde(default)]
    pub docker_images: BTreeMap<String, String>,
    pub config: serde_json::Value,
    pub startup: String,
    pub script: EggScript,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EggScript {
    pub privileged: bool,
    pub install: String,
    pub entry: String,
    pub container: String,
    pub extends: Option<serde_json::Value>,
}
