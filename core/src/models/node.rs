//! Nodes and the daemon configuration the panel generates for them.
//!
//! # Design
//! `Node` is what the panel reports; `PartialNode` is the writable subset,
//! without ids, counters or timestamps. `NodeConfiguration` is returned
//! bare by the panel, not inside an envelope, so it has no `object` tag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// URL scheme the panel uses to reach a node's daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

/// A machine running the panel's daemon.
///
/// Memory and disk are in MiB. Overallocation is a percentage; `-1`
/// disables the limit check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: u32,
    pub uuid: Uuid,
    pub public: bool,
    pub name: String,
    pub description: Option<String>,
    pub location_id: u32,
    pub fqdn: String,
    pub scheme: Scheme,
    pub behind_proxy: bool,
    pub maintenance_mode: bool,
    pub memory: i64,
    pub memory_overallocate: i64,
    pub disk: i64,
    pub disk_overallocate: i64,
    pub upload_size: u32,
    pub daemon_listen: u16,
    pub daemon_sftp: u16,
    pub daemon_base: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialNode {
    pub name: String,
    pub description: Option<String>,
    pub public: bool,
    pub behind_proxy: bool,
    pub maintenance_mode: bool,
    pub location_id: u32,
    pub fqdn: String,
    pub scheme: Scheme,
    pub memory: i64,
    pub memory_overallocate: i64,
    pub disk: i64,
    pub disk_overallocate: i64,
    pub upload_size: u32,
    pub daemon_listen: u16,
    pub daemon_sftp: u16,
}

/// Fields the panel accepts when creating or updating a node.
pub trait NodeFields {
    fn name(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn public(&self) -> bool;
    fn behind_proxy(&self) -> bool;
    fn maintenance_mode(&self) -> bool;
    fn location_id(&self) -> u32;
    fn fqdn(&self) -> &str;
    fn scheme(&self) -> Scheme;
    fn memory(&self) -> i64;
    fn memory_overallocate(&self) -> i64;
    fn disk(&self) -> i64;
    fn disk_overallocate(&self) -> i64;
    fn upload_size(&self) -> u32;
    fn daemon_listen(&self) -> u16;
    fn daemon_sftp(&self) -> u16;

    fn to_partial_node(&self) -> PartialNode {
        PartialNode {
            name: self.name().to_string(),
            description: self.description().map(str::to_string),
            public: self.public(),
            behind_proxy: self.behind_proxy(),
            maintenance_mode: self.maintenance_mode(),
            location_id: self.location_id(),
            fqdn: self.fqdn().to_string(),
            scheme: self.scheme(),
            memory: self.memory(),
            memory_overallocate: self.memory_overallocate(),
            disk: self.disk(),
            disk_overallocate: self.disk_overallocate(),
            upload_size: self.upload_size(),
            daemon_listen: self.daemon_listen(),
            daemon_sftp: self.daemon_sftp(),
        }
    }
}

macro_rules! impl_node_fields {
    ($ty:ty) => {
        impl NodeFields for $ty {
            fn name(&self) -> &str {
                &self.name
            }
            fn description(&self) -> Option<&str> {
                self.description.as_deref()
            }
            fn public(&self) -> bool {
                self.public
            }
            fn behind_proxy(&self) -> bool {
                self.behind_proxy
            }
            fn maintenance_mode(&self) -> bool {
                self.maintenance_mode
            }
            fn location_id(&self) -> u32 {
                self.location_id
            }
            fn fqdn(&self) -> &str {
                &self.fqdn
            }
            fn scheme(&self) -> Scheme {
                self.scheme
            }
            fn memory(&self) -> i64 {
                self.memory
            }
            fn memory_overallocate(&self) -> i64 {
                self.memory_overallocate
            }
            fn disk(&self) -> i64 {
                self.disk
            }
            fn disk_overallocate(&self) -> i64 {
                self.disk_overallocate
            }
            fn upload_size(&self) -> u32 {
                self.upload_size
            }
            fn daemon_listen(&self) -> u16 {
                self.daemon_listen
            }
            fn daemon_sftp(&self) -> u16 {
                self.daemon_sftp
            }
        }
    };
}

impl_node_fields!(Node);
impl_node_fields!(PartialNode);

/// Daemon configuration the panel generates for a node.
///
/// Returned bare by `nodes/{id}/configuration`, without an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfiguration {
    pub debug: bool,
    pub uuid: Uuid,
    pub token_id: String,
    pub token: String,
    pub api: NodeApi,
    pub system: NodeSystem,
    #[serde(default)]
    pub allowed_mounts: Vec<String>,
    pub remote: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeApi {
    pub host: String,
    pub port: u16,
    pub ssl: NodeSsl,
    pub upload_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSsl {
    pub enabled: bool,
    pub cert: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSystem {
    pub data: String,
    pub sftp: NodeSftp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSftp {
    pub bind_port: u16,
}
