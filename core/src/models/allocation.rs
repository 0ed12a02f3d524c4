//! Node allocations (IP and port pairs).
//!
//! # Design
//! The panel reads one allocation record but accepts a batch on create:
//! `ports` holds single ports or `start-end` ranges as strings. A full
//! `Allocation` maps onto that request as its single port.

use serde::{Deserialize, Serialize};

/// An IP and port pair a node can hand out to servers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub id: u32,
    pub ip: String,
    pub alias: Option<String>,
    pub port: u16,
    pub notes: Option<String>,
    pub assigned: bool,
}

/// Request body for adding allocations to a node.
///
/// Each entry in `ports` is a single port (`"25565"`) or an inclusive
/// range (`"25565-25570"`); the panel creates one allocation per port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialAllocation {
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub ports: Vec<String>,
}

/// Fields the panel accepts when creating allocations.
pub trait AllocationFields {
    fn ip(&self) -> &str;
    fn alias(&self) -> Option<&str>;
    fn ports(&self) -> Vec<String>;

    fn to_partial_allocation(&self) -> PartialAllocation {
        PartialAllocation {
            ip: self.ip().to_string(),
            alias: self.alias().map(str::to_string),
            ports: self.ports(),
        }
    }
}

impl AllocationFields for Allocation {
    fn ip(&self) -> &str {
        &self.ip
    }
    fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
    fn ports(&self) -> Vec<String> {
        vec![self.port.to_string()]
    }
}

impl AllocationFields for PartialAllocation {
    fn ip(&self) -> &str {
        &self.ip
    }
    fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
    fn ports(&self) -> Vec<String> {
        self.ports.clone()
    }
}
