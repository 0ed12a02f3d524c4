//! Typed records for the panel's application resources.
//!
//! Writable resources come in pairs: the full record the panel returns and a
//! `Partial*` record holding only what the panel accepts on create/update.
//! A capability trait per resource (`UserFields`, `NodeFields`, ...) exposes
//! the write fields as accessors on both, so a write operation takes either.

mod allocation;
mod location;
mod nest;
mod node;
mod server;
mod user;

pub use allocation::{Allocation, AllocationFields, PartialAllocation};
pub use location::{Location, LocationFields, PartialLocation};
pub use nest::{Egg, EggScript, Nest};
pub use node::{
    Node, NodeApi, NodeConfiguration, NodeFields, NodeSftp, NodeSsl, NodeSystem, PartialNode,
    Scheme,
};
pub use server::{
    Container, DatabaseHost, DatabasePassword, DatabaseRelationships, FeatureLimits, Limits, Server,
    ServerDatabase,
};
pub use user::{PartialUser, User, UserFields};

use crate::error::{ApiError, Result};

/// Return the first element of `items` whose `accessor` equals `value`.
///
/// Linear scan; `field` only names the compared field in the
/// [`ApiError::NotFound`] raised when nothing matches.
pub fn find_by<T, F>(items: Vec<T>, field: &'static str, value: &str, accessor: F) -> Result<T>
where
    F: Fn(&T) -> &str,
{
    items
        .into_iter()
        .find(|item| accessor(item) == value)
        .ok_or_else(|| ApiError::not_found(field, value))
}

/// Some panel versions report flags as `0`/`1` instead of JSON booleans.
pub(crate) mod flexible_bool {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Flag::deserialize(deserializer)? {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item {
        name: String,
    }

    fn items() -> Vec<Item> {
        ["alpha", "beta", "beta"]
            .into_iter()
            .map(|n| Item { name: n.to_string() })
            .collect()
    }

    #[test]
    fn find_by_returns_first_match() {
        let found = find_by(items(), "name", "beta", |i| i.name.as_str()).unwrap();
        assert_eq!(found.name, "beta");
    }

    #[test]
    fn find_by_reports_field_and_value() {
        let err = find_by(items(), "name", "gamma", |i| i.name.as_str()).unwrap_err();
        match err {
            ApiError::NotFound { field, value } => {
                assert_eq!(field, "name");
                assert_eq!(value, "gamma");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn find_by_on_empty_list_is_not_found() {
        let err = find_by(Vec::<Item>::new(), "name", "alpha", |i| i.name.as_str()).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[test]
    fn flexible_bool_accepts_ints_and_bools() {
        #[derive(serde::Deserialize)]
        struct Probe {
            #[serde(deserialize_with = "flexible_bool::deserialize")]
            flag: bool,
        }
        let parse = |s: &str| serde_json::from_str::<Probe>(s).unwrap().flag;
        assert!(parse(r#"{"flag":true}"#));
        assert!(parse(r#"{"flag":1}"#));
        assert!(!parse(r#"{"flag":0}"#));
        assert!(!parse(r#"{"flag":false}"#));
    }
}
