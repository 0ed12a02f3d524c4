//! Synchronous client for the Pterodactyl panel's application API.
//!
//! # Overview
//! `PanelClient` turns method calls such as `get_users` or `create_node`
//! into HTTP requests against `/api/application`, authenticates with a
//! bearer token, and decodes the panel's JSON envelopes into typed records.
//!
//! # Design
//! - `PanelClient` is stateless between calls; it holds an immutable
//!   `ClientConfig` and a `Transport`.
//! - All requests go through `PanelClient::execute`, which owns the header
//!   policy and the 2xx success rule.
//! - `envelope` decodes `{object, attributes}` and `{object, data}` once,
//!   generically, for every record type.
//! - Create/update operations are generic over per-resource capability
//!   traits (`UserFields`, `NodeFields`, ...), so callers pass either a
//!   `Partial*` record or a full record they fetched earlier.
//! - Nothing is cached or retried.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod models;
mod resources;
pub mod transport;

pub use client::{ClientBuilder, PanelClient, ACCEPT_V1, API_PREFIX};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use envelope::{decode_list, decode_single, encode_list, encode_single, Envelope, ListEnvelope};
pub use error::{ApiError, BoxError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use models::*;
pub use transport::{Transport, UreqTransport};
