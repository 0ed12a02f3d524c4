//! Resource operations, one `impl PanelClient` block per resource.
//!
//! Paths are relative to the application API root. Each method is a path,
//! an optional partial-record body and one of the client's decode helpers.

mod locations;
mod nests;
mod nodes;
mod servers;
mod users;
