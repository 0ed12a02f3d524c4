//! Servers resource (read-only).

use crate::client::{path_segment, PanelClient};
use crate::error::Result;
use crate::models::{Server, ServerDatabase};
use crate::transport::Transport;

impl<T: Transport> PanelClient<T> {
    pub fn get_servers(&self) -> Result<Vec<Server>> {
        self.get_list("/servers")
    }

    pub fn get_server(&self, server_id: u32) -> Result<Server> {
        self.get_one(&format!("/servers/{server_id}"))
    }

    pub fn get_server_by_external_id(&self, external_id: &str) -> Result<Server> {
        self.get_one(&format!("/servers/external/{}", path_segment(external_id)))
    }

    pub fn get_server_databases(&self, server_id: u32) -> Result<Vec<ServerDatabase>> {
        self.get_list(&format!("/servers/{server_id}/databases"))
    }

    pub fn get_server_database(&self, server_id: u32, database_id: u32) -> Result<ServerDatabase> {
        self.get_one(&format!("/servers/{server_id}/databases/{database_id}"))
    }

    /// Like [`get_server_database`](Self::get_server_database), with its
    /// host and password relationships included.
    pub fn get_server_database_details(&self, server_id: u32, database_id: u32) -> Result<ServerDatabase> {
        self.get_one(&format!(
            "/servers/{server_id}/databases/{database_id}?include=host,password"
        ))
    }
}
