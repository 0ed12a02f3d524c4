//! Nodes resource, including node configuration and allocations.

use crate::client::PanelClient;
use crate::error::{ApiError, Result};
use crate::http::HttpMethod;
use crate::models::{Allocation, AllocationFields, Node, NodeConfiguration, NodeFields};
use crate::transport::Transport;

impl<T: Transport> PanelClient<T> {
    pub fn get_nodes(&self) -> Result<Vec<Node>> {
        self.get_list("/nodes")
    }

    pub fn get_node(&self, node_id: u32) -> Result<Node> {
        self.get_one(&format!("/nodes/{node_id}"))
    }

    /// Fetch the daemon configuration the panel generates for a node.
    ///
    /// This endpoint answers with the bare configuration object.
    pub fn get_node_configuration(&self, node_id: u32) -> Result<NodeConfiguration> {
        let body = self.execute(
            HttpMethod::Get,
            &format!("/nodes/{node_id}/configuration"),
            None,
            None,
        )?;
        serde_json::from_slice(&body).map_err(ApiError::Decode)
    }

    pub fn create_node(&self, node: &impl NodeFields) -> Result<Node> {
        self.send_one(HttpMethod::Post, "/nodes", &node.to_partial_node())
    }

    pub fn update_node(&self, node_id: u32, node: &impl NodeFields) -> Result<Node> {
        self.send_one(HttpMethod::Patch, &format!("/nodes/{node_id}"), &node.to_partial_node())
    }

    pub fn delete_node(&self, node_id: u32) -> Result<()> {
        self.delete(&format!("/nodes/{node_id}"))
    }

    pub fn get_node_allocations(&self, node_id: u32) -> Result<Vec<Allocation>> {
        self.get_list(&format!("/nodes/{node_id}/allocations"))
    }

    /// Add allocations to a node. The panel answers 204 without a body, so
    /// the new allocations are only visible through `get_node_allocations`.
    pub fn create_allocation(&self, node_id: u32, allocation: &impl AllocationFields) -> Result<()> {
        self.send_unit(
            HttpMethod::Post,
            &format!("/nodes/{node_id}/allocations"),
            &allocation.to_partial_allocation(),
        )
    }

    pub fn delete_allocation(&self, node_id: u32, allocation_id: u32) -> Result<()> {
        self.delete(&format!("/nodes/{node_id}/allocations/{allocation_id}"))
    }
}
