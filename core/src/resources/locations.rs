//! Locations resource.

use crate::client::PanelClient;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::models::{Location, LocationFields};
use crate::transport::Transport;

impl<T: Transport> PanelClient<T> {
    pub fn get_locations(&self) -> Result<Vec<Location>> {
        self.get_list("/locations")
    }

    pub fn get_location(&self, location_id: u32) -> Result<Location> {
        self.get_one(&format!("/locations/{location_id}"))
    }

    pub fn create_location(&self, location: &impl LocationFields) -> Result<Location> {
        self.send_one(HttpMethod::Post, "/locations", &location.to_partial_location())
    }

    pub fn update_location(&self, location_id: u32, location: &impl LocationFields) -> Result<Location> {
        self.send_one(
            HttpMethod::Patch,
            &format!("/locations/{location_id}"),
            &location.to_partial_location(),
        )
    }

    pub fn delete_location(&self, location_id: u32) -> Result<()> {
        self.delete(&format!("/locations/{location_id}"))
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testing::{client, ScriptedTransport};
    use crate::error::ApiError;
    use crate::http::HttpMethod;
    use crate::models::PartialLocation;

    const LOCATION: &str = r#"{"object":"location","attributes":{"id":3,"short":"us.nyc","long":"New York","created_at":"2024-02-01T08:00:00+00:00","updated_at":"2024-02-01T08:00:00+00:00"}}"#;

    #[test]
    fn create_then_update_location() {
        let c = client(ScriptedTransport::default().respond(201, LOCATION).respond(200, LOCATION));
        let created = c
            .create_location(&PartialLocation {
                short: "us.nyc".to_string(),
                long: Some("New York".to_string()),
            })
            .unwrap();
        assert_eq!(created.id, 3);

        c.update_location(created.id, &created).unwrap();
        let requests = c.transport().requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[1].method, HttpMethod::Patch);
        assert_eq!(requests[1].url, "https://panel.example.com/api/application/locations/3");
        assert_eq!(requests[0].body, requests[1].body);
    }

    #[test]
    fn empty_location_list() {
        let c = client(ScriptedTransport::default().respond(200, r#"{"object":"list","data":[]}"#));
        assert!(c.get_locations().unwrap().is_empty());
    }

    #[test]
    fn missing_location_is_http_404() {
        let c = client(ScriptedTransport::default().respond(404, "not found"));
        let err = c.get_location(99).unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus { status: 404, .. }));
    }

    #[test]
    fn delete_location_sends_no_body() {
        let c = client(ScriptedTransport::default().respond(204, ""));
        c.delete_location(3).unwrap();
        let req = c.transport().last_request();
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }
}
