//! The panel client: request building, auth headers and status handling.
//!
//! # Design
//! `PanelClient` holds an immutable [`ClientConfig`] and a [`Transport`],
//! both behind `Arc`, and carries no other state between calls. Every
//! operation goes through [`PanelClient::execute`], which attaches the
//! header set, performs exactly one round-trip and hands back the raw body
//! of a 2xx response. Decoding is left to the envelope helpers so each
//! resource method is a path plus a decode.

use std::sync::Arc;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::envelope::{decode_list, decode_single};
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// Path prefix of the application API.
pub const API_PREFIX: &str = "/api/application";

/// Versioned vendor media type sent in `Accept`.
pub const ACCEPT_V1: &str = "application/vnd.pterodactyl.v1+json";

/// Everything but letters, digits, `-`, `_` and `~`. Dots stay encoded so
/// a caller-supplied `..` cannot become a dot segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'~');

/// Synchronous client for the panel's application API.
///
/// Cheap to clone; clones share the transport. Safe to use from several
/// threads at once.
pub struct PanelClient<T: Transport = UreqTransport> {
    config: Arc<ClientConfig>,
    transport: Arc<T>,
}

impl<T: Transport> Clone for PanelClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> std::fmt::Debug for PanelClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PanelClient<UreqTransport> {
    /// Build a client over the default `ureq` transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }

    /// Build a client from `PTERODACTYL_HOST` / `PTERODACTYL_TOKEN`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }
}

impl<T: Transport> PanelClient<T> {
    /// Build a client that sends requests through `transport`.
    ///
    /// `config.timeout` is not applied here; the transport owns its timeout.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        Ok(Self {
            config: Arc::new(config.validated()?),
            transport: Arc::new(transport),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A client sharing this one's transport but authenticating with `token`.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        let config = ClientConfig {
            token: Some(token.into()),
            ..(*self.config).clone()
        };
        Self {
            config: Arc::new(config),
            transport: Arc::clone(&self.transport),
        }
    }

    /// Describe the request `execute` would send, without sending it.
    ///
    /// `path` is relative to the application API root, e.g. `/users/3`.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        auth_override: Option<&str>,
    ) -> HttpRequest {
        let token = auth_override
            .or(self.config.token.as_deref())
            .unwrap_or_default();
        HttpRequest {
            method,
            url: format!("{}{API_PREFIX}{path}", self.config.base_url),
            headers: vec![
                ("Authorization".to_string(), format!("Bearer {token}")),
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), ACCEPT_V1.to_string()),
            ],
            body,
        }
    }

    /// Send one request and return the body of a 2xx response.
    ///
    /// `auth_override`, when set, replaces the configured token for this
    /// call only. Non-2xx answers fail with [`ApiError::HttpStatus`]
    /// carrying the raw body.
    pub fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
        auth_override: Option<&str>,
    ) -> Result<Vec<u8>> {
        let request = self.build_request(method, path, body, auth_override);
        let url = request.url.clone();
        debug!(%method, %url, "Sending request");

        let response = self.transport.send(request)?;
        debug!(%method, %url, status = response.status, bytes = response.body.len(), "Received response");

        check_status(response).inspect_err(|e| {
            if let Some(status) = e.status() {
                warn!(%method, %url, status, "Panel rejected request");
            }
        })
    }

    pub(crate) fn get_one<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let body = self.execute(HttpMethod::Get, path, None, None)?;
        decode_single(&body)
    }

    pub(crate) fn get_list<R: DeserializeOwned>(&self, path: &str) -> Result<Vec<R>> {
        let body = self.execute(HttpMethod::Get, path, None, None)?;
        decode_list(&body)
    }

    /// Send `payload` as JSON and decode the single-resource answer.
    pub(crate) fn send_one<B, R>(&self, method: HttpMethod, path: &str, payload: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let body = self.execute(method, path, Some(encode_body(payload)?), None)?;
        decode_single(&body)
    }

    /// Send `payload` as JSON and discard whatever the panel answers.
    pub(crate) fn send_unit<B: Serialize>(&self, method: HttpMethod, path: &str, payload: &B) -> Result<()> {
        self.execute(method, path, Some(encode_body(payload)?), None)?;
        Ok(())
    }

    pub(crate) fn delete(&self, path: &str) -> Result<()> {
        self.execute(HttpMethod::Delete, path, None, None)?;
        Ok(())
    }
}

/// Percent-encode a caller-supplied value so it fills exactly one path segment.
pub(crate) fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

fn encode_body<B: Serialize>(payload: &B) -> Result<String> {
    serde_json::to_string(payload).map_err(ApiError::Encode)
}

/// Keep the body of a 2xx response; turn anything else into `HttpStatus`,
/// decoding its body lossily.
fn check_status(response: HttpResponse) -> Result<Vec<u8>> {
    if response.is_success() {
        return Ok(response.body);
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    })
}

/// Step-by-step construction of a [`PanelClient`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<PanelClient<UreqTransport>> {
        PanelClient::new(self.config)
    }

    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<PanelClient<T>> {
        PanelClient::with_transport(self.config, transport)
    }
}


#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::testing::{client, ScriptedTransport};
    use super::*;
    use crate::models::Location;

    const LOCATION: &str = r#"{"object":"location","attributes":{"id":1,"short":"eu","long":"Europe","created_at":"2024-01-20T10:00:00+00:00","updated_at":"2024-01-20T10:00:00+00:00"}}"#;

    #[test]
    fn build_request_attaches_panel_headers() {
        let c = client(ScriptedTransport::default());
        let req = c.build_request(HttpMethod::Get, "/users", None, None);
        assert_eq!(req.url, "https://panel.example.com/api/application/users");
        assert_eq!(req.header("authorization"), Some("Bearer ptla_client"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("accept"), Some("application/vnd.pterodactyl.v1+json"));
        assert!(req.body.is_none());
    }

    #[test]
    fn auth_override_replaces_client_token_for_one_call() {
        let c = client(ScriptedTransport::default().respond(200, "").respond(200, ""));
        c.execute(HttpMethod::Get, "/users", None, Some("ptla_other")).unwrap();
        c.execute(HttpMethod::Get, "/users", None, None).unwrap();

        let requests = c.transport().requests();
        assert_eq!(requests[0].header("authorization"), Some("Bearer ptla_other"));
        assert_eq!(requests[1].header("authorization"), Some("Bearer ptla_client"));
    }

    #[test]
    fn client_without_token_still_builds_requests() {
        let c = PanelClient::with_transport(ClientConfig::default(), ScriptedTransport::default()).unwrap();
        let req = c.build_request(HttpMethod::Get, "/nodes", None, None);
        assert_eq!(req.url, "https://panel.localhost/api/application/nodes");
        assert_eq!(req.header("authorization"), Some("Bearer "));
    }

    #[test]
    fn with_token_shares_transport() {
        let c = client(ScriptedTransport::default().respond(204, ""));
        let other = c.with_token("ptla_second");
        other.execute(HttpMethod::Delete, "/users/1", None, None).unwrap();

        let req = c.transport().last_request();
        assert_eq!(req.header("authorization"), Some("Bearer ptla_second"));
        assert_eq!(c.config().token.as_deref(), Some("ptla_client"));
    }

    #[test]
    fn created_response_succeeds() {
        let c = client(ScriptedTransport::default().respond(201, LOCATION));
        let body = c
            .execute(HttpMethod::Post, "/locations", Some(r#"{"short":"eu"}"#.to_string()), None)
            .unwrap();
        let location: Location = decode_single(&body).unwrap();
        assert_eq!(location.short, "eu");
        assert_eq!(c.transport().last_request().body.as_deref(), Some(r#"{"short":"eu"}"#));
    }

    #[test]
    fn empty_success_body_is_returned_as_is() {
        let c = client(ScriptedTransport::default().respond(204, ""));
        let body = c.execute(HttpMethod::Delete, "/locations/1", None, None).unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn not_found_keeps_exact_body() {
        let raw = r#"{"errors":[{"code":"NotFoundHttpException","status":"404","detail":"The requested resource could not be found on the server."}]}"#;
        let c = client(ScriptedTransport::default().respond(404, raw));
        let err = c.execute(HttpMethod::Get, "/users/99", None, None).unwrap_err();
        match err {
            ApiError::HttpStatus { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, raw);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_utf8_error_body_is_replaced_lossily() {
        let err = check_status(HttpResponse {
            status: 500,
            body: vec![b'o', b'k', 0xff, b'!'],
        })
        .unwrap_err();
        match err {
            ApiError::HttpStatus { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "ok\u{fffd}!");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn redirect_is_not_success() {
        let c = client(ScriptedTransport::default().respond(302, ""));
        let err = c.execute(HttpMethod::Get, "/users", None, None).unwrap_err();
        assert_eq!(err.status(), Some(302));
    }

    #[test]
    fn transport_failure_propagates() {
        let c = client(ScriptedTransport::default());
        let err = c.execute(HttpMethod::Get, "/users", None, None).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn builder_rejects_bad_base_url() {
        let err = PanelClient::builder()
            .base_url("ftp://panel.example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    #[traced_test]
    fn logs_request_without_token() {
        let c = client(ScriptedTransport::default().respond(500, "boom"));
        let _ = c.execute(HttpMethod::Get, "/nodes", None, None);
        assert!(logs_contain("Sending request"));
        assert!(logs_contain("Panel rejected request"));
        assert!(!logs_contain("ptla_client"));
    }
}
