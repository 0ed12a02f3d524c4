//! Blocking HTTP transports.
//!
//! [`UreqTransport`] is the default backend. Status codes are returned as
//! data rather than errors so `PanelClient` can apply its own success rule
//! and keep the response body for diagnostics.

use std::io::Read as _;
use std::time::Duration;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
///
/// Implementations must be safe to share between threads; `PanelClient`
/// issues concurrent calls through the same transport without locking.
pub trait Transport: Send + Sync {
    /// Send `request` and return the fully-read response.
    ///
    /// Only failures that prevent reading a complete response are errors.
    /// Any status code, including 4xx and 5xx, is a successful return.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// A [`Transport`] backed by a [`ureq::Agent`].
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Create a transport whose requests fail after `timeout` in total.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = ureq::http::Request::builder()
            .method(ureq::http::Method::from(request.method))
            .uri(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let result = match request.body {
            Some(body) => {
                let req = builder
                    .body(body.into_bytes())
                    .map_err(ApiError::transport)?;
                self.agent.run(req)
            }
            None => {
                let req = builder
                    .body(())
                    .map_err(ApiError::transport)?;
                self.agent.run(req)
            }
        };

        let response = result.map_err(ApiError::transport)?;
        let (parts, body) = response.into_parts();

        let mut bytes = Vec::new();
        body.into_reader()
            .read_to_end(&mut bytes)
            .map_err(ApiError::transport)?;

        Ok(HttpResponse {
            status: parts.status.as_u16(),
            body: bytes,
        })
    }
}


impl From<HttpMethod> for ureq::http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => ureq::http::Method::GET,
            HttpMethod::Post => ureq::http::Method::POST,
            HttpMethod::Patch => ureq::http::Method::PATCH,
            HttpMethod::Delete => ureq::http::Method::DELETE,
        }
    }
}
