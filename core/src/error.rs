//! Error types for the panel API client.
//!
//! # Design
//! Every failure is reported once, to the immediate caller, and never
//! retried. Non-2xx responses keep the raw status and body so callers can
//! inspect panel-specific error payloads themselves; the client does not try
//! to interpret them.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Boxed cause carried by [`ApiError::Transport`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `PanelClient` operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be built or the round-trip failed before a
    /// complete response was read. The underlying cause is kept as the
    /// error source.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The panel answered with a status outside `200..300`.
    ///
    /// `body` is the response body as text. Bytes that are not valid UTF-8
    /// are replaced with U+FFFD; everything else is kept unchanged.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body did not match the expected envelope or record shape.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A scan-based lookup found no element whose `field` equals `value`.
    #[error("no resource with {field} = {value:?}")]
    NotFound { field: &'static str, value: String },

    /// The client was configured with unusable settings.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status carried by an [`ApiError::HttpStatus`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is a transport failure caused by the request timeout.
    pub fn is_timeout(&self) -> bool {
        let ApiError::Transport(cause) = self else {
            return false;
        };
        let first: &(dyn std::error::Error + 'static) = &**cause;
        let mut current = Some(first);
        while let Some(err) = current {
            if let Some(ureq_err) = err.downcast_ref::<ureq::Error>() {
                return ureq_timed_out(ureq_err);
            }
            if let Some(io) = err.downcast_ref::<std::io::Error>() {
                if io_timed_out(io) {
                    return true;
                }
            }
            current = err.source();
        }
        false
    }

    pub(crate) fn transport(cause: impl Into<BoxError>) -> Self {
        ApiError::Transport(cause.into())
    }

    pub(crate) fn not_found(field: &'static str, value: impl Into<String>) -> Self {
        ApiError::NotFound {
            field,
            value: value.into(),
        }
    }
}

fn ureq_timed_out(err: &ureq::Error) -> bool {
    match err {
        ureq::Error::Timeout(_) => true,
        ureq::Error::Io(io) => io_timed_out(io),
        _ => false,
    }
}

// Body reads report ureq failures wrapped in an io::Error.
fn io_timed_out(err: &std::io::Error) -> bool {
    if err.kind() == std::io::ErrorKind::TimedOut {
        return true;
    }
    err.get_ref()
        .and_then(|inner| inner.downcast_ref::<ureq::Error>())
        .is_some_and(ureq_timed_out)
}
