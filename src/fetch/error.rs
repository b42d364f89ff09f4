use serde_json::Value;
use thiserror::Error;

/// Failure of a single upstream request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid upstream url {0}")]
    InvalidUrl(String),

    #[error("upstream request failed")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered with a non-2xx status. `body` is the response body as
    /// JSON, or a JSON string when it was not valid JSON.
    #[error("upstream responded with status {status}")]
    Status { status: u16, body: Value },
}

impl FetchError {
    pub(crate) fn from_status(status: u16, body: &[u8]) -> Self {
        let body = serde_json::from_slice(body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()));
        Self::Status { status, body }
    }
}
