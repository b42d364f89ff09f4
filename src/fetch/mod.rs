//! Outbound HTTP plumbing.
//!
//! [`HttpClient`] is the seam every upstream request goes through;
//! [`auth::UrlParam`] layers a credential on top of any client.

mod basic;
mod client;
mod error;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use error::FetchError;

use tracing::debug;

/// Issues a GET for `url` and returns the response body.
///
/// A non-2xx response is turned into [`FetchError::Status`] carrying the
/// upstream body, so callers can pass it through untouched. Transport errors
/// are stripped of their URL since it may carry a credential.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>, FetchError> {
    let parsed = url
        .parse::<reqwest::Url>()
        .map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client
        .execute(req)
        .await
        .map_err(|e| FetchError::Transport(e.without_url()))?;
    let status = resp.status();
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| FetchError::Transport(e.without_url()))?;
    debug!(status = status.as_u16(), bytes = bytes.len(), "Upstream response received");

    if !status.is_success() {
        return Err(FetchError::from_status(status.as_u16(), &bytes));
    }

    Ok(bytes.to_vec())
}
