//! Errors produced while building a forecast for one location.

use thiserror::Error;

use crate::fetch::FetchError;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("malformed upstream payload")]
    Payload(#[from] serde_json::Error),

    /// The payload has no region or no sub-location entry.
    #[error("no forecast data found for {0}")]
    NotFound(String),
}
