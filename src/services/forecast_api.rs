//! Trait for forecast data providers, and the fetch → parse → reshape pipeline.

use async_trait::async_trait;
use tracing::debug;

use crate::error::ForecastError;
use crate::fetch::FetchError;
use crate::forecast::ForecastResult;
use crate::locations::Location;
use crate::parser::parse_payload;

/// Abstraction over an upstream forecast provider (e.g., CWA open data).
#[async_trait]
pub trait ForecastApi: Send + Sync {
    /// Returns the raw response body of one dataset.
    async fn fetch_dataset(&self, dataset_id: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetches and reshapes the forecast for `location`.
///
/// # Errors
///
/// Upstream failures come back as [`ForecastError::Fetch`], an undecodable body
/// as [`ForecastError::Payload`], and a payload without region or district
/// entries as [`ForecastError::NotFound`].
#[tracing::instrument(skip_all, fields(location = %location, dataset_id = location.dataset_id()))]
pub async fn fetch_forecast(
    api: &dyn ForecastApi,
    location: Location,
) -> Result<ForecastResult, ForecastError> {
    let bytes = api.fetch_dataset(location.dataset_id()).await?;
    let payload = parse_payload(&bytes)?;
    let result = ForecastResult::from_payload(&payload, location.name())?;

    debug!(
        district = %result.district,
        periods = result.forecasts.len(),
        "Forecast reshaped"
    );
    Ok(result)
}
