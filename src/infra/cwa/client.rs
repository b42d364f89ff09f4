use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

use crate::fetch::auth::UrlParam;
use crate::fetch::{BasicClient, FetchError, HttpClient, fetch_bytes};
use crate::services::forecast_api::ForecastApi;

pub const DEFAULT_BASE_URL: &str = "https://opendata.cwa.gov.tw/api/v1/rest/datastore";

/// CWA open-data client. The API key travels as the `Authorization` query
/// parameter on every request.
pub struct CwaClient<C = UrlParam<BasicClient>> {
    base_url: String,
    http: C,
}

impl CwaClient {
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> reqwest::Result<Self> {
        let http = UrlParam::cwa(BasicClient::with_timeout(timeout)?, api_key);
        Ok(Self::with_client(base_url, http))
    }
}

impl<C: HttpClient> CwaClient<C> {
    pub fn with_client(base_url: &str, http: C) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn dataset_url(&self, dataset_id: &str) -> String {
        format!("{}/{}?format=JSON", self.base_url, dataset_id)
    }
}

#[async_trait]
impl<C: HttpClient> ForecastApi for CwaClient<C> {
    #[tracing::instrument(skip(self))]
    async fn fetch_dataset(&self, dataset_id: &str) -> Result<Vec<u8>, FetchError> {
        let started = std::time::Instant::now();
        let result = fetch_bytes(&self.http, &self.dataset_url(dataset_id)).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(bytes) => info!(elapsed_ms, bytes = bytes.len(), "CWA dataset fetched"),
            Err(e) => warn!(elapsed_ms, error = %e, "CWA dataset fetch failed"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_dataset_url_strips_trailing_slash() {
        let client = CwaClient::with_client("https://example.test/datastore/", BasicClient::new());
        assert_eq!(
            client.dataset_url("F-D0047-061"),
            "https://example.test/datastore/F-D0047-061?format=JSON"
        );
    }

    #[tokio::test]
    async fn test_fetch_dataset_sends_key_and_format() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/F-D0047-061"))
            .and(query_param("format", "JSON"))
            .and(query_param("Authorization", "CWA-KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"records":{}}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client =
            CwaClient::new(&mock_server.uri(), "CWA-KEY".to_string(), Duration::from_secs(5))
                .unwrap();
        let bytes = client.fetch_dataset("F-D0047-061").await.unwrap();

        assert_eq!(bytes, br#"{"records":{}}"#);
    }

    #[tokio::test]
    async fn test_fetch_dataset_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&mock_server)
            .await;

        let client =
            CwaClient::new(&mock_server.uri(), "k".to_string(), Duration::from_millis(200))
                .unwrap();
        let err = client.fetch_dataset("F-D0047-001").await.unwrap_err();

        match err {
            FetchError::Transport(e) => assert!(e.is_timeout()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
