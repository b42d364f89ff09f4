//! HTTP surface of the proxy.

mod error;
mod handlers;

pub use error::ApiError;

use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::infra::cwa::CwaClient;
use crate::services::forecast_api::ForecastApi;

/// Read-only state shared by all requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when no credential is configured; weather requests then fail
    /// before reaching upstream.
    pub forecasts: Option<Arc<dyn ForecastApi>>,
}

impl AppState {
    /// Builds the state, including a [`CwaClient`] if `config` has an API key.
    pub fn new(config: Config) -> reqwest::Result<Self> {
        let forecasts = match &config.api_key {
            Some(key) => {
                let client = CwaClient::new(&config.base_url, key.clone(), config.request_timeout)?;
                Some(Arc::new(client) as Arc<dyn ForecastApi>)
            }
            None => {
                warn!("CWA_API_KEY is not set, weather requests will fail");
                None
            }
        };

        Ok(Self {
            config: Arc::new(config),
            forecasts,
        })
    }

    /// State backed by a custom provider.
    pub fn with_api(config: Config, api: Arc<dyn ForecastApi>) -> Self {
        Self {
            config: Arc::new(config),
            forecasts: Some(api),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health))
        .route("/api/locations", get(handlers::locations))
        .route("/api/weather", get(handlers::weather_by_query))
        .route("/api/weather/", get(handlers::weather_by_query))
        .route("/api/weather/{location_name}", get(handlers::weather_by_path))
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `0.0.0.0:{port}` and serves until Ctrl-C.
pub async fn serve(state: AppState, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!(
        addr = %listener.local_addr()?,
        default_location = %state.config.default_location,
        "Forecast proxy listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
