use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use std::any::Any;
use tracing::error;

use super::{ApiError, AppState};
use crate::forecast::ForecastResult;
use crate::locations::Location;
use crate::services::forecast_api::fetch_forecast;

const LOCATION_PARAM: &str = "locationName";

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub success: bool,
    pub data: ForecastResult,
}

/// GET / — service description.
pub async fn index(State(state): State<AppState>) -> Json<Value> {
    let valid: Vec<Location> = Location::all().collect();
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Proxy for CWA township weather forecasts",
        "endpoints": {
            "GET /api/health": "Health check",
            "GET /api/locations": "List supported locations",
            "GET /api/weather?locationName={name}": "Forecast for a location",
            "GET /api/weather/{locationName}": "Forecast for a location",
        },
        "defaultLocation": state.config.default_location,
        "validLocations": valid,
    }))
}

/// GET /api/health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

/// GET /api/locations
pub async fn locations(State(state): State<AppState>) -> Json<Value> {
    let locations: Vec<Location> = Location::all().collect();
    Json(json!({
        "success": true,
        "data": {
            "locations": locations,
            "default": state.config.default_location,
        },
    }))
}

/// GET /api/weather?locationName=
///
/// The query is taken as raw pairs so malformed input, such as a repeated
/// parameter, reaches the resolver instead of being rejected.
pub async fn weather_by_query(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<WeatherResponse>, ApiError> {
    weather(&state, requested_location(&params)).await
}

/// The `locationName` value if it appears exactly once.
fn requested_location(params: &[(String, String)]) -> Option<&str> {
    let mut values = params
        .iter()
        .filter(|(key, _)| key == LOCATION_PARAM)
        .map(|(_, value)| value.as_str());
    match (values.next(), values.next()) {
        (Some(value), None) => Some(value),
        _ => None,
    }
}

/// GET /api/weather/{locationName}
pub async fn weather_by_path(
    State(state): State<AppState>,
    Path(location_name): Path<String>,
) -> Result<Json<WeatherResponse>, ApiError> {
    weather(&state, Some(location_name.as_str())).await
}

async fn weather(
    state: &AppState,
    requested: Option<&str>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let api = state.forecasts.as_deref().ok_or(ApiError::MissingCredential)?;
    let location = Location::resolve(requested, state.config.default_location);

    let data = fetch_forecast(api, location).await?;
    Ok(Json(WeatherResponse {
        success: true,
        data,
    }))
}

pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

/// Turns a handler panic into a 500 JSON response.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %message, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error", "message": message })),
    )
        .into_response()
}
