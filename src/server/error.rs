use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::error;

use crate::error::ForecastError;
use crate::fetch::FetchError;

/// Every failure a handler can report, rendered as a JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("CWA_API_KEY is not configured")]
    MissingCredential,

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCredential => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Forecast(ForecastError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Forecast(ForecastError::Fetch(FetchError::Status { status, .. })) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Forecast(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            Self::MissingCredential => json!({
                "error": "Server configuration error",
                "message": "CWA_API_KEY is not configured on the server",
            }),
            Self::Forecast(ForecastError::NotFound(city)) => json!({
                "error": "Forecast not found",
                "message": format!("No forecast data found for {city}"),
            }),
            Self::Forecast(ForecastError::Fetch(FetchError::Status { status, body })) => {
                let message = body
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Upstream responded with status {status}"));
                json!({
                    "error": "Failed to fetch weather data",
                    "message": message,
                    "details": body,
                })
            }
            Self::Forecast(ForecastError::Fetch(e)) => json!({
                "error": "Failed to fetch weather data",
                "message": error_chain(e),
                "details": Value::Null,
            }),
            Self::Forecast(e) => json!({
                "error": "Internal server error",
                "message": error_chain(e),
            }),
        }
    }
}

/// `err: source: source...` on one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        message.push_str(": ");
        message.push_str(&e.to_string());
        source = e.source();
    }
    message
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_is_echoed() {
        let err = ApiError::from(ForecastError::Fetch(FetchError::Status {
            status: 503,
            body: json!({ "message": "rate limited", "code": 42 }),
        }));

        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = err.body();
        assert_eq!(body["message"], "rate limited");
        assert_eq!(body["details"]["code"], 42);
        assert!(body["error"].is_string());
    }

    #[test]
    fn test_upstream_body_without_message() {
        let err = ApiError::from(ForecastError::Fetch(FetchError::Status {
            status: 401,
            body: Value::String("Unauthorized".into()),
        }));

        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.body()["message"], "Upstream responded with status 401");
        assert_eq!(err.body()["details"], "Unauthorized");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(ForecastError::NotFound("臺北市".into()));

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.body()["message"].as_str().unwrap().contains("臺北市"));
    }

    #[test]
    fn test_missing_credential_maps_to_500() {
        let err = ApiError::MissingCredential;

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body()["error"], "Server configuration error");
    }

    #[test]
    fn test_undecodable_payload_is_internal_error() {
        let parse_err = serde_json::from_slice::<Value>(b"<html>").unwrap_err();
        let err = ApiError::from(ForecastError::Payload(parse_err));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body()["error"], "Internal server error");
        assert!(
            err.body()["message"]
                .as_str()
                .unwrap()
                .starts_with("malformed upstream payload: ")
        );
    }

    #[test]
    fn test_invalid_upstream_status_becomes_bad_gateway() {
        let err = ApiError::from(ForecastError::Fetch(FetchError::Status {
            status: 1000,
            body: Value::Null,
        }));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }
}
