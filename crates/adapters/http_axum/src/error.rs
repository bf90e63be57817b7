//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use airhub_domain::error::AirHubError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`AirHubError`] to an HTTP response with appropriate status code.
pub struct ApiError(AirHubError);

impl From<AirHubError> for ApiError {
    fn from(err: AirHubError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AirHubError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AirHubError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            AirHubError::NoData(err) => (StatusCode::NOT_FOUND, err.to_string()),
            AirHubError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
