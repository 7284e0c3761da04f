//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use devstock_domain::error::DevstockError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`DevstockError`] to an HTTP response with appropriate status code.
pub struct ApiError(DevstockError);

impl From<DevstockError> for ApiError {
    fn from(err: DevstockError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            DevstockError::Storage(err) => tracing::error!(error = %err, "storage error"),
            DevstockError::Counter(err) => tracing::error!(error = %err, "counter store error"),
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: "internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
