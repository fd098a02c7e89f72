use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bucket_core::error::BucketError;

/// Message returned to the browser for any failed upstream fetch. Details
/// stay in the server log.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch bucket data";

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error with the given message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BucketError::InvalidRequest(msg.into()).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0.downcast_ref::<BucketError>() {
            Some(e) if e.is_fetch_failure() => (
                StatusCode::from_u16(e.upstream_status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                FETCH_FAILED_MESSAGE.to_string(),
            ),
            Some(BucketError::InvalidRequest(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()),
        };

        let body = serde_json::json!({ "message": message });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
