use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/buckets — the upstream bucket list, relayed as-is.
pub async fn get_buckets(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    tracing::info!("Fetching data from {}", app.fetcher.upstream_url());
    match app.fetcher.fetch_raw().await {
        Ok(body) => {
            let count = body.as_array().map_or(0, Vec::len);
            tracing::info!("Successfully fetched {count} buckets.");
            Ok(Json(body))
        }
        Err(e) => {
            tracing::error!(status = e.upstream_status(), "Error fetching bucket data: {e}");
            Err(e.into())
        }
    }
}
