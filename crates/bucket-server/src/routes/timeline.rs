use axum::extract::State;
use axum::Json;
use bucket_core::timeline::{self, TimelineOptions, TimelineProjection};
use bucket_core::types::Bucket;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// Everything the browser needs to build the widget.
#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    #[serde(flatten)]
    pub projection: TimelineProjection,
    pub options: TimelineOptions,
}

impl From<TimelineProjection> for TimelineResponse {
    fn from(projection: TimelineProjection) -> Self {
        let options = projection.options();
        Self {
            projection,
            options,
        }
    }
}

/// GET /api/timeline — fetch buckets upstream and project them onto the
/// timeline relative to now.
pub async fn get_timeline(State(app): State<AppState>) -> Result<Json<TimelineResponse>, AppError> {
    tracing::info!("Fetching data from {}", app.fetcher.upstream_url());
    let buckets = app.fetcher.fetch_buckets().await.inspect_err(|e| {
        tracing::error!(status = e.upstream_status(), "Error fetching bucket data: {e}");
    })?;
    Ok(Json(build(&buckets)))
}

/// POST /api/timeline — project a caller-supplied bucket list.
pub async fn project_timeline(Json(buckets): Json<Vec<Bucket>>) -> Json<TimelineResponse> {
    Json(build(&buckets))
}

fn build(buckets: &[Bucket]) -> TimelineResponse {
    let projection = timeline::project(buckets, chrono::Utc::now());
    tracing::debug!(
        groups = projection.groups.len(),
        items = projection.items.len(),
        "projected timeline"
    );
    projection.into()
}
