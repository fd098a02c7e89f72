use axum::Json;
use bucket_core::cluster::{ActionCounts, ClusterSummary};
use bucket_core::types::Actions;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A cluster member as the browser holds it. Only the actions retained on
/// the item at projection time matter here; other item fields are ignored.
#[derive(Debug, Deserialize)]
pub struct ClusterMember {
    #[serde(default)]
    pub actions: Option<Actions>,
}

#[derive(Debug, Deserialize)]
pub struct ClusterRequest {
    pub items: Vec<ClusterMember>,
}

#[derive(Debug, Serialize)]
pub struct ClusterResponse {
    pub total: usize,
    pub counts: ActionCounts,
    pub report: String,
}

/// POST /api/cluster — action totals and report text for a clicked cluster.
pub async fn summarize_cluster(
    Json(body): Json<ClusterRequest>,
) -> Result<Json<ClusterResponse>, AppError> {
    if body.items.is_empty() {
        return Err(AppError::bad_request("cluster has no members"));
    }

    let summary = ClusterSummary::from_actions(body.items.iter().map(|m| m.actions.as_ref()));
    tracing::debug!(total = summary.total, "summarized cluster");

    Ok(Json(ClusterResponse {
        total: summary.total,
        counts: summary.counts,
        report: summary.report(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn counts_members_actions() {
        let body: ClusterRequest = serde_json::from_value(json!({
            "items": [
                { "id": 1, "actions": { "ace": [{ "aceActionType": "Call" }] } },
                { "id": "b", "actions": { "ortto": [{ "orttoActionType": "Email" }] } },
                { "id": 3 }
            ]
        }))
        .unwrap();

        let Json(resp) = summarize_cluster(Json(body)).await.unwrap();
        assert_eq!(resp.total, 3);
        assert_eq!(resp.counts.ace_call, 1);
        assert_eq!(resp.counts.ortto_email, 1);
        assert!(resp.report.contains("📞 Calls: 1"));
    }

    #[tokio::test]
    async fn empty_cluster_is_rejected() {
        let body = ClusterRequest { items: Vec::new() };
        assert!(summarize_cluster(Json(body)).await.is_err());
    }
}
