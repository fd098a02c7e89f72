use thiserror::Error;

#[derive(Debug, Error)]
pub enum BucketError {
    #[error("API_TOKEN environment variable not set")]
    MissingToken,

    #[error("upstream responded with status {status}")]
    Upstream { status: u16 },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl BucketError {
    /// Status to relay to our own caller when a fetch fails: the upstream's
    /// status when it answered, 500 otherwise.
    pub fn upstream_status(&self) -> u16 {
        match self {
            BucketError::Upstream { status } => *status,
            BucketError::Http(e) => e.status().map(|s| s.as_u16()).unwrap_or(500),
            _ => 500,
        }
    }

    /// True for failures of the upstream bucket fetch itself.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            BucketError::Upstream { .. } | BucketError::Http(_) | BucketError::Json(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BucketError>;
