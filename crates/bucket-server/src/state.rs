use bucket_core::config::ProxyConfig;
use bucket_core::fetch::BucketFetcher;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: BucketFetcher,
}

impl AppState {
    pub fn new(config: &ProxyConfig) -> Self {
        Self {
            fetcher: BucketFetcher::new(config),
        }
    }
}
