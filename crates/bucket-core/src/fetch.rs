use crate::config::ProxyConfig;
use crate::error::{BucketError, Result};
use crate::types::Bucket;
use serde_json::Value;

/// Authenticated client for the upstream bucket API.
#[derive(Clone)]
pub struct BucketFetcher {
    client: reqwest::Client,
    upstream_url: String,
    api_token: String,
}

impl BucketFetcher {
    pub fn new(config: &ProxyConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &ProxyConfig) -> Self {
        Self {
            client,
            upstream_url: config.upstream_url.clone(),
            api_token: config.api_token.clone(),
        }
    }

    pub fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    /// Fetch the bucket list as the upstream returned it.
    pub async fn fetch_raw(&self) -> Result<Value> {
        let resp = self
            .client
            .get(&self.upstream_url)
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BucketError::Upstream {
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Fetch and decode the bucket list.
    pub async fn fetch_buckets(&self) -> Result<Vec<Bucket>> {
        let raw = self.fetch_raw().await?;
        Ok(serde_json::from_value(raw)?)
    }
}
