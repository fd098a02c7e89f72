use crate::error::{BucketError, Result};

/// Production endpoint listing every bucket.
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://6bs4naw2sl.execute-api.eu-north-1.amazonaws.com/data/bucket/all";

pub const DEFAULT_PORT: u16 = 3001;

/// Settings the proxy needs to reach the upstream bucket API.
#[derive(Clone)]
pub struct ProxyConfig {
    pub api_token: String,
    pub upstream_url: String,
    pub port: u16,
}

impl ProxyConfig {
    /// Build a config, filling defaults. A missing or blank token is rejected.
    pub fn new(
        api_token: Option<String>,
        upstream_url: Option<String>,
        port: Option<u16>,
    ) -> Result<Self> {
        let api_token = api_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(BucketError::MissingToken)?;
        let upstream_url = upstream_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        Ok(Self {
            api_token,
            upstream_url,
            port: port.unwrap_or(DEFAULT_PORT),
        })
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("api_token", &"<redacted>")
            .field("upstream_url", &self.upstream_url)
            .field("port", &self.port)
            .finish()
    }
}
