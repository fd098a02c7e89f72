use anyhow::{Context, Result};
use bucket_core::types::Bucket;
use std::io::Read;
use std::path::Path;

/// Read a bucket array from `path`, or stdin when `path` is `-`.
pub fn read_buckets(path: &Path) -> Result<Vec<Bucket>> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read buckets from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&raw).with_context(|| format!("{} is not a bucket list", path.display()))
}
