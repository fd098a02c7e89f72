use crate::input::read_buckets;
use crate::output::{print_json, print_table};
use anyhow::{Context, Result};
use bucket_core::actions::{category_summary, format_as_icons};
use bucket_core::config::ProxyConfig;
use bucket_core::fetch::BucketFetcher;
use bucket_core::timeline::{self, TimelineProjection};
use bucket_core::types::Bucket;
use std::path::Path;

pub fn run(
    input: Option<&Path>,
    token: Option<String>,
    upstream_url: Option<String>,
    json: bool,
) -> Result<()> {
    let buckets = match input {
        Some(path) => read_buckets(path)?,
        None => fetch(token, upstream_url)?,
    };

    let projection = timeline::project(&buckets, chrono::Utc::now());

    if json {
        print_json(&serde_json::json!({
            "groups": projection.groups,
            "items": projection.items,
            "window": projection.window,
            "options": projection.options(),
        }))?;
        return Ok(());
    }

    print_summary(&buckets, &projection);
    Ok(())
}

fn fetch(token: Option<String>, upstream_url: Option<String>) -> Result<Vec<Bucket>> {
    let config = ProxyConfig::new(token, upstream_url, None)?;
    let fetcher = BucketFetcher::new(&config);
    tracing::info!("Fetching data from {}", fetcher.upstream_url());

    let rt = tokio::runtime::Runtime::new()?;
    let buckets = rt
        .block_on(fetcher.fetch_buckets())
        .context("failed to fetch bucket data")?;
    tracing::info!("Successfully fetched {} buckets.", buckets.len());
    Ok(buckets)
}

fn print_summary(buckets: &[Bucket], projection: &TimelineProjection) {
    if projection.items.is_empty() {
        println!("No buckets.");
        return;
    }

    let group_rows = projection
        .groups
        .iter()
        .map(|g| {
            let members = projection.items.iter().filter(|i| i.group == g.id).count();
            vec![g.id.to_string(), g.content.clone(), members.to_string()]
        })
        .collect();
    print_table(&["GROUP", "LABEL", "ITEMS"], group_rows);
    println!();

    // One item per bucket, in bucket order.
    let item_rows = projection
        .items
        .iter()
        .zip(buckets)
        .enumerate()
        .map(|(index, (item, bucket))| {
            let name = bucket
                .display_name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Bucket {}", index + 1));
            vec![
                item.id.to_string(),
                name,
                item.group.to_string(),
                item.start.format("%Y-%m-%d %H:%M:%S").to_string(),
                format_as_icons(item.actions.as_ref()),
                category_summary(item.actions.as_ref()),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "GROUP", "START", "ICONS", "ACTIONS"], item_rows);

    if let Some(window) = projection.window {
        println!();
        println!(
            "Window: {} → {}",
            window.start.format("%Y-%m-%d %H:%M:%S"),
            window.end.format("%Y-%m-%d %H:%M:%S")
        );
    }
}
