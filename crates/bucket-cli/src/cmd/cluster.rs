use crate::input::read_buckets;
use crate::output::print_json;
use anyhow::Result;
use bucket_core::cluster;
use bucket_core::timeline;
use bucket_core::types::ItemId;
use std::path::Path;

pub fn run(input: &Path, ids: &[String], json: bool) -> Result<()> {
    let buckets = read_buckets(input)?;
    let projection = timeline::project(&buckets, chrono::Utc::now());

    let mut member_ids: Vec<ItemId> = Vec::new();
    let mut unknown: Vec<&str> = Vec::new();
    for raw in ids.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        match projection.item_by_text(raw) {
            Some(item) => member_ids.push(item.id.clone()),
            None => unknown.push(raw),
        }
    }
    if !unknown.is_empty() {
        tracing::warn!("skipping unknown item ids: {}", unknown.join(", "));
    }

    let summary = cluster::summarize(&projection, &member_ids);

    if json {
        print_json(&serde_json::json!({
            "total": summary.total,
            "counts": summary.counts,
            "report": summary.report(),
        }))?;
    } else {
        println!("{}", summary.report());
    }
    Ok(())
}
