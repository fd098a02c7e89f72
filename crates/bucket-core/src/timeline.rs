//! Projection of fetched buckets onto timeline groups and items.
//!
//! Buckets carry no absolute scheduling data. Start times are synthetic:
//! an `ApplicationCompletedAt >` condition places a bucket that many
//! minutes after `now`, everything else is staggered five seconds apart by
//! position.

use crate::actions::{self, LINE_BREAK};
use crate::conditions;
use crate::types::{Actions, Bucket, ItemId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN_STATUS: &str = "Unknown Status";

const STATUS_FIELD: &str = "ApplicationStatus";
const COMPLETED_AT_FIELD: &str = "ApplicationCompletedAt";
const STAGGER_SECONDS: i64 = 5;
const WINDOW_LEAD_MINUTES: i64 = 15;
const WINDOW_TAIL_MINUTES: i64 = 60;
const SEPARATOR: &str = "--------------------";
const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Output records
// ---------------------------------------------------------------------------

/// A swim-lane on the timeline, one per distinct application status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusGroup {
    pub id: usize,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: ItemId,
    pub group: usize,
    pub content: String,
    pub start: DateTime<Utc>,
    pub title: String,
    /// Kept for cluster aggregation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Actions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineProjection {
    pub groups: Vec<StatusGroup>,
    pub items: Vec<TimelineItem>,
    /// Visible range; `None` when there are no items.
    pub window: Option<TimeWindow>,
}

impl TimelineProjection {
    pub fn item(&self, id: &ItemId) -> Option<&TimelineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Item whose id reads as `raw`, e.g. a command-line argument. Numeric
    /// and text ids are both found by their written form.
    pub fn item_by_text(&self, raw: &str) -> Option<&TimelineItem> {
        self.items.iter().find(|i| i.id.matches(raw))
    }

    pub fn group_label(&self, id: usize) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.content.as_str())
    }

    /// Widget configuration matching this projection's window.
    pub fn options(&self) -> TimelineOptions {
        TimelineOptions::new(self.window)
    }
}

// ---------------------------------------------------------------------------
// Widget options
// ---------------------------------------------------------------------------

/// vis-timeline configuration. Field names follow the widget's own keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineOptions {
    pub stack: bool,
    pub editable: bool,
    pub margin: Margin,
    pub tooltip: TooltipOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    pub zoom_key: String,
    pub cluster: ClusterOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub item: u32,
    pub axis: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOptions {
    pub follow_mouse: bool,
    pub overflow_method: String,
}

/// Clustering policy: anything more than one item in a slot clusters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOptions {
    pub max_items: u32,
    pub title_template: String,
}

impl TimelineOptions {
    pub fn new(window: Option<TimeWindow>) -> Self {
        Self {
            stack: false,
            editable: false,
            margin: Margin {
                item: 20,
                axis: 40,
            },
            tooltip: TooltipOptions {
                follow_mouse: true,
                overflow_method: "flip".to_string(),
            },
            start: window.map(|w| w.start),
            end: window.map(|w| w.end),
            zoom_key: "ctrlKey".to_string(),
            cluster: ClusterOptions {
                max_items: 1,
                title_template: "Cluster containing {count} buckets".to_string(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Project `buckets` onto status groups and timeline items, relative to
/// `now`. Input order is preserved; group ids follow first appearance.
pub fn project(buckets: &[Bucket], now: DateTime<Utc>) -> TimelineProjection {
    // Insertion-ordered status -> group id.
    let mut statuses: Vec<(String, usize)> = Vec::new();
    for bucket in buckets {
        let status = status_of(bucket);
        if !statuses.iter().any(|(s, _)| *s == status) {
            let id = statuses.len();
            statuses.push((status, id));
        }
    }

    let groups = statuses
        .iter()
        .map(|(status, id)| StatusGroup {
            id: *id,
            content: format!("Status: {}", escape_html(status)),
        })
        .collect();

    let mut items = Vec::with_capacity(buckets.len());
    let mut bounds: Option<(DateTime<Utc>, DateTime<Utc>)> = None;

    for (index, bucket) in buckets.iter().enumerate() {
        let status = status_of(bucket);
        let Some(group) = statuses
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, id)| *id)
        else {
            continue;
        };

        let start = start_time(bucket, index, now);
        bounds = Some(match bounds {
            None => (start, start),
            Some((lo, hi)) => (lo.min(start), hi.max(start)),
        });

        items.push(TimelineItem {
            id: ItemId::from_value(bucket.id.as_ref()).unwrap_or_else(|| index.into()),
            group,
            content: item_content(bucket, index),
            start,
            title: item_title(bucket),
            actions: bucket.actions.clone(),
        });
    }

    let window = bounds.map(|(lo, hi)| TimeWindow {
        start: lo
            .checked_sub_signed(Duration::minutes(WINDOW_LEAD_MINUTES))
            .unwrap_or(lo),
        end: hi
            .checked_add_signed(Duration::minutes(WINDOW_TAIL_MINUTES))
            .unwrap_or(hi),
    });

    TimelineProjection {
        groups,
        items,
        window,
    }
}

/// Application status a bucket applies to.
pub fn status_of(bucket: &Bucket) -> String {
    bucket
        .find_condition(STATUS_FIELD, "==")
        .map(|c| c.value_text())
        .unwrap_or_else(|| UNKNOWN_STATUS.to_string())
}

/// Synthetic start time for the bucket at `index`.
pub fn start_time(bucket: &Bucket, index: usize, now: DateTime<Utc>) -> DateTime<Utc> {
    let offset = bucket
        .find_condition(COMPLETED_AT_FIELD, ">")
        .and_then(|c| c.leading_integer())
        .and_then(Duration::try_minutes)
        .and_then(|d| now.checked_add_signed(d));
    if let Some(start) = offset {
        return start;
    }
    Duration::try_seconds(STAGGER_SECONDS.saturating_mul(index as i64))
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(now)
}

fn item_content(bucket: &Bucket, index: usize) -> String {
    let name = match bucket.display_name() {
        Some(n) => escape_html(n),
        None => format!("Bucket {}", index + 1),
    };
    let summary = bucket
        .condition_summary
        .as_deref()
        .map(escape_html)
        .unwrap_or_default();
    let box_summary = actions::format_for_box_content(bucket.actions.as_ref());
    format!("<b>{name}</b>{LINE_BREAK}<small>{summary}</small>{LINE_BREAK}<small><i>{box_summary}</i></small>")
}

fn item_title(bucket: &Bucket) -> String {
    let name = bucket
        .display_name()
        .map(escape_html)
        .unwrap_or_else(|| "Unnamed Bucket".to_string());
    let id = scalar_text(bucket.id.as_ref());
    let priority = scalar_text(bucket.priority.as_ref());
    let track = scalar_text(bucket.track.as_ref());
    let sort = scalar_text(bucket.sort_function.as_ref());
    let conditions = conditions::format_for_tooltip(Some(bucket.conditions.as_slice()));
    let actions = actions::format_for_tooltip(bucket.actions.as_ref());

    [
        format!("<b>{name}</b>"),
        format!("ID: {id}"),
        format!("Priority: {priority} | Track: {track} | Sort: {sort}"),
        SEPARATOR.to_string(),
        format!("<b>Conditions:</b>{LINE_BREAK}{conditions}"),
        SEPARATOR.to_string(),
        format!("<b>Actions:</b>{LINE_BREAK}{actions}"),
    ]
    .join(LINE_BREAK)
}

/// Escaped text of a raw scalar; missing or `null` renders as `N/A`.
fn scalar_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => escape_html(s),
        Some(other) => escape_html(&other.to_string()),
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}
