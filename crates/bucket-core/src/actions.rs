//! Display strings for a bucket's actions.
//!
//! All four formatters are total: a missing `Actions` and one whose
//! categories are all empty both render as [`NO_ACTIONS`].

use crate::types::{display_text, non_empty, Actions};

pub const NO_ACTIONS: &str = "No actions";

/// Line separator used inside tooltip and item HTML.
pub const LINE_BREAK: &str = "<br>";

pub const ICON_PERSON: &str = "👤";
pub const ICON_DOCUMENT: &str = "📄";
pub const ICON_EMAIL: &str = "📧";
pub const ICON_MOBILE: &str = "📱";
pub const ICON_PHONE: &str = "📞";

const NOT_AVAILABLE: &str = "N/A";

/// One line per action entry, grouped by category.
pub fn format_for_tooltip(actions: Option<&Actions>) -> String {
    let Some(actions) = actions else {
        return NO_ACTIONS.to_string();
    };

    let mut lines = Vec::new();
    for a in &actions.ace {
        let mut line = format!(
            "- ACE: {} ({})",
            a.ace_action_type.as_deref().unwrap_or(NOT_AVAILABLE),
            non_empty(&a.client_role).unwrap_or(NOT_AVAILABLE)
        );
        if let Some(desc) = non_empty(&a.description) {
            line.push_str(&format!(" - {desc}"));
        }
        lines.push(line);
    }
    for a in &actions.my_page {
        let template =
            display_text(a.template_id.as_ref()).unwrap_or_else(|| NOT_AVAILABLE.to_string());
        lines.push(format!("- MyPage: Template {template}"));
    }
    for a in &actions.ortto {
        let mut line = format!(
            "- Ortto: {}",
            a.ortto_action_type.as_deref().unwrap_or(NOT_AVAILABLE)
        );
        if let Some(desc) = non_empty(&a.description) {
            line.push_str(&format!(" - {desc}"));
        }
        lines.push(line);
    }
    for a in &actions.s2 {
        lines.push(format!("- S2: {a}"));
    }

    join_or_none(lines, LINE_BREAK)
}

/// Short per-category summary shown inside the timeline box.
pub fn format_for_box_content(actions: Option<&Actions>) -> String {
    let Some(actions) = actions else {
        return NO_ACTIONS.to_string();
    };

    let mut details = Vec::new();

    let ace_types = unique(actions.ace.iter().map(|a| {
        format!(
            "{} ({})",
            a.ace_action_type.as_deref().unwrap_or(NOT_AVAILABLE),
            non_empty(&a.client_role).unwrap_or("?")
        )
    }));
    if !ace_types.is_empty() {
        details.push(format!("ACE: {}", ace_types.join(", ")));
    }

    if !actions.my_page.is_empty() {
        details.push("MyPage Action".to_string());
    }

    let ortto_types = unique(actions.ortto.iter().map(|a| {
        a.ortto_action_type
            .as_deref()
            .unwrap_or(NOT_AVAILABLE)
            .to_string()
    }));
    if !ortto_types.is_empty() {
        details.push(format!("Ortto: {}", ortto_types.join(", ")));
    }

    if !actions.s2.is_empty() {
        details.push("S2 Action".to_string());
    }

    join_or_none(details, " | ")
}

/// `Actions: ACE, Ortto` style list of the categories present.
pub fn category_summary(actions: Option<&Actions>) -> String {
    let Some(actions) = actions else {
        return NO_ACTIONS.to_string();
    };
    let names: Vec<&str> = actions.categories().iter().map(|c| c.as_str()).collect();
    if names.is_empty() {
        NO_ACTIONS.to_string()
    } else {
        format!("Actions: {}", names.join(", "))
    }
}

/// Icon strip. Five fixed checks, appended in fixed order.
pub fn format_as_icons(actions: Option<&Actions>) -> String {
    let Some(actions) = actions else {
        return NO_ACTIONS.to_string();
    };

    let mut icons = Vec::new();
    if !actions.ace.is_empty() {
        icons.push(ICON_PERSON.to_string());
    }
    if !actions.my_page.is_empty() {
        icons.push(ICON_DOCUMENT.to_string());
    }
    if actions.ortto.iter().any(|a| a.is_type("Email")) {
        icons.push(ICON_EMAIL.to_string());
    }
    if actions.ortto.iter().any(|a| a.is_type("SMS")) {
        icons.push(ICON_MOBILE.to_string());
    }
    if actions
        .ace
        .iter()
        .any(|a| a.is_type("Call") || a.is_type("TwoWaySMS"))
    {
        icons.push(ICON_PHONE.to_string());
    }

    join_or_none(icons, " ")
}

fn join_or_none(parts: Vec<String>, sep: &str) -> String {
    if parts.is_empty() {
        NO_ACTIONS.to_string()
    } else {
        parts.join(sep)
    }
}

/// Deduplicate by exact string, keeping first-seen order.
fn unique(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}
