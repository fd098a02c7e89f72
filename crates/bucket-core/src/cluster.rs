//! Action totals for a clicked cluster of timeline items.

use crate::timeline::TimelineProjection;
use crate::types::{Actions, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-type action counters. Sub-types outside these seven are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionCounts {
    pub ace_call: usize,
    pub ace_sms: usize,
    pub ace_investigate: usize,
    pub ortto_email: usize,
    pub ortto_sms: usize,
    pub my_page: usize,
    pub s2: usize,
}

impl ActionCounts {
    pub fn add(&mut self, actions: &Actions) {
        for a in &actions.ace {
            match a.ace_action_type.as_deref() {
                Some("Call") => self.ace_call += 1,
                Some("TwoWaySMS") => self.ace_sms += 1,
                Some("Investigate") => self.ace_investigate += 1,
                _ => {}
            }
        }
        for a in &actions.ortto {
            match a.ortto_action_type.as_deref() {
                Some("Email") => self.ortto_email += 1,
                Some("SMS") => self.ortto_sms += 1,
                _ => {}
            }
        }
        self.my_page += actions.my_page.len();
        self.s2 += actions.s2.len();
    }

    /// Report lines for the non-zero counters, in fixed order.
    pub fn lines(&self) -> Vec<String> {
        [
            ("📞", "Calls", self.ace_call),
            ("📱", "ACE SMS", self.ace_sms),
            ("🔍", "Investigate", self.ace_investigate),
            ("📧", "Emails", self.ortto_email),
            ("📱", "Ortto SMS", self.ortto_sms),
            ("📄", "MyPage", self.my_page),
            ("⚙️", "S2", self.s2),
        ]
        .into_iter()
        .filter(|(_, _, n)| *n > 0)
        .map(|(icon, label, n)| format!("{icon} {label}: {n}"))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Member items that were found, with or without actions.
    pub total: usize,
    pub counts: ActionCounts,
}

impl ClusterSummary {
    /// Aggregate over the retained actions of each cluster member.
    pub fn from_actions<'a>(members: impl IntoIterator<Item = Option<&'a Actions>>) -> Self {
        let mut summary = Self::default();
        for actions in members {
            summary.total += 1;
            if let Some(actions) = actions {
                summary.counts.add(actions);
            }
        }
        summary
    }

    /// Multi-line text shown to the user for this cluster.
    pub fn report(&self) -> String {
        format!(
            "Cluster Details ({} items):\n--------------------\n{}",
            self.total,
            self.counts.lines().join("\n")
        )
    }
}

/// Summarize the cluster made of `member_ids`. Ids the projection doesn't
/// know are skipped, repeated ids count once.
pub fn summarize(projection: &TimelineProjection, member_ids: &[ItemId]) -> ClusterSummary {
    let mut seen = HashSet::new();
    ClusterSummary::from_actions(
        member_ids
            .iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| projection.item(id))
            .map(|item| item.actions.as_ref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::project;
    use crate::types::{AceAction, Bucket, MyPageAction, OrttoAction};
    use chrono::Utc;
    use serde_json::json;

    fn bucket(id: i64, actions: Actions) -> Bucket {
        Bucket {
            id: Some(json!(id)),
            actions: Some(actions),
            ..Bucket::default()
        }
    }

    #[test]
    fn counts_call_and_email_across_two_items() {
        let buckets = vec![
            bucket(
                1,
                Actions {
                    ace: vec![AceAction::new("Call")],
                    ..Actions::default()
                },
            ),
            bucket(
                2,
                Actions {
                    ortto: vec![OrttoAction::new("Email")],
                    ..Actions::default()
                },
            ),
        ];
        let projection = project(&buckets, Utc::now());
        let summary = summarize(&projection, &[ItemId::Number(1), ItemId::Number(2)]);

        assert_eq!(summary.total, 2);
        assert_eq!(
            summary.counts,
            ActionCounts {
                ace_call: 1,
                ortto_email: 1,
                ..ActionCounts::default()
            }
        );

        let report = summary.report();
        assert!(report.starts_with("Cluster Details (2 items):\n--------------------\n"));
        assert!(report.contains("📞 Calls: 1"));
        assert!(report.contains("📧 Emails: 1"));
        assert!(!report.contains("Investigate"));
        assert!(!report.contains("MyPage"));
        assert!(!report.contains("S2"));
    }

    #[test]
    fn unknown_subtypes_are_not_counted() {
        let mut counts = ActionCounts::default();
        counts.add(&Actions {
            ace: vec![AceAction::new("Fax"), AceAction::default()],
            ortto: vec![OrttoAction::new("Push")],
            ..Actions::default()
        });
        assert_eq!(counts, ActionCounts::default());
        assert!(counts.lines().is_empty());
    }

    #[test]
    fn my_page_and_s2_count_entries() {
        let mut counts = ActionCounts::default();
        counts.add(&Actions {
            my_page: vec![MyPageAction::default(), MyPageAction::default()],
            s2: vec![json!({}), json!({}), json!({})],
            ..Actions::default()
        });
        assert_eq!(counts.my_page, 2);
        assert_eq!(counts.s2, 3);
        assert_eq!(counts.lines(), vec!["📄 MyPage: 2", "⚙️ S2: 3"]);
    }

    #[test]
    fn lines_follow_fixed_order() {
        let counts = ActionCounts {
            ace_call: 1,
            ace_sms: 2,
            ace_investigate: 3,
            ortto_email: 4,
            ortto_sms: 5,
            my_page: 6,
            s2: 7,
        };
        assert_eq!(
            counts.lines(),
            vec![
                "📞 Calls: 1",
                "📱 ACE SMS: 2",
                "🔍 Investigate: 3",
                "📧 Emails: 4",
                "📱 Ortto SMS: 5",
                "📄 MyPage: 6",
                "⚙️ S2: 7",
            ]
        );
    }

    #[test]
    fn unknown_ids_are_skipped_and_bare_items_still_count() {
        let buckets = vec![Bucket {
            id: Some(json!("a")),
            ..Bucket::default()
        }];
        let projection = project(&buckets, Utc::now());
        let summary = summarize(
            &projection,
            &[ItemId::Text("a".into()), ItemId::Text("missing".into())],
        );
        assert_eq!(summary.total, 1);
        assert_eq!(summary.counts, ActionCounts::default());
        assert_eq!(summary.report(), "Cluster Details (1 items):\n--------------------\n");
    }

    #[test]
    fn repeated_ids_count_once() {
        let buckets = vec![bucket(
            1,
            Actions {
                ace: vec![AceAction::new("Call")],
                ..Actions::default()
            },
        )];
        let projection = project(&buckets, Utc::now());
        let summary = summarize(&projection, &[ItemId::Number(1), ItemId::Number(1)]);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.counts.ace_call, 1);
    }

    #[test]
    fn string_ids_resolve_from_their_written_form() {
        let buckets: Vec<Bucket> = serde_json::from_value(json!([
            { "id": "7", "actions": { "ace": [{ "aceActionType": "Call" }] } },
            { "id": "8", "actions": { "ace": [{ "aceActionType": "Call" }] } },
            { "id": 9, "actions": { "ortto": [{ "orttoActionType": "SMS" }] } }
        ]))
        .unwrap();
        let projection = project(&buckets, Utc::now());

        let member_ids: Vec<ItemId> = ["7", "8", " 9"]
            .iter()
            .filter_map(|raw| projection.item_by_text(raw))
            .map(|item| item.id.clone())
            .collect();
        assert_eq!(
            member_ids,
            vec![ItemId::Text("7".into()), ItemId::Text("8".into()), ItemId::Number(9)]
        );

        let summary = summarize(&projection, &member_ids);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.counts.ace_call, 2);
        assert_eq!(summary.counts.ortto_sms, 1);
    }
}
