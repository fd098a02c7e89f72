#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bucket_timeline(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bucket-timeline").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("API_TOKEN")
        .env_remove("BUCKETS_UPSTREAM_URL")
        .env_remove("PORT");
    cmd
}

fn write_buckets(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("buckets.json");
    let buckets = serde_json::json!([
        {
            "id": 1,
            "name": "Call new applicants",
            "conditions": [
                { "field": "ApplicationStatus", "operator": "==", "value": "Open" },
                { "field": "ApplicationCompletedAt", "operator": ">", "value": "30" }
            ],
            "actions": { "ace": [{ "aceActionType": "Call", "clientRole": "Sales" }] }
        },
        {
            "id": 2,
            "conditions": [],
            "actions": { "ortto": [{ "orttoActionType": "Email" }] }
        }
    ]);
    std::fs::write(&path, serde_json::to_string_pretty(&buckets).unwrap()).unwrap();
    path
}

// ---------------------------------------------------------------------------
// serve
// ---------------------------------------------------------------------------

#[test]
fn serve_without_token_is_fatal() {
    let dir = TempDir::new().unwrap();
    bucket_timeline(&dir)
        .args(["serve", "--port", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API_TOKEN environment variable not set"));
}

// ---------------------------------------------------------------------------
// project
// ---------------------------------------------------------------------------

#[test]
fn project_json_lists_groups_and_items() {
    let dir = TempDir::new().unwrap();
    let input = write_buckets(&dir);

    let output = bucket_timeline(&dir)
        .args(["project", "--json", "--input"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["groups"][0]["content"], "Status: Open");
    assert_eq!(json["groups"][1]["content"], "Status: Unknown Status");
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    assert_eq!(json["items"][1]["group"], 1);
    assert_eq!(json["options"]["zoomKey"], "ctrlKey");
}

#[test]
fn project_table_shows_names_and_icons() {
    let dir = TempDir::new().unwrap();
    let input = write_buckets(&dir);

    bucket_timeline(&dir)
        .args(["project", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: Open"))
        .stdout(predicate::str::contains("Call new applicants"))
        .stdout(predicate::str::contains("Bucket 2"))
        .stdout(predicate::str::contains("Actions: Ortto"))
        .stdout(predicate::str::contains("Window:"));
}

#[test]
fn project_rejects_malformed_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();

    bucket_timeline(&dir)
        .args(["project", "--input"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a bucket list"));
}

#[test]
fn project_from_upstream_needs_token() {
    let dir = TempDir::new().unwrap();
    bucket_timeline(&dir)
        .arg("project")
        .assert()
        .failure()
        .stderr(predicate::str::contains("API_TOKEN"));
}

// ---------------------------------------------------------------------------
// cluster
// ---------------------------------------------------------------------------

#[test]
fn cluster_report_counts_actions() {
    let dir = TempDir::new().unwrap();
    let input = write_buckets(&dir);

    bucket_timeline(&dir)
        .args(["cluster", "--ids", "1,2", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cluster Details (2 items):"))
        .stdout(predicate::str::contains("📞 Calls: 1"))
        .stdout(predicate::str::contains("📧 Emails: 1"))
        .stdout(predicate::str::contains("MyPage").not());
}

#[test]
fn cluster_json_skips_unknown_ids() {
    let dir = TempDir::new().unwrap();
    let input = write_buckets(&dir);

    let output = bucket_timeline(&dir)
        .args(["cluster", "--json", "--ids", "1,99", "--input"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total"], 1);
    assert_eq!(json["counts"]["aceCall"], 1);
    assert_eq!(json["counts"]["orttoEmail"], 0);
}

#[test]
fn cluster_resolves_string_ids() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("string-ids.json");
    let buckets = serde_json::json!([
        { "id": "7", "actions": { "ace": [{ "aceActionType": "Call" }] } },
        { "id": "8", "actions": { "ace": [{ "aceActionType": "Call" }] } }
    ]);
    std::fs::write(&path, buckets.to_string()).unwrap();

    bucket_timeline(&dir)
        .args(["cluster", "--ids", "7,8,8", "--input"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cluster Details (2 items):"))
        .stdout(predicate::str::contains("📞 Calls: 2"));
}

#[test]
fn project_keeps_malformed_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mixed.json");
    let buckets = serde_json::json!([
        { "id": 1, "name": "Fine", "conditions": [], "actions": {} },
        { "id": 2, "name": 42, "conditions": "junk", "actions": { "ace": [{ "aceActionType": 7 }] } }
    ]);
    std::fs::write(&path, buckets.to_string()).unwrap();

    let output = bucket_timeline(&dir)
        .args(["project", "--json", "--input"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    assert!(json["items"][1]["content"].as_str().unwrap().contains("ACE: 7 (?)"));
}
