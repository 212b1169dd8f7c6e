use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SCALER_JSON: &str = r#"{
    "feature_names": ["likes_per_views", "retweets_per_views", "replies_per_views"],
    "mean": [0.05, 0.01, 0.005],
    "scale": [0.05, 0.01, 0.005]
}"#;

const KMEANS_JSON: &str = r#"{
    "centroids": [
        [0.0, 0.0, 0.0],
        [2.0, 0.5, 0.0],
        [-0.9, -0.9, -0.9],
        [1.5, 3.0, 1.0]
    ]
}"#;

fn write_model(models_dir: &Path, name: &str) {
    let model_dir = models_dir.join(name);
    fs::create_dir_all(&model_dir).expect("create model dir");
    fs::write(model_dir.join("scaler.json"), SCALER_JSON).expect("write scaler");
    fs::write(model_dir.join("kmeans.json"), KMEANS_JSON).expect("write kmeans");
}

fn write_posts(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("posts.json");
    fs::write(
        &path,
        r#"{
            "1001": {"full_text": "launch day", "views_count": "1000", "likes_count": "80",
                     "retweet_count": "12", "reply_count": 4},
            "1002": {"full_text": "RT @other: reshared", "views_count": "5000", "likes_count": "900",
                     "retweet_count": "100", "reply_count": "20"},
            "1003": {"full_text": "quiet one", "views_count": 400, "likes_count": 3,
                     "retweet_count": 0, "reply_count": 1}
        }"#,
    )
    .expect("write posts");
    path
}

#[test]
fn config_init_writes_example_file() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");

    let mut cmd = cargo_bin_cmd!("engage-lens");
    cmd.args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).expect("read config");
    assert!(content.contains("models_dir"));
    assert!(content.contains("kind = \"json\""));
}

#[test]
fn taxonomy_json_lists_four_clusters() {
    let mut cmd = cargo_bin_cmd!("engage-lens");
    let output = cmd
        .args(["taxonomy", "--json"])
        .output()
        .expect("run taxonomy");

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let profiles = value.as_array().expect("array of profiles");
    assert_eq!(profiles.len(), 4);
    assert!(profiles.iter().any(|p| p["label"] == "High Virality"));
}

#[test]
fn analyze_posts_file_outputs_valid_json_report() {
    let dir = TempDir::new().expect("temp dir");
    write_model(dir.path(), "engagement_kmeans");
    let posts_path = write_posts(&dir);

    let mut cmd = cargo_bin_cmd!("engage-lens");
    let output = cmd
        .env("ENGAGE_LENS__GENERAL__MODELS_DIR", dir.path())
        .args(["analyze", "testaccount", "--posts-file"])
        .arg(&posts_path)
        .arg("--json")
        .output()
        .expect("run analyze");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["account"], "testaccount");
    // The reshared post is filtered; two valid posts remain
    assert_eq!(value["valid_posts"], 2);
    let assignments = value["assignments"].as_array().expect("assignments");
    assert_eq!(assignments.len(), 2);
    assert!(value["summary"]["dominant_cluster"].is_string());
}

#[test]
fn analyze_aggregated_mode_emits_single_row() {
    let dir = TempDir::new().expect("temp dir");
    write_model(dir.path(), "engagement_kmeans");
    let posts_path = write_posts(&dir);

    let mut cmd = cargo_bin_cmd!("engage-lens");
    let output = cmd
        .env("ENGAGE_LENS__GENERAL__MODELS_DIR", dir.path())
        .args(["analyze", "testaccount", "--mode", "aggregated", "--posts-file"])
        .arg(&posts_path)
        .arg("--json")
        .output()
        .expect("run analyze");

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let assignments = value["assignments"].as_array().expect("assignments");
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0]["id"], "testaccount");
    // totals: views 1400, likes 83
    assert_eq!(assignments[0]["features"]["views"], 1400);
}

#[test]
fn analyze_without_model_reports_model_unavailable() {
    let dir = TempDir::new().expect("temp dir");
    let posts_path = write_posts(&dir);

    let mut cmd = cargo_bin_cmd!("engage-lens");
    cmd.env("ENGAGE_LENS__GENERAL__MODELS_DIR", dir.path())
        .args(["analyze", "testaccount", "--posts-file"])
        .arg(&posts_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Model unavailable"));
}

#[test]
fn analyze_all_filtered_reports_nothing_to_analyze() {
    let dir = TempDir::new().expect("temp dir");
    write_model(dir.path(), "engagement_kmeans");
    let posts_path = dir.path().join("posts.json");
    fs::write(
        &posts_path,
        r#"{"1": {"full_text": "RT @a: only reshares here", "views_count": "100", "likes_count": "5"}}"#,
    )
    .expect("write posts");

    let mut cmd = cargo_bin_cmd!("engage-lens");
    cmd.env("ENGAGE_LENS__GENERAL__MODELS_DIR", dir.path())
        .args(["analyze", "testaccount", "--posts-file"])
        .arg(&posts_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to analyze"));
}

#[test]
fn doctor_fails_when_model_is_missing() {
    let dir = TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("engage-lens");
    let output = cmd
        .env("ENGAGE_LENS__GENERAL__MODELS_DIR", dir.path())
        .env("ENGAGE_LENS__SOURCE__KIND", "stub")
        .args(["doctor", "--json"])
        .output()
        .expect("run doctor");

    assert!(!output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["overall"], "error");
    assert_eq!(value["model"]["status"], "error");
    assert_eq!(value["source"]["status"], "ok");
}

#[test]
fn doctor_passes_with_model_and_stub_source() {
    let dir = TempDir::new().expect("temp dir");
    write_model(dir.path(), "engagement_kmeans");

    let mut cmd = cargo_bin_cmd!("engage-lens");
    let output = cmd
        .env("ENGAGE_LENS__GENERAL__MODELS_DIR", dir.path())
        .env("ENGAGE_LENS__SOURCE__KIND", "stub")
        .args(["doctor", "--json"])
        .output()
        .expect("run doctor");

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["overall"], "ok");
    assert_eq!(
        value["model"]["details"]["fingerprint"]
            .as_str()
            .expect("fingerprint")
            .len(),
        64
    );
}
