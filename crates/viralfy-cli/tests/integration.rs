#![cfg(unix)]
#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCRIPTS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scripts");

fn viralfy(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("viralfy").unwrap();
    cmd.current_dir(dir.path())
        .env("VIRALFY_ROOT", dir.path())
        .env("VIRALFY_SCRIPTS_DIR", SCRIPTS_DIR)
        .env_remove("VIRALFY_SCRIPT_TIMEOUT");
    cmd
}

fn init_project(dir: &TempDir) {
    viralfy(dir)
        .args([
            "init",
            "--name",
            "Weekly Notes",
            "--field",
            "technology",
            "--platforms",
            "wechat,twitter",
            "--language",
            "en-US",
        ])
        .assert()
        .success();
}

fn read_json(path: std::path::PathBuf) -> serde_json::Value {
    let raw = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&raw).unwrap()
}

const PROGRESS: &str = r#"{
  "newsletter_id": "issue-001",
  "topic_id": "topic-001",
  "total_sections": 5,
  "completed_sections": [1, 2],
  "current_section": 3,
  "status": "drafting",
  "word_count": 1200,
  "created_at": "2026-01-05T08:00:00Z",
  "updated_at": "2026-01-06T08:00:00Z"
}
"#;

// ---------------------------------------------------------------------------
// viralfy init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_layout_and_config() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    for d in [
        ".viralfy",
        "ideas",
        "research",
        "newsletters",
        "distribution",
        "swipe-files/personas",
        "swipe-files/posts",
    ] {
        assert!(dir.path().join(d).is_dir(), "missing {d}");
    }
    assert!(dir.path().join("ideas/validated-topics.json").is_file());

    let config = read_json(dir.path().join(".viralfy/config.json"));
    assert_eq!(config["project_name"], "Weekly Notes");
    assert_eq!(config["platforms"], serde_json::json!(["wechat", "twitter"]));
    assert_eq!(config["language"], "en-US");
}

#[test]
fn init_without_field_fails_when_not_interactive() {
    let dir = TempDir::new().unwrap();
    viralfy(&dir)
        .args(["init", "--name", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--field"));
    assert!(!dir.path().join(".viralfy/config.json").exists());
}

#[test]
fn init_rejects_unknown_platform() {
    let dir = TempDir::new().unwrap();
    viralfy(&dir)
        .args(["init", "--field", "technology", "--platforms", "myspace"])
        .assert()
        .failure();
}

#[test]
fn reinit_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let before = read_json(dir.path().join(".viralfy/config.json"));

    // Non-interactive confirm defaults to "no".
    viralfy(&dir)
        .args(["init", "--name", "Renamed", "--field", "design"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cancelled"));
    let unchanged = read_json(dir.path().join(".viralfy/config.json"));
    assert_eq!(unchanged["project_name"], before["project_name"]);

    viralfy(&dir)
        .args(["init", "--yes", "--name", "Renamed", "--field", "design"])
        .assert()
        .success();
    let after = read_json(dir.path().join(".viralfy/config.json"));
    assert_eq!(after["project_name"], "Renamed");
    assert_eq!(after["created_at"], before["created_at"]);
}

#[test]
fn init_fails_when_scripts_are_missing() {
    let dir = TempDir::new().unwrap();
    let empty = TempDir::new().unwrap();
    viralfy(&dir)
        .env("VIRALFY_SCRIPTS_DIR", empty.path())
        .args(["init", "--field", "technology"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("init.sh"));
    assert!(!dir.path().join(".viralfy/config.json").exists());
}

// ---------------------------------------------------------------------------
// viralfy status
// ---------------------------------------------------------------------------

#[test]
fn status_outside_project_exits_zero() {
    let dir = TempDir::new().unwrap();
    viralfy(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("viralfy init"));
}

#[test]
fn status_json_outside_project() {
    let dir = TempDir::new().unwrap();
    let out = viralfy(&dir).args(["status", "--json"]).output().unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["initialized"], false);
}

#[test]
fn status_reports_config_and_progress() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    std::fs::write(dir.path().join(".viralfy/newsletter-progress.json"), PROGRESS).unwrap();

    let out = viralfy(&dir).args(["status", "--json"]).output().unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["initialized"], true);
    assert_eq!(v["config"]["project_name"], "Weekly Notes");
    assert_eq!(v["progress"]["newsletter_id"], "issue-001");
    assert_eq!(v["progress"]["completed"], 2);
    assert_eq!(v["counts"]["validated_topics"], 0);

    viralfy(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("2/5 sections"));
}

#[test]
fn status_from_nested_directory() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let nested = dir.path().join("newsletters/deep");
    std::fs::create_dir_all(&nested).unwrap();

    viralfy(&dir)
        .env("VIRALFY_ROOT", &nested)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly Notes"));
}

#[test]
fn status_with_relative_root_climbs_to_project() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let nested = dir.path().join("newsletters/deep");
    std::fs::create_dir_all(&nested).unwrap();

    viralfy(&dir)
        .current_dir(&nested)
        .args(["--root", ".", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly Notes"));
}

// ---------------------------------------------------------------------------
// viralfy write
// ---------------------------------------------------------------------------

#[test]
fn write_with_relative_root_runs_in_project() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    viralfy(&dir)
        .args(["--root", "newsletters", "write", "--mode", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/write"));
}

#[test]
fn write_outside_project_fails() {
    let dir = TempDir::new().unwrap();
    viralfy(&dir)
        .args(["write", "--mode", "create"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn write_create_mode_prints_instructions() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    viralfy(&dir)
        .args(["write", "--mode", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/write"));
}

#[test]
fn write_without_mode_needs_flag() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    viralfy(&dir)
        .arg("write")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--mode"));
}

#[test]
fn write_import_accepts_url_source() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    viralfy(&dir)
        .args(["write", "--mode", "import", "--source", "https://example.com/post"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://example.com/post"));
}

#[test]
fn write_assisted_suggests_research_without_knowledge_base() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    viralfy(&dir)
        .args(["write", "--mode", "assisted", "--topic", "topic-001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("viralfy research"));
}

#[test]
fn write_rejects_unsafe_topic_id() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    viralfy(&dir)
        .args(["write", "--mode", "create", "--topic", "../escape"])
        .assert()
        .failure();
}

#[test]
fn write_resume_continues_in_progress_newsletter() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    std::fs::write(dir.path().join(".viralfy/newsletter-progress.json"), PROGRESS).unwrap();

    viralfy(&dir)
        .args(["write", "--resume"])
        .assert()
        .success()
        .stdout(predicate::str::contains("issue-001"))
        .stdout(predicate::str::contains("section 3"));
    assert!(dir.path().join(".viralfy/newsletter-progress.json").exists());
}

// ---------------------------------------------------------------------------
// assistant guides
// ---------------------------------------------------------------------------

#[test]
fn guide_commands_name_slash_command() {
    let dir = TempDir::new().unwrap();
    for (cmd, slash) in [
        ("validate", "/validate"),
        ("research", "/research"),
        ("distribute", "/distribute"),
        ("analyze", "/analyze"),
        ("style", "/style"),
    ] {
        viralfy(&dir)
            .arg(cmd)
            .assert()
            .success()
            .stdout(predicate::str::contains(slash));
    }
}

#[test]
fn no_command_prints_help() {
    let dir = TempDir::new().unwrap();
    viralfy(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}
