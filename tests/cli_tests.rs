//! CLI integration tests
//!
//! Every run uses `--offline` so no provider CLI is needed.

use assert_cmd::Command;
use predicates::prelude::*;

fn reflect_cmd() -> Command {
    let mut cmd = Command::cargo_bin("persona-reflect").unwrap();
    // Keep a stray persona-reflect.yaml in the cwd from leaking into runs
    cmd.current_dir(std::env::temp_dir());
    cmd
}

// ─────────────────────────────────────────────────────────────────
// Help and Registry
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    reflect_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reflect"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("personas"))
        .stdout(predicate::str::contains("schema"));
}

#[test]
fn test_personas_lists_registry_in_order() {
    let output = reflect_cmd().arg("personas").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let positions: Vec<usize> = ["Dr. Chen", "Maya", "Alex", "Sage"]
        .iter()
        .map(|name| stdout.find(name).expect("persona listed"))
        .collect();
    assert!(stdout.contains("Guides toward present-moment awareness"));

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_schema_is_json() {
    let output = reflect_cmd().arg("schema").output().unwrap();
    assert!(output.status.success());

    let schema: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(schema["properties"]["timeout_sec"].is_object());
}

// ─────────────────────────────────────────────────────────────────
// Reflect
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_reflect_offline_text() {
    reflect_cmd()
        .args(["reflect", "--offline", "I", "keep", "procrastinating"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dr. Chen"))
        .stdout(predicate::str::contains("Sage"))
        .stdout(predicate::str::contains("I keep procrastinating"))
        .stdout(predicate::str::contains("Suggested actions:"));
}

#[test]
fn test_reflect_offline_json() {
    let output = reflect_cmd()
        .args([
            "reflect",
            "--offline",
            "--json",
            "--context",
            "mood=anxious",
            "--user-id",
            "u-42",
            "Should I change teams?",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(body["requestId"].as_str().unwrap().starts_with("entry-"));
    assert_eq!(body["userId"], "u-42");
    assert_eq!(body["responses"].as_array().unwrap().len(), 4);
    assert_eq!(body["responses"][0]["personaId"], "cognitive-behavioral");
    assert_eq!(body["suggestedActions"].as_array().unwrap().len(), 5);
}

#[test]
fn test_reflect_blank_dilemma_fails() {
    reflect_cmd()
        .args(["reflect", "--offline", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dilemma"));
}

#[test]
fn test_reflect_requires_dilemma() {
    reflect_cmd().args(["reflect", "--offline"]).assert().failure();
}

#[test]
fn test_reflect_writes_reports() {
    let dir = tempfile::tempdir().unwrap();
    reflect_cmd()
        .args(["reflect", "--offline", "--out-dir"])
        .arg(dir.path())
        .arg("Should I move cities?")
        .assert()
        .success();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.iter().any(|n| n.starts_with("entry-") && n.ends_with(".json")));
    assert!(names.iter().any(|n| n.starts_with("entry-") && n.ends_with(".md")));
}

// ─────────────────────────────────────────────────────────────────
// Plan
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_plan_from_saved_reflection() {
    let dir = tempfile::tempdir().unwrap();
    let saved = dir.path().join("reflection.json");

    let output = reflect_cmd()
        .args(["reflect", "--offline", "--json", "Should I learn piano?"])
        .output()
        .unwrap();
    assert!(output.status.success());
    std::fs::write(&saved, &output.stdout).unwrap();

    let output = reflect_cmd()
        .args(["plan", "--offline", "--json", "--pref", "pace=slow", "-i"])
        .arg(&saved)
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(plan["planId"].as_str().unwrap().starts_with("ap-"));
    assert!(plan["entryId"].as_str().unwrap().starts_with("entry-"));
    assert!(!plan["steps"].as_array().unwrap().is_empty());
}

#[test]
fn test_plan_rejects_empty_responses() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plan.json");
    std::fs::write(&input, r#"{"entryId": "entry-1", "responses": []}"#).unwrap();

    reflect_cmd()
        .args(["plan", "--offline", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("persona response"));
}

#[test]
fn test_plan_missing_input_file() {
    reflect_cmd()
        .args(["plan", "--offline", "-i", "/nonexistent/plan.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read plan input"));
}
