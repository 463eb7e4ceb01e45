//! End-to-end runs of the `santa` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

const FAMILY: [&str; 9] = [
    "mom", "dad", "chris", "char", "mitch", "tamsin", "sean", "paulette", "shannon",
];

fn santa(root: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_santa"));
    cmd.arg("--store-root").arg(root.join(".santa"));
    cmd.env_remove("SANTA_LOG");
    cmd
}

fn write_participants(dir: &Path, names: &[&str]) -> PathBuf {
    let people: Vec<Value> = names
        .iter()
        .map(|n| json!({ "id": n, "name": n }))
        .collect();
    let path = dir.join("participants.json");
    fs::write(&path, serde_json::to_vec(&people).unwrap()).unwrap();
    path
}

fn stdout_json(cmd: &mut Command) -> Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn generate_then_verify_files() {
    let temp = TempDir::new().unwrap();
    let people = write_participants(temp.path(), &FAMILY);
    let out = temp.path().join("out").join("assignments.json");

    santa(temp.path())
        .args(["generate", "--gifts", "2", "--seed", "42", "--participants"])
        .arg(&people)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 18 assignments"));

    let written: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(written.as_array().unwrap().len(), 18);

    let report = stdout_json(
        santa(temp.path())
            .args(["--json", "verify", "--gifts", "2", "--participants"])
            .arg(&people)
            .arg("--assignments")
            .arg(&out),
    );
    assert_eq!(report["isValid"], json!(true));
    assert_eq!(report["summary"]["status"], json!("success"));
}

#[test]
fn seeded_generate_is_reproducible() {
    let temp = TempDir::new().unwrap();
    let people = write_participants(temp.path(), &FAMILY);

    let run = |seed: &str| {
        stdout_json(
            santa(temp.path())
                .args(["--json", "generate", "--gifts", "3", "--seed", seed, "--participants"])
                .arg(&people),
        )["assignments"]
            .clone()
    };
    assert_eq!(run("9"), run("9"));
}

#[test]
fn verify_fails_on_tampered_file() {
    let temp = TempDir::new().unwrap();
    let people = write_participants(temp.path(), &["a", "b", "c"]);
    let asg = temp.path().join("assignments.json");
    fs::write(
        &asg,
        serde_json::to_vec(&json!([
            { "giverId": "a", "receiverId": "b", "giftNumber": 1 },
            { "giverId": "b", "receiverId": "a", "giftNumber": 1 },
            { "giverId": "c", "receiverId": "c", "giftNumber": 1 }
        ]))
        .unwrap(),
    )
    .unwrap();

    santa(temp.path())
        .args(["verify", "--participants"])
        .arg(&people)
        .arg("--assignments")
        .arg(&asg)
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL"))
        .stdout(predicate::str::contains("1 self-assignment(s) found"));
}

#[test]
fn too_few_participants_is_an_error() {
    let temp = TempDir::new().unwrap();
    let people = write_participants(temp.path(), &["a", "b"]);

    santa(temp.path())
        .args(["generate", "--participants"])
        .arg(&people)
        .assert()
        .failure()
        .stderr(predicate::str::contains("need at least 3 participants"));
}

#[test]
fn stored_group_workflow() {
    let temp = TempDir::new().unwrap();

    let group = stdout_json(santa(temp.path()).args([
        "--json", "group", "create", "Family", "--gifts", "2",
    ]));
    let group_id = group["id"].as_str().unwrap().to_string();

    let mut ids = Vec::new();
    for name in FAMILY {
        let p = stdout_json(santa(temp.path()).args(["--json", "group", "join", "Family", name]));
        ids.push(p["id"].as_str().unwrap().to_string());
    }

    santa(temp.path())
        .args(["draw", &group_id, "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("drew 18 assignments"));

    santa(temp.path())
        .args(["draw", &group_id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already generated"));

    let mine = stdout_json(santa(temp.path()).args(["--json", "mine", &group_id, &ids[0]]));
    let numbers: Vec<u64> = mine
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["giftNumber"].as_u64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2]);

    let all = stdout_json(santa(temp.path()).args(["--json", "list", "Family"]));
    assert_eq!(all.as_array().unwrap().len(), 18);

    santa(temp.path())
        .args(["audit", "Family"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"));

    let cleared = stdout_json(santa(temp.path()).args(["--json", "clear", &group_id]));
    assert_eq!(cleared["removed"], json!(18));

    // An empty set no longer balances.
    santa(temp.path())
        .args(["audit", &group_id])
        .assert()
        .failure();
}

#[test]
fn group_update_and_delete() {
    let temp = TempDir::new().unwrap();

    santa(temp.path())
        .args(["group", "create", "Trio", "--gifts", "3", "--max-participants", "4"])
        .assert()
        .success();
    for name in ["a", "b", "c"] {
        santa(temp.path())
            .args(["group", "join", "Trio", name])
            .assert()
            .success();
    }

    santa(temp.path())
        .args(["draw", "Trio"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("need at least 4 participants"));

    let updated = stdout_json(santa(temp.path()).args([
        "--json", "group", "update", "Trio", "--gifts", "2",
    ]));
    assert_eq!(updated["giftsPerParticipant"], json!(2));

    santa(temp.path())
        .args(["draw", "Trio", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("drew 6 assignments"));

    let deleted = stdout_json(santa(temp.path()).args(["--json", "group", "delete", "Trio"]));
    assert_eq!(deleted["deleted"], json!(true));

    santa(temp.path())
        .args(["list", "Trio"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("group not found"));
}

#[test]
fn verify_help_documents_every_flag() {
    santa(Path::new("."))
        .args(["verify", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("JSON array of participants"))
        .stdout(predicate::str::contains("Gifts each participant should give"));
}
