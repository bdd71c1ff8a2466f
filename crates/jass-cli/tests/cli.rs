use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn jass() -> Command {
    Command::cargo_bin("jass").expect("binary built")
}

#[test]
fn play_then_replay_reports_same_points() {
    let dir = tempdir().expect("temp dir");
    let replay = dir.path().join("deal.json");

    let output = jass()
        .args([
            "play",
            "--mode",
            "trump",
            "--trump-suit",
            "schilten",
            "--seed",
            "7",
            "--players",
            "low,random,heuristic,low",
        ])
        .arg("--replay-out")
        .arg(&replay)
        .output()
        .expect("play runs");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("Round finished (seed 7)."));
    assert!(stdout.contains("Contract: trump(schilten)"));
    let points_line = stdout
        .lines()
        .find(|line| line.starts_with("Team points:"))
        .expect("points line")
        .to_string();

    jass()
        .arg("replay")
        .arg(&replay)
        .assert()
        .success()
        .stdout(predicate::str::contains(points_line.as_str()));

    jass()
        .arg("replay")
        .arg(&replay)
        .arg("--relaxed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Replay finished."));
}

#[test]
fn validate_accepts_config_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("table.yaml");
    fs::write(
        &path,
        "seed: 5\nleader: 2\nplayers: [heuristic, heuristic, random, low]\nrules:\n  allow_weis: false\n",
    )
    .expect("write config");

    jass()
        .arg("validate")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration valid"));
}

#[test]
fn validate_rejects_bad_player_list() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("table.yaml");
    fs::write(&path, "players: [low, low, low]\n").expect("write config");

    jass()
        .arg("validate")
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 4 players"));
}

#[test]
fn play_rejects_trump_without_suit() {
    jass()
        .args(["play", "--mode", "trump", "--seed", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid table settings"));
}

#[test]
fn version_comes_from_the_binary_crate() {
    jass()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "jass {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn eval_prints_summary() {
    jass()
        .args(["eval", "--episodes", "3", "--seed", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Evaluated 3 episodes"));
}
