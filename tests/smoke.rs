//! Smoke tests -- verify the binary runs and the subcommands are wired up.

use assert_cmd::Command;

#[test]
fn test_cli_help() {
    Command::cargo_bin("rankqueue")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("re-ranked work-order queue"));
}

#[test]
fn test_cli_version() {
    Command::cargo_bin("rankqueue")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicates::str::contains("rankqueue"));
}

#[test]
fn test_serve_subcommand_exists() {
    Command::cargo_bin("rankqueue")
        .unwrap()
        .args(["serve", "--help"])
        .assert()
        .success();
}

#[test]
fn test_tier_classifies_ids() {
    for (id, tier) in [("1", "normal"), ("6", "priority"), ("10", "vip"), ("15", "manager")] {
        Command::cargo_bin("rankqueue")
            .unwrap()
            .args(["tier", id])
            .assert()
            .success()
            .stdout(predicates::str::contains(tier));
    }
}

#[test]
fn test_tier_json_output() {
    Command::cargo_bin("rankqueue")
        .unwrap()
        .args(["tier", "30", "--json"])
        .assert()
        .success()
        .stdout(predicates::str::contains("\"tier\": \"manager\""));
}

#[test]
fn test_serve_with_missing_config_fails() {
    Command::cargo_bin("rankqueue")
        .unwrap()
        .args(["--config", "/nonexistent/rankqueue.toml", "serve"])
        .assert()
        .failure();
}
