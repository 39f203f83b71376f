mod common;

use assert_cmd::prelude::*;
use common::{CATALOG, PROFILE, Sandbox, stdout_json};
use mockito::Server;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn calc_prints_scored_profile_as_json() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", "/public_profiles/ada")
        .with_status(200)
        .with_body(PROFILE)
        .create();
    let sandbox = Sandbox::new(&server.url());
    let url = format!("{}/public_profiles/ada", server.url());

    let assert = sandbox
        .command()
        .args(["calc", &url, "--no-history"])
        .assert()
        .success();
    let json = stdout_json(assert.get_output());

    assert_eq!(json["user"]["name"], "Ada Lovelace");
    assert_eq!(json["user"]["rank"], "Gold League");
    assert_eq!(json["stats"]["gameBadges"], 1);
    assert_eq!(json["stats"]["triviaBadges"], 1);
    assert_eq!(json["stats"]["totalPoints"], 2);
    assert_eq!(json["badges"].as_array().map(Vec::len), Some(3));
    assert!(json.get("games").is_none());
    assert!(!sandbox.history_file().exists());
}

#[test]
fn calc_season_override_counts_older_badges() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", "/public_profiles/ada")
        .with_status(200)
        .with_body(PROFILE)
        .create();
    let sandbox = Sandbox::new(&server.url());
    let url = format!("{}/public_profiles/ada", server.url());

    let assert = sandbox
        .command()
        .args(["calc", &url, "--season", "2025", "--no-history"])
        .assert()
        .success();
    let json = stdout_json(assert.get_output());
    assert_eq!(json["stats"]["gameBadges"], 1);
    assert_eq!(json["stats"]["triviaBadges"], 0);
    assert_eq!(json["stats"]["totalPoints"], 1);
}

#[test]
fn calc_with_games_marks_completed_entries() {
    let mut server = Server::new();
    let _p = server
        .mock("GET", "/public_profiles/ada")
        .with_status(200)
        .with_body(PROFILE)
        .create();
    let _c = server
        .mock("GET", "/arcade")
        .with_status(200)
        .with_body(CATALOG)
        .create();
    let sandbox = Sandbox::new(&server.url());
    let url = format!("{}/public_profiles/ada", server.url());

    let assert = sandbox
        .command()
        .args(["calc", &url, "--games", "--no-history"])
        .assert()
        .success();
    let json = stdout_json(assert.get_output());
    let games = json["games"].as_array().expect("games array");
    assert_eq!(games.len(), 2);
    assert_eq!(games[0]["name"], "Trivia Week 3");
    assert_eq!(games[0]["completed"], true);
    assert_eq!(games[1]["accessCode"], "1q-space-3");
    assert_eq!(games[1]["completed"], false);
}

#[test]
fn calc_table_format_lists_milestones() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", "/public_profiles/ada")
        .with_status(200)
        .with_body(PROFILE)
        .create();
    let sandbox = Sandbox::new(&server.url());
    let url = format!("{}/public_profiles/ada", server.url());

    sandbox
        .command()
        .args(["calc", &url, "--format", "table", "--no-history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace (Gold League) - 2026 season"))
        .stdout(predicate::str::contains("Total points: 2"))
        .stdout(predicate::str::contains("Milestone 1: no"));
}

#[test]
fn calc_rejects_foreign_host_without_fetching() {
    let mut server = Server::new();
    let never = server.mock("GET", mockito::Matcher::Any).expect(0).create();
    let sandbox = Sandbox::new(&server.url());

    sandbox
        .command()
        .args(["calc", "https://example.com/public_profiles/x", "--no-history"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL"));
    never.assert();
}

#[test]
fn calc_upstream_error_fails() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", "/public_profiles/gone")
        .with_status(404)
        .create();
    let sandbox = Sandbox::new(&server.url());
    let url = format!("{}/public_profiles/gone", server.url());

    sandbox
        .command()
        .args(["calc", &url, "--no-history"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("profile fetch failed"));
}

#[test]
fn calc_without_url_and_empty_stdin_fails() {
    let server = Server::new();
    let sandbox = Sandbox::new(&server.url());

    sandbox
        .command()
        .arg("calc")
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("URL is required"));
}

#[test]
fn calc_reads_url_from_piped_stdin() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", "/public_profiles/ada")
        .with_status(200)
        .with_body(PROFILE)
        .create();
    let sandbox = Sandbox::new(&server.url());
    let url = format!("{}/public_profiles/ada\n", server.url());

    sandbox
        .command()
        .args(["calc", "--format", "table", "--no-history"])
        .write_stdin(url)
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile URL:"))
        .stdout(predicate::str::contains("Total points: 2"));
}

#[test]
fn calc_rejects_non_numeric_season() {
    let server = Server::new();
    let sandbox = Sandbox::new(&server.url());

    sandbox
        .command()
        .args(["calc", "https://www.skills.google/p", "--season", "next"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Season must be a year"));
}
