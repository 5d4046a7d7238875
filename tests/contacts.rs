mod common;

use common::{TestEnv, ids};
use predicates::prelude::*;

#[test]
fn list_is_sorted_by_name() {
    let env = TestEnv::with_fixture();
    let contacts = env.json(&["contacts", "list"]);
    assert_eq!(ids(&contacts), vec!["1", "2", "4", "3"]);
    assert_eq!(contacts[0]["phone_numbers"].as_array().unwrap().len(), 2);
    assert_eq!(contacts[2]["phone_numbers"].as_array().unwrap().len(), 0);
}

#[test]
fn list_favorites_only() {
    let env = TestEnv::with_fixture();
    let contacts = env.json(&["contacts", "list", "--favorites"]);
    assert_eq!(ids(&contacts), vec!["2"]);
}

#[test]
fn show_normalizes_numbers() {
    let env = TestEnv::with_fixture();
    let details = env.json(&["contacts", "show", "1"]);
    assert_eq!(details["name"], "Ann Lee");
    assert_eq!(
        details["phone_numbers"],
        serde_json::json!(["+15551230000", "5550001111"])
    );
    assert_eq!(details["email"], "ann@example.com");

    let out = env.text(&["contacts", "show", "1"]);
    assert!(out.contains("ann@example.com"));
    assert!(out.contains("+15551230000"));
}

#[test]
fn add_then_search() {
    let env = TestEnv::with_fixture();
    let added = env.json(&[
        "contacts", "add", "--first", "Dee", "--last", "Park", "--phone", "+1 555 777 0000",
    ]);
    assert_eq!(added["id"], "5");
    assert_eq!(added["status"], "added");

    let result = env.json(&["search", "7770"]);
    assert_eq!(ids(&result["results"]), vec!["5"]);
}

#[test]
fn edit_replaces_primary_number() {
    let env = TestEnv::with_fixture();
    env.cmd()
        .args(["contacts", "edit", "2", "--first", "Robert", "--last", "Ray", "--phone", "555 111 2222"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact 2 updated."));

    let details = env.json(&["contacts", "show", "2"]);
    assert_eq!(details["name"], "Robert Ray");
    assert_eq!(details["phone_numbers"], serde_json::json!(["5551112222"]));

    // Old calls from the previous number are no longer linked.
    let calls = env.json(&["recents", "--filter", "favourites"]);
    assert_eq!(calls.as_array().unwrap().len(), 0);
}

#[test]
fn delete_removes_contact() {
    let env = TestEnv::with_fixture();
    env.cmd().args(["contacts", "delete", "4"]).assert().success();
    env.cmd()
        .args(["contacts", "show", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No contact found"));
}

#[test]
fn favorite_toggle() {
    let env = TestEnv::with_fixture();
    env.cmd().args(["contacts", "favorite", "1"]).assert().success();
    assert_eq!(ids(&env.json(&["contacts", "list", "--favorites"])), vec!["1", "2"]);

    env.cmd().args(["contacts", "favorite", "2", "--off"]).assert().success();
    assert_eq!(ids(&env.json(&["contacts", "list", "--favorites"])), vec!["1"]);
}

#[test]
fn favorite_prints_updated_contact() {
    let env = TestEnv::with_fixture();
    let out = env.json(&["contacts", "favorite", "1"]);
    assert_eq!(out["status"], "favorited");
    assert_eq!(out["contact"]["id"], "1");
    assert_eq!(out["contact"]["display_name"], "Ann Lee");
    assert_eq!(out["contact"]["is_favorite"], true);

    let text = env.text(&["contacts", "favorite", "2", "--off"]);
    assert!(text.contains("Contact 2 unfavorited."));
    assert!(text.contains("Bob Ray"));
}

#[test]
fn favorite_unknown_id_fails() {
    let env = TestEnv::with_fixture();
    env.cmd()
        .args(["contacts", "favorite", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No contact found with id \"99\""));
}

#[test]
fn empty_directory_message() {
    let env = TestEnv::empty();
    env.cmd()
        .args(["contacts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No contacts yet."));
}
