#![allow(clippy::unwrap_used)]
// Orchestrator behaviour over an in-memory transport.

mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;

use common::{FakeTransport, RecordingReporter, base, household, pet, pet_without_device};
use tryfi_core::{Client, CoreError, Credentials, Pet, Window};

fn client(transport: FakeTransport) -> (Client<FakeTransport>, Arc<RecordingReporter>) {
    let reporter = Arc::new(RecordingReporter::default());
    (Client::with_reporter(transport, reporter.clone()), reporter)
}

fn credentials() -> Credentials {
    Credentials {
        email: "owner@example.com".into(),
        password: "pw".to_string().into(),
    }
}

// ── Login ───────────────────────────────────────────────────────────

#[test]
fn login_records_session_and_user() {
    let (mut client, _) = client(FakeTransport::default());
    client.login(&credentials()).unwrap();

    assert_eq!(client.session().unwrap().user_id, "user123");
    assert_eq!(client.user().unwrap().id(), "user123");
}

#[test]
fn login_error_envelope_is_login_failure() {
    let transport = FakeTransport {
        login_error: Some("Invalid credentials".into()),
        ..FakeTransport::default()
    };
    let (mut client, _) = client(transport);
    let err = client.login(&credentials()).unwrap_err();

    match err {
        CoreError::LoginFailed { ref message } => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected LoginFailed, got: {other:?}"),
    }
    assert!(client.session().is_none());
}

#[test]
fn refresh_user_loads_profile() {
    let transport = FakeTransport {
        user: Some(json!({
            "email": "test@example.com", "firstName": "Test", "lastName": "User",
            "phoneNumber": "+1234567890"
        })),
        ..FakeTransport::default()
    };
    let (mut client, reporter) = client(transport);
    client.login(&credentials()).unwrap();
    client.refresh_user();

    let user = client.user().unwrap();
    assert_eq!(user.full_name().unwrap(), "Test User");
    assert_eq!(user.phone_number().unwrap(), Some("+1234567890"));
    assert_eq!(reporter.count(), 0);
}

// ── Pet refresh ─────────────────────────────────────────────────────

#[test]
fn refresh_pets_skips_pets_without_collar() {
    let transport = FakeTransport::default()
        .with_households(vec![household(
            vec![pet("p1", "Max"), pet_without_device("p2", "Bella")],
            vec![],
        )])
        .with_pet_data("p1");
    let (mut client, reporter) = client(transport);
    client.refresh_pets();

    let ids: Vec<&str> = client.pets().iter().map(Pet::id).collect();
    assert_eq!(ids, vec!["p1"]);
    assert_eq!(reporter.count(), 0);
}

#[test]
fn refresh_pets_treats_null_device_as_no_collar() {
    let transport = FakeTransport::default()
        .with_households(vec![household(
            vec![json!({ "id": "p3", "name": "Rex", "device": null })],
            vec![],
        )]);
    let (mut client, _) = client(transport);
    client.refresh_pets();

    assert!(client.pets().is_empty());
}

#[test]
fn refresh_pets_populates_location_and_stats() {
    let transport = FakeTransport::default()
        .with_households(vec![household(vec![pet("p1", "Max")], vec![])])
        .with_pet_data("p1");
    let (mut client, _) = client(transport);
    client.refresh_pets();

    let pet = client.find_pet_by_id("p1").unwrap();
    assert_eq!(pet.activity.as_ref().unwrap().latitude, 40.0);
    assert_eq!(pet.activity_stats(Window::Daily).unwrap().step_goal, 5000);
    assert_eq!(pet.rest(Window::Weekly).unwrap().sleep_seconds, 28800);
    assert_eq!(pet.device().module_id.as_deref(), Some("mod-dev-p1"));

    let calls = client.transport().calls();
    assert!(!calls.iter().any(|c| c.starts_with("device:")), "refresh must not fetch device details");
}

#[test]
fn refresh_pets_dedups_across_households() {
    let transport = FakeTransport::default()
        .with_households(vec![
            household(vec![pet("p1", "Max")], vec![]),
            household(vec![pet("p1", "Max II")], vec![]),
        ])
        .with_pet_data("p1");
    let (mut client, _) = client(transport);
    client.refresh_pets();

    assert_eq!(client.pets().len(), 1);
    assert_eq!(client.pets()[0].name, "Max II");
}

#[test]
fn refresh_pets_failure_keeps_previous_collection() {
    let transport = FakeTransport::default()
        .with_households(vec![household(vec![pet("p1", "Max")], vec![])])
        .with_pet_data("p1");
    let (mut client, reporter) = client(transport);
    client.refresh_pets();
    assert_eq!(client.pets().len(), 1);

    // The second pet has no canned location, so the whole relist is abandoned.
    client.transport().households.replace(Some(vec![household(
        vec![pet("p1", "Max"), pet("p2", "Bella")],
        vec![],
    )]));
    client.refresh_pets();

    let ids: Vec<&str> = client.pets().iter().map(Pet::id).collect();
    assert_eq!(ids, vec!["p1"]);
    assert_eq!(reporter.count(), 1);
    assert!(reporter.messages()[0].contains("location"));
}

#[test]
fn refresh_pets_transport_failure_is_reported() {
    let (mut client, reporter) = client(FakeTransport::default());
    client.refresh_pets();

    assert!(client.pets().is_empty());
    assert_eq!(reporter.count(), 1);
    assert!(reporter.messages()[0].contains("households"));
}

// ── Base refresh ────────────────────────────────────────────────────

#[test]
fn refresh_bases_replaces_collection() {
    let transport = FakeTransport::default()
        .with_households(vec![household(vec![], vec![base("b1", "Kitchen"), base("b2", "Hall")])]);
    let (mut client, _) = client(transport);
    client.refresh_bases();

    assert_eq!(client.bases().len(), 2);
    assert_eq!(client.find_base_by_id("b2").unwrap().name.as_deref(), Some("Hall"));
    assert!(client.find_base_by_id("b9").is_none());
}

#[test]
fn refresh_all_runs_pets_after_failed_bases() {
    let transport = FakeTransport::default()
        .with_households(vec![household(
            vec![pet("p1", "Max")],
            vec![json!({ "name": "no id" })],
        )])
        .with_pet_data("p1");
    let (mut client, reporter) = client(transport);
    client.refresh_all();

    assert!(client.bases().is_empty());
    assert_eq!(client.pets().len(), 1);
    assert_eq!(reporter.count(), 1);

    let calls = client.transport().calls();
    assert_eq!(calls[0], "households");
    assert_eq!(calls[1], "households");
}

// ── Lookup and replacement ──────────────────────────────────────────

#[test]
fn find_pet_by_id_absent_is_none_and_silent() {
    let (client, reporter) = client(FakeTransport::default());
    assert!(client.find_pet_by_id("missing").is_none());
    assert_eq!(reporter.count(), 0);
}

#[test]
fn refresh_one_tracked_pet_replaces_in_place() {
    let transport = FakeTransport::default()
        .with_households(vec![household(vec![pet("p1", "Max"), pet("p2", "Bella")], vec![])])
        .with_pet_data("p1")
        .with_pet_data("p2");
    let (mut client, reporter) = client(transport);
    client.refresh_pets();

    let renamed = Pet::from_details(&pet("p1", "Maximus"), reporter.as_ref()).unwrap();
    client.refresh_one_tracked_pet(renamed);

    assert_eq!(client.pets()[0].name, "Maximus");
    assert_eq!(client.pets()[1].name, "Bella");

    let stranger = Pet::from_details(&pet("p9", "Ghost"), reporter.as_ref()).unwrap();
    client.refresh_one_tracked_pet(stranger);
    assert_eq!(client.pets().len(), 2);
}

// ── Control by id ───────────────────────────────────────────────────

#[test]
fn control_on_untracked_pet_is_false() {
    let (mut client, _) = client(FakeTransport::default());
    assert!(!client.turn_pet_led("nope", true));
    assert!(!client.set_pet_led_color("nope", 2));
    assert!(!client.set_pet_lost_mode("nope", true));
    assert!(client.transport().calls().is_empty());
}

#[test]
fn lost_mode_by_id_reconciles_device() {
    let mut lost_device = common::device("dev-p1");
    lost_device["operationParams"]["mode"] = json!("LOST");
    let transport = FakeTransport {
        mutation: Some(json!({ "updateDeviceOperationParams": lost_device })),
        ..FakeTransport::default()
    }
    .with_households(vec![household(vec![pet("p1", "Max")], vec![])])
    .with_pet_data("p1");
    let (mut client, _) = client(transport);
    client.refresh_pets();

    assert!(client.set_pet_lost_mode("p1", true));
    assert!(client.find_pet_by_id("p1").unwrap().is_lost());
    assert!(client.transport().calls().contains(&"lost:mod-dev-p1:true".to_string()));
}

#[test]
fn update_all_pet_details_touches_every_endpoint() {
    let transport = FakeTransport::default()
        .with_households(vec![household(vec![pet("p1", "Max")], vec![])])
        .with_pet_data("p1");
    let (mut client, reporter) = client(transport);
    client.refresh_pets();
    client.transport().calls.borrow_mut().clear();

    client.update_all_pet_details();

    assert_eq!(
        client.transport().calls(),
        vec!["device:p1", "location:p1", "stats:p1", "rest:p1"]
    );
    assert_eq!(reporter.count(), 0);
}
