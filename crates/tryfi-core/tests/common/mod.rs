#![allow(dead_code, clippy::unwrap_used)]
// Shared fixtures: an in-memory `Transport` and a recording reporter.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Mutex;

use secrecy::SecretString;
use serde_json::{Value, json};

use tryfi_api::{Error, LoginSession, Transport};
use tryfi_core::{CoreError, FaultReporter};

// ── Reporter ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingReporter {
    faults: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn count(&self) -> usize {
        self.faults.lock().unwrap().len()
    }

    pub fn messages(&self) -> Vec<String> {
        self.faults.lock().unwrap().clone()
    }
}

impl FaultReporter for RecordingReporter {
    fn report(&self, error: &CoreError) {
        self.faults.lock().unwrap().push(error.to_string());
    }
}

// ── Transport ───────────────────────────────────────────────────────

/// Canned responses keyed by pet id. A missing entry fails the call.
#[derive(Default)]
pub struct FakeTransport {
    pub login_error: Option<String>,
    pub households: RefCell<Option<Vec<Value>>>,
    pub user: Option<Value>,
    pub locations: HashMap<String, Value>,
    pub stats: HashMap<String, Value>,
    pub rest_stats: HashMap<String, Value>,
    pub devices: HashMap<String, Value>,
    pub mutation: Option<Value>,
    pub calls: RefCell<Vec<String>>,
}

fn boom(what: &str) -> Error {
    Error::Graphql {
        message: format!("no canned {what}"),
    }
}

impl FakeTransport {
    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn canned(&self, map: &HashMap<String, Value>, what: &str, pet_id: &str) -> Result<Value, Error> {
        self.record(format!("{what}:{pet_id}"));
        map.get(pet_id).cloned().ok_or_else(|| boom(what))
    }

    pub fn with_households(self, households: Vec<Value>) -> Self {
        self.households.replace(Some(households));
        self
    }

    /// Register complete, valid per-pet responses for `pet_id`.
    pub fn with_pet_data(mut self, pet_id: &str) -> Self {
        self.locations.insert(pet_id.into(), rest_location(40.0, -74.0));
        self.stats.insert(pet_id.into(), stats());
        self.rest_stats.insert(pet_id.into(), rest_stats(28800, 3600));
        self.devices
            .insert(pet_id.into(), json!({ "device": device(&format!("dev-{pet_id}")) }));
        self
    }
}

impl Transport for FakeTransport {
    fn login(&self, email: &str, _password: &SecretString) -> Result<LoginSession, Error> {
        self.record(format!("login:{email}"));
        match &self.login_error {
            Some(message) => Err(Error::Login {
                message: message.clone(),
            }),
            None => Ok(LoginSession {
                user_id: "user123".into(),
                session_id: "sess".into(),
            }),
        }
    }

    fn fetch_households(&self) -> Result<Vec<Value>, Error> {
        self.record("households".into());
        self.households.borrow().clone().ok_or_else(|| boom("households"))
    }

    fn fetch_user_detail(&self) -> Result<Value, Error> {
        self.record("user".into());
        self.user.clone().ok_or_else(|| boom("user"))
    }

    fn fetch_pet_location(&self, pet_id: &str) -> Result<Value, Error> {
        self.canned(&self.locations, "location", pet_id)
    }

    fn fetch_pet_stats(&self, pet_id: &str) -> Result<Value, Error> {
        self.canned(&self.stats, "stats", pet_id)
    }

    fn fetch_pet_rest_stats(&self, pet_id: &str) -> Result<Value, Error> {
        self.canned(&self.rest_stats, "rest", pet_id)
    }

    fn fetch_device_details(&self, pet_id: &str) -> Result<Value, Error> {
        self.canned(&self.devices, "device", pet_id)
    }

    fn send_led_color_mutation(&self, module_id: &str, color_code: i64) -> Result<Value, Error> {
        self.record(format!("led-color:{module_id}:{color_code}"));
        self.mutation.clone().ok_or_else(|| boom("mutation"))
    }

    fn send_led_toggle_mutation(&self, module_id: &str, enabled: bool) -> Result<Value, Error> {
        self.record(format!("led:{module_id}:{enabled}"));
        self.mutation.clone().ok_or_else(|| boom("mutation"))
    }

    fn send_lost_mode_mutation(&self, module_id: &str, enable: bool) -> Result<Value, Error> {
        self.record(format!("lost:{module_id}:{enable}"));
        self.mutation.clone().ok_or_else(|| boom("mutation"))
    }
}

// ── Payload builders ────────────────────────────────────────────────

pub fn device(id: &str) -> Value {
    json!({
        "id": id,
        "moduleId": format!("mod-{id}"),
        "info": { "buildId": "1.0.0", "batteryPercent": 75 },
        "operationParams": { "ledEnabled": true, "ledOffAt": null, "mode": "NORMAL" },
        "ledColor": { "name": "BLUE", "hexCode": "#0000FF" },
        "lastConnectionState": { "__typename": "ConnectedToCellular", "date": "2024-01-01T12:00:00Z" },
        "availableLedColors": [{ "ledColorCode": "1", "hexCode": "#FF00FF", "name": "MAGENTA" }]
    })
}

pub fn pet(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "breed": { "name": "Golden Retriever" },
        "gender": "MALE",
        "weight": 70,
        "homeCityState": "New York, NY",
        "device": device(&format!("dev-{id}"))
    })
}

pub fn pet_without_device(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "device": "None" })
}

pub fn base(id: &str, name: &str) -> Value {
    json!({
        "baseId": id,
        "name": name,
        "position": { "latitude": 40.7, "longitude": -74.0 },
        "online": true,
        "onlineQuality": "GOOD",
        "networkName": "HomeWifi"
    })
}

pub fn household(pets: Vec<Value>, bases: Vec<Value>) -> Value {
    json!({ "household": { "pets": pets, "bases": bases } })
}

pub fn rest_location(lat: f64, lon: f64) -> Value {
    json!({
        "__typename": "Rest",
        "areaName": "Home",
        "lastReportTimestamp": "2024-01-01T12:00:00Z",
        "position": { "latitude": lat, "longitude": lon },
        "start": "2024-01-01T11:00:00Z"
    })
}

pub fn stats() -> Value {
    let window = |goal: i64, steps: i64, dist: f64| {
        json!({ "stepGoal": goal, "totalSteps": steps, "totalDistance": dist })
    };
    json!({
        "dailyStat": window(5000, 3000, 2000.5),
        "weeklyStat": window(35000, 21000, 14000.75),
        "monthlyStat": window(150_000, 90000, 60000.25)
    })
}

pub fn rest_stats(sleep: i64, nap: i64) -> Value {
    let window = json!({ "restSummaries": [{ "data": { "sleepAmounts": [
        { "type": "SLEEP", "duration": sleep },
        { "type": "NAP", "duration": nap }
    ] } }] });
    json!({ "dailyStat": window, "weeklyStat": window, "monthlyStat": window })
}
