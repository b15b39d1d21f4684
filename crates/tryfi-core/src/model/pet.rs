// ── Pet domain type ──
//
// A `Pet` aggregates its collar, the current activity, and two sets of
// windowed statistics. The update wrappers deliberately differ in how
// they signal failure: `update_stats`/`update_rest_stats` yield `None`,
// `update_pet_location`/`update_device_details` yield `false`. Control
// operations return `true` once the mutation is accepted, even when the
// local re-application of the answer fails.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use strum::IntoEnumIterator;
use tracing::{debug, warn};
use tryfi_api::Transport;

use crate::convert::{
    as_array, as_int, as_str, as_text, field, float_field, int_field, opt_field, opt_str_field,
    str_field, timestamp_field,
};
use crate::error::CoreError;
use crate::model::device::Device;
use crate::model::stats::{ActivityStats, PerWindow, RestStats, Window};
use crate::report::FaultReporter;

// ── Backend discriminators ─────────────────────────────────────────

pub const ACTIVITY_REST: &str = "Rest";
pub const ACTIVITY_ONGOING_WALK: &str = "OngoingWalk";

pub const CONNECTED_TO_USER: &str = "ConnectedToUser";
pub const CONNECTED_TO_BASE: &str = "ConnectedToBase";
pub const CONNECTED_TO_CELLULAR: &str = "ConnectedToCellular";

pub const REST_SLEEP: &str = "SLEEP";
pub const REST_NAP: &str = "NAP";

const DEFAULT_BIRTH_YEAR: i32 = 1900;
const DEFAULT_BIRTH_MONTH: u32 = 1;

/// Where the pet is and what it is doing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentActivity {
    /// Activity discriminator, e.g. `Rest` or `OngoingWalk`.
    pub kind: String,
    pub area_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub place_name: Option<String>,
    pub place_address: Option<String>,
    pub start: DateTime<Utc>,
    pub last_report: Option<DateTime<Utc>>,
}

/// A tracked pet. Always owns exactly one collar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    id: String,
    pub name: String,
    pub breed: Option<String>,
    pub gender: Option<String>,
    pub weight: Option<f64>,
    pub home_city_state: Option<String>,
    pub year_of_birth: i32,
    pub month_of_birth: u32,
    pub day_of_birth: Option<u32>,
    /// First full-size photo, or empty.
    pub photo_link: String,
    device: Device,
    pub activity: Option<CurrentActivity>,
    pub stats: PerWindow<Option<ActivityStats>>,
    pub rest_stats: PerWindow<Option<RestStats>>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Pet {
    /// Build a pet and its collar from a household pet entry.
    ///
    /// `id`, `name` and `device.id` are required. Collar telemetry that
    /// fails to parse is reported, not returned.
    pub fn from_details(raw: &Value, reporter: &dyn FaultReporter) -> Result<Self, CoreError> {
        let id = as_text(field(raw, "id")?, "id")?;
        let device_id = as_text(field(field(raw, "device")?, "id")?, "device.id")?;

        let mut pet = Self {
            id,
            name: String::new(),
            breed: None,
            gender: None,
            weight: None,
            home_city_state: None,
            year_of_birth: DEFAULT_BIRTH_YEAR,
            month_of_birth: DEFAULT_BIRTH_MONTH,
            day_of_birth: None,
            photo_link: String::new(),
            device: Device::new(device_id),
            activity: None,
            stats: PerWindow::default(),
            rest_stats: PerWindow::default(),
            last_updated: None,
        };
        pet.apply_details(raw, reporter)?;
        Ok(pet)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn is_lost(&self) -> bool {
        self.device.is_lost()
    }

    /// Birth date with the day defaulting to the 1st. `None` if the
    /// parts do not form a calendar date.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            self.year_of_birth,
            self.month_of_birth,
            self.day_of_birth.unwrap_or(1),
        )
    }

    pub fn activity_stats(&self, window: Window) -> Option<&ActivityStats> {
        self.stats.get(window).as_ref()
    }

    pub fn rest(&self, window: Window) -> Option<&RestStats> {
        self.rest_stats.get(window).as_ref()
    }

    // ── Normalisation ────────────────────────────────────────────────

    /// Re-derive profile fields and replace the collar from `device`.
    pub fn apply_details(
        &mut self,
        raw: &Value,
        reporter: &dyn FaultReporter,
    ) -> Result<(), CoreError> {
        self.name = str_field(raw, "name")?.to_owned();
        self.breed = opt_field(raw, "breed")
            .map(|b| opt_str_field(b, "name"))
            .transpose()?
            .flatten();
        self.gender = opt_str_field(raw, "gender")?;
        self.weight = opt_field(raw, "weight")
            .map(|_| float_field(raw, "weight"))
            .transpose()?;
        self.home_city_state = opt_str_field(raw, "homeCityState")?;

        self.year_of_birth = match opt_field(raw, "yearOfBirth") {
            Some(v) => narrow(as_int(v, "yearOfBirth")?, "yearOfBirth")?,
            None => DEFAULT_BIRTH_YEAR,
        };
        self.month_of_birth = match opt_field(raw, "monthOfBirth") {
            Some(v) => narrow(as_int(v, "monthOfBirth")?, "monthOfBirth")?,
            None => DEFAULT_BIRTH_MONTH,
        };
        self.day_of_birth = opt_field(raw, "dayOfBirth")
            .map(|v| as_int(v, "dayOfBirth").and_then(|d| narrow(d, "dayOfBirth")))
            .transpose()?;

        self.photo_link = ["photos", "first", "image", "fullSize"]
            .iter()
            .try_fold(raw, |v, key| opt_field(v, key))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        let device_raw = field(raw, "device")?;
        let mut device = Device::new(as_text(field(device_raw, "id")?, "device.id")?);
        device.apply_details(device_raw, reporter);
        self.device = device;

        self.last_updated = Some(Utc::now());
        Ok(())
    }

    /// Record the pet's ongoing activity.
    ///
    /// A payload without `__typename` or `areaName` fails immediately. Validation
    /// failures are returned wrapped; any other parse failure is reported
    /// and leaves the previous activity in place.
    pub fn set_current_location(
        &mut self,
        raw: &Value,
        reporter: &dyn FaultReporter,
    ) -> Result<(), CoreError> {
        let kind = str_field(raw, "__typename")?;
        let area_name = nullable_str(raw, "areaName")?;

        match parse_activity(kind, area_name, raw) {
            Ok(activity) => {
                self.activity = Some(activity);
                self.last_updated = Some(Utc::now());
                Ok(())
            }
            Err(err) if err.is_validation() => Err(CoreError::validation(format!(
                "Unable to set Pet Location Details: {err}"
            ))),
            Err(err) => {
                debug!(pet = %self.id, "location payload rejected: {err}");
                reporter.report(&err);
                Ok(())
            }
        }
    }

    /// Describe a connection-state payload, or `None` for kinds that have
    /// no counterpart to name.
    pub fn connected_to(raw: &Value) -> Option<String> {
        match raw.get("__typename")?.as_str()? {
            CONNECTED_TO_USER => {
                let user = raw.get("user")?;
                let first = user.get("firstName")?.as_str()?;
                let last = user.get("lastName")?.as_str()?;
                Some(format!("{first} {last}"))
            }
            CONNECTED_TO_BASE => {
                let id = raw.get("chargingBase")?.get("id")?;
                let id = as_text(id, "chargingBase.id").ok()?;
                Some(format!("Base ID - {id}"))
            }
            _ => None,
        }
    }

    /// Store step and distance summaries. Nothing is written unless all
    /// three windows parse.
    pub fn set_stats(
        &mut self,
        daily: &Value,
        weekly: &Value,
        monthly: &Value,
    ) -> Result<(), CoreError> {
        let parsed = PerWindow {
            daily: Some(parse_activity_stats(daily)?),
            weekly: Some(parse_activity_stats(weekly)?),
            monthly: Some(parse_activity_stats(monthly)?),
        };
        self.stats = parsed;
        Ok(())
    }

    /// Store sleep and nap totals, daily then weekly then monthly.
    ///
    /// Only the first rest summary of each window is read. A validation
    /// failure is returned wrapped at once; any other failure is reported
    /// and stops processing, keeping the windows already written.
    pub fn set_rest_stats(
        &mut self,
        daily: &Value,
        weekly: &Value,
        monthly: &Value,
        reporter: &dyn FaultReporter,
    ) -> Result<(), CoreError> {
        self.store_rest_stats([daily, weekly, monthly], reporter, parse_rest_stats)
    }

    fn store_rest_stats(
        &mut self,
        windows: [&Value; 3],
        reporter: &dyn FaultReporter,
        parse: impl Fn(&Value, Window) -> Result<RestStats, CoreError>,
    ) -> Result<(), CoreError> {
        for (window, raw) in Window::iter().zip(windows) {
            match parse(raw, window) {
                Ok(totals) => *self.rest_stats.get_mut(window) = Some(totals),
                Err(err) if err.is_validation() => {
                    return Err(CoreError::validation(format!(
                        "Unable to set Pet Rest Stats: {err}"
                    )));
                }
                Err(err) => {
                    debug!(pet = %self.id, %window, "rest stats rejected: {err}");
                    reporter.report(&err);
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    // ── Transport-backed updates ─────────────────────────────────────

    /// `Some(true)` on success; `None` on any failure, which is reported.
    pub fn update_stats<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        reporter: &dyn FaultReporter,
    ) -> Option<bool> {
        let result = transport
            .fetch_pet_stats(&self.id)
            .map_err(CoreError::from)
            .and_then(|raw| {
                self.set_stats(
                    field(&raw, Window::Daily.payload_key())?,
                    field(&raw, Window::Weekly.payload_key())?,
                    field(&raw, Window::Monthly.payload_key())?,
                )
            });
        absorb_optional(result, reporter)
    }

    /// `Some(true)` on success; `None` on any failure, which is reported.
    pub fn update_rest_stats<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        reporter: &dyn FaultReporter,
    ) -> Option<bool> {
        let result = transport
            .fetch_pet_rest_stats(&self.id)
            .map_err(CoreError::from)
            .and_then(|raw| {
                self.set_rest_stats(
                    field(&raw, Window::Daily.payload_key())?,
                    field(&raw, Window::Weekly.payload_key())?,
                    field(&raw, Window::Monthly.payload_key())?,
                    reporter,
                )
            });
        absorb_optional(result, reporter)
    }

    /// `true` on success; `false` on any failure, which is reported.
    pub fn update_pet_location<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        reporter: &dyn FaultReporter,
    ) -> bool {
        let result = transport
            .fetch_pet_location(&self.id)
            .map_err(CoreError::from)
            .and_then(|raw| self.set_current_location(&raw, reporter));
        absorb(result, reporter)
    }

    /// `true` on success; `false` on any failure, which is reported.
    pub fn update_device_details<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        reporter: &dyn FaultReporter,
    ) -> bool {
        let result = transport
            .fetch_device_details(&self.id)
            .map_err(CoreError::from)
            .and_then(|raw| {
                self.device.apply_details(field(&raw, "device")?, reporter);
                Ok(())
            });
        absorb(result, reporter)
    }

    /// Run every update in turn; one failing does not stop the others.
    pub fn update_all_details<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        reporter: &dyn FaultReporter,
    ) {
        self.update_device_details(transport, reporter);
        self.update_pet_location(transport, reporter);
        self.update_stats(transport, reporter);
        self.update_rest_stats(transport, reporter);
    }

    // ── Control operations ───────────────────────────────────────────

    pub fn turn_on_off_led<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        on: bool,
        reporter: &dyn FaultReporter,
    ) -> bool {
        self.mutate_device(reporter, "updateDeviceOperationParams", |module_id| {
            transport.send_led_toggle_mutation(module_id, on)
        })
    }

    pub fn set_led_color_code<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        code: i64,
        reporter: &dyn FaultReporter,
    ) -> bool {
        self.mutate_device(reporter, "setDeviceLed", |module_id| {
            transport.send_led_color_mutation(module_id, code)
        })
    }

    pub fn set_lost_dog_mode<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        enable: bool,
        reporter: &dyn FaultReporter,
    ) -> bool {
        self.mutate_device(reporter, "updateDeviceOperationParams", |module_id| {
            transport.send_lost_mode_mutation(module_id, enable)
        })
    }

    /// Send a collar mutation and re-apply the returned device under
    /// `result_key`. `false` only when the mutation itself cannot be sent.
    fn mutate_device<F>(&mut self, reporter: &dyn FaultReporter, result_key: &str, send: F) -> bool
    where
        F: FnOnce(&str) -> Result<Value, tryfi_api::Error>,
    {
        let Some(module_id) = self.device.module_id.clone() else {
            reporter.report(&CoreError::NotLoaded {
                field: "device moduleId".into(),
            });
            return false;
        };

        let response = match send(&module_id) {
            Ok(response) => response,
            Err(err) => {
                warn!(pet = %self.id, "collar mutation failed: {err}");
                reporter.report(&err.into());
                return false;
            }
        };

        match field(&response, result_key) {
            Ok(device_raw) => self.device.apply_details(device_raw, reporter),
            Err(err) => reporter.report(&err),
        }
        true
    }
}

// ── Payload parsing ────────────────────────────────────────────────

fn narrow<N: TryFrom<i64>>(value: i64, name: &str) -> Result<N, CoreError> {
    N::try_from(value).map_err(|_| CoreError::invalid(name, "value in range"))
}

/// Required key whose value may be `null`.
fn nullable_str(raw: &Value, key: &str) -> Result<Option<String>, CoreError> {
    match field(raw, key)? {
        Value::Null => Ok(None),
        v => as_str(v, key).map(|s| Some(s.to_owned())),
    }
}

fn parse_activity(
    kind: &str,
    area_name: Option<String>,
    raw: &Value,
) -> Result<CurrentActivity, CoreError> {
    let position = if kind == ACTIVITY_ONGOING_WALK {
        let samples = as_array(field(raw, "positions")?, "positions")?;
        let last = samples
            .last()
            .ok_or_else(|| CoreError::missing("positions[-1]"))?;
        field(last, "position")?
    } else {
        field(raw, "position")?
    };
    let latitude = float_field(position, "latitude")?;
    let longitude = float_field(position, "longitude")?;

    let (place_name, place_address) = match opt_field(raw, "place") {
        Some(place) => (
            opt_str_field(place, "name")?,
            opt_str_field(place, "address")?,
        ),
        None => (None, None),
    };

    let start = timestamp_field(raw, "start")?;
    let last_report = opt_field(raw, "lastReportTimestamp")
        .map(|_| timestamp_field(raw, "lastReportTimestamp"))
        .transpose()?;

    Ok(CurrentActivity {
        kind: kind.to_owned(),
        area_name,
        latitude,
        longitude,
        place_name,
        place_address,
        start,
        last_report,
    })
}

fn parse_activity_stats(raw: &Value) -> Result<ActivityStats, CoreError> {
    Ok(ActivityStats {
        step_goal: int_field(raw, "stepGoal")?,
        total_steps: int_field(raw, "totalSteps")?,
        total_distance: float_field(raw, "totalDistance")?,
    })
}

fn parse_rest_stats(raw: &Value, window: Window) -> Result<RestStats, CoreError> {
    let summaries = as_array(field(raw, "restSummaries")?, "restSummaries")?;
    let first = summaries
        .first()
        .ok_or_else(|| CoreError::missing(format!("{window} restSummaries[0]")))?;
    let amounts = as_array(
        field(field(first, "data")?, "sleepAmounts")?,
        "sleepAmounts",
    )?;

    let mut totals = RestStats::default();
    for entry in amounts {
        let duration = int_field(entry, "duration")?;
        match str_field(entry, "type")? {
            REST_SLEEP => totals.sleep_seconds += duration,
            REST_NAP => totals.nap_seconds += duration,
            _ => {}
        }
    }
    Ok(totals)
}

// ── Failure signalling ─────────────────────────────────────────────

fn absorb(result: Result<(), CoreError>, reporter: &dyn FaultReporter) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            reporter.report(&err);
            false
        }
    }
}

fn absorb_optional(result: Result<(), CoreError>, reporter: &dyn FaultReporter) -> Option<bool> {
    match result {
        Ok(()) => Some(true),
        Err(err) => {
            reporter.report(&err);
            None
        }
    }
}

impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pet ID: {} Name: {} Home: {}",
            self.id,
            self.name,
            self.home_city_state.as_deref().unwrap_or("-"),
        )?;
        match &self.activity {
            Some(a) => write!(
                f,
                " Activity: {} Area: {} Position: {},{} Since: {}",
                a.kind,
                a.area_name.as_deref().unwrap_or("-"),
                a.latitude,
                a.longitude,
                a.start
            ),
            None => f.write_str(" Activity: unknown"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::report::NoopReporter;

    #[derive(Default)]
    struct Recording(Mutex<Vec<String>>);

    impl FaultReporter for Recording {
        fn report(&self, error: &CoreError) {
            self.0.lock().unwrap().push(error.to_string());
        }
    }

    impl Recording {
        fn count(&self) -> usize {
            self.0.lock().unwrap().len()
        }
    }

    fn pet_payload() -> Value {
        json!({
            "id": "pet123",
            "name": "Max",
            "breed": { "name": "Golden Retriever" },
            "gender": "MALE",
            "weight": 70,
            "yearOfBirth": 2020,
            "monthOfBirth": 3,
            "dayOfBirth": 15,
            "homeCityState": "New York, NY",
            "photos": { "first": { "image": { "fullSize": "https://example.com/photo.jpg" } } },
            "device": {
                "id": "device123",
                "moduleId": "module123",
                "info": { "buildId": "1.0.0", "batteryPercent": 75, "isCharging": false },
                "operationParams": { "ledEnabled": true, "ledOffAt": null, "mode": "NORMAL" },
                "ledColor": { "name": "BLUE", "hexCode": "#0000FF" },
                "lastConnectionState": { "date": "2024-01-01T12:00:00Z", "__typename": "ConnectedToCellular" },
                "availableLedColors": []
            }
        })
    }

    fn pet() -> Pet {
        Pet::from_details(&pet_payload(), &NoopReporter).unwrap()
    }

    fn rest_window(sleep: i64, nap: i64) -> Value {
        json!({ "restSummaries": [{ "data": { "sleepAmounts": [
            { "type": "SLEEP", "duration": sleep },
            { "type": "NAP", "duration": nap }
        ] } }] })
    }

    #[test]
    fn details_round_trip() {
        let pet = pet();
        assert_eq!(pet.id(), "pet123");
        assert_eq!(pet.name, "Max");
        assert_eq!(pet.breed.as_deref(), Some("Golden Retriever"));
        assert_eq!(pet.gender.as_deref(), Some("MALE"));
        assert_eq!(pet.weight, Some(70.0));
        assert_eq!((pet.year_of_birth, pet.month_of_birth, pet.day_of_birth), (2020, 3, Some(15)));
        assert_eq!(pet.photo_link, "https://example.com/photo.jpg");
        assert_eq!(pet.device().id(), "device123");
        assert_eq!(pet.device().module_id.as_deref(), Some("module123"));
    }

    #[test]
    fn birth_and_photo_defaults() {
        let raw = json!({ "id": "p", "name": "Bella", "device": { "id": "d" } });
        let pet = Pet::from_details(&raw, &NoopReporter).unwrap();
        assert_eq!(pet.year_of_birth, 1900);
        assert_eq!(pet.month_of_birth, 1);
        assert_eq!(pet.day_of_birth, None);
        assert_eq!(pet.photo_link, "");
        assert_eq!(pet.birth_date(), NaiveDate::from_ymd_opt(1900, 1, 1));
    }

    #[test]
    fn rest_location_uses_single_position() {
        let mut pet = pet();
        let raw = json!({
            "__typename": "Rest",
            "areaName": "Home",
            "lastReportTimestamp": "2024-01-01T12:00:00Z",
            "position": { "latitude": 40.7128, "longitude": -74.006 },
            "place": { "name": "Home", "address": "123 Main St" },
            "start": "2024-01-01T11:00:00Z"
        });
        pet.set_current_location(&raw, &NoopReporter).unwrap();

        let a = pet.activity.as_ref().unwrap();
        assert_eq!(a.kind, "Rest");
        assert_eq!((a.latitude, a.longitude), (40.7128, -74.006));
        assert_eq!(a.place_name.as_deref(), Some("Home"));
        assert_eq!(a.place_address.as_deref(), Some("123 Main St"));
    }

    #[test]
    fn walk_location_uses_last_sample() {
        let mut pet = pet();
        let raw = json!({
            "__typename": "OngoingWalk",
            "areaName": "Park",
            "positions": [
                { "position": { "latitude": 40.7128, "longitude": -74.006 } },
                { "position": { "latitude": 40.713, "longitude": -74.0062 } }
            ],
            "start": "2024-01-01T11:30:00Z"
        });
        pet.set_current_location(&raw, &NoopReporter).unwrap();

        let a = pet.activity.as_ref().unwrap();
        assert_eq!((a.latitude, a.longitude), (40.713, -74.0062));
        assert_eq!(a.place_name, None);
    }

    #[test]
    fn location_without_discriminator_propagates() {
        let mut pet = pet();
        let err = pet
            .set_current_location(&json!({ "invalid": "data" }), &NoopReporter)
            .unwrap_err();
        assert!(err.is_missing_field());
    }

    #[test]
    fn location_without_area_name_propagates() {
        let reporter = Recording::default();
        let mut pet = pet();
        let raw = json!({
            "__typename": "Rest",
            "position": { "latitude": 1.0, "longitude": 2.0 },
            "start": "2024-01-01T11:00:00Z"
        });
        let err = pet.set_current_location(&raw, &reporter).unwrap_err();
        assert!(err.is_missing_field());
        assert_eq!(reporter.count(), 0);
        assert!(pet.activity.is_none());
    }

    #[test]
    fn location_null_area_name_is_accepted() {
        let mut pet = pet();
        let raw = json!({
            "__typename": "Rest",
            "areaName": null,
            "position": { "latitude": 1.0, "longitude": 2.0 },
            "start": "2024-01-01T11:00:00Z"
        });
        pet.set_current_location(&raw, &NoopReporter).unwrap();
        assert_eq!(pet.activity.as_ref().unwrap().area_name, None);
    }

    #[test]
    fn location_bad_date_is_wrapped_validation() {
        let reporter = Recording::default();
        let mut pet = pet();
        let raw = json!({
            "__typename": "Rest",
            "areaName": "Home",
            "position": { "latitude": 1.0, "longitude": 2.0 },
            "start": "not a date"
        });
        let err = pet.set_current_location(&raw, &reporter).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Unable to set Pet Location Details"));
        assert_eq!(reporter.count(), 0);
    }

    #[test]
    fn location_generic_failure_is_reported_and_swallowed() {
        let reporter = Recording::default();
        let mut pet = pet();
        let raw = json!({
            "__typename": "Rest",
            "areaName": "Home",
            "position": { "latitude": "invalid_float", "longitude": -74.006 },
            "start": "2024-01-01T11:00:00Z"
        });
        pet.set_current_location(&raw, &reporter).unwrap();
        assert_eq!(reporter.count(), 1);
        assert!(pet.activity.is_none());
    }

    #[test]
    fn connected_to_renders_each_kind() {
        let user = json!({ "__typename": "ConnectedToUser", "user": { "firstName": "John", "lastName": "Doe" } });
        let base = json!({ "__typename": "ConnectedToBase", "chargingBase": { "id": "base123" } });
        let other = json!({ "__typename": "UnknownType" });
        assert_eq!(Pet::connected_to(&user).as_deref(), Some("John Doe"));
        assert_eq!(Pet::connected_to(&base).as_deref(), Some("Base ID - base123"));
        assert_eq!(Pet::connected_to(&other), None);
    }

    #[test]
    fn stats_all_windows() {
        let mut pet = pet();
        pet.set_stats(
            &json!({ "stepGoal": 5000, "totalSteps": 3000, "totalDistance": 2000.5 }),
            &json!({ "stepGoal": 35000, "totalSteps": 21000, "totalDistance": 14000.75 }),
            &json!({ "stepGoal": 150_000, "totalSteps": 90000, "totalDistance": 60000.25 }),
        )
        .unwrap();
        let weekly = pet.activity_stats(Window::Weekly).unwrap();
        assert_eq!(weekly.total_steps, 21000);
        assert_eq!(weekly.total_distance, 14000.75);
    }

    #[test]
    fn stats_failure_writes_nothing() {
        let mut pet = pet();
        let ok = json!({ "stepGoal": 1, "totalSteps": 1, "totalDistance": 1.0 });
        let err = pet.set_stats(&ok, &ok, &json!({})).unwrap_err();
        assert!(err.is_missing_field());
        assert!(pet.activity_stats(Window::Daily).is_none());
    }

    #[test]
    fn rest_stats_sums_sleep_and_nap() {
        let mut pet = pet();
        pet.set_rest_stats(
            &rest_window(28800, 3600),
            &rest_window(201_600, 25200),
            &rest_window(864_000, 108_000),
            &NoopReporter,
        )
        .unwrap();
        assert_eq!(
            pet.rest(Window::Daily),
            Some(&RestStats { sleep_seconds: 28800, nap_seconds: 3600 })
        );
        assert_eq!(pet.rest(Window::Monthly).unwrap().nap_seconds, 108_000);
    }

    #[test]
    fn rest_stats_generic_failure_keeps_earlier_windows() {
        let reporter = Recording::default();
        let mut pet = pet();
        let bad = json!({ "restSummaries": [{ "data": { "sleepAmounts": [
            { "type": "SLEEP", "duration": "invalid_int" }
        ] } }] });
        pet.set_rest_stats(&rest_window(10, 1), &bad, &rest_window(30, 3), &reporter)
            .unwrap();

        assert_eq!(reporter.count(), 1);
        assert!(pet.rest(Window::Daily).is_some());
        assert!(pet.rest(Window::Weekly).is_none());
        assert!(pet.rest(Window::Monthly).is_none());
    }

    #[test]
    fn rest_stats_negative_durations_are_summed() {
        let reporter = Recording::default();
        let mut pet = pet();
        pet.set_rest_stats(&rest_window(10, 1), &rest_window(-5, 2), &rest_window(30, 3), &reporter)
            .unwrap();

        assert_eq!(reporter.count(), 0);
        assert_eq!(
            pet.rest(Window::Weekly),
            Some(&RestStats { sleep_seconds: -5, nap_seconds: 2 })
        );
        assert_eq!(pet.rest(Window::Monthly).unwrap().sleep_seconds, 30);
    }

    #[test]
    fn rest_stats_validation_failure_is_wrapped() {
        let reporter = Recording::default();
        let mut pet = pet();
        let (daily, weekly, monthly) = (rest_window(10, 1), rest_window(20, 2), rest_window(30, 3));
        let err = pet
            .store_rest_stats([&daily, &weekly, &monthly], &reporter, |raw, window| {
                if window == Window::Weekly {
                    Err(CoreError::validation("Invalid duration format"))
                } else {
                    parse_rest_stats(raw, window)
                }
            })
            .unwrap_err();

        assert!(err.is_validation());
        let message = err.to_string();
        assert!(message.contains("Unable to set Pet Rest Stats"));
        assert!(message.contains("Invalid duration format"));
        assert_eq!(reporter.count(), 0);
        assert!(pet.rest(Window::Daily).is_some());
        assert!(pet.rest(Window::Weekly).is_none());
        assert!(pet.rest(Window::Monthly).is_none());
    }
}
