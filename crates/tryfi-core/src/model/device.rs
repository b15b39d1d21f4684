// ── Collar domain type ──
//
// A `Device` is re-derived wholesale from each device-details payload.
// Hardware generations differ in which `info` keys they send, so
// optional telemetry falls back to defaults instead of failing.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::convert::{
    as_array, as_str, as_text, field, int_field, opt_field, opt_str_field, parse_timestamp,
    str_field, timestamp_field, truthy,
};
use crate::error::CoreError;
use crate::model::led_color::LedColor;
use crate::report::FaultReporter;

pub const MODE_NORMAL: &str = tryfi_api::MODE_NORMAL;
pub const MODE_LOST: &str = tryfi_api::MODE_LOST;

/// Collar operating mode. Unknown backend values pass through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum DeviceMode {
    Normal,
    Lost,
    Other(String),
}

impl DeviceMode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => MODE_NORMAL,
            Self::Lost => MODE_LOST,
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for DeviceMode {
    fn from(raw: &str) -> Self {
        match raw {
            MODE_NORMAL => Self::Normal,
            MODE_LOST => Self::Lost,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<DeviceMode> for String {
    fn from(mode: DeviceMode) -> Self {
        mode.as_str().to_owned()
    }
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pet's GPS collar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    id: String,
    pub module_id: Option<String>,
    pub build_id: Option<String>,
    pub battery_percent: Option<i64>,
    /// Absent on newer collars; `false` then.
    pub is_charging: bool,
    /// Effective LED state: enabled and not yet past `led_off_at`.
    pub led_on: bool,
    pub led_off_at: Option<DateTime<Utc>>,
    pub mode: Option<DeviceMode>,
    pub led_color_name: Option<String>,
    pub led_color_hex: Option<String>,
    pub connection_state_date: Option<DateTime<Utc>>,
    pub connection_state_type: Option<String>,
    pub available_colors: Vec<LedColor>,
    pub next_location_update_expected_by: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Device {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            module_id: None,
            build_id: None,
            battery_percent: None,
            is_charging: false,
            led_on: false,
            led_off_at: None,
            mode: None,
            led_color_name: None,
            led_color_hex: None,
            connection_state_date: None,
            connection_state_type: None,
            available_colors: Vec::new(),
            next_location_update_expected_by: None,
            last_updated: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_lost(&self) -> bool {
        self.mode == Some(DeviceMode::Lost)
    }

    /// Re-derive every field from a device payload.
    ///
    /// Never fails: a parse error is reported and the device keeps the
    /// fields written before the failing key.
    pub fn apply_details(&mut self, raw: &Value, reporter: &dyn FaultReporter) {
        if let Err(err) = self.try_apply(raw) {
            debug!(device = %self.id, "device details rejected: {err}");
            reporter.report(&err);
        }
    }

    fn try_apply(&mut self, raw: &Value) -> Result<(), CoreError> {
        self.module_id = Some(str_field(raw, "moduleId")?.to_owned());

        let info = field(raw, "info")?;
        self.build_id = Some(as_text(field(info, "buildId")?, "buildId")?);
        self.battery_percent = Some(int_field(info, "batteryPercent")?);
        self.is_charging = opt_field(info, "isCharging").is_some_and(truthy);

        let params = field(raw, "operationParams")?;
        let now = Utc::now();
        // A null off-time means the LED is treated as switching off right now.
        let off_at = match field(params, "ledOffAt")? {
            Value::Null => now,
            v => parse_timestamp(as_str(v, "ledOffAt")?)?,
        };
        self.led_off_at = Some(off_at);
        self.led_on = truthy(field(params, "ledEnabled")?) && now < off_at;
        self.mode = Some(DeviceMode::from(str_field(params, "mode")?));

        let color = field(raw, "ledColor")?;
        self.led_color_name = opt_str_field(color, "name")?;
        self.led_color_hex = opt_str_field(color, "hexCode")?;

        let conn = field(raw, "lastConnectionState")?;
        self.connection_state_date = Some(timestamp_field(conn, "date")?);
        self.connection_state_type = Some(str_field(conn, "__typename")?.to_owned());

        let colors = match opt_field(raw, "availableLedColors") {
            Some(list) => as_array(list, "availableLedColors")?
                .iter()
                .map(LedColor::from_raw)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        self.available_colors = colors;

        self.next_location_update_expected_by = opt_field(raw, "nextLocationUpdateExpectedBy")
            .and_then(Value::as_str)
            .and_then(|s| parse_timestamp(s).ok());

        self.last_updated = Some(Utc::now());
        Ok(())
    }
}

fn show<T: fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".to_owned(), ToString::to_string)
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Device ID: {} Mode: {} Battery: {}% LED: {} Last Connected: {} by: {}",
            self.id,
            show(self.mode.as_ref()),
            show(self.battery_percent.as_ref()),
            if self.led_on { "on" } else { "off" },
            show(self.connection_state_date.as_ref()),
            show(self.connection_state_type.as_ref()),
        )
    }
}
