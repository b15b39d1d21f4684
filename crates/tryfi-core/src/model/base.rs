// ── Charging base domain type ──

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::convert::{field, float_field, opt_field, opt_str_field, str_field, truthy};
use crate::error::CoreError;
use crate::report::FaultReporter;

/// Link quality as the backend reports it: a bare label on some
/// firmware, a structured object on others.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OnlineQuality {
    Label(String),
    Details(Map<String, Value>),
    Other(Value),
}

impl From<&Value> for OnlineQuality {
    fn from(raw: &Value) -> Self {
        match raw {
            Value::String(s) => Self::Label(s.clone()),
            Value::Object(map) => Self::Details(map.clone()),
            other => Self::Other(other.clone()),
        }
    }
}

impl fmt::Display for OnlineQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(s) => f.write_str(s),
            Self::Details(map) => write!(f, "{}", Value::Object(map.clone())),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

/// A charging station.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Base {
    id: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub online: bool,
    pub online_quality: Option<OnlineQuality>,
    pub network_name: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Base {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            latitude: None,
            longitude: None,
            online: false,
            online_quality: None,
            network_name: None,
            last_updated: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Re-derive fields from a base payload.
    ///
    /// A parse error is reported; fields before the failing key keep
    /// their new values, later ones keep their old values.
    pub fn apply_details(&mut self, raw: &Value, reporter: &dyn FaultReporter) {
        if let Err(err) = self.try_apply(raw) {
            debug!(base = %self.id, "base details rejected: {err}");
            reporter.report(&err);
        }
    }

    fn try_apply(&mut self, raw: &Value) -> Result<(), CoreError> {
        self.name = Some(str_field(raw, "name")?.to_owned());

        let position = field(raw, "position")?;
        self.latitude = Some(float_field(position, "latitude")?);
        self.longitude = Some(float_field(position, "longitude")?);

        self.online = truthy(field(raw, "online")?);
        self.online_quality = opt_field(raw, "onlineQuality").map(OnlineQuality::from);
        self.network_name = opt_str_field(raw, "networkName")?;

        // `infoLastUpdated` is ignored: the refresh instant always wins.
        self.last_updated = Some(Utc::now());
        Ok(())
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Base ID: {} Name: {} Online: {} Network: {} Position: {},{}",
            self.id,
            self.name.as_deref().unwrap_or("-"),
            self.online,
            self.network_name.as_deref().unwrap_or("-"),
            self.latitude.map_or_else(|| "-".into(), |v| v.to_string()),
            self.longitude.map_or_else(|| "-".into(), |v| v.to_string()),
        )
    }
}
