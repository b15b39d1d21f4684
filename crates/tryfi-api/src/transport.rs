// Transport seam and shared HTTP client configuration.
//
// `Transport` is the contract the domain layer drives: one method per
// backend query or mutation, each returning the raw JSON payload.
// `TransportConfig` centralises the reqwest builder settings.

use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::error::Error;

/// Default backend host.
pub const DEFAULT_API_HOST: &str = "https://api.tryfi.com";

/// Identity returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    pub user_id: String,
    pub session_id: String,
}

/// The backend operations the entity layer depends on.
///
/// Every call blocks until the backend answers. Implementations own
/// their session state (cookies, tokens); callers never pass it in.
pub trait Transport {
    /// Authenticate with email and password.
    fn login(&self, email: &str, password: &secrecy::SecretString) -> Result<LoginSession, Error>;

    /// `currentUser.userHouseholds`: one entry per household, each
    /// `{ household: { pets: [...], bases: [...] } }`.
    fn fetch_households(&self) -> Result<Vec<Value>, Error>;

    /// `currentUser` profile fields.
    fn fetch_user_detail(&self) -> Result<Value, Error>;

    /// The pet's `ongoingActivity`.
    fn fetch_pet_location(&self, pet_id: &str) -> Result<Value, Error>;

    /// `{ dailyStat, weeklyStat, monthlyStat }` activity summaries.
    fn fetch_pet_stats(&self, pet_id: &str) -> Result<Value, Error>;

    /// `{ dailyStat, weeklyStat, monthlyStat }` rest summaries.
    fn fetch_pet_rest_stats(&self, pet_id: &str) -> Result<Value, Error>;

    /// `{ device: {...} }` for the pet's collar.
    fn fetch_device_details(&self, pet_id: &str) -> Result<Value, Error>;

    /// `{ setDeviceLed: {...} }`
    fn send_led_color_mutation(&self, module_id: &str, color_code: i64) -> Result<Value, Error>;

    /// `{ updateDeviceOperationParams: {...} }`
    fn send_led_toggle_mutation(&self, module_id: &str, enabled: bool) -> Result<Value, Error>;

    /// `{ updateDeviceOperationParams: {...} }`
    fn send_lost_mode_mutation(&self, module_id: &str, enable: bool) -> Result<Value, Error>;
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub api_host: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            api_host: Url::parse(DEFAULT_API_HOST).unwrap_or_else(|_| unreachable!()),
            timeout: Duration::from_secs(30),
            user_agent: concat!("tryfi-rs/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl TransportConfig {
    pub fn new(api_host: Url, timeout: Duration) -> Self {
        Self {
            api_host,
            timeout,
            ..Self::default()
        }
    }

    /// Build a blocking `reqwest` client with a cookie store.
    ///
    /// The backend keeps the session in a cookie set by the login
    /// endpoint, so the store is always enabled.
    pub fn build_client(&self) -> Result<reqwest::blocking::Client, Error> {
        reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .cookie_store(true)
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
