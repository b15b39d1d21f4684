// ── Runtime connection configuration ──
//
// Describes how to reach the backend and who to log in as. Never
// touches disk; `tryfi-config` or the embedding application builds it.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use tryfi_api::{DEFAULT_API_HOST, TransportConfig};

use crate::error::CoreError;

/// Account login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// Configuration for one client session.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root (e.g. `https://api.tryfi.com`).
    pub api_host: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    pub credentials: Credentials,
}

impl ClientConfig {
    /// Config against the public backend with the default timeout.
    pub fn new(email: impl Into<String>, password: SecretString) -> Result<Self, CoreError> {
        let api_host = Url::parse(DEFAULT_API_HOST).map_err(|e| CoreError::Config {
            message: format!("invalid default API host: {e}"),
        })?;
        Ok(Self {
            api_host,
            timeout: Duration::from_secs(30),
            credentials: Credentials {
                email: email.into(),
                password,
            },
        })
    }

    /// Transport settings derived from this config.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig::new(self.api_host.clone(), self.timeout)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_public_backend() {
        let cfg = ClientConfig::new("owner@example.com", "pw".to_string().into()).unwrap();
        assert_eq!(cfg.api_host.host_str(), Some("api.tryfi.com"));
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.transport().api_host, cfg.api_host);
    }
}
