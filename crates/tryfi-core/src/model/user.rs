// ── Account owner ──

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;
use tryfi_api::Transport;

use crate::error::CoreError;
use crate::report::FaultReporter;

/// Profile fields, present only after a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// The key must be sent; only its value may be `null`.
    #[serde(deserialize_with = "nullable")]
    pub phone_number: Option<String>,
}

fn nullable<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::deserialize(deserializer)
}

/// The logged-in account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: String,
    profile: Option<UserProfile>,
    last_updated: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            profile: None,
            last_updated: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fetch the profile and replace it.
    ///
    /// On failure the error is reported and the previous profile (or
    /// its absence) is left as it was.
    pub fn fetch_and_apply<T: Transport + ?Sized>(
        &mut self,
        transport: &T,
        reporter: &dyn FaultReporter,
    ) {
        let fetched = transport
            .fetch_user_detail()
            .map_err(CoreError::from)
            .and_then(|raw| {
                serde_json::from_value::<UserProfile>(raw).map_err(|e| CoreError::InvalidField {
                    field: "currentUser".into(),
                    expected: e.to_string(),
                })
            });

        match fetched {
            Ok(profile) => {
                debug!(user = %self.id, "user profile refreshed");
                self.profile = Some(profile);
                self.last_updated = Some(Utc::now());
            }
            Err(err) => reporter.report(&err),
        }
    }

    pub fn profile(&self) -> Result<&UserProfile, CoreError> {
        self.profile.as_ref().ok_or_else(|| CoreError::NotLoaded {
            field: "user profile".into(),
        })
    }

    pub fn email(&self) -> Result<&str, CoreError> {
        Ok(&self.profile()?.email)
    }

    pub fn first_name(&self) -> Result<&str, CoreError> {
        Ok(&self.profile()?.first_name)
    }

    pub fn last_name(&self) -> Result<&str, CoreError> {
        Ok(&self.profile()?.last_name)
    }

    pub fn phone_number(&self) -> Result<Option<&str>, CoreError> {
        Ok(self.profile()?.phone_number.as_deref())
    }

    pub fn full_name(&self) -> Result<String, CoreError> {
        let p = self.profile()?;
        Ok(format!("{} {}", p.first_name, p.last_name))
    }

    pub fn last_updated(&self) -> Result<DateTime<Utc>, CoreError> {
        self.last_updated.ok_or_else(|| CoreError::NotLoaded {
            field: "lastUpdated".into(),
        })
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.profile {
            Some(p) => write!(
                f,
                "User ID: {} Name: {} {} Email: {}",
                self.id, p.first_name, p.last_name, p.email
            ),
            None => write!(f, "User ID: {} (profile not loaded)", self.id),
        }
    }
}
