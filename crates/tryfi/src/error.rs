//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use tryfi_config::ConfigError;
use tryfi_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the TryFi backend")]
    #[diagnostic(
        code(tryfi::connection_failed),
        help("Check your network connection and the profile's api_host.")
    )]
    ConnectionFailed {
        #[source]
        source: CoreError,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Login failed for profile '{profile}': {message}")]
    #[diagnostic(
        code(tryfi::auth_failed),
        help(
            "Verify the email and password for this profile.\n\
             Re-run: tryfi config init --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No password configured for profile '{profile}'")]
    #[diagnostic(
        code(tryfi::no_credentials),
        help(
            "Store one with: tryfi config init\n\
             Or set the TRYFI_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(tryfi::not_found),
        help("Run: tryfi {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{operation} failed for pet '{pet}'")]
    #[diagnostic(
        code(tryfi::operation_failed),
        help("Re-run with -v to see the reported fault.")
    )]
    OperationFailed { operation: String, pet: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(tryfi::api_error))]
    Api(CoreError),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tryfi::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(tryfi::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: tryfi config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(tryfi::no_config),
        help(
            "Create one with: tryfi config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(tryfi::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(tryfi::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Classify a core error raised while acting as `profile`.
    pub fn from_core(err: CoreError, profile: &str) -> Self {
        match err {
            CoreError::LoginFailed { message } => Self::AuthFailed {
                profile: profile.into(),
                message,
            },
            CoreError::Api(ref api) if api.is_auth_error() => Self::AuthFailed {
                profile: profile.into(),
                message: api.to_string(),
            },
            CoreError::Api(ref api) if api.is_transient() => Self::ConnectionFailed { source: err },
            other => Self::Api(other),
        }
    }

    pub fn pet_not_found(identifier: &str) -> Self {
        Self::NotFound {
            resource_type: "pet".into(),
            identifier: identifier.into(),
            list_command: "pets list".into(),
        }
    }
}

// ── ConfigError → CliError mapping ──────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(other),
        }
    }
}
