// tryfi-core: Entity synchronisation layer between tryfi-api and consumers.

pub mod client;
pub mod config;
pub(crate) mod convert;
pub mod error;
pub mod model;
pub mod report;

// ── Primary re-exports ──────────────────────────────────────────────
pub use client::{Client, NO_DEVICE};
pub use config::{ClientConfig, Credentials};
pub use error::CoreError;
pub use report::{FaultReporter, NoopReporter, TracingReporter};

pub use model::{
    ActivityStats, Base, CurrentActivity, Device, DeviceMode, LedColor, OnlineQuality, PerWindow,
    Pet, RestStats, User, UserProfile, Window,
};
