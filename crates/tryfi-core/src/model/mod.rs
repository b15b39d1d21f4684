// ── Domain model ──
//
// Entities normalised from backend payloads. Each owns an opaque string
// id fixed at construction; everything else is re-derived on refresh.

pub mod base;
pub mod device;
pub mod led_color;
pub mod pet;
pub mod stats;
pub mod user;

pub use base::{Base, OnlineQuality};
pub use device::{Device, DeviceMode};
pub use led_color::LedColor;
pub use pet::{CurrentActivity, Pet};
pub use stats::{ActivityStats, PerWindow, RestStats, Window};
pub use user::{User, UserProfile};
