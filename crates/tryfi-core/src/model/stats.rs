// ── Windowed statistics ──

use serde::Serialize;
use strum::{Display, EnumIter};

/// One of the three aggregation periods the backend summarises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Window {
    Daily,
    Weekly,
    Monthly,
}

impl Window {
    /// Alias of this window in stats payloads.
    pub fn payload_key(self) -> &'static str {
        match self {
            Self::Daily => "dailyStat",
            Self::Weekly => "weeklyStat",
            Self::Monthly => "monthlyStat",
        }
    }
}

/// One value per window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerWindow<T> {
    pub daily: T,
    pub weekly: T,
    pub monthly: T,
}

impl<T> PerWindow<T> {
    pub fn get(&self, window: Window) -> &T {
        match window {
            Window::Daily => &self.daily,
            Window::Weekly => &self.weekly,
            Window::Monthly => &self.monthly,
        }
    }

    pub fn get_mut(&mut self, window: Window) -> &mut T {
        match window {
            Window::Daily => &mut self.daily,
            Window::Weekly => &mut self.weekly,
            Window::Monthly => &mut self.monthly,
        }
    }
}

/// Step and distance summary for one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStats {
    pub step_goal: i64,
    pub total_steps: i64,
    /// Metres.
    pub total_distance: f64,
}

/// Sleep and nap totals for one window, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestStats {
    pub sleep_seconds: i64,
    pub nap_seconds: i64,
}
