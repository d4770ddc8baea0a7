use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

pub const UI_SCALE_RANGE: RangeInclusive<f32> = 0.75..=2.0;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/api/generate";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Full URL of the story service's generate endpoint
    pub endpoint: String,

    /// Upper bound for one story request; a hung request fails after this
    pub request_timeout_secs: u64,

    pub ui_scale: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            request_timeout_secs: 120,
            ui_scale: 1.0,
        }
    }
}

impl AppSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Brings `scale` into [`UI_SCALE_RANGE`]; non-finite values fall back to 1.0.
pub fn clamp_ui_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(*UI_SCALE_RANGE.start(), *UI_SCALE_RANGE.end())
    } else {
        1.0
    }
}
