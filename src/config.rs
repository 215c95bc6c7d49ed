/// Layout configuration shared by the day view, weekly grid and print report.

use crate::error::{ScheduleError, ScheduleResult};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    #[serde(default = "default_px_per_minute")]
    pub px_per_minute: f64,
    #[serde(default = "default_min_height_px")]
    pub min_height_px: f64,
    #[serde(default = "default_gutter_px")]
    pub gutter_px: f64,
    /// Wall-clock time drawn at `top = 0`.
    #[serde(default = "default_day_start")]
    pub day_start: NaiveTime,
}

fn default_px_per_minute() -> f64 {
    1.5
}
fn default_min_height_px() -> f64 {
    40.0
}
fn default_gutter_px() -> f64 {
    4.0
}
fn default_day_start() -> NaiveTime {
    NaiveTime::MIN
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            px_per_minute: default_px_per_minute(),
            min_height_px: default_min_height_px(),
            gutter_px: default_gutter_px(),
            day_start: default_day_start(),
        }
    }
}

impl LayoutOptions {
    pub fn new(px_per_minute: f64, min_height_px: f64, gutter_px: f64) -> ScheduleResult<Self> {
        let options = Self {
            px_per_minute,
            min_height_px,
            gutter_px,
            day_start: default_day_start(),
        };
        options.validate()?;
        Ok(options)
    }

    pub fn with_day_start(mut self, day_start: NaiveTime) -> Self {
        self.day_start = day_start;
        self
    }

    /// Load options from JSON; missing fields fall back to defaults.
    pub fn from_json_str(content: &str) -> ScheduleResult<Self> {
        let options: LayoutOptions = serde_json::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> ScheduleResult<()> {
        if !self.px_per_minute.is_finite() || self.px_per_minute <= 0.0 {
            return Err(ScheduleError::InvalidOptions(format!(
                "pxPerMinute must be > 0, got {}",
                self.px_per_minute
            )));
        }
        if !self.min_height_px.is_finite() || self.min_height_px < 0.0 {
            return Err(ScheduleError::InvalidOptions(format!(
                "minHeightPx must be >= 0, got {}",
                self.min_height_px
            )));
        }
        if !self.gutter_px.is_finite() || self.gutter_px < 0.0 {
            return Err(ScheduleError::InvalidOptions(format!(
                "gutterPx must be >= 0, got {}",
                self.gutter_px
            )));
        }
        Ok(())
    }
}
