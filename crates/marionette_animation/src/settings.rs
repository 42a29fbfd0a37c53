use serde::{Deserialize, Serialize};

use crate::errors::{AnimationError, Result};

/// Length and speed of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Number of frames in the animation.
    pub frame_count: u32,
    /// Frames per second.
    pub frame_rate: u32,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            frame_count: 300,
            frame_rate: 30,
        }
    }
}

impl TimelineSettings {
    pub fn validate(&self) -> Result<()> {
        if self.frame_count == 0 {
            return Err(AnimationError::InvalidFrameCount(self.frame_count));
        }
        if self.frame_rate == 0 {
            return Err(AnimationError::InvalidFrameRate(self.frame_rate));
        }
        Ok(())
    }

    /// Length of the animation in seconds.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f64 {
        f64::from(self.frame_count) / f64::from(self.frame_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_ten_seconds() {
        let settings = TimelineSettings::default();
        assert!(settings.validate().is_ok());
        assert!((settings.duration() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let settings: TimelineSettings = serde_json::from_str(r#"{ "frame_rate": 60 }"#).unwrap();
        assert_eq!(settings.frame_count, 300);
        assert_eq!(settings.frame_rate, 60);
    }

    #[test]
    fn zero_values_rejected() {
        let settings = TimelineSettings {
            frame_count: 0,
            frame_rate: 30,
        };
        assert_eq!(settings.validate(), Err(AnimationError::InvalidFrameCount(0)));

        let settings = TimelineSettings {
            frame_count: 10,
            frame_rate: 0,
        };
        assert_eq!(settings.validate(), Err(AnimationError::InvalidFrameRate(0)));
    }
}
