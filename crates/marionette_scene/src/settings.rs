use glam::UVec2;
use marionette_animation::TimelineSettings;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SceneError};

/// Startup configuration for a [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Canvas size in pixels.
    pub size: UVec2,
    pub timeline: TimelineSettings,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            size: UVec2::new(1500, 800),
            timeline: TimelineSettings::default(),
        }
    }
}

impl SceneSettings {
    pub fn validate(&self) -> Result<()> {
        if self.size.x == 0 || self.size.y == 0 {
            return Err(SceneError::InvalidSize(self.size));
        }
        self.timeline.validate()?;
        Ok(())
    }
}
