//! Configuration options for fxscope.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Global configuration options for a show manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Background color the framebuffer is cleared to every frame.
    pub background_color: Vec3,

    /// Framebuffer size in pixels (width, height).
    pub window_size: (u32, u32),

    /// Delay between two timer ticks, in milliseconds (0 = as fast as possible).
    pub tick_interval_ms: u64,

    /// Stops the loop after this many ticks even if the callback never exits.
    pub max_frames: Option<u64>,

    /// Whether the GL state returns to its default at the start of every frame.
    pub reset_state_each_frame: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            background_color: Vec3::ZERO,
            window_size: (600, 600),
            tick_interval_ms: 5,
            max_frames: None,
            reset_state_each_frame: true,
        }
    }
}

impl Options {
    /// Parses options from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loaded options from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    /// Serializes the options as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the tick interval as a [`std::time::Duration`].
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }

    /// Builder: sets the window size.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Builder: sets the tick interval in milliseconds.
    pub fn with_tick_interval_ms(mut self, interval_ms: u64) -> Self {
        self.tick_interval_ms = interval_ms;
        self
    }

    /// Builder: caps the number of ticks.
    pub fn with_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames = Some(max_frames);
        self
    }

    /// Builder: sets the background color.
    pub fn with_background_color(mut self, color: Vec3) -> Self {
        self.background_color = color;
        self
    }
}
