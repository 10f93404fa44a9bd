//! Builder for constructing indicator configurations.

use crate::config::error::ConfigError;
use crate::config::WaveConfig;
use crate::core::{AmplitudeProfile, LevelBounds, Palette};
use std::time::Duration;

/// Builder for [`WaveConfig`] with a fluent API.
///
/// Starts from the defaults; `build()` validates the result.
#[derive(Clone, Debug, Default)]
pub struct WaveConfigBuilder {
    config: WaveConfig,
}

impl WaveConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the amplify and damp settle delay
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.config.settle_delay = delay;
        self
    }

    /// Set the fill animation duration
    pub fn fill_duration(mut self, duration: Duration) -> Self {
        self.config.fill_duration = duration;
        self
    }

    /// Set the resting amplitude profile
    pub fn low(mut self, profile: AmplitudeProfile) -> Self {
        self.config.low = profile;
        self
    }

    /// Set the agitated amplitude profile
    pub fn high(mut self, profile: AmplitudeProfile) -> Self {
        self.config.high = profile;
        self
    }

    /// Set the interval progress levels are clamped into
    pub fn level_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.config.level_bounds = LevelBounds { lower, upper };
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.config.palette = palette;
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Build the configuration.
    /// Returns every violated rule if it is invalid.
    pub fn build(self) -> Result<WaveConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
