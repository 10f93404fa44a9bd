//! Indicator configuration.
//!
//! Timings, amplitude profiles, level bounds and colors are collected in a
//! single [`WaveConfig`]. Validation uses Stillwater's `Validation` type so a
//! bad configuration reports ALL of its violations in one pass instead of the
//! first one found.
//!
//! # Example
//!
//! ```rust
//! use waterline::config::WaveConfig;
//! use std::time::Duration;
//!
//! let config = WaveConfig::builder()
//!     .settle_delay(Duration::from_millis(500))
//!     .fill_duration(Duration::from_secs(1))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.settle_delay, Duration::from_millis(500));
//! ```

pub mod builder;
pub mod error;

pub use builder::WaveConfigBuilder;
pub use error::{ConfigError, ConfigViolation};

use crate::core::{AmplitudeProfile, LevelBounds, Palette, PhaseHistory};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for a single configuration check
type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Settings shared by the state machine and the reference render target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Delay before amplified waves start leveling, and before damped waves
    /// come to rest
    pub settle_delay: Duration,

    /// How long a fill animation takes to reach its target level
    pub fill_duration: Duration,

    /// Amplitude applied when the surface comes to rest
    pub low: AmplitudeProfile,

    /// Amplitude applied while the surface is agitated
    pub high: AmplitudeProfile,

    /// Interval progress levels are clamped into before rendering
    pub level_bounds: LevelBounds,

    /// Color per phase
    pub palette: Palette,

    /// Number of transitions the machine remembers
    pub history_limit: usize,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(2),
            fill_duration: Duration::from_secs(4),
            low: AmplitudeProfile::LOW,
            high: AmplitudeProfile::HIGH,
            level_bounds: LevelBounds::STANDARD,
            palette: Palette::STANDARD,
            history_limit: PhaseHistory::DEFAULT_LIMIT,
        }
    }
}

impl WaveConfig {
    /// Longest accepted settle delay or fill duration.
    pub const MAX_DURATION: Duration = Duration::from_secs(60 * 60);

    /// Start a builder from the default configuration.
    pub fn builder() -> WaveConfigBuilder {
        WaveConfigBuilder::new()
    }

    /// Parse a configuration from JSON and validate it.
    ///
    /// Missing fields take their default values.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: WaveConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: Vec<Check> = vec![
            profile_check("low", &self.low),
            profile_check("high", &self.high),
            check(
                self.low.max_amplitude <= self.high.max_amplitude,
                ConfigViolation::ProfilesInverted {
                    low: self.low.max_amplitude,
                    high: self.high.max_amplitude,
                },
            ),
            check(
                self.level_bounds.is_well_formed(),
                ConfigViolation::LevelBounds {
                    lower: self.level_bounds.lower,
                    upper: self.level_bounds.upper,
                },
            ),
            check(
                !self.fill_duration.is_zero(),
                ConfigViolation::ZeroFillDuration,
            ),
            duration_check("settle_delay", self.settle_delay),
            duration_check("fill_duration", self.fill_duration),
            check(self.history_limit > 0, ConfigViolation::ZeroHistoryLimit),
        ];

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => {
                Err(ConfigError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }
}

fn check(ok: bool, violation: ConfigViolation) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation)
    }
}

fn duration_check(field: &'static str, value: Duration) -> Check {
    check(
        value <= WaveConfig::MAX_DURATION,
        ConfigViolation::DurationTooLong {
            field,
            value,
            max: WaveConfig::MAX_DURATION,
        },
    )
}

fn profile_check(name: &'static str, profile: &AmplitudeProfile) -> Check {
    check(
        profile.is_well_formed(),
        ConfigViolation::MalformedProfile {
            profile: name,
            min: profile.min_amplitude,
            increment: profile.amplitude_increment,
            max: profile.max_amplitude,
        },
    )
}
