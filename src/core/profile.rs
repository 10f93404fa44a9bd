//! Amplitude profiles and progress levels handed to the render target.

use serde::{Deserialize, Serialize};

/// Wave amplitude parameters for a fluid surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmplitudeProfile {
    pub min_amplitude: u32,
    pub amplitude_increment: u32,
    pub max_amplitude: u32,
}

impl AmplitudeProfile {
    /// Calm waves, applied once damping settles.
    pub const LOW: AmplitudeProfile = AmplitudeProfile {
        min_amplitude: 1,
        amplitude_increment: 2,
        max_amplitude: 5,
    };

    /// Agitated waves, applied when amplifying.
    pub const HIGH: AmplitudeProfile = AmplitudeProfile {
        min_amplitude: 10,
        amplitude_increment: 3,
        max_amplitude: 30,
    };

    /// Check the profile describes a usable amplitude range (pure).
    pub fn is_well_formed(&self) -> bool {
        self.min_amplitude <= self.max_amplitude && self.amplitude_increment > 0
    }
}

/// Closed interval a progress level is clamped into.
///
/// The extremes are excluded so the fill never renders completely empty or
/// completely full.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelBounds {
    pub lower: f64,
    pub upper: f64,
}

impl LevelBounds {
    pub const STANDARD: LevelBounds = LevelBounds {
        lower: 0.01,
        upper: 0.99,
    };

    /// Clamp a raw progress value into the bounds.
    ///
    /// NaN clamps to the lower bound. Never panics, even on inverted bounds.
    pub fn clamp(&self, raw: f64) -> ProgressLevel {
        ProgressLevel(raw.max(self.lower).min(self.upper))
    }

    /// Check `0 < lower < upper < 1` (pure).
    pub fn is_well_formed(&self) -> bool {
        0.0 < self.lower && self.lower < self.upper && self.upper < 1.0
    }
}

impl Default for LevelBounds {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A progress level that has been clamped into [`LevelBounds`].
///
/// Only [`LevelBounds::clamp`] constructs one, so a render target never sees
/// a degenerate fill value.
///
/// # Example
///
/// ```rust
/// use waterline::core::LevelBounds;
///
/// let bounds = LevelBounds::STANDARD;
/// assert_eq!(bounds.clamp(0.0).value(), 0.01);
/// assert_eq!(bounds.clamp(0.5).value(), 0.5);
/// assert_eq!(bounds.clamp(1.0).value(), 0.99);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
pub struct ProgressLevel(f64);

impl ProgressLevel {
    pub fn value(&self) -> f64 {
        self.0
    }
}
