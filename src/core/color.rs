//! Phase-indexed fill colors.

use super::phase::Phase;
use serde::{Deserialize, Serialize};

/// An 8-bit RGB color with a unit-interval alpha.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f32,
}

impl Rgba {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    /// Channels as unit-interval floats, the form most renderers consume.
    ///
    /// Alpha is clamped into `[0, 1]`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use waterline::core::Rgba;
    ///
    /// let [r, g, b, a] = Rgba::rgb(255, 0, 51).components();
    /// assert_eq!((r, g, b, a), (1.0, 0.0, 0.2, 1.0));
    /// ```
    pub fn components(&self) -> [f32; 4] {
        [
            f32::from(self.red) / 255.0,
            f32::from(self.green) / 255.0,
            f32::from(self.blue) / 255.0,
            self.alpha.clamp(0.0, 1.0),
        ]
    }
}

/// One fixed color per phase.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub idle: Rgba,
    pub amplifying: Rgba,
    pub leveling: Rgba,
    pub damping: Rgba,
}

impl Palette {
    pub const STANDARD: Palette = Palette {
        idle: Rgba::rgb(0, 122, 255),
        amplifying: Rgba::rgb(52, 170, 220),
        leveling: Rgba::rgb(90, 200, 250),
        damping: Rgba::rgb(0, 100, 210),
    };

    /// Color applied while `phase` is active.
    pub fn color(&self, phase: Phase) -> Rgba {
        match phase {
            Phase::Idle => self.idle,
            Phase::Amplifying => self.amplifying,
            Phase::Leveling => self.leveling,
            Phase::Damping => self.damping,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::STANDARD
    }
}
