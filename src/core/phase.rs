//! Animation phases of a fill indicator.
//!
//! A phase describes what the liquid surface is doing right now. Exactly one
//! phase is active at a time and it is the only mutable state of the machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four mutually exclusive animation phases.
///
/// # Example
///
/// ```rust
/// use waterline::core::Phase;
///
/// assert_eq!(Phase::default(), Phase::Idle);
/// assert_eq!(Phase::Leveling.name(), "Leveling");
/// assert_eq!(Phase::ALL.len(), 4);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Calm surface at rest on the last settled level.
    #[default]
    Idle,
    /// Waves ramp up toward the high amplitude profile.
    Amplifying,
    /// The fill animates toward the current progress level.
    Leveling,
    /// Waves settle back toward the low amplitude profile.
    Damping,
}

impl Phase {
    /// Every phase, in table order.
    pub const ALL: [Phase; 4] = [
        Phase::Idle,
        Phase::Amplifying,
        Phase::Leveling,
        Phase::Damping,
    ];

    /// Get the phase's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Amplifying => "Amplifying",
            Self::Leveling => "Leveling",
            Self::Damping => "Damping",
        }
    }

    /// Position of this phase in [`Phase::ALL`].
    ///
    /// Used to index the transition table and the color palette.
    pub const fn index(self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Amplifying => 1,
            Self::Leveling => 2,
            Self::Damping => 3,
        }
    }

    /// Check if the surface is in motion.
    ///
    /// Every phase except `Idle` has a completion pending on the timer queue.
    pub fn is_animating(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_name_returns_correct_value() {
        assert_eq!(Phase::Idle.name(), "Idle");
        assert_eq!(Phase::Amplifying.name(), "Amplifying");
        assert_eq!(Phase::Leveling.name(), "Leveling");
        assert_eq!(Phase::Damping.name(), "Damping");
    }

    #[test]
    fn index_matches_position_in_all() {
        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }

    #[test]
    fn only_idle_is_at_rest() {
        assert!(!Phase::Idle.is_animating());
        assert!(Phase::Amplifying.is_animating());
        assert!(Phase::Leveling.is_animating());
        assert!(Phase::Damping.is_animating());
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Phase::Damping.to_string(), "Damping");
    }

    #[test]
    fn phase_serializes_correctly() {
        let phase = Phase::Amplifying;
        let json = serde_json::to_string(&phase).unwrap();
        let deserialized: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(phase, deserialized);
    }
}
