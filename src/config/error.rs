//! Configuration errors.

use std::time::Duration;
use thiserror::Error;

/// A single rule broken by a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("{profile} amplitude profile is malformed (min {min}, increment {increment}, max {max})")]
    MalformedProfile {
        profile: &'static str,
        min: u32,
        increment: u32,
        max: u32,
    },

    #[error("Low amplitude ceiling ({low}) exceeds high amplitude ceiling ({high})")]
    ProfilesInverted { low: u32, high: u32 },

    #[error("Level bounds must satisfy 0 < lower < upper < 1 (got {lower}..{upper})")]
    LevelBounds { lower: f64, upper: f64 },

    #[error("Fill duration must be non-zero")]
    ZeroFillDuration,

    #[error("{field} ({value:?}) exceeds the {max:?} limit")]
    DurationTooLong {
        field: &'static str,
        value: Duration,
        max: Duration,
    },

    #[error("History limit must be non-zero")]
    ZeroHistoryLimit,
}

/// Errors that can occur when building or loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Every violation found, in check order
    #[error("Invalid configuration: {}", summarize(.0))]
    Invalid(Vec<ConfigViolation>),

    /// The configuration text could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Violations carried by an `Invalid` error, empty otherwise.
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            Self::Invalid(violations) => violations,
            Self::Parse(_) => &[],
        }
    }
}

fn summarize(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
