//! Waterline: a phase state machine for liquid fill indicators
//!
//! A fill indicator animates through four phases as its progress value
//! changes: waves amplify, the liquid levels to the new progress, then the
//! waves damp back to rest. Waterline owns the rules for moving between
//! those phases and leaves the drawing to a render target.
//!
//! # Core Concepts
//!
//! - **Phase**: `Idle`, `Amplifying`, `Leveling` or `Damping`
//! - **Transition table**: the fixed set of legal phase changes; anything
//!   else is silently rejected
//! - **Render target**: implements [`target::AnimationTarget`] and posts
//!   delayed continuations through a [`target::Schedule`]
//! - **Tickets**: every continuation carries the phase instance that
//!   scheduled it and is dropped if that instance has been superseded
//!
//! # Example
//!
//! ```rust
//! use waterline::config::WaveConfig;
//! use waterline::core::Phase;
//! use waterline::runtime::Indicator;
//! use waterline::target::{FluidSurface, Progress};
//! use std::time::Duration;
//!
//! let config = WaveConfig::default();
//! let mut indicator = Indicator::new(config.clone(), FluidSurface::new(&config));
//!
//! indicator.update(|s| s.set_progress(Progress::new(1, 5)));
//! assert_eq!(indicator.phase(), Phase::Amplifying);
//!
//! indicator.advance(Duration::from_secs(6));
//! assert_eq!(indicator.phase(), Phase::Damping);
//!
//! // A new goal lands while the waves are damping: straight back to amplifying
//! indicator.update(|s| s.set_progress(Progress::new(2, 5)));
//! assert_eq!(indicator.phase(), Phase::Amplifying);
//! ```

pub mod config;
pub mod core;
pub mod machine;
pub mod runtime;
pub mod target;

// Re-export commonly used types
pub use crate::config::{ConfigError, WaveConfig};
pub use crate::core::{Phase, Ticket, TransitionTable};
pub use crate::machine::{Continuation, WaveStateMachine};
pub use crate::runtime::{Command, Indicator};
pub use crate::target::{AnimationTarget, FluidSurface, Progress, Schedule};
