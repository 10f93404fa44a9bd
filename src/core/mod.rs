//! Pure core of the indicator state machine.
//!
//! This module contains the side-effect-free building blocks:
//! - `Phase` and the static `TransitionTable`
//! - `Ticket`, the stale-continuation guard
//! - Bounded transition history
//! - Amplitude profiles, level clamping and the color palette
//!
//! Nothing here touches a render target or a clock.

mod color;
mod guard;
mod history;
mod phase;
mod profile;
mod table;

pub use color::{Palette, Rgba};
pub use guard::Ticket;
pub use history::{PhaseHistory, PhaseTransition};
pub use phase::Phase;
pub use profile::{AmplitudeProfile, LevelBounds, ProgressLevel};
pub use table::TransitionTable;
