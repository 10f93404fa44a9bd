//! Render target capabilities driven by the state machine.
//!
//! A render target is whatever actually draws the liquid. The machine never
//! owns it: the shell lends it into each call, and the target hands delayed
//! follow-ups back through a [`Schedule`] rather than holding a reference to
//! the machine.

mod surface;

pub use surface::{FillAnimation, FluidSurface, Progress};

use crate::core::{Phase, ProgressLevel, Rgba, Ticket};
use crate::machine::{Continuation, TaskQueue};
use std::time::Duration;

/// Capability set a render target exposes to the state machine.
///
/// Every method returns immediately. Work that completes later is posted on
/// the [`Schedule`] and re-enters the machine as an ordinary phase request.
///
/// # Example
///
/// ```rust
/// use waterline::core::{Phase, ProgressLevel, Rgba};
/// use waterline::machine::Continuation;
/// use waterline::target::{AnimationTarget, Schedule};
/// use std::time::Duration;
///
/// struct Gauge {
///     level: f64,
/// }
///
/// impl AnimationTarget for Gauge {
///     fn begin_amplify(&mut self, schedule: &mut Schedule<'_, Self>) {
///         schedule.after(Duration::from_secs(2), Continuation::request(Phase::Leveling));
///     }
///
///     fn begin_level_change(&mut self, _level: ProgressLevel, schedule: &mut Schedule<'_, Self>) {
///         schedule.after(Duration::from_secs(4), Continuation::request(Phase::Damping));
///     }
///
///     fn begin_damp(&mut self, schedule: &mut Schedule<'_, Self>) {
///         schedule.after(Duration::from_secs(2), Continuation::request(Phase::Idle));
///     }
///
///     fn refresh_color(&mut self, _color: Rgba) {}
///
///     fn level(&self) -> f64 {
///         self.level
///     }
/// }
/// ```
pub trait AnimationTarget: Sized {
    /// Ramp amplitude toward the high profile, then request `Leveling` once
    /// the waves have settled.
    fn begin_amplify(&mut self, schedule: &mut Schedule<'_, Self>);

    /// Animate the fill toward `level`, then request `Damping` when the
    /// animation finishes.
    fn begin_level_change(&mut self, level: ProgressLevel, schedule: &mut Schedule<'_, Self>);

    /// After a settle delay, ramp amplitude toward the low profile and
    /// request `Idle`.
    fn begin_damp(&mut self, schedule: &mut Schedule<'_, Self>);

    /// Apply the color of the phase just entered. Purely cosmetic.
    fn refresh_color(&mut self, color: Rgba);

    /// Current raw progress value, before clamping.
    fn level(&self) -> f64;
}

/// Non-owning handle a render target uses to post delayed continuations.
///
/// Every continuation posted through a schedule is stamped with the ticket of
/// the transition being applied, so it is ignored if a newer transition has
/// happened by the time it fires.
pub struct Schedule<'a, T> {
    queue: &'a mut TaskQueue<T>,
    ticket: Ticket,
}

impl<'a, T> Schedule<'a, T> {
    pub(crate) fn new(queue: &'a mut TaskQueue<T>, ticket: Ticket) -> Self {
        Self { queue, ticket }
    }

    /// Post `continuation` to fire once `delay` has elapsed.
    pub fn after(&mut self, delay: Duration, continuation: Continuation<T>) {
        self.queue.push(delay, self.ticket, continuation);
    }

    /// Ticket stamped on continuations posted through this schedule.
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Clock reading at the time of the transition.
    pub fn now(&self) -> Duration {
        self.queue.now()
    }
}
