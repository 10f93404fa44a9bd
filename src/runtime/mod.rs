//! Event-loop shell around a state machine and its render target.
//!
//! [`Indicator`] owns both halves and lends the target into every machine
//! call, so neither holds a reference to the other. Time is a monotonic
//! clock the caller advances, either by hand or through the async
//! [`Indicator::run`] driver.

mod driver;

pub use driver::{Command, TargetUpdate};

use crate::config::WaveConfig;
use crate::core::Phase;
use crate::machine::WaveStateMachine;
use crate::target::{AnimationTarget, FluidSurface, Progress};
use std::time::Duration;
use tracing::{trace, warn};

/// Upper bound on continuations fired by a single [`Indicator::settle`].
const SETTLE_STEP_LIMIT: usize = 1024;

/// A fill indicator: one state machine driving one render target.
///
/// # Example
///
/// ```rust
/// use waterline::config::WaveConfig;
/// use waterline::core::Phase;
/// use waterline::runtime::Indicator;
/// use waterline::target::{FluidSurface, Progress};
/// use std::time::Duration;
///
/// let config = WaveConfig::default();
/// let surface = FluidSurface::new(&config);
/// let mut indicator = Indicator::new(config, surface);
///
/// indicator.update(|s| s.set_progress(Progress::new(3, 5)));
/// assert_eq!(indicator.phase(), Phase::Amplifying);
///
/// indicator.advance(Duration::from_secs(2));
/// assert_eq!(indicator.phase(), Phase::Leveling);
///
/// indicator.settle();
/// assert_eq!(indicator.phase(), Phase::Idle);
/// assert_eq!(indicator.target().settled_level(), Some(0.6));
/// ```
pub struct Indicator<T> {
    machine: WaveStateMachine<T>,
    target: T,
}

impl<T: AnimationTarget> Indicator<T> {
    pub fn new(config: WaveConfig, target: T) -> Self {
        Self {
            machine: WaveStateMachine::new(config),
            target,
        }
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn machine(&self) -> &WaveStateMachine<T> {
        &self.machine
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Mutable access to the target.
    ///
    /// Changing the level through this handle does not notify the machine;
    /// call [`Indicator::level_changed`] afterwards, or use
    /// [`Indicator::update`].
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Tell the machine the target's level has changed.
    pub fn level_changed(&mut self) -> bool {
        self.machine.on_level_changed(&mut self.target)
    }

    /// Mutate the target, then notify the machine of the level change.
    pub fn update<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        f(&mut self.target);
        self.level_changed()
    }

    /// Request a phase directly.
    pub fn request(&mut self, phase: Phase) -> bool {
        self.machine.request_phase(phase, &mut self.target)
    }

    /// Current clock reading
    pub fn now(&self) -> Duration {
        self.machine.now()
    }

    /// Due time of the earliest pending continuation
    pub fn next_deadline(&self) -> Option<Duration> {
        self.machine.next_deadline()
    }

    /// Number of pending continuations
    pub fn pending(&self) -> usize {
        self.machine.pending()
    }

    /// Move the clock forward by `elapsed`, firing everything that comes due.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let deadline = self.now().saturating_add(elapsed);
        self.advance_to(deadline)
    }

    /// Move the clock forward to `deadline`, firing everything that comes due.
    pub fn advance_to(&mut self, deadline: Duration) -> usize {
        self.machine.advance_to(deadline, &mut self.target)
    }

    /// Fire pending continuations until none remain.
    ///
    /// Stops early, with a warning, if the target keeps scheduling work. Also
    /// warns if the queue drains while the phase is still animating, which
    /// means the target never scheduled its completion.
    pub fn settle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.next_deadline() {
            if fired >= SETTLE_STEP_LIMIT {
                warn!(
                    fired,
                    pending = self.pending(),
                    "Indicator did not settle within step limit"
                );
                return fired;
            }
            fired += self.advance_to(deadline);
        }
        if self.phase().is_animating() {
            warn!(phase = %self.phase(), "Indicator stalled with no pending completion");
        }
        fired
    }

    /// Give up the machine and the target.
    pub fn into_parts(self) -> (WaveStateMachine<T>, T) {
        (self.machine, self.target)
    }
}

impl Indicator<FluidSurface> {
    /// Replace the goal progress and notify the machine.
    ///
    /// With no goals set there is nothing to fill, so the machine is not
    /// notified and `false` is returned.
    pub fn set_progress(&mut self, progress: Progress) -> bool {
        self.target.set_progress(progress);
        if progress.total == 0 {
            trace!(done = progress.done, "No goals set, level unchanged");
            return false;
        }
        self.level_changed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ProgressLevel, Rgba};
    use crate::target::Schedule;

    fn indicator() -> Indicator<FluidSurface> {
        let config = WaveConfig::default();
        let surface = FluidSurface::new(&config);
        Indicator::new(config, surface)
    }

    #[test]
    fn update_notifies_machine() {
        let mut indicator = indicator();

        assert!(indicator.update(|s| s.set_progress(Progress::new(1, 4))));

        assert_eq!(indicator.phase(), Phase::Amplifying);
        assert_eq!(indicator.pending(), 1);
    }

    #[test]
    fn target_mut_does_not_notify() {
        let mut indicator = indicator();

        indicator.target_mut().set_progress(Progress::new(1, 4));

        assert_eq!(indicator.phase(), Phase::Idle);
        assert!(indicator.level_changed());
        assert_eq!(indicator.phase(), Phase::Amplifying);
    }

    #[test]
    fn advance_is_relative_to_clock() {
        let mut indicator = indicator();
        indicator.advance(Duration::from_secs(10));
        indicator.update(|s| s.set_progress(Progress::new(1, 4)));

        assert_eq!(indicator.next_deadline(), Some(Duration::from_secs(12)));
        assert_eq!(indicator.advance(Duration::from_secs(2)), 1);
        assert_eq!(indicator.phase(), Phase::Leveling);
    }

    #[test]
    fn settle_runs_cycle_to_completion() {
        let mut indicator = indicator();
        indicator.update(|s| s.set_progress(Progress::new(4, 4)));

        assert_eq!(indicator.settle(), 3);
        assert_eq!(indicator.phase(), Phase::Idle);
        assert_eq!(indicator.now(), Duration::from_secs(8));
        assert_eq!(indicator.target().completions(), 1);
    }

    #[test]
    fn settle_on_idle_indicator_does_nothing() {
        let mut indicator = indicator();
        assert_eq!(indicator.settle(), 0);
        assert_eq!(indicator.now(), Duration::ZERO);
    }

    #[test]
    fn direct_request_follows_table() {
        let mut indicator = indicator();

        assert!(!indicator.request(Phase::Damping));
        assert!(indicator.request(Phase::Amplifying));
        assert_eq!(indicator.phase(), Phase::Amplifying);
    }

    #[test]
    fn set_progress_notifies_machine() {
        let mut indicator = indicator();

        assert!(indicator.set_progress(Progress::new(2, 5)));
        assert_eq!(indicator.phase(), Phase::Amplifying);

        indicator.settle();
        assert_eq!(indicator.target().settled_level(), Some(0.4));
    }

    #[test]
    fn progress_without_goals_leaves_indicator_idle() {
        let mut indicator = indicator();

        assert!(!indicator.set_progress(Progress::new(0, 0)));

        assert_eq!(indicator.phase(), Phase::Idle);
        assert_eq!(indicator.pending(), 0);
        assert_eq!(indicator.target().progress(), Progress::new(0, 0));
        assert!(indicator.machine().history().is_empty());
    }

    /// Target that never schedules its completions.
    struct Frozen;

    impl AnimationTarget for Frozen {
        fn begin_amplify(&mut self, _schedule: &mut Schedule<'_, Self>) {}
        fn begin_level_change(&mut self, _level: ProgressLevel, _schedule: &mut Schedule<'_, Self>) {}
        fn begin_damp(&mut self, _schedule: &mut Schedule<'_, Self>) {}
        fn refresh_color(&mut self, _color: Rgba) {}
        fn level(&self) -> f64 {
            0.5
        }
    }

    #[test]
    fn settle_returns_when_target_never_completes() {
        let mut indicator = Indicator::new(WaveConfig::default(), Frozen);
        indicator.level_changed();

        assert_eq!(indicator.settle(), 0);
        assert!(indicator.phase().is_animating());
    }
}
