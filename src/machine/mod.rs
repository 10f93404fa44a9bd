//! The indicator's phase state machine.
//!
//! [`WaveStateMachine`] owns the current phase and is the single authority
//! over phase changes: requests from the shell and delayed continuations
//! posted by the render target both go through [`WaveStateMachine::request_phase`].
//!
//! # Example
//!
//! ```rust
//! use waterline::config::WaveConfig;
//! use waterline::core::Phase;
//! use waterline::machine::WaveStateMachine;
//! use waterline::target::{FluidSurface, Progress};
//!
//! let config = WaveConfig::default();
//! let mut surface = FluidSurface::new(&config);
//! let mut machine = WaveStateMachine::new(config);
//!
//! surface.set_progress(Progress::new(1, 5));
//! assert!(machine.on_level_changed(&mut surface));
//! assert_eq!(machine.phase(), Phase::Amplifying);
//!
//! // Amplifying -> Amplifying is not in the table
//! assert!(!machine.request_phase(Phase::Amplifying, &mut surface));
//! ```

mod queue;

pub use queue::{Continuation, TargetEffect, Task, TaskQueue};

use crate::config::WaveConfig;
use crate::core::{Phase, PhaseHistory, PhaseTransition, Ticket, TransitionTable};
use crate::target::{AnimationTarget, Schedule};
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, trace};

/// Phase state machine for one fill indicator.
pub struct WaveStateMachine<T> {
    phase: Phase,
    epoch: u64,
    table: TransitionTable,
    config: WaveConfig,
    history: PhaseHistory,
    queue: TaskQueue<T>,
}

impl<T> WaveStateMachine<T> {
    /// Create a machine at rest in `Idle`.
    pub fn new(config: WaveConfig) -> Self {
        Self {
            phase: Phase::Idle,
            epoch: 0,
            table: TransitionTable::STANDARD,
            history: PhaseHistory::with_limit(config.history_limit),
            config,
            queue: TaskQueue::new(),
        }
    }

    /// Get current phase (pure)
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of transitions accepted so far (pure)
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Ticket identifying the current phase instance (pure)
    pub fn ticket(&self) -> Ticket {
        Ticket::new(self.phase, self.epoch)
    }

    /// Check whether a continuation stamped with `ticket` may still act (pure)
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.admits(self.phase, self.epoch)
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    pub fn history(&self) -> &PhaseHistory {
        &self.history
    }

    /// Current clock reading of the timer queue
    pub fn now(&self) -> Duration {
        self.queue.now()
    }

    /// Due time of the earliest pending continuation
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_deadline()
    }

    /// Number of continuations waiting on the timer queue
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl<T: AnimationTarget> WaveStateMachine<T> {
    /// Request a move to `next`.
    ///
    /// An allowed request updates the phase, invokes the capability that
    /// belongs to the new phase, then refreshes the color. A request the
    /// table does not allow changes nothing and returns `false`; stale or
    /// racing requests are expected and are not errors.
    pub fn request_phase(&mut self, next: Phase, target: &mut T) -> bool {
        let from = self.phase;
        if !self.table.allows(from, next) {
            trace!(from = %from, to = %next, epoch = self.epoch, "Ignoring phase request");
            return false;
        }

        self.phase = next;
        self.epoch += 1;
        self.history.record(PhaseTransition {
            from,
            to: next,
            epoch: self.epoch,
            timestamp: Utc::now(),
        });
        debug!(from = %from, to = %next, epoch = self.epoch, "Phase transition");

        let mut schedule = Schedule::new(&mut self.queue, Ticket::new(next, self.epoch));
        match next {
            Phase::Idle => {}
            Phase::Amplifying => target.begin_amplify(&mut schedule),
            Phase::Leveling => {
                let level = self.config.level_bounds.clamp(target.level());
                target.begin_level_change(level, &mut schedule);
            }
            Phase::Damping => target.begin_damp(&mut schedule),
        }
        target.refresh_color(self.config.palette.color(next));
        true
    }

    /// React to a change of the target's progress value.
    ///
    /// The request is derived from the current phase alone. While amplifying
    /// the notification is dropped and `false` is returned; the pending
    /// amplify completion moves the machine on by itself.
    pub fn on_level_changed(&mut self, target: &mut T) -> bool {
        match TransitionTable::on_level_change(self.phase) {
            Some(next) => self.request_phase(next, target),
            None => {
                trace!(phase = %self.phase, "Level change absorbed by pending amplify");
                false
            }
        }
    }

    /// Run a continuation that has come due.
    ///
    /// A task whose ticket is no longer current is dropped without touching
    /// the target. Otherwise its effect runs and its phase is requested.
    /// Returns whether a transition was accepted.
    pub fn fire(&mut self, task: Task<T>, target: &mut T) -> bool {
        if !self.is_current(&task.ticket) {
            debug!(
                expected = %task.ticket.phase,
                expected_epoch = task.ticket.epoch,
                phase = %self.phase,
                epoch = self.epoch,
                "Dropping stale continuation"
            );
            return false;
        }

        let (effect, request) = task.continuation.into_parts();
        if let Some(effect) = effect {
            effect(target);
        }
        self.request_phase(request, target)
    }

    /// Fire every continuation due at or before `deadline`, oldest first,
    /// then move the clock to `deadline`.
    ///
    /// Continuations posted while firing run too if they fall due in time.
    /// Returns the number of continuations fired, stale ones included.
    pub fn advance_to(&mut self, deadline: Duration, target: &mut T) -> usize {
        let mut fired = 0;
        while let Some(task) = self.queue.pop_due(deadline) {
            self.fire(task, target);
            fired += 1;
        }
        self.queue.advance_clock(deadline);
        fired
    }
}
