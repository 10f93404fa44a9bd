//! Single-threaded timer queue for delayed continuations.

use crate::core::{Phase, Ticket};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Type alias for a deferred effect on the render target.
pub type TargetEffect<T> = Box<dyn FnOnce(&mut T)>;

/// Work a render target defers until a delay has elapsed.
///
/// A continuation never sets the phase itself. When it fires, its optional
/// effect runs against the target and its phase goes through the machine's
/// ordinary transition check.
pub struct Continuation<T> {
    effect: Option<TargetEffect<T>>,
    request: Phase,
}

impl<T> Continuation<T> {
    /// Request `phase` once the delay has elapsed.
    pub fn request(phase: Phase) -> Self {
        Self {
            effect: None,
            request: phase,
        }
    }

    /// Apply `effect` to the target, then request `phase`.
    ///
    /// The effect only runs if the continuation's ticket is still current.
    pub fn then_request<F>(effect: F, phase: Phase) -> Self
    where
        F: FnOnce(&mut T) + 'static,
    {
        Self {
            effect: Some(Box::new(effect)),
            request: phase,
        }
    }

    /// Phase this continuation will request.
    pub fn requested(&self) -> Phase {
        self.request
    }

    pub(crate) fn into_parts(self) -> (Option<TargetEffect<T>>, Phase) {
        (self.effect, self.request)
    }
}

impl<T> fmt::Debug for Continuation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation")
            .field("effect", &self.effect.is_some())
            .field("request", &self.request)
            .finish()
    }
}

/// A continuation that has come due.
#[derive(Debug)]
pub struct Task<T> {
    /// Clock reading the task was due at
    pub due: Duration,
    /// Transition that scheduled the task
    pub ticket: Ticket,
    pub continuation: Continuation<T>,
}

/// Delayed continuations ordered by due time, then by posting order.
///
/// The queue owns the monotonic clock: time only moves forward, either to the
/// due time of a popped task or to an explicit deadline.
pub struct TaskQueue<T> {
    now: Duration,
    seq: u64,
    tasks: BTreeMap<(Duration, u64), (Ticket, Continuation<T>)>,
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            seq: 0,
            tasks: BTreeMap::new(),
        }
    }

    /// Current clock reading.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Post a continuation due `delay` after the current clock reading.
    pub fn push(&mut self, delay: Duration, ticket: Ticket, continuation: Continuation<T>) {
        let due = self.now.saturating_add(delay);
        self.tasks.insert((due, self.seq), (ticket, continuation));
        self.seq += 1;
    }

    /// Remove the earliest task due at or before `deadline`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<Task<T>> {
        let (&(due, _), _) = self.tasks.first_key_value()?;
        if due > deadline {
            return None;
        }
        let ((due, _), (ticket, continuation)) = self.tasks.pop_first()?;
        self.now = self.now.max(due);
        Some(Task {
            due,
            ticket,
            continuation,
        })
    }

    /// Move the clock forward to `to`. Earlier readings are ignored.
    pub fn advance_clock(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    /// Due time of the earliest pending task.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.tasks.keys().next().map(|&(due, _)| due)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TaskQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueue")
            .field("now", &self.now)
            .field("pending", &self.tasks.len())
            .finish()
    }
}
