//! Phase transition history tracking.
//!
//! Keeps a bounded, ordered record of accepted transitions so a shell can
//! inspect how the indicator moved through its phases.

use super::phase::Phase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single accepted transition.
///
/// # Example
///
/// ```rust
/// use waterline::core::{Phase, PhaseTransition};
/// use chrono::Utc;
///
/// let transition = PhaseTransition {
///     from: Phase::Idle,
///     to: Phase::Amplifying,
///     epoch: 1,
///     timestamp: Utc::now(),
/// };
/// assert!(!transition.is_self_loop());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// The phase being left
    pub from: Phase,
    /// The phase being entered
    pub to: Phase,
    /// Epoch assigned to the entered phase
    pub epoch: u64,
    /// When the transition was accepted
    pub timestamp: DateTime<Utc>,
}

impl PhaseTransition {
    /// Check if this transition re-entered the phase it left.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered history of accepted transitions, bounded to a fixed length.
///
/// Once full, recording a transition evicts the oldest one. An indicator can
/// live as long as its screen does, so the history never grows unbounded.
///
/// # Example
///
/// ```rust
/// use waterline::core::{Phase, PhaseHistory, PhaseTransition};
/// use chrono::Utc;
///
/// let mut history = PhaseHistory::with_limit(8);
///
/// history.record(PhaseTransition {
///     from: Phase::Idle,
///     to: Phase::Amplifying,
///     epoch: 1,
///     timestamp: Utc::now(),
/// });
/// history.record(PhaseTransition {
///     from: Phase::Amplifying,
///     to: Phase::Leveling,
///     epoch: 2,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![Phase::Idle, Phase::Amplifying, Phase::Leveling]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhaseHistory {
    transitions: VecDeque<PhaseTransition>,
    limit: usize,
}

impl PhaseHistory {
    /// Default number of transitions retained.
    pub const DEFAULT_LIMIT: usize = 64;

    /// Create an empty history retaining at most `limit` transitions.
    ///
    /// A limit of zero is raised to one.
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            transitions: VecDeque::with_capacity(limit.min(Self::DEFAULT_LIMIT)),
            limit,
        }
    }

    /// Record a transition, evicting the oldest one if the history is full.
    pub fn record(&mut self, transition: PhaseTransition) {
        if self.transitions.len() >= self.limit {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of phases traversed.
    ///
    /// The `from` phase of the oldest retained transition, then the `to`
    /// phase of each transition in order.
    pub fn get_path(&self) -> Vec<Phase> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Time between the oldest and newest retained transitions.
    ///
    /// Returns `None` if nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Most recently accepted transition.
    pub fn last(&self) -> Option<&PhaseTransition> {
        self.transitions.back()
    }

    /// Number of retained transitions that entered `phase`.
    pub fn count_entries(&self, phase: Phase) -> usize {
        self.transitions.iter().filter(|t| t.to == phase).count()
    }

    /// Iterate over retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &PhaseTransition> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for PhaseHistory {
    fn default() -> Self {
        Self::with_limit(Self::DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: Phase, to: Phase, epoch: u64) -> PhaseTransition {
        PhaseTransition {
            from,
            to,
            epoch,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = PhaseHistory::default();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_appends_in_order() {
        let mut history = PhaseHistory::default();

        history.record(transition(Phase::Idle, Phase::Amplifying, 1));
        history.record(transition(Phase::Amplifying, Phase::Leveling, 2));

        assert_eq!(history.len(), 2);
        assert_eq!(history.last().map(|t| t.epoch), Some(2));
    }

    #[test]
    fn full_history_evicts_oldest() {
        let mut history = PhaseHistory::with_limit(2);

        history.record(transition(Phase::Idle, Phase::Amplifying, 1));
        history.record(transition(Phase::Amplifying, Phase::Leveling, 2));
        history.record(transition(Phase::Leveling, Phase::Damping, 3));

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.get_path(),
            vec![Phase::Amplifying, Phase::Leveling, Phase::Damping]
        );
    }

    #[test]
    fn zero_limit_is_raised_to_one() {
        let mut history = PhaseHistory::with_limit(0);
        history.record(transition(Phase::Idle, Phase::Amplifying, 1));

        assert_eq!(history.limit(), 1);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn count_entries_tracks_self_loops() {
        let mut history = PhaseHistory::default();

        history.record(transition(Phase::Amplifying, Phase::Leveling, 2));
        history.record(transition(Phase::Leveling, Phase::Leveling, 3));
        history.record(transition(Phase::Leveling, Phase::Leveling, 4));

        assert_eq!(history.count_entries(Phase::Leveling), 3);
        assert_eq!(history.transitions().filter(|t| t.is_self_loop()).count(), 2);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = PhaseHistory::default();
        let start = Utc::now();

        history.record(PhaseTransition {
            from: Phase::Idle,
            to: Phase::Amplifying,
            epoch: 1,
            timestamp: start,
        });
        history.record(PhaseTransition {
            from: Phase::Amplifying,
            to: Phase::Leveling,
            epoch: 2,
            timestamp: start + chrono::Duration::milliseconds(2000),
        });

        assert_eq!(history.duration(), Some(Duration::from_millis(2000)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = PhaseHistory::with_limit(4);
        history.record(transition(Phase::Idle, Phase::Amplifying, 1));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: PhaseHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.limit(), 4);
    }
}
