//! Stale-continuation guard.
//!
//! Every delayed continuation carries the ticket of the transition that
//! scheduled it. On firing, the ticket is checked against the machine; a
//! continuation whose ticket no longer matches is absorbed without effect.

use super::phase::Phase;
use serde::{Deserialize, Serialize};

/// Identity of one accepted transition: the phase entered and the epoch at
/// which it was entered.
///
/// The epoch counts accepted transitions, so two visits to the same phase
/// carry different tickets. A fill completion scheduled before a
/// `Leveling -> Leveling` retarget is therefore stale even though the phase
/// still reads `Leveling`.
///
/// # Example
///
/// ```rust
/// use waterline::core::{Phase, Ticket};
///
/// let ticket = Ticket::new(Phase::Damping, 3);
///
/// assert!(ticket.admits(Phase::Damping, 3));
/// assert!(!ticket.admits(Phase::Amplifying, 4));
/// assert!(!ticket.admits(Phase::Damping, 7));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Ticket {
    /// Phase the continuation expects to find
    pub phase: Phase,
    /// Epoch the continuation expects to find
    pub epoch: u64,
}

impl Ticket {
    pub fn new(phase: Phase, epoch: u64) -> Self {
        Self { phase, epoch }
    }

    /// Check the ticket against the machine's current phase and epoch (pure).
    pub fn admits(&self, phase: Phase, epoch: u64) -> bool {
        self.phase == phase && self.epoch == epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_admits_matching_phase_and_epoch() {
        let ticket = Ticket::new(Phase::Amplifying, 1);

        assert!(ticket.admits(Phase::Amplifying, 1));
    }

    #[test]
    fn ticket_rejects_newer_phase() {
        let ticket = Ticket::new(Phase::Damping, 3);

        assert!(!ticket.admits(Phase::Amplifying, 4));
        assert!(!ticket.admits(Phase::Idle, 4));
    }

    #[test]
    fn ticket_rejects_later_visit_to_same_phase() {
        let ticket = Ticket::new(Phase::Leveling, 2);

        assert!(!ticket.admits(Phase::Leveling, 3));
    }

    #[test]
    fn ticket_check_is_deterministic() {
        let ticket = Ticket::new(Phase::Leveling, 5);

        let result1 = ticket.admits(Phase::Leveling, 5);
        let result2 = ticket.admits(Phase::Leveling, 5);

        assert_eq!(result1, result2);
    }
}
