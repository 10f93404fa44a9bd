//! Static legality matrix over phase pairs.

use super::phase::Phase;

/// Fixed `(current, requested) -> allowed` mapping.
///
/// The table is a compile-time constant and is never mutated. Rows are the
/// current phase, columns the requested phase, both indexed by
/// [`Phase::index`].
///
/// # Example
///
/// ```rust
/// use waterline::core::{Phase, TransitionTable};
///
/// let table = TransitionTable::STANDARD;
/// assert!(table.allows(Phase::Idle, Phase::Amplifying));
/// assert!(table.allows(Phase::Leveling, Phase::Leveling));
/// assert!(!table.allows(Phase::Amplifying, Phase::Amplifying));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionTable {
    allowed: [[bool; 4]; 4],
}

impl TransitionTable {
    /// The indicator's transition table.
    ///
    /// `Leveling -> Leveling` is the only legal self-loop; it lets a fill
    /// retarget to a newer level while still in flight.
    pub const STANDARD: TransitionTable = TransitionTable {
        allowed: [
            // Idle
            [false, true, false, false],
            // Amplifying
            [false, false, true, false],
            // Leveling
            [false, false, true, true],
            // Damping
            [true, true, false, false],
        ],
    };

    /// Check whether moving from `current` to `requested` is legal (pure).
    pub const fn allows(&self, current: Phase, requested: Phase) -> bool {
        self.allowed[current.index()][requested.index()]
    }

    /// Iterate over every allowed `(current, requested)` pair.
    pub fn allowed_pairs(&self) -> impl Iterator<Item = (Phase, Phase)> + '_ {
        Phase::ALL.into_iter().flat_map(move |from| {
            Phase::ALL
                .into_iter()
                .filter(move |to| self.allows(from, *to))
                .map(move |to| (from, to))
        })
    }

    /// Phase to request when the progress level changes.
    ///
    /// Depends only on the current phase, never on the level itself.
    /// `None` while amplifying: the pending amplify completion drives the
    /// next step on its own.
    pub const fn on_level_change(current: Phase) -> Option<Phase> {
        match current {
            Phase::Idle => Some(Phase::Amplifying),
            Phase::Amplifying => None,
            Phase::Leveling => Some(Phase::Leveling),
            Phase::Damping => Some(Phase::Amplifying),
        }
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::STANDARD
    }
}
