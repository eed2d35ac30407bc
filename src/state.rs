//! Canonical state keys and the visitation ledger.
//!
//! The ledger guarantees each distinct configuration is expanded at most
//! once per solve and keeps the parent/move backlinks needed to rebuild the
//! solution path afterwards.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use itertools::Itertools;

use crate::board::Move;
use crate::vehicle::{Orientation, Vehicle};

/// Canonical identity of a configuration: vehicles sorted by label, each
/// reduced to its `(label, orientation, length, x, y)` pose tuple. Two
/// configurations are the same search state iff their keys are equal.
///
/// Identity is always the full key, never a scalar hash of it, so
/// structurally distinct configurations that happen to collide hash-wise
/// stay distinct in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey(Box<[(u32, Orientation, usize, usize, usize)]>);

impl StateKey {
    pub fn of(vehicles: &[Vehicle]) -> StateKey {
        StateKey(
            vehicles
                .iter()
                .sorted_by_key(|v| v.label)
                .map(|v| (v.label, v.orientation, v.length, v.x, v.y))
                .collect(),
        )
    }
}

/// How a state was first reached. The root has no parent.
#[derive(Debug, Clone)]
struct Discovery {
    parent: Option<(StateKey, Move)>,
}

/// Visitation set plus parent/move backlinks for one solve call.
///
/// Grows monotonically with the number of distinct states discovered and is
/// dropped with the solve that owns it; there is no eviction and no
/// cross-call persistence.
#[derive(Debug, Default)]
pub struct StateLedger {
    seen: HashMap<StateKey, Discovery>,
}

impl StateLedger {
    pub fn new() -> StateLedger {
        StateLedger::default()
    }

    /// Record a state if unseen and return whether it was newly recorded.
    /// The first discovery's parent link wins and is never overwritten.
    pub fn record_if_new(&mut self, key: StateKey, parent: Option<(StateKey, Move)>) -> bool {
        match self.seen.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Discovery { parent });
                true
            }
        }
    }

    /// Membership test
    pub fn already_seen(&self, key: &StateKey) -> bool {
        self.seen.contains_key(key)
    }

    /// Number of distinct states recorded so far
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Walk parent links from `goal` back to the root, collecting the move
    /// taken at each step, and return them in root-to-goal order. The root
    /// itself (or an unrecorded key) yields an empty path.
    pub fn reconstruct_path(&self, goal: &StateKey) -> Vec<Move> {
        let mut path = Vec::new();
        let mut current = goal;
        while let Some(Discovery {
            parent: Some((parent_key, mv)),
        }) = self.seen.get(current)
        {
            path.push(*mv);
            current = parent_key;
        }
        path.reverse();
        path
    }
}
