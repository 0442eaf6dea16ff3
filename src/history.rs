use indexmap::IndexMap;

use crate::IterationId;

/// Per-iteration records keyed by [`IterationId`].
///
/// A thin wrapper over an insertion-ordered map, for residual norms,
/// timings or whatever else the outer loop wants to remember per step.
/// Insertion order is preserved so dumps read in the order the solve ran,
/// while [`latest`](Self::latest) uses the id ordering and stays correct
/// even if entries arrive out of order (say, when replaying a restart).
#[derive(Clone, Debug, Default)]
pub struct IterationHistory<T> {
    entries: IndexMap<IterationId, T>,
}

impl<T> IterationHistory<T> {
    /// An empty history.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Record a value for this iteration, returning the previous value if
    /// the iteration was already recorded.
    pub fn insert(&mut self, id: IterationId, value: T) -> Option<T> {
        self.entries.insert(id, value)
    }

    /// Look up the record for this iteration.
    pub fn get(&self, id: IterationId) -> Option<&T> {
        self.entries.get(&id)
    }

    /// The record with the greatest iteration id.
    pub fn latest(&self) -> Option<(IterationId, &T)> {
        self.entries
            .iter()
            .max_by_key(|(id, _)| **id)
            .map(|(id, value)| (*id, value))
    }

    /// How many iterations are recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (IterationId, &T)> {
        self.entries.iter().map(|(id, value)| (*id, value))
    }
}
