//! Per-node outgoing edge collections.
//!
//! An [`EdgeSet`] is a vector of `(destination handle, weight)` entries kept
//! sorted by destination *value*, then weight. Ordering depends on values the
//! set does not own, so every method that compares entries takes the slot
//! arena to resolve handles.

use std::cmp::Ordering;

use dg_core::{SlotId, cmp_weight, ensure_comparable};

use crate::graph::Slots;

/// One outgoing edge: the source is implicit (the owning slot).
#[derive(Debug, Clone)]
pub(crate) struct EdgeEntry<E> {
    pub(crate) dst: SlotId,
    pub(crate) weight: E,
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeSet<E> {
    entries: Vec<EdgeEntry<E>>,
}

impl<E> Default for EdgeSet<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E> EdgeSet<E> {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&EdgeEntry<E>> {
        self.entries.get(index)
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, EdgeEntry<E>> {
        self.entries.iter()
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> EdgeEntry<E> {
        self.entries.remove(index)
    }

    /// Whether any entry points at `dst`.
    pub(crate) fn references(&self, dst: SlotId) -> bool {
        self.entries.iter().any(|e| e.dst == dst)
    }

    /// Drop every entry pointing at `dst`; returns how many were dropped.
    pub(crate) fn remove_dst(&mut self, dst: SlotId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.dst != dst);
        before - self.entries.len()
    }

    /// Point every `from` entry at `to`. Leaves the set unsorted until
    /// [`EdgeSet::normalize`] runs.
    pub(crate) fn retarget(&mut self, from: SlotId, to: SlotId) {
        for entry in self.entries.iter_mut().filter(|e| e.dst == from) {
            entry.dst = to;
        }
    }

    /// Move all of `other`'s entries in. Leaves the set unsorted until
    /// [`EdgeSet::normalize`] runs.
    pub(crate) fn absorb(&mut self, other: EdgeSet<E>) {
        self.entries.extend(other.entries);
    }
}

impl<E: PartialOrd> EdgeSet<E> {
    fn cmp_entries<N: Ord>(slots: &Slots<N, E>, a: &EdgeEntry<E>, b: &EdgeEntry<E>) -> Ordering {
        slots[a.dst]
            .value
            .cmp(&slots[b.dst].value)
            .then_with(|| cmp_weight(&a.weight, &b.weight))
    }

    /// Binary search for `(dst, weight)`. A weight that is not comparable
    /// with itself matches nothing.
    pub(crate) fn search<N: Ord>(
        &self,
        slots: &Slots<N, E>,
        dst: SlotId,
        weight: &E,
    ) -> Result<usize, usize> {
        if ensure_comparable(weight, "lookup weight").is_err() {
            return Err(self.entries.len());
        }
        let target = &slots[dst].value;
        self.entries.binary_search_by(|e| {
            slots[e.dst]
                .value
                .cmp(target)
                .then_with(|| cmp_weight(&e.weight, weight))
        })
    }

    /// Insert `(dst, weight)`; false if that exact entry is already present.
    pub(crate) fn insert<N: Ord>(&mut self, slots: &Slots<N, E>, dst: SlotId, weight: E) -> bool {
        match self.search(slots, dst, &weight) {
            Ok(_) => false,
            Err(pos) => {
                self.entries.insert(pos, EdgeEntry { dst, weight });
                true
            }
        }
    }

    pub(crate) fn remove<N: Ord>(&mut self, slots: &Slots<N, E>, dst: SlotId, weight: &E) -> bool {
        match self.search(slots, dst, weight) {
            Ok(pos) => {
                self.entries.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// The contiguous run of entries pointing at `dst`, ascending by weight.
    pub(crate) fn span_to<N: Ord>(&self, slots: &Slots<N, E>, dst: SlotId) -> &[EdgeEntry<E>] {
        let target = &slots[dst].value;
        let lo = self
            .entries
            .partition_point(|e| slots[e.dst].value < *target);
        let len = self.entries[lo..]
            .iter()
            .take_while(|e| e.dst == dst)
            .count();
        &self.entries[lo..lo + len]
    }

    /// Whether the entries are strictly ascending by (destination, weight).
    pub(crate) fn is_strictly_ordered<N: Ord>(&self, slots: &Slots<N, E>) -> bool {
        self.entries
            .windows(2)
            .all(|w| Self::cmp_entries(slots, &w[0], &w[1]) == Ordering::Less)
    }

    /// Restore ordering after values or targets changed, dropping exact
    /// duplicates. Returns how many entries were dropped.
    pub(crate) fn normalize<N: Ord>(&mut self, slots: &Slots<N, E>) -> usize {
        let before = self.entries.len();
        self.entries
            .sort_by(|a, b| Self::cmp_entries(slots, a, b));
        self.entries.dedup_by(|a, b| {
            a.dst == b.dst && cmp_weight(&a.weight, &b.weight) == Ordering::Equal
        });
        before - self.entries.len()
    }
}
