//! Slot arena backing the node store.
//!
//! Each node lives in a slot addressed by a stable [`SlotId`]. Slots never
//! move while occupied, so edge entries can hold a handle instead of a
//! reference. Vacated slots are recycled through a free list.

use std::ops::{Index, IndexMut};

use dg_core::SlotId;

#[derive(Debug, Clone)]
pub(crate) struct SlotArena<T> {
    slots: Vec<Option<T>>,

    /// Vacant slots, reused last-in first-out.
    free: Vec<SlotId>,

    len: usize,
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }
}

impl<T> SlotArena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Store a value and return its handle.
    ///
    /// # Panics
    ///
    /// Panics if the arena would need more slots than a [`SlotId`] can address.
    pub(crate) fn insert(&mut self, value: T) -> SlotId {
        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id.index()] = Some(value);
                id
            }
            None => {
                let Some(id) = SlotId::try_from_index(self.slots.len()) else {
                    panic!("slot arena capacity overflow");
                };
                self.slots.push(Some(value));
                id
            }
        };
        self.len += 1;
        id
    }

    /// Vacate a slot, returning its value.
    pub(crate) fn remove(&mut self, id: SlotId) -> Option<T> {
        let value = self.slots.get_mut(id.index())?.take()?;
        self.free.push(id);
        self.len -= 1;
        Some(value)
    }

    pub(crate) fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub(crate) fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }
}

/// Handle lookup for slots the graph knows to be occupied.
///
/// Panics on a vacant slot: every handle stored in the graph must resolve.
impl<T> Index<SlotId> for SlotArena<T> {
    type Output = T;

    fn index(&self, id: SlotId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("dangling slot handle {id:?}"),
        }
    }
}

impl<T> IndexMut<SlotId> for SlotArena<T> {
    fn index_mut(&mut self, id: SlotId) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("dangling slot handle {id:?}"),
        }
    }
}
