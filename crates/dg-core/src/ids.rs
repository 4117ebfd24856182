use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable handle to a node slot in the graph's arena.
///
/// - `u32` keeps edge entries small
/// - `NonZero` enables `Option<SlotId>` to be pointer-optimized
///
/// A handle says nothing about ordering between node values; it only names
/// a storage location that stays put for as long as the node lives.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(NonZeroU32);

impl SlotId {
    /// Create a handle from a 0-based slot index by storing index+1.
    ///
    /// Returns `None` when the index does not fit the compact representation.
    pub fn try_from_index(index: usize) -> Option<Self> {
        let raw = u32::try_from(index).ok()?.checked_add(1)?;
        NonZeroU32::new(raw).map(Self)
    }

    /// Recover the 0-based slot index.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotId({})", self.index())
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_id_round_trip_index() {
        for i in [0_usize, 1, 2, 42, 10_000] {
            let id = SlotId::try_from_index(i).unwrap();
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn slot_id_rejects_out_of_range() {
        assert!(SlotId::try_from_index(u32::MAX as usize).is_none());
        assert!(SlotId::try_from_index(u32::MAX as usize - 1).is_some());
    }

    #[test]
    fn option_slot_id_is_small() {
        assert_eq!(
            core::mem::size_of::<SlotId>(),
            core::mem::size_of::<Option<SlotId>>()
        );
    }

    #[test]
    fn display_is_index() {
        let id = SlotId::try_from_index(7).unwrap();
        assert_eq!(format!("{id}"), "7");
        assert_eq!(format!("{id:?}"), "SlotId(7)");
    }
}
