//! Handle: packed (generation, index) identifier for slots.

use core::fmt;

const INDEX_MASK: u64 = 0xFFFF_FFFF;
const GENERATION_SHIFT: u32 = 32;

/// Opaque 64-bit identifier for an object in a [`SlotMap`](crate::SlotMap).
///
/// The high 32 bits carry the generation, the low 32 bits the slot index.
/// Two handles are equal iff both parts match.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Handle(u64);

impl Handle {
    /// Packs `index` and `generation` into a handle.
    #[inline]
    #[must_use]
    pub const fn encode(index: u32, generation: u32) -> Self {
        Handle(((generation as u64) << GENERATION_SHIFT) | index as u64)
    }

    /// Unpacks the handle into `(index, generation)`.
    #[inline]
    #[must_use]
    pub const fn decode(self) -> (u32, u32) {
        (self.index(), self.generation())
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        (self.0 & INDEX_MASK) as u32
    }

    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> GENERATION_SHIFT) as u32
    }

    /// Rebuilds a handle from a value previously returned by [`Handle::into_raw`].
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Handle(raw)
    }

    #[inline]
    #[must_use]
    pub const fn into_raw(self) -> u64 {
        self.0
    }

    /// Same index, generation advanced by one. `None` once the generation
    /// counter is saturated.
    #[inline]
    #[must_use]
    pub const fn next_generation(self) -> Option<Self> {
        match self.generation().checked_add(1) {
            Some(g) => Some(Handle::encode(self.index(), g)),
            None => None,
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}v{})", self.index(), self.generation())
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index(), self.generation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: generation occupies the high half, index the low half.
    #[test]
    fn packing_layout() {
        let h = Handle::encode(0x0000_0007, 0x0000_0003);
        assert_eq!(h.into_raw(), 0x0000_0003_0000_0007);
        assert_eq!(h.decode(), (7, 3));

        let max = Handle::encode(u32::MAX, u32::MAX);
        assert_eq!(max.into_raw(), u64::MAX);
        assert_eq!(max.index(), u32::MAX);
        assert_eq!(max.generation(), u32::MAX);
    }

    /// Invariant: handles sharing an index but not a generation are distinct.
    #[test]
    fn equality_needs_both_parts() {
        let a = Handle::encode(5, 0);
        let b = Handle::encode(5, 1);
        let c = Handle::encode(6, 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, Handle::from_raw(a.into_raw()));
    }

    #[test]
    fn next_generation_saturates() {
        let h = Handle::encode(9, 41);
        assert_eq!(h.next_generation(), Some(Handle::encode(9, 42)));
        assert_eq!(Handle::encode(9, u32::MAX).next_generation(), None);
    }

    #[test]
    fn formatting() {
        let h = Handle::encode(12, 3);
        assert_eq!(format!("{h}"), "12v3");
        assert_eq!(format!("{h:?}"), "Handle(12v3)");
    }
}
