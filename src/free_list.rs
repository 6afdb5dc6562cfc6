//! FreeList: LIFO stack of unoccupied slot indices.
//!
//! In debug builds a membership shadow set checks that no index is ever
//! pushed twice while already free. In release builds it compiles away.

use core::ops::Range;

#[derive(Debug, Default)]
pub(crate) struct FreeList {
    stack: Vec<u32>,
    #[cfg(debug_assertions)]
    members: hashbrown::HashSet<u32>,
}

impl FreeList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Returns `index` to availability. The caller guarantees the slot is no
    /// longer occupied.
    #[inline]
    pub(crate) fn push(&mut self, index: u32) {
        #[cfg(debug_assertions)]
        {
            let fresh = self.members.insert(index);
            assert!(fresh, "index {index} pushed onto free list twice");
        }
        self.stack.push(index);
    }

    /// Removes the most recently freed index.
    #[inline]
    pub(crate) fn pop(&mut self) -> Option<u32> {
        let index = self.stack.pop()?;
        #[cfg(debug_assertions)]
        {
            let present = self.members.remove(&index);
            debug_assert!(present);
        }
        Some(index)
    }

    /// Registers a freshly grown range. Pushed high-to-low so that `pop`
    /// hands the indices out in ascending order.
    pub(crate) fn extend_descending(&mut self, range: Range<u32>) {
        self.stack.reserve(range.len());
        for index in range.rev() {
            self.push(index);
        }
    }
}
