//! ChunkedStorage: growable sequence of fixed-capacity slot chunks.
//!
//! Each chunk is a separate boxed slice allocated once and never resized or
//! freed while the storage lives. Growth pushes a new box onto the outer
//! `Vec`; moving the box pointers does not move the slots they own, so the
//! address of every slot is stable from the moment its chunk exists.

use core::num::NonZeroUsize;
use core::ops::Range;

use crate::error::{Error, Result};
use crate::object::Slot;

/// Slots per chunk unless configured otherwise.
pub const DEFAULT_CHUNK_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(n) => n,
    None => unreachable!(),
};

/// Upper bound on the number of slots; keeps every index and every range end
/// representable as `u32`.
const MAX_SLOTS: usize = u32::MAX as usize;

#[derive(Debug)]
pub(crate) struct ChunkedStorage {
    chunk_capacity: NonZeroUsize,
    chunks: Vec<Box<[Slot]>>,
}

impl ChunkedStorage {
    pub(crate) fn new(chunk_capacity: NonZeroUsize) -> Self {
        Self {
            chunk_capacity,
            chunks: Vec::new(),
        }
    }

    pub(crate) fn chunk_capacity(&self) -> usize {
        self.chunk_capacity.get()
    }

    pub(crate) fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total number of addressable slots.
    pub(crate) fn capacity(&self) -> usize {
        self.chunks.len() * self.chunk_capacity.get()
    }

    /// Appends exactly one chunk and returns the indices it added.
    pub(crate) fn grow(&mut self) -> Result<Range<u32>> {
        let start = self.capacity();
        let end = start
            .checked_add(self.chunk_capacity.get())
            .filter(|&end| end <= MAX_SLOTS)
            .ok_or(Error::CapacityExhausted)?;
        // Both bounds fit: end <= MAX_SLOTS == u32::MAX.
        let range = start as u32..end as u32;

        let chunk: Box<[Slot]> = range.clone().map(Slot::vacant).collect();
        self.chunks.push(chunk);

        log::trace!(
            "grew chunk {} covering slots {}..{}",
            self.chunks.len() - 1,
            range.start,
            range.end
        );
        Ok(range)
    }

    /// True if the storage could grow to hold `chunks` chunks in total
    /// without leaving the u32 index space.
    pub(crate) fn can_grow_to(&self, chunks: usize) -> bool {
        chunks
            .checked_mul(self.chunk_capacity.get())
            .is_some_and(|slots| slots <= MAX_SLOTS)
    }

    /// Appends whole chunks until `index` is addressable. Returns every index
    /// added along the way (empty if `index` was already in range).
    ///
    /// Fails before allocating anything if the chunk holding `index` lies
    /// past the index space.
    pub(crate) fn ensure_capacity_for(&mut self, index: u32) -> Result<Range<u32>> {
        let chunks = index as usize / self.chunk_capacity.get() + 1;
        if !self.can_grow_to(chunks) {
            return Err(Error::CapacityExhausted);
        }
        let start = self.capacity();
        let mut end = start;
        while index as usize >= self.capacity() {
            end = self.grow()?.end as usize;
        }
        Ok(start as u32..end as u32)
    }

    #[inline]
    fn locate(&self, index: u32) -> (usize, usize) {
        let index = index as usize;
        let cap = self.chunk_capacity.get();
        (index / cap, index % cap)
    }

    #[inline]
    pub(crate) fn slot(&self, index: u32) -> Option<&Slot> {
        let (chunk, offset) = self.locate(index);
        self.chunks.get(chunk).map(|c| &c[offset])
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, index: u32) -> Option<&mut Slot> {
        let (chunk, offset) = self.locate(index);
        self.chunks.get_mut(chunk).map(|c| &mut c[offset])
    }

    pub(crate) fn chunks(&self) -> core::slice::Iter<'_, Box<[Slot]>> {
        self.chunks.iter()
    }

    pub(crate) fn chunks_mut(&mut self) -> core::slice::IterMut<'_, Box<[Slot]>> {
        self.chunks.iter_mut()
    }
}
