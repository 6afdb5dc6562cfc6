use core::num::NonZeroUsize;

use crate::chunked_storage::DEFAULT_CHUNK_CAPACITY;
use crate::error::Result;
use crate::SlotMap;

/// Builder for a [`SlotMap`] with non-default storage settings.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use chunked_slotmap::SlotMap;
///
/// let map = SlotMap::builder()
///     .chunk_capacity(NonZeroUsize::new(64).unwrap())
///     .initial_chunks(2)
///     .build()
///     .unwrap();
/// assert_eq!(map.capacity(), 128);
/// assert!(map.is_empty());
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct SlotMapBuilder {
    chunk_capacity: NonZeroUsize,
    initial_chunks: usize,
}

impl SlotMapBuilder {
    pub(crate) fn new() -> Self {
        Self {
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            initial_chunks: 0,
        }
    }

    /// Number of slots allocated together whenever the map grows.
    pub fn chunk_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.chunk_capacity = capacity;
        self
    }

    /// Chunks to allocate up front, before the first `create`.
    pub fn initial_chunks(mut self, chunks: usize) -> Self {
        self.initial_chunks = chunks;
        self
    }

    /// Builds the map.
    ///
    /// Fails with [`Error::CapacityExhausted`](crate::Error::CapacityExhausted),
    /// before allocating, if the requested initial chunks do not fit the
    /// 32-bit index space.
    pub fn build(self) -> Result<SlotMap> {
        let mut map = SlotMap::with_chunk_capacity(self.chunk_capacity);
        map.grow_chunks(self.initial_chunks)?;
        Ok(map)
    }
}

impl Default for SlotMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
