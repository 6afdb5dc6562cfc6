//! SlotMap: generational object table over chunked storage.

use core::num::NonZeroUsize;
use core::ptr::NonNull;

use crate::builder::SlotMapBuilder;
use crate::chunked_storage::{ChunkedStorage, DEFAULT_CHUNK_CAPACITY};
use crate::error::{Error, Result};
use crate::free_list::FreeList;
use crate::object::Slot;
use crate::{Handle, Object};

/// A table of [`Object`]s addressed by generational [`Handle`]s.
///
/// `create`, `get` and `destroy` are O(1). Objects live in fixed-size chunks
/// that are never moved or freed while the map exists, so the address of a
/// live object does not change when the map grows.
///
/// # Examples
///
/// ```
/// use chunked_slotmap::{Error, SlotMap};
///
/// let mut map = SlotMap::new();
/// let h = map.create();
/// assert_eq!(map.get(h).map(|o| o.id()), Some(h));
///
/// map.destroy(h).unwrap();
/// assert!(map.get(h).is_none());
/// assert_eq!(map.destroy(h), Err(Error::StaleHandle(h)));
/// ```
#[derive(Debug)]
pub struct SlotMap {
    storage: ChunkedStorage,
    free: FreeList,
    len: usize,
    retired: usize,
}

impl SlotMap {
    /// Creates an empty map with the default chunk capacity. Nothing is
    /// allocated until the first `create`.
    pub fn new() -> Self {
        Self::with_chunk_capacity(DEFAULT_CHUNK_CAPACITY)
    }

    pub fn with_chunk_capacity(chunk_capacity: NonZeroUsize) -> Self {
        Self {
            storage: ChunkedStorage::new(chunk_capacity),
            free: FreeList::new(),
            len: 0,
            retired: 0,
        }
    }

    pub fn builder() -> SlotMapBuilder {
        SlotMapBuilder::new()
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of slots allocated, live or not.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    pub fn chunk_count(&self) -> usize {
        self.storage.chunk_count()
    }

    pub fn chunk_capacity(&self) -> usize {
        self.storage.chunk_capacity()
    }

    /// Slots that `create` can hand out without growing.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Slots taken out of circulation because their generation counter
    /// saturated.
    pub fn retired_count(&self) -> usize {
        self.retired
    }

    /// Creates a new object and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if the map already spans the whole 32-bit index space and has
    /// no free slot left. Use [`try_create`](Self::try_create) to handle that
    /// case.
    pub fn create(&mut self) -> Handle {
        match self.try_create() {
            Ok(handle) => handle,
            Err(e) => panic!("cannot create object: {e}"),
        }
    }

    /// Creates a new object, reporting index-space exhaustion as an error.
    pub fn try_create(&mut self) -> Result<Handle> {
        let index = self.pop_or_grow()?;
        let slot = self
            .storage
            .slot_mut(index)
            .expect("free index must lie within allocated storage");
        let handle = slot.occupy();
        self.len += 1;
        Ok(handle)
    }

    /// Looks up the live object for `handle`. Stale, never-issued and
    /// out-of-range handles all yield `None`.
    #[inline]
    pub fn get(&self, handle: Handle) -> Option<&Object> {
        self.storage
            .slot(handle.index())
            .filter(|slot| slot.matches(handle))
            .map(Slot::object)
    }

    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Object> {
        self.storage
            .slot_mut(handle.index())
            .filter(|slot| slot.matches(handle))
            .map(Slot::object_mut)
    }

    /// Address of the live object for `handle`.
    ///
    /// The address is the same for every call while the object lives, and
    /// later growth of the map never changes it. The pointer is derived from
    /// a shared borrow and is read-only: never write through it. It must not
    /// be dereferenced after `handle` is destroyed, nor while a mutable
    /// borrow of the map exists.
    #[inline]
    pub fn get_ptr(&self, handle: Handle) -> Option<NonNull<Object>> {
        self.get(handle).map(NonNull::from)
    }

    /// Writable address of the live object for `handle`.
    ///
    /// Same address as [`get_ptr`](Self::get_ptr). Writes through it are
    /// allowed until the next borrow of the map or the destruction of
    /// `handle`, whichever comes first.
    #[inline]
    pub fn get_mut_ptr(&mut self, handle: Handle) -> Option<NonNull<Object>> {
        self.get_mut(handle).map(NonNull::from)
    }

    #[inline]
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Destroys the object behind `handle`.
    ///
    /// The slot's generation advances, so `handle` never resolves again, even
    /// once the slot is reused. A handle that is not live is rejected with
    /// [`Error::StaleHandle`] and the map is left untouched.
    pub fn destroy(&mut self, handle: Handle) -> Result<()> {
        let index = handle.index();
        let Some(slot) = self
            .storage
            .slot_mut(index)
            .filter(|slot| slot.matches(handle))
        else {
            log::debug!("rejected destroy of stale handle {handle}");
            return Err(Error::StaleHandle(handle));
        };

        self.len -= 1;
        if slot.vacate() {
            self.free.push(index);
        } else {
            self.retired += 1;
            log::warn!("retiring slot {index}: generation counter saturated");
        }
        Ok(())
    }

    /// Destroys every live object. Allocated chunks are kept.
    pub fn clear(&mut self) {
        if self.len == 0 {
            return;
        }
        for chunk in self.storage.chunks_mut() {
            for slot in chunk.iter_mut().filter(|slot| slot.is_occupied()) {
                let index = slot.tag().index();
                if slot.vacate() {
                    self.free.push(index);
                } else {
                    self.retired += 1;
                    log::warn!("retiring slot {index}: generation counter saturated");
                }
            }
        }
        self.len = 0;
    }

    /// Grows the map so that at least `additional` objects can be created
    /// without further allocation.
    ///
    /// Fails with [`Error::CapacityExhausted`], without allocating, if the
    /// whole chunks needed would not fit the 32-bit index space.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let missing = additional.saturating_sub(self.free.len());
        if missing == 0 {
            return Ok(());
        }
        let last = self
            .storage
            .capacity()
            .checked_add(missing - 1)
            .and_then(|last| u32::try_from(last).ok())
            .ok_or(Error::CapacityExhausted)?;
        let fresh = self.storage.ensure_capacity_for(last)?;
        self.free.extend_descending(fresh);
        Ok(())
    }

    /// Iterates live objects in index order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            chunks: self.storage.chunks(),
            slots: Default::default(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            chunks: self.storage.chunks_mut(),
            slots: Default::default(),
            remaining: self.len,
        }
    }

    /// Appends `chunks` chunks, all or nothing.
    pub(crate) fn grow_chunks(&mut self, chunks: usize) -> Result<()> {
        let total = self
            .storage
            .chunk_count()
            .checked_add(chunks)
            .ok_or(Error::CapacityExhausted)?;
        if !self.storage.can_grow_to(total) {
            return Err(Error::CapacityExhausted);
        }
        for _ in 0..chunks {
            let fresh = self.storage.grow()?;
            self.free.extend_descending(fresh);
        }
        Ok(())
    }

    fn pop_or_grow(&mut self) -> Result<u32> {
        if let Some(index) = self.free.pop() {
            return Ok(index);
        }
        let fresh = self.storage.grow()?;
        let first = fresh.start;
        self.free.extend_descending(first + 1..fresh.end);
        Ok(first)
    }

    #[cfg(test)]
    pub(crate) fn force_generation(&mut self, index: u32, generation: u32) {
        self.storage
            .slot_mut(index)
            .expect("index in range")
            .set_generation(generation);
    }
}

impl Default for SlotMap {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a SlotMap {
    type Item = (Handle, &'a Object);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut SlotMap {
    type Item = (Handle, &'a mut Object);
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Iterator over live objects in a [`SlotMap`].
#[derive(Debug)]
pub struct Iter<'a> {
    chunks: core::slice::Iter<'a, Box<[Slot]>>,
    slots: core::slice::Iter<'a, Slot>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (Handle, &'a Object);

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            match self.slots.next() {
                Some(slot) if slot.is_occupied() => {
                    self.remaining -= 1;
                    return Some((slot.tag(), slot.object()));
                }
                Some(_) => {}
                None => self.slots = self.chunks.next()?.iter(),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Mutable iterator over live objects in a [`SlotMap`].
#[derive(Debug)]
pub struct IterMut<'a> {
    chunks: core::slice::IterMut<'a, Box<[Slot]>>,
    slots: core::slice::IterMut<'a, Slot>,
    remaining: usize,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (Handle, &'a mut Object);

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            match self.slots.next() {
                Some(slot) if slot.is_occupied() => {
                    self.remaining -= 1;
                    let handle = slot.tag();
                    return Some((handle, slot.object_mut()));
                }
                Some(_) => {}
                None => self.slots = self.chunks.next()?.iter_mut(),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IterMut<'_> {}
