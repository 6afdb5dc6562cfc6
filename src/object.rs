use crate::Handle;

/// The per-slot payload record.
///
/// Every object carries its own identity: `id()` equals the handle that
/// `create` returned for it. The remaining storage is a single fixed-size
/// user field.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Object {
    id: Handle,
    data: u64,
}

impl Object {
    #[inline]
    pub fn id(&self) -> Handle {
        self.id
    }

    #[inline]
    pub fn data(&self) -> u64 {
        self.data
    }

    #[inline]
    pub fn set_data(&mut self, data: u64) {
        self.data = data;
    }
}

/// One storage cell. The object's tag always holds the slot's current
/// `(index, generation)`; `occupied` says whether that tag is live.
#[derive(Debug)]
pub(crate) struct Slot {
    object: Object,
    occupied: bool,
}

impl Slot {
    /// An unborn slot at generation zero.
    pub(crate) fn vacant(index: u32) -> Self {
        Self {
            object: Object {
                id: Handle::encode(index, 0),
                data: 0,
            },
            occupied: false,
        }
    }

    #[inline]
    pub(crate) fn tag(&self) -> Handle {
        self.object.id
    }

    #[inline]
    pub(crate) fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// True iff this slot is live under exactly `handle`.
    #[inline]
    pub(crate) fn matches(&self, handle: Handle) -> bool {
        self.occupied && self.object.id == handle
    }

    #[inline]
    pub(crate) fn object(&self) -> &Object {
        &self.object
    }

    #[inline]
    pub(crate) fn object_mut(&mut self) -> &mut Object {
        &mut self.object
    }

    /// Free -> Occupied. The generation is left as carried.
    pub(crate) fn occupy(&mut self) -> Handle {
        debug_assert!(!self.occupied);
        self.occupied = true;
        self.object.data = 0;
        self.object.id
    }

    /// Occupied -> Free, advancing the carried generation. Returns `false`
    /// when the generation counter is saturated; the tag then stays at its
    /// last value and the slot must not be reused.
    pub(crate) fn vacate(&mut self) -> bool {
        debug_assert!(self.occupied);
        self.occupied = false;
        match self.object.id.next_generation() {
            Some(next) => {
                self.object.id = next;
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_generation(&mut self, generation: u32) {
        self.object.id = Handle::encode(self.object.id.index(), generation);
    }
}
