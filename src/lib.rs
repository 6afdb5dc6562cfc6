//! chunked-slotmap: a single-threaded table of fixed-size objects addressed
//! by generational handles, with stable object addresses.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: O(1) create, lookup and destroy with detection of handles whose
//!   slot has since been recycled for another object.
//! - Layers:
//!   - `Handle`: pure codec packing a 32-bit generation and a 32-bit slot
//!     index into one `u64`.
//!   - `FreeList`: LIFO stack of unoccupied indices, with a debug-only
//!     check that no index is ever free twice.
//!   - `ChunkedStorage`: growable list of fixed-capacity boxed chunks.
//!     Growth appends a chunk and never moves existing slots.
//!   - `SlotMap`: public API composing the three; owns the generation
//!     check.
//!
//! Why chunks and generations?
//! - A single resizable array relocates every slot when it grows, so any
//!   address handed out earlier dangles. Chunks are allocated once and kept,
//!   so addresses stay put.
//! - A bare index is ambiguous once the slot is reused: a stale id would
//!   resolve to the new occupant. Each slot carries a generation that
//!   advances on destroy, and a handle only resolves when its generation
//!   matches.
//!
//! Slot lifecycle
//! - Unborn -> Free when its chunk is grown.
//! - Free -> Occupied(g) on create; g is the generation the slot carries.
//! - Occupied(g) -> Free on destroy; the carried generation becomes g + 1.
//!
//! Misuse and overflow
//! - `destroy` validates the handle first and reports `Error::StaleHandle`
//!   for stale, double-destroyed or never-issued handles; state is not
//!   touched.
//! - Generations saturate. A slot destroyed at generation `u32::MAX` is
//!   retired: it is never handed out again, so no old handle can alias it.
//! - Index space is 32 bits; growing past it is `Error::CapacityExhausted`.
//!
//! Notes and non-goals
//! - Single-threaded: mutation goes through `&mut SlotMap`.
//! - Chunks are never released back to the allocator, even by `clear`.
//! - The payload is the fixed `Object` record, not a generic value.
//! - No persistence; state lives as long as the map.

mod builder;
mod chunked_storage;
mod error;
mod free_list;
mod handle;
mod object;
mod slot_map;
mod slot_map_proptest;

// Public surface
pub use builder::SlotMapBuilder;
pub use chunked_storage::DEFAULT_CHUNK_CAPACITY;
pub use error::{Error, Result};
pub use handle::Handle;
pub use object::Object;
pub use slot_map::{Iter, IterMut, SlotMap};
