use chunked_slotmap::{Error, Handle, SlotMap, DEFAULT_CHUNK_CAPACITY};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::ptr::NonNull;

const OBJECTS: usize = 1000;
const CYCLES: usize = 20;

#[test]
fn bulk_create_get_destroy_cycles() {
    let mut m = SlotMap::new();
    let mut first_cycle_chunks = None;
    let mut addr_by_index: HashMap<u32, NonNull<chunked_slotmap::Object>> = HashMap::new();

    for cycle in 0..CYCLES {
        let ids: Vec<Handle> = (0..OBJECTS).map(|_| m.create()).collect();
        assert_eq!(m.len(), OBJECTS);

        for &id in &ids {
            let obj = m.get(id).expect("live handle resolves");
            assert_eq!(obj.id(), id);
            assert_eq!(id.generation() as usize, cycle);

            // The same index always lives at the same address.
            let ptr = m.get_ptr(id).unwrap();
            let prev = *addr_by_index.entry(id.index()).or_insert(ptr);
            assert_eq!(prev, ptr);
        }

        for &id in &ids {
            m.destroy(id).unwrap();
        }
        assert!(m.is_empty());

        for &id in &ids {
            assert!(m.get(id).is_none());
        }

        let chunks = *first_cycle_chunks.get_or_insert(m.chunk_count());
        assert_eq!(m.chunk_count(), chunks, "cycle {cycle} allocated new chunks");
    }

    let expected_chunks = OBJECTS.div_ceil(DEFAULT_CHUNK_CAPACITY.get());
    assert_eq!(m.chunk_count(), expected_chunks);
}

#[test]
fn stale_handle_never_aliases_new_occupant() {
    let mut m = SlotMap::new();
    let h1 = m.create();
    m.destroy(h1).unwrap();
    let h2 = m.create();

    assert_eq!(h1.index(), h2.index());
    assert_ne!(h1, h2);
    assert!(m.get(h1).is_none());
    assert_eq!(m.get(h2).map(|o| o.id()), Some(h2));

    // Many more reuse cycles later the first handle is still dead.
    let mut last = h2;
    for _ in 0..100 {
        m.destroy(last).unwrap();
        last = m.create();
        assert_eq!(last.index(), h1.index());
        assert!(m.get(h1).is_none());
        assert!(m.get(h2).is_none());
    }
}

#[test]
fn address_survives_chunk_growth() {
    let mut m = SlotMap::builder()
        .chunk_capacity(NonZeroUsize::new(4).unwrap())
        .build()
        .unwrap();
    let early: Vec<Handle> = (0..4).map(|_| m.create()).collect();
    let addrs: Vec<_> = early.iter().map(|&h| m.get_ptr(h).unwrap()).collect();
    assert_eq!(m.chunk_count(), 1);

    for _ in 0..1000 {
        m.create();
    }
    assert!(m.chunk_count() > 200);

    for (&h, &p) in early.iter().zip(&addrs) {
        assert_eq!(m.get_ptr(h), Some(p));
        // SAFETY: `h` is live and no mutable borrow of `m` exists.
        let obj = unsafe { p.as_ref() };
        assert_eq!(obj.id(), h);
    }
}

#[test]
fn destroy_misuse_is_reported() {
    let mut m = SlotMap::new();
    let h = m.create();
    m.destroy(h).unwrap();

    match m.destroy(h) {
        Err(Error::StaleHandle(bad)) => assert_eq!(bad, h),
        other => panic!("unexpected result: {other:?}"),
    }

    let never_issued = Handle::from_raw(0xDEAD_BEEF_0000_0001);
    assert_eq!(m.destroy(never_issued), Err(Error::StaleHandle(never_issued)));
    assert!(m.get(never_issued).is_none());
}

#[test]
fn handles_round_trip_through_raw_integers() {
    let mut m = SlotMap::new();
    let handles: Vec<Handle> = (0..10).map(|_| m.create()).collect();
    let raw: Vec<u64> = handles.iter().map(|h| h.into_raw()).collect();

    for (&h, &r) in handles.iter().zip(&raw) {
        let back = Handle::from_raw(r);
        assert_eq!(back, h);
        assert!(m.contains(back));
    }
}

#[test]
fn reserve_beyond_index_space_is_an_error() {
    let mut m = SlotMap::new();
    assert_eq!(
        m.reserve(u32::MAX as usize + 1),
        Err(Error::CapacityExhausted)
    );
    assert_eq!(m.chunk_count(), 0);
    assert_eq!(m.capacity(), 0);

    let h = m.create();
    assert!(m.contains(h));
}
