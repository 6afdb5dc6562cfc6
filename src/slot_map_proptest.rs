#![cfg(test)]

// Property tests for SlotMap kept inside the crate so they can use the
// crate-private chunk sizes and free-list state.

use crate::{Error, Handle, Object, SlotMap};
use core::num::NonZeroUsize;
use core::ptr::NonNull;
use proptest::prelude::*;
use slotmap::{DefaultKey, SlotMap as ModelMap};
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations: indices select among the currently live or stale
// handles (modulo their count) so shrinking keeps scenarios meaningful.
#[derive(Clone, Debug)]
enum Op {
    Create,
    Destroy(usize),
    DestroyStale(usize),
    Get(usize),
    SetData(usize, u64),
    Reserve(usize),
    Clear,
    Iterate,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        6 => Just(Op::Create),
        4 => any::<usize>().prop_map(Op::Destroy),
        1 => any::<usize>().prop_map(Op::DestroyStale),
        3 => any::<usize>().prop_map(Op::Get),
        2 => (any::<usize>(), any::<u64>()).prop_map(|(i, d)| Op::SetData(i, d)),
        1 => (0usize..20).prop_map(Op::Reserve),
        1 => Just(Op::Clear),
        1 => Just(Op::Iterate),
    ];
    proptest::collection::vec(op, 1..200)
}

// Property: state-machine equivalence against the `slotmap` crate.
// Invariants exercised across random operation sequences:
// - Every created handle is new: never equal to any handle issued before.
// - Live handles resolve to an object whose id is the handle and whose data
//   matches the model; stale handles never resolve and cannot be destroyed.
// - Addresses of live objects never change, whatever growth happens.
// - `len`, `iter` and the model agree after each op; free + live + retired
//   slots account for the whole capacity.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(chunk in 1usize..=9, ops in arb_ops()) {
        let mut sut = SlotMap::with_chunk_capacity(NonZeroUsize::new(chunk).unwrap());
        let mut model: ModelMap<DefaultKey, u64> = ModelMap::new();
        let mut live: Vec<(Handle, DefaultKey)> = Vec::new();
        let mut stale: Vec<Handle> = Vec::new();
        let mut issued: BTreeSet<Handle> = BTreeSet::new();
        let mut addrs: HashMap<Handle, NonNull<Object>> = HashMap::new();

        for op in ops {
            match op {
                Op::Create => {
                    let h = sut.create();
                    prop_assert!(issued.insert(h), "handle {} issued twice", h);
                    let k = model.insert(0);
                    live.push((h, k));
                    addrs.insert(h, sut.get_ptr(h).expect("fresh handle resolves"));
                }
                Op::Destroy(i) => {
                    if !live.is_empty() {
                        let (h, k) = live.swap_remove(i % live.len());
                        prop_assert_eq!(sut.destroy(h), Ok(()));
                        prop_assert!(model.remove(k).is_some());
                        addrs.remove(&h);
                        stale.push(h);
                    }
                }
                Op::DestroyStale(i) => {
                    if !stale.is_empty() {
                        let h = stale[i % stale.len()];
                        let before = (sut.len(), sut.free_count());
                        prop_assert_eq!(sut.destroy(h), Err(Error::StaleHandle(h)));
                        prop_assert_eq!((sut.len(), sut.free_count()), before);
                    }
                }
                Op::Get(i) => {
                    if !live.is_empty() {
                        let (h, k) = live[i % live.len()];
                        let obj = sut.get(h).expect("live handle resolves");
                        prop_assert_eq!(obj.id(), h);
                        prop_assert_eq!(obj.data(), model[k]);
                    }
                }
                Op::SetData(i, d) => {
                    if !live.is_empty() {
                        let (h, k) = live[i % live.len()];
                        sut.get_mut(h).expect("live handle resolves").set_data(d);
                        model[k] = d;
                    }
                }
                Op::Reserve(n) => {
                    prop_assert_eq!(sut.reserve(n), Ok(()));
                    prop_assert!(sut.free_count() >= n);
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                    stale.extend(live.drain(..).map(|(h, _)| h));
                    addrs.clear();
                }
                Op::Iterate => {
                    let seen: BTreeSet<Handle> = sut.iter().map(|(h, _)| h).collect();
                    let expected: BTreeSet<Handle> = live.iter().map(|&(h, _)| h).collect();
                    prop_assert_eq!(seen, expected);
                }
            }

            // Post-conditions after each op
            for &h in &stale {
                prop_assert!(sut.get(h).is_none(), "stale handle {} resolved", h);
            }
            for (&h, &p) in &addrs {
                prop_assert_eq!(sut.get_ptr(h), Some(p));
            }
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(
                sut.len() + sut.free_count() + sut.retired_count(),
                sut.capacity()
            );
            prop_assert_eq!(sut.capacity(), sut.chunk_count() * chunk);
        }
    }
}

// Property: growth happens only when no freed index is available. After
// destroying everything, recreating the same number of objects reuses
// existing chunks exclusively.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_reuse_before_growth(chunk in 1usize..=64, n in 1usize..600, rounds in 1usize..4) {
        let mut m = SlotMap::with_chunk_capacity(NonZeroUsize::new(chunk).unwrap());
        let first: Vec<Handle> = (0..n).map(|_| m.create()).collect();
        let chunks = m.chunk_count();
        prop_assert_eq!(chunks, n.div_ceil(chunk));

        let mut current = first;
        for _ in 0..rounds {
            for &h in &current {
                m.destroy(h).unwrap();
            }
            let next: Vec<Handle> = (0..n).map(|_| m.create()).collect();
            prop_assert_eq!(m.chunk_count(), chunks);
            for (&old, &new) in current.iter().zip(&next) {
                prop_assert!(m.get(old).is_none());
                prop_assert!(m.get(new).is_some());
            }
            current = next;
        }
    }
}
