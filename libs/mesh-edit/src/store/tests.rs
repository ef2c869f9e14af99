//! # Element Store Tests

use super::*;

fn store_with(values: &[i32]) -> (ElementStore<EdgeId, i32>, Vec<EdgeId>) {
    let mut store = ElementStore::new();
    let keys = values.iter().map(|&v| store.insert(v)).collect();
    (store, keys)
}

#[test]
fn test_insert_assigns_creation_order() {
    let (store, keys) = store_with(&[10, 20, 30]);
    assert_eq!(store.len(), 3);
    assert!(keys[0] < keys[1] && keys[1] < keys[2]);
    assert_eq!(store.keys().collect::<Vec<_>>(), keys);
}

#[test]
fn test_erase_is_idempotent_and_deferred() {
    let (mut store, keys) = store_with(&[1, 2, 3]);
    assert!(store.erase(keys[1]));
    assert!(!store.erase(keys[1]));
    assert_eq!(store.len(), 2);
    assert_eq!(store.pending_erasures(), 1);
    assert!(store.is_erased(keys[1]));
    assert!(!store.is_live(keys[1]));
    assert_eq!(store.get(keys[1]), Some(&2));
}

#[test]
fn test_compaction_keeps_survivor_handles() {
    let (mut store, keys) = store_with(&[1, 2, 3]);
    store.erase(keys[0]);
    assert_eq!(store.compact(), 1);
    assert_eq!(store.get(keys[0]), None);
    assert!(!store.is_erased(keys[0]));
    assert_eq!(store[keys[1]], 2);
    assert_eq!(store[keys[2]], 3);
    assert_eq!(store.keys().collect::<Vec<_>>(), vec![keys[1], keys[2]]);
    assert_eq!(store.pending_erasures(), 0);
}

#[test]
fn test_erasing_compacted_handle_is_noop() {
    let (mut store, keys) = store_with(&[1]);
    store.erase(keys[0]);
    store.compact();
    assert!(!store.erase(keys[0]));
    assert_eq!(store.len(), 0);
}

#[test]
fn test_clear_invalidates_old_generation() {
    let (mut store, keys) = store_with(&[1, 2]);
    store.clear();
    let fresh = store.insert(7);
    assert_eq!(fresh.index(), keys[0].index());
    assert_ne!(fresh, keys[0]);
    assert_eq!(store.get(keys[0]), None);
    assert_eq!(store[fresh], 7);
}

#[test]
fn test_invalid_sentinel_never_resolves() {
    let (store, _) = store_with(&[1]);
    assert_eq!(store.get(EdgeId::INVALID), None);
    assert!(!EdgeId::INVALID.is_valid());
    assert_eq!(format!("{:?}", EdgeId::INVALID), "e<invalid>");
}

#[test]
fn test_iter_skips_erased() {
    let (mut store, keys) = store_with(&[5, 6, 7]);
    store.erase(keys[2]);
    let values: Vec<i32> = store.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, vec![5, 6]);
    assert_eq!(store.erased_keys().collect::<Vec<_>>(), vec![keys[2]]);
}

#[test]
fn test_element_ref_display() {
    let (_, keys) = store_with(&[1, 2]);
    let r = ElementRef::from(keys[1]);
    assert_eq!(r.to_string(), "edge e1");
}

/// Test that a compacted slot is reused under a new generation.
#[test]
fn test_compacted_slot_is_reused() {
    let (mut store, keys) = store_with(&[1, 2, 3]);
    store.erase(keys[1]);
    store.compact();
    assert_eq!(store.vacant_slots(), 1);

    let fresh = store.insert(9);
    assert_eq!(fresh.index(), keys[1].index());
    assert_ne!(fresh, keys[1]);
    assert_eq!(store.get(keys[1]), None);
    assert!(!store.is_live(keys[1]));
    assert_eq!(store[fresh], 9);
    assert_eq!(store.capacity_hint(), 3);
    assert_eq!(store.vacant_slots(), 0);
}

/// Test that erase and compact cycles keep the slot count flat.
#[test]
fn test_erase_insert_cycles_do_not_grow_storage() {
    let (mut store, keys) = store_with(&[0, 1]);
    let mut previous = vec![keys[1]];
    let mut current = keys[1];
    for round in 0..50 {
        store.erase(current);
        store.compact();
        current = store.insert(round);
        assert!(previous.iter().all(|&old| store.get(old).is_none()));
        previous.push(current);
    }
    assert_eq!(store.capacity_hint(), 2);
    assert_eq!(store.len(), 2);
    assert_eq!(store[keys[0]], 0);
}

/// Test that a successor store never resolves handles from a reused slot.
#[test]
fn test_successor_outlives_reused_generations() {
    let (mut store, keys) = store_with(&[1]);
    store.erase(keys[0]);
    store.compact();
    let reused = store.insert(2);
    let mut next = store.successor();
    let fresh = next.insert(3);
    assert_ne!(fresh, reused);
    assert_ne!(fresh, keys[0]);
    assert_eq!(next.get(reused), None);
}
