use crate::error::PagingError;
use crate::evict::{evict_one, select_victim};
use crate::paging::{EntryState, PagingStore};

/// Store with the given `(directory, table, stamp)` leaves resident.
/// Directory frames are created on the way as needed.
fn seeded(leaves: &[(usize, usize, u64)]) -> PagingStore {
    let mut store = PagingStore::new();
    store.set_capacity(512).expect("capacity");
    for &(directory_index, table_index, stamp) in leaves {
        if !store.directory_entry(directory_index).is_present() {
            store
                .allocate_directory_frame(directory_index, stamp)
                .expect("table frame");
        }
        store
            .allocate_leaf_frame(directory_index, table_index, stamp)
            .expect("leaf frame");
    }
    store
}

#[test]
fn test_select_victim_empty_store() {
    let store = PagingStore::new();
    assert_eq!(select_victim(&store), None);
}

#[test]
fn test_evict_one_without_candidates_fails() {
    let mut store = PagingStore::new();
    match evict_one(&mut store) {
        Err(PagingError::NoVictim) => {}
        other => panic!("expected NoVictim, got {other:?}"),
    }
}

#[test]
fn test_select_victim_minimum_stamp() {
    let store = seeded(&[(0, 0, 5), (0, 1, 3), (0, 2, 8)]);
    let victim = select_victim(&store).expect("candidates exist");
    assert_eq!(
        (victim.directory_index, victim.table_index, victim.last_access),
        (0, 1, 3)
    );
}

#[test]
fn test_select_victim_tie_takes_scan_order() {
    // Insertion order deliberately differs from index order.
    let store = seeded(&[(0, 5, 4), (0, 1, 4), (1, 0, 4)]);
    let victim = select_victim(&store).expect("candidates exist");
    assert_eq!((victim.directory_index, victim.table_index), (0, 1));
}

#[test]
fn test_directory_entries_are_not_candidates() {
    // The table frame carries the oldest stamp; the leaf still goes.
    let mut store = PagingStore::new();
    store.set_capacity(512).expect("capacity");
    store.allocate_directory_frame(0, 1).expect("table frame");
    store.allocate_leaf_frame(0, 0, 9).expect("leaf frame");

    let victim = select_victim(&store).expect("leaf available");
    assert_eq!((victim.directory_index, victim.table_index), (0, 0));
    assert_eq!(victim.last_access, 9);
}

#[test]
fn test_evict_one_flips_state() {
    let mut store = seeded(&[(0, 0, 2), (0, 1, 7)]);
    store.mark_leaf_dirty(0, 0).expect("resident leaf");

    let evicted = evict_one(&mut store).expect("victim available");
    assert_eq!((evicted.directory_index, evicted.table_index), (0, 0));
    assert!(evicted.dirty);
    assert_eq!(evicted.last_access, 2);
    assert_eq!(store.working_set().resident(), 2);
    assert!(matches!(
        store.leaf_entry(0, 0).expect("table").state(),
        EntryState::Evicted(_)
    ));

    // The next sweep skips the evicted entry.
    let next = select_victim(&store).expect("one candidate left");
    assert_eq!((next.directory_index, next.table_index), (0, 1));
}
