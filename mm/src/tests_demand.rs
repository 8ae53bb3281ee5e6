use crate::addr::VirtAddr;
use crate::defs::{CYCLES_MEMORY_ACCESS, CYCLES_SWAP_IN, CYCLES_WRITE_BACK, WORD_BYTES};
use crate::demand::{DemandPager, ResolveOutcome};
use crate::error::PagingError;
use crate::observe::{EntryLocation, EventPhase, PagingEvent};
use crate::paging::EntryState;
use crate::request::Request;
use crate::test_fixtures::{RecordingObserver, addr, pager, pager_with};

#[test]
fn test_first_touch_allocates_both_levels() {
    let mut vm = pager(4);
    let translation = vm
        .apply(Request::read(addr(0, 0, 0)))
        .expect("first access")
        .expect("accesses yield a translation");
    assert_eq!(translation.directory, ResolveOutcome::Allocated);
    assert_eq!(translation.leaf, ResolveOutcome::Allocated);

    let stats = vm.stats();
    assert_eq!(stats.accesses, 1);
    assert_eq!(stats.page_faults, 1, "only the leaf ingress counts");
    assert_eq!(stats.evictions, 0);
    assert_eq!(stats.frames_allocated, 2);
    assert_eq!(stats.table_frames, 1);
    assert_eq!(stats.leaf_frames, 1);
    assert_eq!(stats.working_set, 2);
    assert_eq!(stats.cycles, 2 * CYCLES_MEMORY_ACCESS);
    assert_eq!(stats.baseline_cycles, CYCLES_MEMORY_ACCESS);
}

#[test]
fn test_second_touch_moves_nothing() {
    let mut vm = pager(4);
    vm.apply(Request::read(addr(0, 0, 0))).expect("first access");
    let translation = vm
        .apply(Request::read(addr(0, 0, 1)))
        .expect("second access")
        .expect("accesses yield a translation");
    assert_eq!(translation.directory, ResolveOutcome::Resident);
    assert_eq!(translation.leaf, ResolveOutcome::Resident);

    let stats = vm.stats();
    assert_eq!(stats.page_faults, 1);
    assert_eq!(stats.frames_allocated, 2);
    assert_eq!(stats.cycles, 4 * CYCLES_MEMORY_ACCESS);
}

#[test]
fn test_eviction_crossing_directories() {
    let mut vm = pager(1);
    vm.apply(Request::read(addr(0, 0, 0))).expect("first access");
    vm.apply(Request::read(addr(1, 0, 0))).expect("second access");

    let stats = vm.stats();
    assert_eq!(stats.page_faults, 2);
    assert_eq!(stats.evictions, 1);
    assert_eq!(stats.working_set, 3, "two tables and the new leaf stay in");
    assert_eq!(u64::from(stats.working_set), vm.store().count_resident());

    let first = vm.store().leaf_entry(0, 0).expect("table resident");
    assert!(matches!(first.state(), EntryState::Evicted(_)));
    let second = vm.store().leaf_entry(1, 0).expect("table resident");
    assert!(second.is_present());
}

#[test]
fn test_repeated_writes_reuse_one_frame() {
    let mut vm = pager(4);
    for value in 0..4 {
        vm.apply(Request::write(addr(0, 0, 0), value))
            .expect("write");
    }

    let stats = vm.stats();
    assert_eq!(stats.accesses, 4);
    assert_eq!(stats.page_faults, 1, "no new faults after the first touch");
    assert_eq!(stats.evictions, 0);
    assert_eq!(stats.leaf_frames, 1);
    assert_eq!(stats.frames_allocated, 2);

    let entry = vm.store().leaf_entry(0, 0).expect("table resident");
    assert!(entry.dirty());
    assert_eq!(entry.last_access(), 4);
}

#[test]
fn test_lru_evicts_oldest_leaf_first() {
    let mut vm = pager(2);
    vm.apply(Request::read(addr(0, 0, 0))).expect("leaf a");
    vm.apply(Request::read(addr(0, 1, 0))).expect("leaf b");
    vm.apply(Request::read(addr(0, 2, 0))).expect("leaf c");

    assert_eq!(vm.stats().evictions, 1);
    let a = vm.store().leaf_entry(0, 0).expect("table resident");
    assert!(
        matches!(a.state(), EntryState::Evicted(_)),
        "the oldest leaf goes, not the latest survivor"
    );
    assert!(vm.store().leaf_entry(0, 1).expect("table").is_present());
    assert!(vm.store().leaf_entry(0, 2).expect("table").is_present());
}

#[test]
fn test_rereading_a_leaf_defers_its_eviction() {
    let mut vm = pager(2);
    vm.apply(Request::read(addr(0, 0, 0))).expect("leaf a");
    vm.apply(Request::read(addr(0, 1, 0))).expect("leaf b");
    vm.apply(Request::read(addr(0, 0, 0))).expect("touch a again");
    vm.apply(Request::read(addr(0, 2, 0)))
        .expect("leaf c forces an eviction");

    // The re-read moved a's stamp past b's, so b is now the oldest.
    assert_eq!(vm.stats().evictions, 1);
    assert!(vm.store().leaf_entry(0, 0).expect("table").is_present());
    assert!(matches!(
        vm.store().leaf_entry(0, 1).expect("table").state(),
        EntryState::Evicted(_)
    ));
}

#[test]
fn test_dirty_write_back_charged_once() {
    let mut vm = pager(1);
    vm.apply(Request::write(addr(0, 0, 0), 7))
        .expect("dirty the page");
    vm.apply(Request::read(addr(1, 0, 0)))
        .expect("force the dirty eviction");
    vm.apply(Request::read(addr(0, 0, 0)))
        .expect("swap the page back");
    vm.apply(Request::read(addr(2, 0, 0)))
        .expect("force the clean eviction");

    let stats = vm.stats();
    assert_eq!(stats.accesses, 4);
    assert_eq!(stats.page_faults, 4);
    assert_eq!(stats.evictions, 3);
    // Four translations, one swap-in, one write-back. The second
    // eviction of the same page is clean and costs nothing extra.
    assert_eq!(
        stats.cycles,
        4 * 2 * CYCLES_MEMORY_ACCESS + CYCLES_SWAP_IN + CYCLES_WRITE_BACK
    );
    assert_eq!(stats.baseline_cycles, 4 * CYCLES_MEMORY_ACCESS);
}

#[test]
fn test_swap_in_restores_the_same_frame() {
    let mut vm = pager(1);
    vm.apply(Request::read(addr(0, 0, 0))).expect("first touch");
    let original = vm
        .store()
        .leaf_entry(0, 0)
        .expect("table resident")
        .frame()
        .expect("bound on first touch");

    vm.apply(Request::read(addr(1, 0, 0))).expect("force eviction");
    assert!(matches!(
        vm.store().leaf_entry(0, 0).expect("table").state(),
        EntryState::Evicted(_)
    ));

    vm.apply(Request::read(addr(0, 0, 0))).expect("swap back in");
    let entry = vm.store().leaf_entry(0, 0).expect("table resident");
    assert_eq!(entry.state(), EntryState::Resident(original));
}

#[test]
fn test_swap_in_stamps_the_clock_and_scrubs_dirty() {
    let mut vm = pager(1);
    vm.apply(Request::write(addr(0, 0, 0), 1)).expect("dirty");
    vm.apply(Request::read(addr(1, 0, 0))).expect("evict");
    vm.apply(Request::read(addr(0, 0, 0))).expect("swap in");

    let entry = vm.store().leaf_entry(0, 0).expect("table resident");
    assert_eq!(entry.last_access(), 3, "stamped with the current access");
    assert!(!entry.dirty(), "swap-in loads a clean copy");
}

#[test]
fn test_swap_in_refreshes_the_eviction_order() {
    let mut vm = pager(2);
    vm.apply(Request::read(addr(0, 0, 0))).expect("leaf a");
    vm.apply(Request::read(addr(0, 1, 0))).expect("leaf b");
    vm.apply(Request::read(addr(0, 2, 0))).expect("leaf c evicts a");
    vm.apply(Request::read(addr(0, 0, 0)))
        .expect("a comes back, b goes");
    vm.apply(Request::read(addr(0, 3, 0))).expect("leaf d");

    // The swap-in stamped a with the current clock, so d's ingress
    // takes c, the oldest resident, not the freshly returned a.
    let stats = vm.stats();
    assert_eq!(stats.evictions, 3);
    assert!(vm.store().leaf_entry(0, 0).expect("table").is_present());
    assert!(matches!(
        vm.store().leaf_entry(0, 2).expect("table").state(),
        EntryState::Evicted(_)
    ));
}

#[test]
fn test_capacity_applies_once() {
    let mut vm = pager(2);
    vm.apply(Request::Configure { capacity: 8 })
        .expect("repeat is reported, not fatal");
    assert_eq!(vm.stats().capacity, Some(2));
    assert_eq!(vm.stats().requests, 2);
}

#[test]
fn test_zero_capacity_leaves_the_pager_unconfigured() {
    let mut vm = DemandPager::new();
    vm.apply(Request::Configure { capacity: 0 })
        .expect("zero bound is reported, not fatal");
    assert_eq!(vm.stats().capacity, None);

    match vm.apply(Request::read(addr(0, 0, 0))) {
        Err(PagingError::CapacityUnset) => {}
        other => panic!("expected CapacityUnset, got {other:?}"),
    }
}

#[test]
fn test_access_before_capacity_is_fatal() {
    let mut vm = DemandPager::new();
    match vm.apply(Request::read(addr(0, 0, 0))) {
        Err(PagingError::CapacityUnset) => {}
        other => panic!("expected CapacityUnset, got {other:?}"),
    }

    let stats = vm.stats();
    assert_eq!(stats.accesses, 0);
    assert_eq!(stats.frames_allocated, 0);
}

#[test]
fn test_misaligned_address_touches_nothing() {
    let mut vm = pager(4);
    match vm.apply(Request::read(VirtAddr::new(0x1001))) {
        Err(PagingError::NotAligned { address, required }) => {
            assert_eq!(address, 0x1001);
            assert_eq!(required, WORD_BYTES);
        }
        other => panic!("expected NotAligned, got {other:?}"),
    }

    let stats = vm.stats();
    assert_eq!(stats.accesses, 0, "a rejected access never reaches the clock");
    assert_eq!(stats.frames_allocated, 0);
}

#[test]
fn test_reads_move_only_the_stamp() {
    let mut vm = pager(4);
    vm.apply(Request::read(addr(0, 0, 0))).expect("first");
    let frame = vm.store().leaf_entry(0, 0).expect("table").frame();

    vm.apply(Request::read(addr(0, 0, 0))).expect("second");
    let entry = vm.store().leaf_entry(0, 0).expect("table");
    assert_eq!(entry.frame(), frame);
    assert_eq!(entry.last_access(), 2);
    assert!(!entry.dirty());
    assert_eq!(vm.stats().page_faults, 1);
}

#[test]
fn test_working_set_tracks_resident_entries() {
    let mut vm = pager(2);
    let accesses = [
        addr(0, 0, 0),
        addr(0, 1, 0),
        addr(1, 0, 0),
        addr(0, 0, 0),
        addr(2, 5, 0),
        addr(1, 0, 0),
    ];
    for (i, a) in accesses.iter().enumerate() {
        vm.apply(Request::read(*a)).expect("access");
        let ws = vm.store().working_set();
        assert_eq!(
            u64::from(ws.resident()),
            vm.store().count_resident(),
            "after access {i}"
        );
        assert!(ws.peak() >= ws.resident());
    }
}

#[test]
fn test_observer_sees_each_event_twice() {
    let mut vm = pager_with(1, RecordingObserver::default());
    vm.apply(Request::write(addr(0, 0, 0), 3)).expect("first");
    vm.apply(Request::read(addr(1, 0, 0))).expect("second");

    let dir0 = EntryLocation::Directory { directory_index: 0 };
    let leaf00 = EntryLocation::Leaf {
        directory_index: 0,
        table_index: 0,
    };
    let dir1 = EntryLocation::Directory { directory_index: 1 };
    let leaf10 = EntryLocation::Leaf {
        directory_index: 1,
        table_index: 0,
    };
    let expected = vec![
        (EventPhase::Before, PagingEvent::Allocation { location: dir0 }, 0),
        (EventPhase::After, PagingEvent::Allocation { location: dir0 }, 1),
        (EventPhase::Before, PagingEvent::Allocation { location: leaf00 }, 1),
        (EventPhase::After, PagingEvent::Allocation { location: leaf00 }, 2),
        (EventPhase::Before, PagingEvent::Allocation { location: dir1 }, 2),
        (EventPhase::After, PagingEvent::Allocation { location: dir1 }, 3),
        (
            EventPhase::Before,
            PagingEvent::Eviction {
                directory_index: 0,
                table_index: 0,
            },
            3,
        ),
        (
            EventPhase::After,
            PagingEvent::Eviction {
                directory_index: 0,
                table_index: 0,
            },
            2,
        ),
        (EventPhase::Before, PagingEvent::Allocation { location: leaf10 }, 2),
        (EventPhase::After, PagingEvent::Allocation { location: leaf10 }, 3),
    ];
    assert_eq!(vm.observer().events, expected);
}
