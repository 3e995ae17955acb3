//! Leak and double-drop detection for OrderedSet using tracked values.
//!
//! Every test owns its ledger, so the live count always describes the
//! values stored in the set under test plus any temporaries still alive.

#![cfg(feature = "accounting")]

use oset::OrderedSet;
use oset::accounting::{Deltas, InstanceLedger, Tracked};
use oset::config::SetConfig;
use rstest::rstest;

fn filled_set(ledger: &InstanceLedger, count: i32) -> OrderedSet<Tracked> {
    let mut set = OrderedSet::new();
    for value in 0..count {
        set.add(ledger.track(value));
    }
    set
}

#[rstest]
fn test_live_count_follows_len_during_adds() {
    let ledger = InstanceLedger::new();
    let mut set = OrderedSet::new();
    for value in 0..100 {
        set.add(ledger.track(value));
        assert_eq!(ledger.live(), i64::try_from(set.len()).unwrap());
    }
    assert_eq!(
        ledger.drain_deltas(),
        Deltas {
            increments: 100,
            decrements: 0
        }
    );
}

#[rstest]
fn test_rejected_duplicate_is_dropped_once() {
    let ledger = InstanceLedger::new();
    let mut set = filled_set(&ledger, 10);
    let _ = ledger.drain_deltas();

    assert!(!set.add(ledger.track(3)));

    assert_eq!(ledger.live(), 10);
    assert_eq!(
        ledger.drain_deltas(),
        Deltas {
            increments: 1,
            decrements: 1
        }
    );
}

#[rstest]
fn test_growth_does_not_copy_elements() {
    let ledger = InstanceLedger::new();
    let config = SetConfig::new().with_initial_capacity(2).with_probe_limit(1);
    let mut set = OrderedSet::with_config(config);
    for value in 0..500 {
        set.add(ledger.track(value));
    }
    assert!(set.capacity() >= 500);
    assert_eq!(
        ledger.drain_deltas(),
        Deltas {
            increments: 500,
            decrements: 0
        }
    );
    assert_eq!(ledger.live(), 500);
}

#[rstest]
fn test_remove_destroys_exactly_one_instance() {
    let ledger = InstanceLedger::new();
    let mut set = filled_set(&ledger, 20);
    let probe = ledger.track(7);
    let _ = ledger.drain_deltas();

    assert!(set.remove(&probe));
    assert!(!set.remove(&probe));

    assert_eq!(ledger.live(), 20);
    assert_eq!(set.len(), 19);
    assert_eq!(
        ledger.drain_deltas(),
        Deltas {
            increments: 0,
            decrements: 1
        }
    );
}

#[rstest]
fn test_take_hands_back_the_stored_instance() {
    let ledger = InstanceLedger::new();
    let mut set = filled_set(&ledger, 5);
    let _ = ledger.drain_deltas();

    let taken = set.take(&ledger.track(2));
    assert_eq!(taken.as_ref().map(Tracked::get), Some(2));
    assert_eq!(ledger.live(), 5);

    drop(taken);
    assert_eq!(ledger.live(), 4);
    assert_eq!(i64::try_from(set.len()).unwrap(), ledger.live());
}

#[rstest]
fn test_clear_and_drop_release_everything() {
    let ledger = InstanceLedger::new();
    let mut set = filled_set(&ledger, 50);
    set.clear();
    assert_eq!(ledger.live(), 0);

    set.add(ledger.track(1));
    set.add(ledger.track(2));
    drop(set);
    assert_eq!(ledger.live(), 0);
    assert_eq!(
        ledger.drain_deltas(),
        Deltas {
            increments: 52,
            decrements: 52
        }
    );
}

#[rstest]
fn test_clone_constructs_one_instance_per_element() {
    let ledger = InstanceLedger::new();
    let set = filled_set(&ledger, 30);
    let _ = ledger.drain_deltas();

    let copy = set.clone();
    assert_eq!(ledger.live(), 60);
    assert_eq!(
        ledger.drain_deltas(),
        Deltas {
            increments: 30,
            decrements: 0
        }
    );
    assert!(copy.iter().eq(set.iter()));

    drop(copy);
    assert_eq!(ledger.live(), 30);
}

#[rstest]
fn test_clone_from_releases_previous_contents() {
    let ledger = InstanceLedger::new();
    let source = filled_set(&ledger, 10);
    let mut target = filled_set(&ledger, 25);
    assert_eq!(ledger.live(), 35);

    target.clone_from(&source);
    assert_eq!(ledger.live(), 20);
    assert!(target.iter().eq(source.iter()));
}

#[rstest]
fn test_move_transfers_without_copies() {
    let ledger = InstanceLedger::new();
    let mut source = filled_set(&ledger, 15);
    let _ = ledger.drain_deltas();

    let destination = std::mem::take(&mut source);
    assert_eq!(ledger.drain_deltas(), Deltas::default());
    assert_eq!(ledger.live(), 15);
    assert!(source.is_empty());
    assert_eq!(destination.len(), 15);
}

#[rstest]
fn test_into_iter_partial_consumption_drops_the_rest() {
    let ledger = InstanceLedger::new();
    let set = filled_set(&ledger, 10);
    let mut iter = set.into_iter();
    let first = iter.next();
    assert_eq!(first.as_ref().map(Tracked::get), Some(0));
    drop(iter);
    assert_eq!(ledger.live(), 1);
    drop(first);
    assert_eq!(ledger.live(), 0);
}

#[rstest]
fn test_cursor_removal_destroys_one_instance() {
    let ledger = InstanceLedger::new();
    let mut set = filled_set(&ledger, 4);
    {
        let mut cursor = set.begin_mut();
        cursor.move_next();
        drop(cursor.remove_current());
    }
    assert_eq!(ledger.live(), 3);
    assert_eq!(set.to_string(), "{0, 2, 3}");
}

#[rstest]
fn test_live_count_matches_len_through_mixed_operations() {
    let ledger = InstanceLedger::new();
    let mut set = OrderedSet::with_config(SetConfig::new().with_initial_capacity(4));
    for round in 0..20 {
        for value in 0..round {
            set.add(ledger.track(value * 3 + round));
        }
        set.remove(&ledger.track(round));
        set.remove(&ledger.track(round * 2));
        assert_eq!(ledger.live(), i64::try_from(set.len()).unwrap());
        if round % 7 == 6 {
            set.clear();
            assert_eq!(ledger.live(), 0);
        }
    }
}
