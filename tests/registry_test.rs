//! Integration tests for the package registry.

use parcelq::registry::{AddOutcome, Registry, UpdateOutcome};

fn test_registry() -> Registry {
    Registry::new()
}

// ---------------------------------------------------------------------------
// Registration and counting
// ---------------------------------------------------------------------------

#[test]
fn add_queues_package_and_counts_it() {
    let mut registry = test_registry();

    assert_eq!(registry.add_package("pkg-1", 5), AddOutcome::Added);
    assert_eq!(registry.add_package("pkg-2", 3), AddOutcome::Added);

    assert_eq!(registry.pending_count(), 2);
    let record = registry.get("pkg-1").expect("record should exist");
    assert_eq!(record.priority, 5);
    assert!(record.log.is_empty());
}

#[test]
fn duplicate_id_is_rejected_without_mutation() {
    let mut registry = test_registry();

    assert_eq!(registry.add_package("pkg-1", 5), AddOutcome::Added);
    assert_eq!(registry.add_package("pkg-1", 9), AddOutcome::AlreadyExists);

    // First registration wins entirely: priority, empty log, one queue
    // entry.
    let record = registry.get("pkg-1").unwrap();
    assert_eq!(record.priority, 5);
    assert!(record.log.is_empty());
    assert_eq!(registry.pending_count(), 1);

    // And the queue holds no phantom second entry.
    assert_eq!(registry.next_delivery().unwrap().as_str(), "pkg-1");
    assert_eq!(registry.next_delivery(), None);
}

#[test]
fn pending_count_tracks_distinct_ids_until_dispatch() {
    let mut registry = test_registry();

    registry.add_package("a", 1);
    registry.add_package("b", 2);
    registry.add_package("a", 7); // duplicate, not counted
    assert_eq!(registry.pending_count(), 2);

    registry.next_delivery();
    assert_eq!(registry.pending_count(), 1);
}

// ---------------------------------------------------------------------------
// Dispatch order
// ---------------------------------------------------------------------------

#[test]
fn dispatch_is_priority_desc_then_fifo_within_tie() {
    let mut registry = test_registry();

    registry.add_package("A", 5);
    registry.add_package("B", 5);
    registry.add_package("C", 9);

    assert_eq!(registry.next_delivery().unwrap().as_str(), "C");
    assert_eq!(registry.next_delivery().unwrap().as_str(), "A");
    assert_eq!(registry.next_delivery().unwrap().as_str(), "B");
}

#[test]
fn empty_queue_returns_sentinel_and_recovers() {
    let mut registry = test_registry();

    assert_eq!(registry.next_delivery(), None);

    // The empty dispatch must not corrupt anything: a subsequent
    // add + dispatch behaves normally.
    registry.add_package("late", 4);
    assert_eq!(registry.next_delivery().unwrap().as_str(), "late");
    assert_eq!(registry.next_delivery(), None);
}

// ---------------------------------------------------------------------------
// Tracking
// ---------------------------------------------------------------------------

#[test]
fn tracking_snapshot_preserves_append_order() {
    let mut registry = test_registry();
    registry.add_package("pkg-1", 2);

    registry.update_tracking("pkg-1", "Warehouse", "2024-01-01 08:00");
    registry.update_tracking("pkg-1", "Hub", "2024-01-01 12:30");
    registry.update_tracking("pkg-1", "Truck", "2024-01-02 07:15");

    let info = registry.tracking_info("pkg-1").expect("package exists");
    assert_eq!(
        info,
        [
            "2024-01-01 08:00: Warehouse",
            "2024-01-01 12:30: Hub",
            "2024-01-02 07:15: Truck",
        ]
    );
}

#[test]
fn update_on_unknown_id_creates_nothing() {
    let mut registry = test_registry();

    let outcome = registry.update_tracking("ghost", "Nowhere", "2024-01-01");
    assert_eq!(outcome, UpdateOutcome::NotFound);

    assert!(registry.get("ghost").is_none());
    assert_eq!(registry.tracking_info("ghost"), None);
    assert_eq!(registry.pending_count(), 0);
}

#[test]
fn snapshot_is_point_in_time() {
    let mut registry = test_registry();
    registry.add_package("pkg-1", 1);
    registry.update_tracking("pkg-1", "Depot", "08:00");

    let before = registry.tracking_info("pkg-1").unwrap();
    registry.update_tracking("pkg-1", "Van", "09:00");
    let after = registry.tracking_info("pkg-1").unwrap();

    assert_eq!(before.len(), 1);
    assert_eq!(after.len(), 2);
}

// ---------------------------------------------------------------------------
// Dispatched packages stay trackable
// ---------------------------------------------------------------------------

#[test]
fn dispatched_package_remains_trackable_and_updatable() {
    let mut registry = test_registry();
    registry.add_package("pkg-1", 8);
    registry.update_tracking("pkg-1", "Warehouse", "08:00");

    let dispatched = registry.next_delivery().unwrap();
    assert_eq!(dispatched.as_str(), "pkg-1");
    assert_eq!(registry.pending_count(), 0);

    // Still present in the registry, history intact and growing.
    assert_eq!(
        registry.update_tracking("pkg-1", "Delivered", "17:45"),
        UpdateOutcome::Updated
    );
    let info = registry.tracking_info("pkg-1").unwrap();
    assert_eq!(info.len(), 2);
    assert_eq!(info[1], "17:45: Delivered");
}

// ---------------------------------------------------------------------------
// Event stream
// ---------------------------------------------------------------------------

#[test]
fn mutations_record_events_with_monotonic_seq() {
    let mut registry = test_registry();

    registry.add_package("pkg-1", 5);
    registry.update_tracking("pkg-1", "Hub", "10:00");
    registry.next_delivery();

    let events = registry.events_since(0);
    assert_eq!(events.len(), 3);
    for window in events.windows(2) {
        assert!(window[1].seq > window[0].seq);
    }

    // Strictly-greater filter.
    let tail = registry.events_since(events[1].seq);
    assert_eq!(tail.len(), 1);
}

#[test]
fn rejected_operations_record_no_event() {
    let mut registry = test_registry();
    registry.add_package("pkg-1", 5);
    let baseline = registry.events_since(0).len();

    registry.add_package("pkg-1", 9); // duplicate
    registry.update_tracking("ghost", "Nowhere", "08:00"); // unknown id
    registry.next_delivery();
    registry.next_delivery(); // empty queue

    // Only the successful dispatch added an event.
    assert_eq!(registry.events_since(0).len(), baseline + 1);
}
