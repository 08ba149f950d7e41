//! Orchestrating core. The public API the shell calls.
//!
//! The registry owns the package records, the dispatch queue, and the
//! event stream. Every operation is total: expected conditions come
//! back as outcome values, never as errors. Construct one registry per
//! process (or per test) and pass it by reference; there is no shared
//! global instance.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::event::{Event, EventKind, EventStream};
use crate::model::{PackageId, PackageRecord};
use crate::queue::DispatchQueue;

/// What happened when a package was registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// New record created and queued for delivery.
    Added,
    /// The id is already registered. Nothing changed, not even the
    /// queue.
    AlreadyExists,
}

/// What happened when a tracking update was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Appended to the package's history.
    Updated,
    /// No such package. Nothing was created.
    NotFound,
}

/// The package registry. Owns all state and enforces all invariants.
///
/// Every id reachable from the queue is present in the record map; the
/// reverse does not hold, because dispatch removes the queue entry and
/// leaves the record trackable.
#[derive(Debug, Default)]
pub struct Registry {
    records: HashMap<PackageId, PackageRecord>,
    queue: DispatchQueue,
    events: EventStream,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package and queue it for delivery.
    ///
    /// A duplicate id is rejected with no mutation at all: the existing
    /// record keeps its priority and history, and no queue entry is
    /// added.
    pub fn add_package(&mut self, id: impl Into<PackageId>, priority: i32) -> AddOutcome {
        let id = id.into();
        if self.records.contains_key(id.as_str()) {
            debug!(id = %id, "registration rejected, id exists");
            return AddOutcome::AlreadyExists;
        }

        self.records
            .insert(id.clone(), PackageRecord::new(id.clone(), priority));
        self.queue.insert(id.clone(), priority);
        self.events.record(EventKind::PackageRegistered {
            id: id.clone(),
            priority,
        });

        info!(id = %id, priority, "package registered");
        AddOutcome::Added
    }

    /// Append a sighting to a package's history.
    pub fn update_tracking(&mut self, id: &str, location: &str, timestamp: &str) -> UpdateOutcome {
        let Some(record) = self.records.get_mut(id) else {
            debug!(id, "tracking update rejected, unknown id");
            return UpdateOutcome::NotFound;
        };

        record.log.append(location, timestamp);
        self.events.record(EventKind::TrackingAppended {
            id: record.id.clone(),
            location: location.to_string(),
        });

        debug!(id, location, "tracking appended");
        UpdateOutcome::Updated
    }

    /// Formatted history snapshot for a package, `None` for an unknown
    /// id. Dispatch state does not affect the answer.
    pub fn tracking_info(&self, id: &str) -> Option<Vec<String>> {
        self.records.get(id).map(|record| record.log.snapshot())
    }

    /// Look up a package record by id.
    pub fn get(&self, id: &str) -> Option<&PackageRecord> {
        self.records.get(id)
    }

    /// Remove and return the highest-priority pending package.
    ///
    /// `None` means nothing is pending. The record itself stays in the
    /// registry, so the dispatched package remains trackable.
    pub fn next_delivery(&mut self) -> Option<PackageId> {
        let id = self.queue.remove_highest()?;
        self.events
            .record(EventKind::PackageDispatched { id: id.clone() });

        info!(id = %id, "package dispatched");
        Some(id)
    }

    /// Number of packages currently pending delivery.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Events with a sequence number strictly greater than `since_seq`.
    pub fn events_since(&self, since_seq: u64) -> Vec<Event> {
        self.events.since(since_seq)
    }
}
