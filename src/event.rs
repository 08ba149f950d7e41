//! Structured events recorded by the registry on every mutation.
//!
//! Consumers read the stream to build dashboards or audit trails.
//! Rejected operations (duplicate registration, unknown id) record
//! nothing: the stream reflects state changes only. The stream lives
//! in memory and is lost with the process, like the rest of the core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::PackageId;

/// A structured event recorded by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Monotonic sequence number, starting at 1. Consumers can detect
    /// gaps.
    pub seq: u64,
    /// When this event occurred.
    pub timestamp: DateTime<Utc>,
    /// What happened.
    pub kind: EventKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    PackageRegistered { id: PackageId, priority: i32 },
    TrackingAppended { id: PackageId, location: String },
    PackageDispatched { id: PackageId },
}

/// In-memory append-only event stream.
#[derive(Debug, Default)]
pub struct EventStream {
    events: Vec<Event>,
}

impl EventStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event, assigning and returning the next sequence
    /// number.
    pub fn record(&mut self, kind: EventKind) -> u64 {
        let seq = self.events.len() as u64 + 1;
        self.events.push(Event {
            seq,
            timestamp: Utc::now(),
            kind,
        });
        seq
    }

    /// Events with a sequence number strictly greater than `since_seq`.
    /// Pass 0 for the full stream.
    pub fn since(&self, since_seq: u64) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| e.seq > since_seq)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
