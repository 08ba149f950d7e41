//! Core data model.
//!
//! A package has identity (a caller-supplied tracking id), a dispatch
//! priority, and an append-only log of where it has been seen.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Package Id
// ---------------------------------------------------------------------------

/// Newtype for package tracking ids.
///
/// Ids are opaque caller-supplied strings. The registry hashes them as
/// `str`, so lookups can borrow (`Borrow<str>` below).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageId(pub String);

impl PackageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for PackageId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PackageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PackageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// Tracking Log
// ---------------------------------------------------------------------------

/// One sighting of a package: where it was and when the caller says it
/// was there. Timestamps are not parsed, validated, or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingEntry {
    pub location: String,
    pub timestamp: String,
}

impl std::fmt::Display for TrackingEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.timestamp, self.location)
    }
}

/// Append-only shipment history for one package.
///
/// Grows only at the tail; entries are never removed or reordered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackingLog {
    entries: Vec<TrackingEntry>,
}

impl TrackingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sighting. Always succeeds.
    pub fn append(&mut self, location: impl Into<String>, timestamp: impl Into<String>) {
        self.entries.push(TrackingEntry {
            location: location.into(),
            timestamp: timestamp.into(),
        });
    }

    /// Entries in append order.
    pub fn entries(&self) -> &[TrackingEntry] {
        &self.entries
    }

    /// Formatted `"timestamp: location"` lines, a snapshot of the log
    /// at call time. Later appends do not show up in a returned vec.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Package Record
// ---------------------------------------------------------------------------

/// A registered package: identity, dispatch priority, and its history.
///
/// Id and priority are fixed at registration; only the log mutates.
/// Records live for the life of the process. Dispatch removes a
/// package from the delivery queue, never from the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageRecord {
    pub id: PackageId,

    /// Dispatch priority. Higher = delivered sooner. Equal priorities
    /// dispatch in registration order.
    pub priority: i32,

    /// Shipment history, empty at registration.
    pub log: TrackingLog,
}

impl PackageRecord {
    pub fn new(id: impl Into<PackageId>, priority: i32) -> Self {
        Self {
            id: id.into(),
            priority,
            log: TrackingLog::new(),
        }
    }
}
