//! # Data Events
//!
//! Lifecycle event payloads and the notification boundary for Lumina data
//! objects.
//!
//! ## Philosophy
//!
//! - **Structured, not stdout**: Lifecycle transitions are typed events, not
//!   print statements.
//! - **Values, not references**: An event carries an identity snapshot of the
//!   object it describes, so it can outlive the object and cross boundaries.
//! - **Fire and forget**: Publishing owes no delivery guarantee; the sink is
//!   the edge of this core's responsibility.
//! - **Testable**: A recording sink makes published history inspectable.
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - An event bus or transport (delivery belongs to the surrounding system)
//! - A subscription or filtering layer
//! - A display/toast notification system
//!
//! ## Example
//!
//! ```
//! use data_events::{DataEvent, DataEventKind, DataId, EventSink, RecordingSink};
//!
//! let sink = RecordingSink::new();
//! let id = DataId::new();
//! sink.publish(DataEvent::created(id, Some("Cell-001".into())));
//!
//! assert_eq!(sink.len(), 1);
//! assert_eq!(sink.count(DataEventKind::Created), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a data object
///
/// Events refer to objects by ID rather than by reference, so payloads stay
/// plain values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataId(Uuid);

impl DataId {
    /// Creates a new random data ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a data ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DataId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Data({})", self.0)
    }
}

/// The two lifecycle transitions a data object reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataEventKind {
    /// The object became live (first reference taken)
    Created,
    /// The object was released (last reference dropped)
    Deleted,
}

impl fmt::Display for DataEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataEventKind::Created => write!(f, "created"),
            DataEventKind::Deleted => write!(f, "deleted"),
        }
    }
}

/// A lifecycle notification for one data object
///
/// The `name` field is a snapshot taken at publish time. Publishers with more
/// specific payloads attach them through `detail`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEvent {
    /// Which transition occurred
    pub kind: DataEventKind,
    /// Identity of the originating object
    pub object: DataId,
    /// Name of the object at the time of the transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional publisher-specific payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl DataEvent {
    /// Creates a "data created" event
    pub fn created(object: DataId, name: Option<String>) -> Self {
        Self {
            kind: DataEventKind::Created,
            object,
            name,
            detail: None,
        }
    }

    /// Creates a "data deleted" event
    pub fn deleted(object: DataId, name: Option<String>) -> Self {
        Self {
            kind: DataEventKind::Deleted,
            object,
            name,
            detail: None,
        }
    }

    /// Attaches a publisher-specific payload
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for DataEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "data {}: {} [{}]", self.kind, name, self.object),
            None => write!(f, "data {}: {}", self.kind, self.object),
        }
    }
}

/// The notification boundary
///
/// One operation, fire and forget. Implementations take `&self` and use
/// interior mutability where they keep state; this core is single-threaded
/// per object, so no locking is implied.
pub trait EventSink {
    /// Publishes one event
    fn publish(&self, event: DataEvent);
}

/// An [`EventSink`] that appends every event to an inspectable history
///
/// Intended for tests and for embedders that want to audit lifecycle
/// traffic without wiring a real transport.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RefCell<Vec<DataEvent>>,
}

impl RecordingSink {
    /// Creates an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded history, oldest first
    pub fn events(&self) -> Vec<DataEvent> {
        self.events.borrow().clone()
    }

    /// Returns the number of recorded events
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Checks whether anything has been recorded
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Counts recorded events of one kind
    pub fn count(&self, kind: DataEventKind) -> usize {
        self.events.borrow().iter().filter(|e| e.kind == kind).count()
    }

    /// Discards the recorded history
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: DataEvent) {
        self.events.borrow_mut().push(event);
    }
}
