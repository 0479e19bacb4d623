//! # Data Lifecycle
//!
//! Edge-triggered reference counting for Lumina data objects.
//!
//! ## Philosophy
//!
//! - **Mechanism not policy**: This crate classifies transitions; callers
//!   decide what to publish on an edge.
//! - **Explicit over implicit**: Releasing an unheld object is an error, not
//!   a silent clamp to zero.
//! - **Edges, not levels**: Observers care about an object entering and
//!   leaving use, not about every holder in between.
//! - **Testability first**: A pure state machine with no clocks and no I/O.
//!
//! ## Core Concepts
//!
//! - [`RefCount`]: The per-object counter
//! - [`Transition`]: Classification of one mutation (activated, deactivated,
//!   or interior)
//! - [`LifecycleError`]: The decrement-at-zero invalid state

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classification of one reference-count mutation
///
/// Exactly one `Activated` is produced per 0 -> 1 move and exactly one
/// `Deactivated` per 1 -> 0 move; everything in between is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// The count moved from 0 to 1; the object just became live
    Activated,
    /// The count moved from 1 to 0; the object is eligible for teardown
    Deactivated,
    /// An interior move (1 -> 2, 2 -> 1, ...); nothing to report
    None,
}

impl Transition {
    /// Checks whether this mutation crossed the live/idle boundary
    pub fn is_edge(&self) -> bool {
        !matches!(self, Transition::None)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Activated => write!(f, "activated"),
            Transition::Deactivated => write!(f, "deactivated"),
            Transition::None => write!(f, "no transition"),
        }
    }
}

/// Errors related to reference-count mutation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// Decrement was requested while the count was already zero
    ///
    /// This signals a caller bug; the count is left untouched.
    #[error("decrementing reference count when it is already 0")]
    AlreadyReleased,
}

/// An edge-triggered reference counter
///
/// Starts at zero. Increments never fail; decrementing an unheld counter is
/// an [`LifecycleError::AlreadyReleased`] invalid state.
///
/// ## Example
///
/// ```
/// use data_lifecycle::{RefCount, Transition};
///
/// let mut refs = RefCount::new();
/// assert_eq!(refs.increment(), Transition::Activated);
/// assert_eq!(refs.increment(), Transition::None);
/// assert_eq!(refs.decrement(), Ok(Transition::None));
/// assert_eq!(refs.decrement(), Ok(Transition::Deactivated));
/// assert!(refs.decrement().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefCount {
    refs: u64,
}

impl RefCount {
    /// Creates a counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current count
    pub fn count(&self) -> u64 {
        self.refs
    }

    /// Checks whether the object is currently held
    pub fn is_active(&self) -> bool {
        self.refs > 0
    }

    /// Adds one reference and classifies the move
    pub fn increment(&mut self) -> Transition {
        self.refs += 1;
        if self.refs == 1 {
            Transition::Activated
        } else {
            Transition::None
        }
    }

    /// Removes one reference and classifies the move
    ///
    /// Fails without mutating when the count is already zero.
    pub fn decrement(&mut self) -> Result<Transition, LifecycleError> {
        if self.refs == 0 {
            return Err(LifecycleError::AlreadyReleased);
        }
        self.refs -= 1;
        if self.refs == 0 {
            Ok(Transition::Deactivated)
        } else {
            Ok(Transition::None)
        }
    }
}
