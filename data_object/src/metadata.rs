//! The serializable metadata record of a data object.

use axis_types::CalibratedAxis;
use serde::{Deserialize, Serialize};

/// The exact `{name, axes}` record the wire codec round-trips
///
/// Nothing else about an object — pixel data, reference count, sink binding —
/// is part of this record. The axis sequence here is dense; holes are
/// rejected when the snapshot is taken, not carried on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataMetadata {
    /// Object name; `None` is distinct from an empty string
    pub name: Option<String>,
    /// Calibrated axes in dimension order
    pub axes: Vec<CalibratedAxis>,
}

impl DataMetadata {
    /// Creates a record from its parts
    pub fn new(name: Option<String>, axes: Vec<CalibratedAxis>) -> Self {
        Self { name, axes }
    }

    /// Returns the number of axes in the record
    pub fn num_axes(&self) -> usize {
        self.axes.len()
    }
}
