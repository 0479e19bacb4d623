//! # Data Object
//!
//! The base lifecycle and persistence contract shared by every addressable
//! data object in Lumina — images, overlays and similar entities.
//!
//! ## Philosophy
//!
//! - **Edges, not levels**: Many transient holders may reference an object
//!   cheaply; observers hear only about true activation and deactivation
//!   boundaries.
//! - **Optional observability**: The event sink is a late-bound collaborator;
//!   an unbound sink drops events silently and is never an error.
//! - **Holes are explicit**: Axes set out of order leave unset placeholders,
//!   never reordered entries.
//! - **Single-threaded per object**: Mutation is plain in-memory state with
//!   no internal locking; the surrounding system serializes access.
//!
//! ## Key Types
//!
//! - [`Data`]: The contract every addressable data object satisfies
//! - [`DataObject`]: The base implementation wiring the axis store and the
//!   reference-count lifecycle to an event sink
//! - [`LifecycleHooks`]: Substitution point for notification payloads
//! - [`DataMetadata`]: The `{name, axes}` record the wire codec round-trips
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - Pixel storage or image processing
//! - An event transport (see the sink trait in `data_events`)
//! - A rendering or display layer

pub mod metadata;
pub mod object;

pub use metadata::DataMetadata;
pub use object::{DataDescriptor, DataObject, DefaultHooks, LifecycleHooks};

use axis_types::{AxisType, CalibratedAxis, Extents, ExtentsError};
use data_events::DataId;
use data_lifecycle::LifecycleError;
use thiserror::Error;

/// Errors accessing the per-object axis store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AxisStoreError {
    /// Axis index past the end of the stored sequence
    #[error("axis index {index} out of bounds (length {len})")]
    OutOfBounds { index: usize, len: usize },

    /// The slot exists but no axis was ever assigned to it
    #[error("axis {index} has not been assigned")]
    UnsetAxis { index: usize },
}

/// The contract every addressable data object satisfies
///
/// Concrete kinds (raster images, overlays, ...) embed a [`DataObject`] and
/// delegate most of this trait to it, overriding the geometry report
/// (`num_dimensions` and the index-space bounds) with their own extents.
///
/// The derived accessors size their results by `num_dimensions()` as
/// reported by the concrete object. Keeping that report consistent with the
/// stored axis sequence is the implementor's responsibility — a precondition,
/// not a runtime-checked invariant.
pub trait Data {
    // -- identity --

    /// Returns the stable identity of this object
    fn id(&self) -> DataId;

    /// Returns the object's name; `None` is distinct from an empty name
    fn name(&self) -> Option<&str>;

    /// Replaces the object's name
    fn set_name(&mut self, name: Option<String>);

    // -- geometry report --

    /// Returns the dimensionality of this object
    fn num_dimensions(&self) -> usize;

    /// Writes the inclusive lower index bound of each dimension into `target`
    fn min_into(&self, target: &mut [i64]);

    /// Writes the inclusive upper index bound of each dimension into `target`
    fn max_into(&self, target: &mut [i64]);

    // -- axis store --

    /// Returns the calibrated axis at dimension `d`
    fn axis(&self, d: usize) -> Result<&CalibratedAxis, AxisStoreError>;

    /// Returns the calibrated axis at dimension `d` for mutation
    fn axis_mut(&mut self, d: usize) -> Result<&mut CalibratedAxis, AxisStoreError>;

    /// Stores `axis` at index `d`, growing the sequence with unset
    /// placeholders as needed; never shrinks or reorders
    fn set_axis(&mut self, axis: CalibratedAxis, d: usize);

    /// Replaces the whole axis sequence; the decode path, never a merge
    fn replace_axes(&mut self, axes: Vec<CalibratedAxis>);

    /// Returns the stored sequence length, unset placeholders included
    fn axis_len(&self) -> usize;

    // -- lifecycle --

    /// Takes one reference; publishes the activation notification on the
    /// 0 -> 1 transition
    fn increment_references(&mut self);

    /// Releases one reference; publishes the deactivation notification on
    /// the 1 -> 0 transition
    ///
    /// Releasing an unheld object fails with
    /// [`LifecycleError::AlreadyReleased`] and neither mutates the count nor
    /// publishes anything.
    fn decrement_references(&mut self) -> Result<(), LifecycleError>;

    // -- derived accessors --

    /// Returns the first (lowest) dimension index whose axis has the given
    /// type, skipping unset placeholders
    fn dimension_index(&self, axis_type: &AxisType) -> Option<usize> {
        (0..self.axis_len()).find(|&d| {
            self.axis(d)
                .map(|axis| axis.axis_type() == axis_type)
                .unwrap_or(false)
        })
    }

    /// Returns the axis type of each dimension, sized by `num_dimensions()`
    fn axis_types(&self) -> Result<Vec<AxisType>, AxisStoreError> {
        (0..self.num_dimensions())
            .map(|d| self.axis(d).map(|axis| axis.axis_type().clone()))
            .collect()
    }

    /// Returns the unit of the axis at dimension `d`
    fn unit(&self, d: usize) -> Result<Option<&str>, AxisStoreError> {
        self.axis(d).map(|axis| axis.unit())
    }

    /// Replaces the unit of the axis at dimension `d`
    fn set_unit(&mut self, unit: Option<String>, d: usize) -> Result<(), AxisStoreError> {
        self.axis_mut(d)?.set_unit(unit);
        Ok(())
    }

    /// Returns the calibration of the axis at dimension `d`
    fn calibration(&self, d: usize) -> Result<f64, AxisStoreError> {
        self.axis(d).map(|axis| axis.calibration())
    }

    /// Replaces the calibration of the axis at dimension `d`
    fn set_calibration(&mut self, value: f64, d: usize) -> Result<(), AxisStoreError> {
        self.axis_mut(d)?.set_calibration(value);
        Ok(())
    }

    /// Writes per-dimension calibrations into a caller-supplied buffer
    fn calibration_into(&self, target: &mut [f64]) -> Result<(), AxisStoreError> {
        for (d, slot) in target.iter_mut().enumerate() {
            *slot = self.calibration(d)?;
        }
        Ok(())
    }

    /// Writes per-dimension calibrations into a single-precision buffer
    fn calibration_into_f32(&self, target: &mut [f32]) -> Result<(), AxisStoreError> {
        for (d, slot) in target.iter_mut().enumerate() {
            *slot = self.calibration(d)? as f32;
        }
        Ok(())
    }

    /// Applies a sequence of calibrations index-by-index to existing axes
    fn set_calibrations(&mut self, values: &[f64]) -> Result<(), AxisStoreError> {
        for (d, &value) in values.iter().enumerate() {
            self.set_calibration(value, d)?;
        }
        Ok(())
    }

    /// Applies single-precision calibrations index-by-index to existing axes
    fn set_calibrations_f32(&mut self, values: &[f32]) -> Result<(), AxisStoreError> {
        for (d, &value) in values.iter().enumerate() {
            self.set_calibration(f64::from(value), d)?;
        }
        Ok(())
    }

    /// Returns the index-space bounds of all dimensions
    fn extents(&self) -> Result<Extents, ExtentsError> {
        let mut min = vec![0; self.num_dimensions()];
        let mut max = vec![0; self.num_dimensions()];
        self.min_into(&mut min);
        self.max_into(&mut max);
        Extents::new(min, max)
    }

    /// Writes the sample count of each dimension into `target`
    fn dims_into(&self, target: &mut [i64]) {
        let mut min = vec![0; target.len()];
        let mut max = vec![0; target.len()];
        self.min_into(&mut min);
        self.max_into(&mut max);
        for (d, slot) in target.iter_mut().enumerate() {
            *slot = max[d] - min[d] + 1;
        }
    }

    /// Returns the sample counts of all dimensions
    fn dims(&self) -> Vec<i64> {
        let mut dims = vec![0; self.num_dimensions()];
        self.dims_into(&mut dims);
        dims
    }

    // -- persistence --

    /// Takes the `{name, axes}` snapshot the wire codec serializes
    ///
    /// Fails with [`AxisStoreError::UnsetAxis`] if the stored sequence still
    /// contains placeholders; a record with holes is not representable.
    fn metadata(&self) -> Result<DataMetadata, AxisStoreError> {
        let axes = (0..self.axis_len())
            .map(|d| self.axis(d).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DataMetadata {
            name: self.name().map(str::to_string),
            axes,
        })
    }

    /// Replaces name and axis sequence wholesale from a decoded record
    fn apply_metadata(&mut self, metadata: DataMetadata) {
        self.set_name(metadata.name);
        self.replace_axes(metadata.axes);
    }
}
