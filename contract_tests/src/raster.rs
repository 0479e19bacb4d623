//! A minimal concrete data kind
//!
//! Concrete kinds embed a [`DataObject`] and override the geometry report
//! with their own bounds. This stub stands in for a raster image so the
//! derived accessors can be exercised against a report that differs from
//! the base object's.

use axis_types::CalibratedAxis;
use data_events::DataId;
use data_lifecycle::LifecycleError;
use data_object::{AxisStoreError, Data, DataObject};

/// A raster stub: a data object plus fixed sample counts per dimension
pub struct SampleRaster {
    object: DataObject,
    dims: Vec<i64>,
}

impl SampleRaster {
    /// Creates a named raster with the given sample counts
    pub fn new(name: impl Into<String>, dims: Vec<i64>) -> Self {
        Self {
            object: DataObject::named(name),
            dims,
        }
    }

    /// Returns the embedded base object
    pub fn object(&self) -> &DataObject {
        &self.object
    }

    /// Returns the embedded base object for mutation
    pub fn object_mut(&mut self) -> &mut DataObject {
        &mut self.object
    }
}

impl Data for SampleRaster {
    fn id(&self) -> DataId {
        self.object.id()
    }

    fn name(&self) -> Option<&str> {
        self.object.name()
    }

    fn set_name(&mut self, name: Option<String>) {
        self.object.set_name(name);
    }

    fn num_dimensions(&self) -> usize {
        self.dims.len()
    }

    fn min_into(&self, target: &mut [i64]) {
        target.fill(0);
    }

    fn max_into(&self, target: &mut [i64]) {
        for (d, slot) in target.iter_mut().enumerate() {
            *slot = self.dims[d] - 1;
        }
    }

    fn axis(&self, d: usize) -> Result<&CalibratedAxis, AxisStoreError> {
        self.object.axis(d)
    }

    fn axis_mut(&mut self, d: usize) -> Result<&mut CalibratedAxis, AxisStoreError> {
        self.object.axis_mut(d)
    }

    fn set_axis(&mut self, axis: CalibratedAxis, d: usize) {
        self.object.set_axis(axis, d);
    }

    fn replace_axes(&mut self, axes: Vec<CalibratedAxis>) {
        self.object.replace_axes(axes);
    }

    fn axis_len(&self) -> usize {
        self.object.axis_len()
    }

    fn increment_references(&mut self) {
        self.object.increment_references();
    }

    fn decrement_references(&mut self) -> Result<(), LifecycleError> {
        self.object.decrement_references()
    }
}
