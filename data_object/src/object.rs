//! The base data object: axis store, lifecycle wiring, event publication.

use crate::{AxisStoreError, Data};
use axis_types::CalibratedAxis;
use data_events::{DataEvent, DataId, EventSink};
use data_lifecycle::{LifecycleError, RefCount, Transition};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Cheap identity snapshot handed to lifecycle hooks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataDescriptor {
    /// Stable identity of the object
    pub id: DataId,
    /// Name at the time the snapshot was taken
    pub name: Option<String>,
}

/// Substitution point for lifecycle notification payloads
///
/// The default methods produce the generic created/deleted events. A
/// publisher with a more specific payload supplies its own hooks; the
/// exactly-once-per-transition contract lives in [`DataObject`], not here,
/// so hooks cannot break it.
pub trait LifecycleHooks {
    /// Event published when the object becomes live (count 0 -> 1)
    fn on_register(&self, object: &DataDescriptor) -> DataEvent {
        DataEvent::created(object.id, object.name.clone())
    }

    /// Event published when the object is released (count 1 -> 0)
    fn on_delete(&self, object: &DataDescriptor) -> DataEvent {
        DataEvent::deleted(object.id, object.name.clone())
    }
}

/// Hooks producing the generic created/deleted events
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl LifecycleHooks for DefaultHooks {}

/// Base implementation of [`Data`]
///
/// Tracks a name, an ordered axis sequence (with explicit unset placeholders
/// for out-of-order assignment) and a reference count, and publishes one
/// activation and one deactivation notification per live span through an
/// optionally bound event sink.
///
/// The base object carries no sample geometry; it reports a single sample at
/// the origin for each stored axis. Concrete kinds embed a `DataObject` and
/// override the geometry report with their own bounds.
///
/// ## Example
///
/// ```
/// use data_object::{Data, DataObject};
/// use axis_types::{AxisType, CalibratedAxis};
///
/// let mut image = DataObject::named("Cell-001")
///     .with_axis(CalibratedAxis::new(AxisType::X).with_unit("um").with_calibration(0.25));
///
/// image.increment_references();
/// assert_eq!(image.reference_count(), 1);
/// assert_eq!(image.calibration(0), Ok(0.25));
/// image.decrement_references().unwrap();
/// ```
pub struct DataObject {
    id: DataId,
    name: Option<String>,
    axes: Vec<Option<CalibratedAxis>>,
    refs: RefCount,
    sink: Option<Rc<dyn EventSink>>,
    hooks: Box<dyn LifecycleHooks>,
}

impl DataObject {
    /// Creates an unnamed object with no axes and a zero reference count
    pub fn new() -> Self {
        Self {
            id: DataId::new(),
            name: None,
            axes: Vec::new(),
            refs: RefCount::new(),
            sink: None,
            hooks: Box::new(DefaultHooks),
        }
    }

    /// Creates a named object
    pub fn named(name: impl Into<String>) -> Self {
        let mut object = Self::new();
        object.name = Some(name.into());
        object
    }

    /// Appends an axis at the next dimension index
    pub fn with_axis(mut self, axis: CalibratedAxis) -> Self {
        let d = self.axes.len();
        self.set_axis(axis, d);
        self
    }

    /// Replaces the notification hooks
    pub fn with_hooks(mut self, hooks: Box<dyn LifecycleHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Binds the event sink; rebinding replaces the previous sink
    pub fn bind_sink(&mut self, sink: Rc<dyn EventSink>) {
        self.sink = Some(sink);
    }

    /// Unbinds the event sink; later notifications are dropped silently
    pub fn unbind_sink(&mut self) {
        self.sink = None;
    }

    /// Checks whether an event sink is currently bound
    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Returns the current reference count
    pub fn reference_count(&self) -> u64 {
        self.refs.count()
    }

    /// Checks whether the object is currently held
    pub fn is_active(&self) -> bool {
        self.refs.is_active()
    }

    /// Takes the identity snapshot handed to hooks
    pub fn descriptor(&self) -> DataDescriptor {
        DataDescriptor {
            id: self.id,
            name: self.name.clone(),
        }
    }

    /// Forwards an event to the sink, if one is bound
    ///
    /// Absence of a sink is a normal configuration state, not an error; the
    /// event is dropped.
    pub fn publish(&self, event: DataEvent) {
        if let Some(sink) = &self.sink {
            sink.publish(event);
        }
    }

    fn register(&self) {
        debug!("data object {} activated", self.id);
        let event = self.hooks.on_register(&self.descriptor());
        self.publish(event);
    }

    fn delete(&self) {
        debug!("data object {} deactivated", self.id);
        let event = self.hooks.on_delete(&self.descriptor());
        self.publish(event);
    }
}

impl Default for DataObject {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DataObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("axes", &self.axes)
            .field("refs", &self.refs)
            .field("sink_bound", &self.sink.is_some())
            .finish()
    }
}

impl fmt::Display for DataObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.as_deref().unwrap_or("<unnamed>"))
    }
}

impl Data for DataObject {
    fn id(&self) -> DataId {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    fn num_dimensions(&self) -> usize {
        self.axes.len()
    }

    fn min_into(&self, target: &mut [i64]) {
        target.fill(0);
    }

    fn max_into(&self, target: &mut [i64]) {
        target.fill(0);
    }

    fn axis(&self, d: usize) -> Result<&CalibratedAxis, AxisStoreError> {
        match self.axes.get(d) {
            Some(Some(axis)) => Ok(axis),
            Some(None) => Err(AxisStoreError::UnsetAxis { index: d }),
            None => Err(AxisStoreError::OutOfBounds {
                index: d,
                len: self.axes.len(),
            }),
        }
    }

    fn axis_mut(&mut self, d: usize) -> Result<&mut CalibratedAxis, AxisStoreError> {
        let len = self.axes.len();
        match self.axes.get_mut(d) {
            Some(Some(axis)) => Ok(axis),
            Some(None) => Err(AxisStoreError::UnsetAxis { index: d }),
            None => Err(AxisStoreError::OutOfBounds { index: d, len }),
        }
    }

    fn set_axis(&mut self, axis: CalibratedAxis, d: usize) {
        // ensure sufficient size
        while self.axes.len() <= d {
            self.axes.push(None);
        }
        self.axes[d] = Some(axis);
    }

    fn replace_axes(&mut self, axes: Vec<CalibratedAxis>) {
        self.axes = axes.into_iter().map(Some).collect();
    }

    fn axis_len(&self) -> usize {
        self.axes.len()
    }

    fn increment_references(&mut self) {
        if self.refs.increment() == Transition::Activated {
            self.register();
        }
    }

    fn decrement_references(&mut self) -> Result<(), LifecycleError> {
        if self.refs.decrement()? == Transition::Deactivated {
            self.delete();
        }
        Ok(())
    }
}
