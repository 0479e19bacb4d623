//! # Data Core Contract Tests
//!
//! This crate provides cross-crate "golden" tests for the data-object core
//! to ensure its contracts don't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Lifecycle and wire contracts are written as
//!   code, not prose.
//! - **Testability first**: Contract tests fail when observable behavior or
//!   the byte layout changes.
//! - **Mechanism not policy**: Define what must be stable, not how to use it.
//!
//! ## Structure
//!
//! - [`lifecycle`]: Activation/deactivation edges observed through a sink
//! - [`persistence`]: Metadata records surviving the wire, byte-for-byte
//! - [`raster`]: A minimal concrete [`data_object::Data`] implementor

pub mod lifecycle;
pub mod persistence;
pub mod raster;

/// Common test helpers for contract validation
pub mod test_helpers {
    use axis_types::{AxisType, CalibratedAxis};

    /// Creates a calibrated axis from its raw parts
    pub fn calibrated(
        axis_type: AxisType,
        unit: Option<&str>,
        calibration: f64,
    ) -> CalibratedAxis {
        let mut axis = CalibratedAxis::new(axis_type).with_calibration(calibration);
        axis.set_unit(unit.map(str::to_string));
        axis
    }
}
