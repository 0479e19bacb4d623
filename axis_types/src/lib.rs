//! # Axis Types
//!
//! This crate defines the dimension and calibration types shared by every
//! addressable data object in Lumina.
//!
//! ## Philosophy
//!
//! - **Types, not conventions**: The meaning of a dimension is a typed tag,
//!   never an index convention agreed on out-of-band.
//! - **Calibration is data**: Scale factors and physical units travel with
//!   the axis they describe.
//! - **Serializable**: Every type here can cross a service or wire boundary.
//!
//! ## Key Types
//!
//! - [`AxisType`]: Tag identifying what a dimension means
//! - [`CalibratedAxis`]: A dimension descriptor mapping index space to
//!   physical units
//! - [`Extents`]: Index-space bounds per dimension

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Tag identifying the meaning of a dimension
///
/// The common axes of multidimensional image data are predefined; anything
/// else is a [`AxisType::Custom`] axis carrying its own label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisType {
    /// First spatial axis
    X,
    /// Second spatial axis
    Y,
    /// Third spatial axis
    Z,
    /// Acquisition channel
    Channel,
    /// Time point
    Time,
    /// User-defined axis with a free-form label
    Custom(String),
}

impl AxisType {
    /// Wire tag reserved for custom axes; the label travels separately.
    pub const CUSTOM_WIRE_TAG: u32 = 6;

    /// Returns the short label for this axis type
    pub fn label(&self) -> &str {
        match self {
            AxisType::X => "X",
            AxisType::Y => "Y",
            AxisType::Z => "Z",
            AxisType::Channel => "Channel",
            AxisType::Time => "Time",
            AxisType::Custom(label) => label,
        }
    }

    /// Checks whether this is one of the spatial axes (X, Y or Z)
    pub fn is_spatial(&self) -> bool {
        matches!(self, AxisType::X | AxisType::Y | AxisType::Z)
    }

    /// Returns the stable numeric tag used by the wire codec
    pub fn wire_tag(&self) -> u32 {
        match self {
            AxisType::X => 1,
            AxisType::Y => 2,
            AxisType::Z => 3,
            AxisType::Channel => 4,
            AxisType::Time => 5,
            AxisType::Custom(_) => Self::CUSTOM_WIRE_TAG,
        }
    }

    /// Resolves a non-custom wire tag back to an axis type
    ///
    /// Returns `None` for unknown tags and for [`Self::CUSTOM_WIRE_TAG`],
    /// whose label is encoded out-of-line and must be supplied by the codec.
    pub fn from_wire_tag(tag: u32) -> Option<AxisType> {
        match tag {
            1 => Some(AxisType::X),
            2 => Some(AxisType::Y),
            3 => Some(AxisType::Z),
            4 => Some(AxisType::Channel),
            5 => Some(AxisType::Time),
            _ => None,
        }
    }
}

impl fmt::Display for AxisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A dimension descriptor mapping index position to physical units
///
/// The calibration is the scale factor from index space to the physical
/// unit; an axis without a unit is measured in raw samples. `None` for the
/// unit is distinct from an empty string.
///
/// ## Example
///
/// ```
/// use axis_types::{AxisType, CalibratedAxis};
///
/// let axis = CalibratedAxis::new(AxisType::X)
///     .with_unit("um")
///     .with_calibration(0.25);
///
/// assert_eq!(axis.unit(), Some("um"));
/// assert_eq!(axis.calibration(), 0.25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibratedAxis {
    axis_type: AxisType,
    unit: Option<String>,
    calibration: f64,
}

impl CalibratedAxis {
    /// Creates an axis with no unit and a calibration of 1.0
    pub fn new(axis_type: AxisType) -> Self {
        Self {
            axis_type,
            unit: None,
            calibration: 1.0,
        }
    }

    /// Sets the physical unit label
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the index-to-unit scale factor
    pub fn with_calibration(mut self, calibration: f64) -> Self {
        self.calibration = calibration;
        self
    }

    /// Returns the axis type tag
    pub fn axis_type(&self) -> &AxisType {
        &self.axis_type
    }

    /// Returns the physical unit label, if any
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Replaces the physical unit label
    pub fn set_unit(&mut self, unit: Option<String>) {
        self.unit = unit;
    }

    /// Returns the index-to-unit scale factor
    pub fn calibration(&self) -> f64 {
        self.calibration
    }

    /// Replaces the index-to-unit scale factor
    pub fn set_calibration(&mut self, value: f64) {
        self.calibration = value;
    }
}

impl fmt::Display for CalibratedAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{} ({} {}/px)", self.axis_type, self.calibration, unit),
            None => write!(f, "{} ({} px)", self.axis_type, self.calibration),
        }
    }
}

/// Errors constructing index-space bounds
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtentsError {
    /// Min and max bound vectors disagree on dimensionality
    #[error("extents bounds have mismatched lengths: {min_len} min vs {max_len} max")]
    LengthMismatch { min_len: usize, max_len: usize },
}

/// Index-space bounds per dimension
///
/// Bounds are inclusive on both ends, so a dimension spanning `min..=max`
/// has `max - min + 1` samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extents {
    min: Vec<i64>,
    max: Vec<i64>,
}

impl Extents {
    /// Creates bounds from parallel min/max vectors
    pub fn new(min: Vec<i64>, max: Vec<i64>) -> Result<Self, ExtentsError> {
        if min.len() != max.len() {
            return Err(ExtentsError::LengthMismatch {
                min_len: min.len(),
                max_len: max.len(),
            });
        }
        Ok(Self { min, max })
    }

    /// Returns the number of dimensions covered
    pub fn num_dimensions(&self) -> usize {
        self.min.len()
    }

    /// Returns the inclusive lower bound of dimension `d`
    ///
    /// Precondition: `d < num_dimensions()`.
    pub fn min(&self, d: usize) -> i64 {
        self.min[d]
    }

    /// Returns the inclusive upper bound of dimension `d`
    ///
    /// Precondition: `d < num_dimensions()`.
    pub fn max(&self, d: usize) -> i64 {
        self.max[d]
    }

    /// Returns the sample count along dimension `d`
    ///
    /// Precondition: `d < num_dimensions()`.
    pub fn dimension(&self, d: usize) -> i64 {
        self.max[d] - self.min[d] + 1
    }

    /// Returns the sample counts of all dimensions
    pub fn dims(&self) -> Vec<i64> {
        (0..self.num_dimensions()).map(|d| self.dimension(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_type_labels() {
        assert_eq!(AxisType::X.to_string(), "X");
        assert_eq!(AxisType::Channel.to_string(), "Channel");
        assert_eq!(AxisType::Custom("Polarization".into()).to_string(), "Polarization");
    }

    #[test]
    fn test_axis_type_spatial() {
        assert!(AxisType::X.is_spatial());
        assert!(AxisType::Y.is_spatial());
        assert!(AxisType::Z.is_spatial());
        assert!(!AxisType::Channel.is_spatial());
        assert!(!AxisType::Time.is_spatial());
        assert!(!AxisType::Custom("Angle".into()).is_spatial());
    }

    #[test]
    fn test_axis_type_wire_tags_round_trip() {
        for axis_type in [
            AxisType::X,
            AxisType::Y,
            AxisType::Z,
            AxisType::Channel,
            AxisType::Time,
        ] {
            let tag = axis_type.wire_tag();
            assert_eq!(AxisType::from_wire_tag(tag), Some(axis_type));
        }
    }

    #[test]
    fn test_axis_type_custom_tag_not_resolvable() {
        let custom = AxisType::Custom("Angle".into());
        assert_eq!(custom.wire_tag(), AxisType::CUSTOM_WIRE_TAG);
        assert_eq!(AxisType::from_wire_tag(AxisType::CUSTOM_WIRE_TAG), None);
        assert_eq!(AxisType::from_wire_tag(0), None);
        assert_eq!(AxisType::from_wire_tag(999), None);
    }

    #[test]
    fn test_calibrated_axis_defaults() {
        let axis = CalibratedAxis::new(AxisType::Y);
        assert_eq!(axis.axis_type(), &AxisType::Y);
        assert_eq!(axis.unit(), None);
        assert_eq!(axis.calibration(), 1.0);
    }

    #[test]
    fn test_calibrated_axis_builders_and_setters() {
        let mut axis = CalibratedAxis::new(AxisType::X)
            .with_unit("um")
            .with_calibration(0.25);
        assert_eq!(axis.unit(), Some("um"));
        assert_eq!(axis.calibration(), 0.25);

        axis.set_unit(None);
        axis.set_calibration(2.0);
        assert_eq!(axis.unit(), None);
        assert_eq!(axis.calibration(), 2.0);
    }

    #[test]
    fn test_calibrated_axis_empty_unit_is_not_none() {
        let axis = CalibratedAxis::new(AxisType::X).with_unit("");
        assert_eq!(axis.unit(), Some(""));
        assert_ne!(axis.unit(), None);
    }

    #[test]
    fn test_calibrated_axis_display() {
        let with_unit = CalibratedAxis::new(AxisType::X)
            .with_unit("um")
            .with_calibration(0.25);
        assert_eq!(with_unit.to_string(), "X (0.25 um/px)");

        let without_unit = CalibratedAxis::new(AxisType::Channel);
        assert_eq!(without_unit.to_string(), "Channel (1 px)");
    }

    #[test]
    fn test_extents_length_mismatch() {
        let result = Extents::new(vec![0, 0], vec![9]);
        assert_eq!(
            result,
            Err(ExtentsError::LengthMismatch {
                min_len: 2,
                max_len: 1
            })
        );
    }

    #[test]
    fn test_extents_dimensions() {
        let extents = Extents::new(vec![0, -5], vec![9, 4]).unwrap();
        assert_eq!(extents.num_dimensions(), 2);
        assert_eq!(extents.min(0), 0);
        assert_eq!(extents.max(0), 9);
        assert_eq!(extents.dimension(0), 10);
        assert_eq!(extents.dimension(1), 10);
        assert_eq!(extents.dims(), vec![10, 10]);
    }

    #[test]
    fn test_extents_empty() {
        let extents = Extents::new(vec![], vec![]).unwrap();
        assert_eq!(extents.num_dimensions(), 0);
        assert!(extents.dims().is_empty());
    }

    #[test]
    fn test_axis_serialization_shape() {
        let axis = CalibratedAxis::new(AxisType::Z).with_unit("um");
        let json = serde_json::to_value(&axis).unwrap();
        assert_eq!(json["axis_type"], "Z");
        assert_eq!(json["unit"], "um");
        assert_eq!(json["calibration"], 1.0);
    }
}
