//! # Data Wire
//!
//! Fixed-format binary codec for data-object metadata records.
//!
//! ## Format
//!
//! A record serializes exactly the `{name, axes}` of one data object —
//! never pixel data, reference counts or sink bindings. The layout is
//! sequential, little-endian, and versionless:
//!
//! - `name`: length-prefixed UTF-8 text (`u32` byte length, then bytes)
//! - `num_axes`: `i32`
//! - For each axis, in dimension order:
//!   - `type`: `u32` wire tag; the custom tag is followed by a
//!     length-prefixed label
//!   - `calibration`: `f64` (IEEE-754 bits)
//!   - `unit`: length-prefixed UTF-8 text
//!
//! ## Sentinel strings
//!
//! The layout has no presence flag for optional text. An absent name or unit
//! is written as the reserved literal [`NULL_SENTINEL`], chosen to be
//! unlikely to collide with real data. A real string exactly equal to the
//! sentinel therefore decodes as absent — a known, documented limitation of
//! the layout, kept for compatibility rather than patched.

mod bytes;

pub use bytes::{ByteReader, ByteWriter};

use axis_types::{AxisType, CalibratedAxis};
use data_object::DataMetadata;
use log::trace;
use thiserror::Error;

/// Reserved literal standing in for an absent string on the wire
pub const NULL_SENTINEL: &str = "NULL 42 PI E 8 GAMMA PHI WOOHOO!";

/// Errors decoding a metadata record
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The stream ended before the record did
    #[error("metadata record truncated")]
    Truncated,

    /// The axis count field was negative
    #[error("negative axis count: {0}")]
    NegativeAxisCount(i32),

    /// An axis type tag is not part of the format
    #[error("unknown axis type tag: {0}")]
    UnknownAxisTag(u32),

    /// A text field held bytes that are not valid UTF-8
    #[error("text field is not valid UTF-8")]
    InvalidText,

    /// Bytes remained after the record when decoding a standalone slice
    #[error("{remaining} trailing bytes after metadata record")]
    TrailingBytes { remaining: usize },
}

fn write_optional_text(writer: &mut ByteWriter, text: Option<&str>) {
    writer.write_text(text.unwrap_or(NULL_SENTINEL));
}

fn read_optional_text(reader: &mut ByteReader<'_>) -> Result<Option<String>, WireError> {
    let text = reader.read_text()?;
    if text == NULL_SENTINEL {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

/// Appends one metadata record to an open writer
pub fn encode_into(writer: &mut ByteWriter, metadata: &DataMetadata) {
    write_optional_text(writer, metadata.name.as_deref());
    writer.write_i32(metadata.axes.len() as i32);
    for axis in &metadata.axes {
        writer.write_u32(axis.axis_type().wire_tag());
        if let AxisType::Custom(label) = axis.axis_type() {
            writer.write_text(label);
        }
        writer.write_f64(axis.calibration());
        write_optional_text(writer, axis.unit());
    }
}

/// Encodes one metadata record as a standalone byte vector
pub fn encode(metadata: &DataMetadata) -> Vec<u8> {
    let mut writer = ByteWriter::new();
    encode_into(&mut writer, metadata);
    trace!(
        "encoded metadata record: {} axes, {} bytes",
        metadata.num_axes(),
        writer.len()
    );
    writer.into_bytes()
}

/// Reads one metadata record from an open reader
///
/// The reader is left positioned after the record, so records can be
/// embedded in a larger stream. Decoding builds a fresh record or fails;
/// no partial state escapes.
pub fn decode_from(reader: &mut ByteReader<'_>) -> Result<DataMetadata, WireError> {
    let name = read_optional_text(reader)?;
    let num_axes = reader.read_i32()?;
    if num_axes < 0 {
        return Err(WireError::NegativeAxisCount(num_axes));
    }

    let mut axes = Vec::new();
    for _ in 0..num_axes {
        let tag = reader.read_u32()?;
        let axis_type = if tag == AxisType::CUSTOM_WIRE_TAG {
            AxisType::Custom(reader.read_text()?)
        } else {
            AxisType::from_wire_tag(tag).ok_or(WireError::UnknownAxisTag(tag))?
        };
        let calibration = reader.read_f64()?;
        let unit = read_optional_text(reader)?;

        let mut axis = CalibratedAxis::new(axis_type).with_calibration(calibration);
        axis.set_unit(unit);
        axes.push(axis);
    }

    trace!("decoded metadata record: {} axes", axes.len());
    Ok(DataMetadata { name, axes })
}

/// Decodes a standalone byte slice holding exactly one metadata record
///
/// Trailing bytes are an error; use [`decode_from`] to read a record out of
/// a larger stream.
pub fn decode(data: &[u8]) -> Result<DataMetadata, WireError> {
    let mut reader = ByteReader::new(data);
    let metadata = decode_from(&mut reader)?;
    if reader.remaining() > 0 {
        return Err(WireError::TrailingBytes {
            remaining: reader.remaining(),
        });
    }
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metadata() -> DataMetadata {
        DataMetadata::new(
            Some("Cell-001".into()),
            vec![
                CalibratedAxis::new(AxisType::X).with_unit("um").with_calibration(0.25),
                CalibratedAxis::new(AxisType::Y).with_unit("um").with_calibration(0.25),
                CalibratedAxis::new(AxisType::Channel),
            ],
        )
    }

    #[test]
    fn test_round_trip_named_record() {
        let metadata = sample_metadata();
        let decoded = decode(&encode(&metadata)).unwrap();
        assert_eq!(decoded, metadata);
    }

    #[test]
    fn test_round_trip_unnamed_record() {
        let metadata = DataMetadata::new(None, vec![CalibratedAxis::new(AxisType::Time)]);
        let decoded = decode(&encode(&metadata)).unwrap();
        assert_eq!(decoded.name, None);
        assert_eq!(decoded, metadata);
    }

    #[test]
    fn test_round_trip_empty_name_stays_empty() {
        let metadata = DataMetadata::new(Some(String::new()), vec![]);
        let decoded = decode(&encode(&metadata)).unwrap();
        // An empty name is a real name, distinct from an absent one.
        assert_eq!(decoded.name, Some(String::new()));
    }

    #[test]
    fn test_round_trip_empty_record() {
        let metadata = DataMetadata::default();
        let decoded = decode(&encode(&metadata)).unwrap();
        assert_eq!(decoded.num_axes(), 0);
        assert_eq!(decoded.name, None);
    }

    #[test]
    fn test_round_trip_custom_axis() {
        let metadata = DataMetadata::new(
            None,
            vec![
                CalibratedAxis::new(AxisType::Custom("Polarization".into()))
                    .with_calibration(15.0)
                    .with_unit("deg"),
            ],
        );
        let decoded = decode(&encode(&metadata)).unwrap();
        assert_eq!(decoded, metadata);
    }

    #[test]
    fn test_round_trip_unit_none_vs_empty() {
        let metadata = DataMetadata::new(
            None,
            vec![
                CalibratedAxis::new(AxisType::X).with_unit(""),
                CalibratedAxis::new(AxisType::Y),
            ],
        );
        let decoded = decode(&encode(&metadata)).unwrap();
        assert_eq!(decoded.axes[0].unit(), Some(""));
        assert_eq!(decoded.axes[1].unit(), None);
    }

    #[test]
    fn test_sentinel_collision_decodes_as_absent() {
        // Documented limitation: a real name equal to the sentinel literal is
        // indistinguishable from an absent one on the wire.
        let metadata = DataMetadata::new(Some(NULL_SENTINEL.into()), vec![]);
        let decoded = decode(&encode(&metadata)).unwrap();
        assert_eq!(decoded.name, None);
    }

    #[test]
    fn test_negative_axis_count_is_rejected() {
        let mut writer = ByteWriter::new();
        writer.write_text(NULL_SENTINEL);
        writer.write_i32(-1);
        let result = decode(&writer.into_bytes());
        assert_eq!(result, Err(WireError::NegativeAxisCount(-1)));
    }

    #[test]
    fn test_truncated_record_is_rejected() {
        let bytes = encode(&sample_metadata());
        // Chop the stream at several interior offsets; every prefix must fail
        // cleanly rather than yield a partial record.
        for cut in [0, 1, 4, 11, 12, 16, 20, bytes.len() - 1] {
            assert_eq!(
                decode(&bytes[..cut]),
                Err(WireError::Truncated),
                "cut at {cut}"
            );
        }
    }

    #[test]
    fn test_unknown_axis_tag_is_rejected() {
        let mut writer = ByteWriter::new();
        writer.write_text(NULL_SENTINEL);
        writer.write_i32(1);
        writer.write_u32(99);
        writer.write_f64(1.0);
        writer.write_text(NULL_SENTINEL);
        let result = decode(&writer.into_bytes());
        assert_eq!(result, Err(WireError::UnknownAxisTag(99)));
    }

    #[test]
    fn test_trailing_bytes_are_rejected() {
        let mut bytes = encode(&sample_metadata());
        bytes.push(0);
        assert_eq!(
            decode(&bytes),
            Err(WireError::TrailingBytes { remaining: 1 })
        );
    }

    #[test]
    fn test_decode_from_leaves_reader_positioned() {
        let first = sample_metadata();
        let second = DataMetadata::new(Some("Roi-7".into()), vec![]);

        let mut writer = ByteWriter::new();
        encode_into(&mut writer, &first);
        encode_into(&mut writer, &second);
        let bytes = writer.into_bytes();

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(decode_from(&mut reader).unwrap(), first);
        assert_eq!(decode_from(&mut reader).unwrap(), second);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_calibration_bits_survive_exactly() {
        let values = [0.1, -0.0, f64::MIN_POSITIVE, 1e300, f64::INFINITY];
        let axes = values
            .iter()
            .map(|&v| CalibratedAxis::new(AxisType::Time).with_calibration(v))
            .collect();
        let decoded = decode(&encode(&DataMetadata::new(None, axes))).unwrap();
        for (axis, &expected) in decoded.axes.iter().zip(&values) {
            assert_eq!(axis.calibration().to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn test_golden_record_bytes() {
        // Layout stability pin: one X axis, no name, no unit.
        let metadata = DataMetadata::new(
            None,
            vec![CalibratedAxis::new(AxisType::X).with_calibration(1.0)],
        );
        let bytes = encode(&metadata);

        let mut expected = Vec::new();
        let sentinel = NULL_SENTINEL.as_bytes();
        expected.extend_from_slice(&(sentinel.len() as u32).to_le_bytes());
        expected.extend_from_slice(sentinel);
        expected.extend_from_slice(&1i32.to_le_bytes());
        expected.extend_from_slice(&1u32.to_le_bytes());
        expected.extend_from_slice(&1.0f64.to_le_bytes());
        expected.extend_from_slice(&(sentinel.len() as u32).to_le_bytes());
        expected.extend_from_slice(sentinel);

        assert_eq!(bytes, expected);
    }
}
