mod curve;
mod document;
mod error;
mod kind;
mod math;
mod options;
mod reader;
mod sink;
mod source;
mod tag;
mod text;
mod value;
mod wire;
mod writer;

/// Response curve, per-channel color curves, and color ramp payloads.
pub use curve::{ColorCurveSet, ColorRamp, ColorStop, CurvePoint, Interpolation, ResponseCurve};
/// Persisted document container and compression detection.
pub use document::{Compression, Document, FORMAT_VERSION, MAX_DECOMPRESSED_BYTES, decode_document, encode_document};
/// Error and result aliases.
pub use error::{CodecError, Result, ValueError};
/// Closed kind enumeration and storage classes.
pub use kind::{Kind, Storage};
/// Fixed-size geometry payloads.
pub use math::{BoundingBox, Color, Disc, IntVector2, Matrix3x3, Matrix3x4, Plane, Quaternion, RangedFloat, RangedInt, Ray, Vector2, Vector3, Vector4};
/// Stream read limits.
pub use options::ReadOptions;
/// Read cursor over a byte source.
pub use reader::{Reader, Terminator};
/// Output sinks for the writer.
pub use sink::{ByteSink, FixedSink, IoSink};
/// Input sources for the reader.
pub use source::{ByteSource, IoSource, SliceSource};
/// Name hashing and reverse lookup.
pub use tag::{Fnv1a, TagRegistry, TypeTag};
/// Nesting ceiling of the text form.
pub use text::MAX_TEXT_DEPTH;
/// Tagged value and its payload handles.
pub use value::{OpaquePointer, QUATERNION_ANGLE_EPSILON, ResourceHandle, Value, ValueMap};
/// Wire constants and quantization helpers.
pub use wire::{DOCUMENT_FILE_ID, PACKED_SCALE, VLE_MAX, dequantize, quantize, vle_len};
/// Write cursor over a byte sink.
pub use writer::Writer;
