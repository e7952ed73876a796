use std::fmt;

/// Discriminant of a [`Value`](crate::variant::Value). The numeric value is the wire kind byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Kind {
	/// No payload.
	None = 0,
	/// Unsigned 8-bit integer.
	Byte,
	/// Boolean.
	Bool,
	/// Signed 32-bit integer.
	Int32,
	/// Unsigned 32-bit integer.
	UInt32,
	/// 32-bit float.
	Float32,
	/// Integer min/max range.
	RangedInt,
	/// Float min/max range.
	RangedFloat,
	/// Two-component integer vector.
	IntVector2,
	/// Two-component float vector.
	Vector2,
	/// Three-component float vector.
	Vector3,
	/// Four-component float vector.
	Vector4,
	/// Row-major 3x3 matrix.
	Matrix3x3,
	/// Rotation quaternion.
	Quaternion,
	/// Row-major 3x4 affine matrix.
	Matrix3x4,
	/// Plane as normal and distance.
	Plane,
	/// Axis-aligned bounding box.
	BoundingBox,
	/// RGBA color.
	Color,
	/// Origin and direction.
	Ray,
	/// Oriented disc.
	Disc,
	/// UTF-8 string.
	String,
	/// Ordered sequence of values.
	ValueVector,
	/// Tag-keyed map of values.
	ValueMap,
	/// Type tag.
	TypeTag,
	/// Scalar response curve.
	ResponseCurve,
	/// Reference to an externally loaded resource.
	ResourceHandle,
	/// Opaque address, compared by identity.
	OpaquePointer,
	/// Per-channel color curves.
	ColorCurveSet,
	/// Color gradient.
	ColorRamp,
	/// Raw bytes.
	ByteBuffer,
}

/// How a kind's payload is held inside a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
	/// No payload.
	Empty,
	/// A single scalar stored in place.
	Inline,
	/// A small fixed-size aggregate stored in place.
	Fixed,
	/// Separately allocated payload owned by the value.
	Heap,
}

impl Kind {
	/// Every kind in wire order.
	pub const ALL: [Kind; 30] = [
		Kind::None,
		Kind::Byte,
		Kind::Bool,
		Kind::Int32,
		Kind::UInt32,
		Kind::Float32,
		Kind::RangedInt,
		Kind::RangedFloat,
		Kind::IntVector2,
		Kind::Vector2,
		Kind::Vector3,
		Kind::Vector4,
		Kind::Matrix3x3,
		Kind::Quaternion,
		Kind::Matrix3x4,
		Kind::Plane,
		Kind::BoundingBox,
		Kind::Color,
		Kind::Ray,
		Kind::Disc,
		Kind::String,
		Kind::ValueVector,
		Kind::ValueMap,
		Kind::TypeTag,
		Kind::ResponseCurve,
		Kind::ResourceHandle,
		Kind::OpaquePointer,
		Kind::ColorCurveSet,
		Kind::ColorRamp,
		Kind::ByteBuffer,
	];

	/// Decode a wire kind byte.
	pub fn from_u8(byte: u8) -> Option<Self> {
		Self::ALL.get(usize::from(byte)).copied()
	}

	/// Wire kind byte.
	pub fn as_u8(self) -> u8 {
		self as u8
	}

	/// Stable text label.
	pub fn name(self) -> &'static str {
		match self {
			Self::None => "None",
			Self::Byte => "Byte",
			Self::Bool => "Bool",
			Self::Int32 => "Int32",
			Self::UInt32 => "UInt32",
			Self::Float32 => "Float32",
			Self::RangedInt => "RangedInt",
			Self::RangedFloat => "RangedFloat",
			Self::IntVector2 => "IntVector2",
			Self::Vector2 => "Vector2",
			Self::Vector3 => "Vector3",
			Self::Vector4 => "Vector4",
			Self::Matrix3x3 => "Matrix3x3",
			Self::Quaternion => "Quaternion",
			Self::Matrix3x4 => "Matrix3x4",
			Self::Plane => "Plane",
			Self::BoundingBox => "BoundingBox",
			Self::Color => "Color",
			Self::Ray => "Ray",
			Self::Disc => "Disc",
			Self::String => "String",
			Self::ValueVector => "ValueVector",
			Self::ValueMap => "ValueMap",
			Self::TypeTag => "TypeTag",
			Self::ResponseCurve => "ResponseCurve",
			Self::ResourceHandle => "ResourceHandle",
			Self::OpaquePointer => "OpaquePointer",
			Self::ColorCurveSet => "ColorCurveSet",
			Self::ColorRamp => "ColorRamp",
			Self::ByteBuffer => "ByteBuffer",
		}
	}

	/// Look up a kind by its text label.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.name() == name)
	}

	/// Storage class of the payload.
	pub fn storage(self) -> Storage {
		match self {
			Self::None => Storage::Empty,
			Self::Byte | Self::Bool | Self::Int32 | Self::UInt32 | Self::Float32 | Self::TypeTag | Self::OpaquePointer => Storage::Inline,
			Self::RangedInt
			| Self::RangedFloat
			| Self::IntVector2
			| Self::Vector2
			| Self::Vector3
			| Self::Vector4
			| Self::Quaternion
			| Self::Color => Storage::Fixed,
			Self::Matrix3x3
			| Self::Matrix3x4
			| Self::Plane
			| Self::BoundingBox
			| Self::Ray
			| Self::Disc
			| Self::String
			| Self::ValueVector
			| Self::ValueMap
			| Self::ResponseCurve
			| Self::ResourceHandle
			| Self::ColorCurveSet
			| Self::ColorRamp
			| Self::ByteBuffer => Storage::Heap,
		}
	}

	/// Kinds that take part in numeric comparison as a scalar.
	pub fn is_numeric(self) -> bool {
		matches!(self, Self::Byte | Self::Bool | Self::Int32 | Self::UInt32 | Self::Float32)
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
