use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::variant::{
	BoundingBox, Color, ColorCurveSet, ColorRamp, Disc, IntVector2, Kind, Matrix3x3, Matrix3x4, Plane, Quaternion, RangedFloat, RangedInt, Ray,
	ResponseCurve, TypeTag, Vector2, Vector3, Vector4,
};

mod arith;
mod compare;

pub use compare::QUATERNION_ANGLE_EPSILON;

/// Tag-keyed map of child values; keys are unique and iterate in tag order.
pub type ValueMap = BTreeMap<TypeTag, Value>;

/// Address-like identity handle. Never dereferenced; compared by identity only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpaquePointer(pub u64);

impl OpaquePointer {
	/// Null handle.
	pub const NULL: Self = Self(0);

	/// Handle identifying `target` by its address.
	pub fn of<T>(target: &T) -> Self {
		Self(std::ptr::from_ref(target).addr() as u64)
	}

	/// Whether this is the null handle.
	pub fn is_null(self) -> bool {
		self.0 == 0
	}
}

/// Reference to an externally loaded asset: resource type tag plus resource name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceHandle {
	/// Resource type.
	pub kind: TypeTag,
	/// Resource name or path.
	pub name: String,
}

impl ResourceHandle {
	/// Create a handle.
	pub fn new(kind: TypeTag, name: impl Into<String>) -> Self {
		Self { kind, name: name.into() }
	}

	/// Create a handle, hashing the resource type name.
	pub fn typed(type_name: &str, name: impl Into<String>) -> Self {
		Self::new(TypeTag::new(type_name), name)
	}
}

/// Tagged value holding exactly one payload of a closed set of kinds.
///
/// Scalars and small aggregates live in place. Matrices, geometry records, curves, and
/// handles are boxed; strings, buffers, and containers own their heap storage directly.
/// Changing kind drops the old payload before the new one is installed, and same-kind
/// assignment through [`Value::assign`] reuses the existing allocation.
#[derive(Debug, Default, PartialEq)]
pub enum Value {
	/// No payload.
	#[default]
	None,
	/// Unsigned byte.
	Byte(u8),
	/// Boolean.
	Bool(bool),
	/// Signed 32-bit integer.
	Int32(i32),
	/// Unsigned 32-bit integer.
	UInt32(u32),
	/// 32-bit float.
	Float32(f32),
	/// Integer range.
	RangedInt(RangedInt),
	/// Float range.
	RangedFloat(RangedFloat),
	/// Integer 2-vector.
	IntVector2(IntVector2),
	/// Float 2-vector.
	Vector2(Vector2),
	/// Float 3-vector.
	Vector3(Vector3),
	/// Float 4-vector.
	Vector4(Vector4),
	/// 3x3 matrix.
	Matrix3x3(Box<Matrix3x3>),
	/// Quaternion.
	Quaternion(Quaternion),
	/// 3x4 matrix.
	Matrix3x4(Box<Matrix3x4>),
	/// Plane.
	Plane(Box<Plane>),
	/// Bounding box.
	BoundingBox(Box<BoundingBox>),
	/// Color.
	Color(Color),
	/// Ray.
	Ray(Box<Ray>),
	/// Disc.
	Disc(Box<Disc>),
	/// String.
	String(String),
	/// Sequence of values.
	ValueVector(Vec<Value>),
	/// Map of values.
	ValueMap(ValueMap),
	/// Type tag.
	TypeTag(TypeTag),
	/// Response curve.
	ResponseCurve(Box<ResponseCurve>),
	/// Resource handle.
	ResourceHandle(Box<ResourceHandle>),
	/// Opaque pointer.
	OpaquePointer(OpaquePointer),
	/// Color curve set.
	ColorCurveSet(Box<ColorCurveSet>),
	/// Color ramp.
	ColorRamp(Box<ColorRamp>),
	/// Byte buffer.
	ByteBuffer(Vec<u8>),
}

impl Value {
	/// Default payload of `kind`.
	pub fn default_of(kind: Kind) -> Self {
		match kind {
			Kind::None => Self::None,
			Kind::Byte => Self::Byte(0),
			Kind::Bool => Self::Bool(false),
			Kind::Int32 => Self::Int32(0),
			Kind::UInt32 => Self::UInt32(0),
			Kind::Float32 => Self::Float32(0.0),
			Kind::RangedInt => Self::RangedInt(RangedInt::default()),
			Kind::RangedFloat => Self::RangedFloat(RangedFloat::default()),
			Kind::IntVector2 => Self::IntVector2(IntVector2::default()),
			Kind::Vector2 => Self::Vector2(Vector2::ZERO),
			Kind::Vector3 => Self::Vector3(Vector3::ZERO),
			Kind::Vector4 => Self::Vector4(Vector4::ZERO),
			Kind::Matrix3x3 => Self::Matrix3x3(Box::default()),
			Kind::Quaternion => Self::Quaternion(Quaternion::IDENTITY),
			Kind::Matrix3x4 => Self::Matrix3x4(Box::default()),
			Kind::Plane => Self::Plane(Box::default()),
			Kind::BoundingBox => Self::BoundingBox(Box::default()),
			Kind::Color => Self::Color(Color::default()),
			Kind::Ray => Self::Ray(Box::default()),
			Kind::Disc => Self::Disc(Box::default()),
			Kind::String => Self::String(String::new()),
			Kind::ValueVector => Self::ValueVector(Vec::new()),
			Kind::ValueMap => Self::ValueMap(ValueMap::new()),
			Kind::TypeTag => Self::TypeTag(TypeTag::EMPTY),
			Kind::ResponseCurve => Self::ResponseCurve(Box::default()),
			Kind::ResourceHandle => Self::ResourceHandle(Box::default()),
			Kind::OpaquePointer => Self::OpaquePointer(OpaquePointer::NULL),
			Kind::ColorCurveSet => Self::ColorCurveSet(Box::default()),
			Kind::ColorRamp => Self::ColorRamp(Box::default()),
			Kind::ByteBuffer => Self::ByteBuffer(Vec::new()),
		}
	}

	/// Current kind.
	pub fn kind(&self) -> Kind {
		match self {
			Self::None => Kind::None,
			Self::Byte(_) => Kind::Byte,
			Self::Bool(_) => Kind::Bool,
			Self::Int32(_) => Kind::Int32,
			Self::UInt32(_) => Kind::UInt32,
			Self::Float32(_) => Kind::Float32,
			Self::RangedInt(_) => Kind::RangedInt,
			Self::RangedFloat(_) => Kind::RangedFloat,
			Self::IntVector2(_) => Kind::IntVector2,
			Self::Vector2(_) => Kind::Vector2,
			Self::Vector3(_) => Kind::Vector3,
			Self::Vector4(_) => Kind::Vector4,
			Self::Matrix3x3(_) => Kind::Matrix3x3,
			Self::Quaternion(_) => Kind::Quaternion,
			Self::Matrix3x4(_) => Kind::Matrix3x4,
			Self::Plane(_) => Kind::Plane,
			Self::BoundingBox(_) => Kind::BoundingBox,
			Self::Color(_) => Kind::Color,
			Self::Ray(_) => Kind::Ray,
			Self::Disc(_) => Kind::Disc,
			Self::String(_) => Kind::String,
			Self::ValueVector(_) => Kind::ValueVector,
			Self::ValueMap(_) => Kind::ValueMap,
			Self::TypeTag(_) => Kind::TypeTag,
			Self::ResponseCurve(_) => Kind::ResponseCurve,
			Self::ResourceHandle(_) => Kind::ResourceHandle,
			Self::OpaquePointer(_) => Kind::OpaquePointer,
			Self::ColorCurveSet(_) => Kind::ColorCurveSet,
			Self::ColorRamp(_) => Kind::ColorRamp,
			Self::ByteBuffer(_) => Kind::ByteBuffer,
		}
	}

	/// Whether the value holds no payload.
	pub fn is_none(&self) -> bool {
		matches!(self, Self::None)
	}

	/// Switch to `kind`, releasing the old payload and installing a default one.
	///
	/// Does nothing when the kind is unchanged.
	pub fn set_kind(&mut self, kind: Kind) {
		if self.kind() == kind {
			return;
		}
		*self = Self::None;
		*self = Self::default_of(kind);
	}

	/// Release any payload and become `None`.
	pub fn clear(&mut self) {
		*self = Self::None;
	}

	/// Copy `source` into this value, reusing heap storage when the kinds already match.
	pub fn assign(&mut self, source: &Value) {
		self.set_kind(source.kind());
		match (&mut *self, source) {
			(Self::Matrix3x3(dst), Self::Matrix3x3(src)) => **dst = **src,
			(Self::Matrix3x4(dst), Self::Matrix3x4(src)) => **dst = **src,
			(Self::Plane(dst), Self::Plane(src)) => **dst = **src,
			(Self::BoundingBox(dst), Self::BoundingBox(src)) => **dst = **src,
			(Self::Ray(dst), Self::Ray(src)) => **dst = **src,
			(Self::Disc(dst), Self::Disc(src)) => **dst = **src,
			(Self::String(dst), Self::String(src)) => dst.clone_from(src),
			(Self::ValueVector(dst), Self::ValueVector(src)) => dst.clone_from(src),
			(Self::ValueMap(dst), Self::ValueMap(src)) => dst.clone_from(src),
			(Self::ResponseCurve(dst), Self::ResponseCurve(src)) => (**dst).clone_from(src),
			(Self::ResourceHandle(dst), Self::ResourceHandle(src)) => (**dst).clone_from(src),
			(Self::ColorCurveSet(dst), Self::ColorCurveSet(src)) => (**dst).clone_from(src),
			(Self::ColorRamp(dst), Self::ColorRamp(src)) => (**dst).clone_from(src),
			(Self::ByteBuffer(dst), Self::ByteBuffer(src)) => dst.clone_from(src),
			(dst, src) => *dst = src.clone(),
		}
	}

	/// Set a string, reusing the existing string allocation when possible.
	pub fn set_string(&mut self, text: &str) {
		self.set_kind(Kind::String);
		if let Self::String(dst) = self {
			dst.clear();
			dst.push_str(text);
		}
	}

	/// Set a byte buffer, reusing the existing allocation when possible.
	pub fn set_buffer(&mut self, bytes: &[u8]) {
		self.set_kind(Kind::ByteBuffer);
		if let Self::ByteBuffer(dst) = self {
			dst.clear();
			dst.extend_from_slice(bytes);
		}
	}

	/// Set a value vector by deep copy.
	pub fn set_value_vector(&mut self, items: &[Value]) {
		self.set_kind(Kind::ValueVector);
		if let Self::ValueVector(dst) = self {
			dst.truncate(items.len());
			let (head, tail) = items.split_at(dst.len());
			for (slot, item) in dst.iter_mut().zip(head) {
				slot.assign(item);
			}
			dst.extend(tail.iter().cloned());
		}
	}

	/// Set a value map by deep copy.
	pub fn set_value_map(&mut self, map: &ValueMap) {
		self.set_kind(Kind::ValueMap);
		if let Self::ValueMap(dst) = self {
			dst.clone_from(map);
		}
	}

	/// Set a resource handle.
	pub fn set_resource_handle(&mut self, kind: TypeTag, name: &str) {
		self.set_kind(Kind::ResourceHandle);
		if let Self::ResourceHandle(dst) = self {
			dst.kind = kind;
			dst.name.clear();
			dst.name.push_str(name);
		}
	}

	/// Borrow the string payload, or `fallback` for other kinds.
	pub fn get_string<'a>(&'a self, fallback: &'a str) -> &'a str {
		match self {
			Self::String(text) => text,
			_ => fallback,
		}
	}

	/// Borrow the value vector payload.
	pub fn as_value_vector(&self) -> Option<&[Value]> {
		match self {
			Self::ValueVector(items) => Some(items),
			_ => None,
		}
	}

	/// Mutably borrow the value vector payload.
	pub fn as_value_vector_mut(&mut self) -> Option<&mut Vec<Value>> {
		match self {
			Self::ValueVector(items) => Some(items),
			_ => None,
		}
	}

	/// Borrow the value map payload.
	pub fn as_value_map(&self) -> Option<&ValueMap> {
		match self {
			Self::ValueMap(map) => Some(map),
			_ => None,
		}
	}

	/// Mutably borrow the value map payload.
	pub fn as_value_map_mut(&mut self) -> Option<&mut ValueMap> {
		match self {
			Self::ValueMap(map) => Some(map),
			_ => None,
		}
	}

	/// Borrow the byte buffer payload.
	pub fn as_buffer(&self) -> Option<&[u8]> {
		match self {
			Self::ByteBuffer(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// Borrow the resource handle payload.
	pub fn as_resource_handle(&self) -> Option<&ResourceHandle> {
		match self {
			Self::ResourceHandle(handle) => Some(handle),
			_ => None,
		}
	}

	/// Borrow the response curve payload.
	pub fn as_response_curve(&self) -> Option<&ResponseCurve> {
		match self {
			Self::ResponseCurve(curve) => Some(curve),
			_ => None,
		}
	}

	/// Borrow the color curve set payload.
	pub fn as_color_curve_set(&self) -> Option<&ColorCurveSet> {
		match self {
			Self::ColorCurveSet(curves) => Some(curves),
			_ => None,
		}
	}

	/// Borrow the color ramp payload.
	pub fn as_color_ramp(&self) -> Option<&ColorRamp> {
		match self {
			Self::ColorRamp(ramp) => Some(ramp),
			_ => None,
		}
	}

	/// Look up `key` when this value is a map.
	pub fn get(&self, key: TypeTag) -> Option<&Value> {
		self.as_value_map().and_then(|map| map.get(&key))
	}

	/// Numeric scalar payload widened to `f64`.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Byte(v) => Some(f64::from(*v)),
			Self::Bool(v) => Some(f64::from(u8::from(*v))),
			Self::Int32(v) => Some(f64::from(*v)),
			Self::UInt32(v) => Some(f64::from(*v)),
			Self::Float32(v) => Some(f64::from(*v)),
			_ => None,
		}
	}

	/// Numeric scalar payload as `f32`; other kinds read as zero.
	pub fn get_float_safe(&self) -> f32 {
		match self {
			Self::Float32(v) => *v,
			Self::Int32(v) => *v as f32,
			Self::UInt32(v) => *v as f32,
			Self::Byte(v) => f32::from(*v),
			Self::Bool(v) => f32::from(u8::from(*v)),
			_ => 0.0,
		}
	}

	/// Vector2 with widening from float and truncation from Vector3/Vector4.
	///
	/// A float fills both components when `fill_all` is set, otherwise only `x`.
	pub fn get_vector2_safe(&self, fill_all: bool) -> Vector2 {
		match self {
			Self::Vector2(v) => *v,
			Self::Vector3(v) => v.truncate(),
			Self::Vector4(v) => v.truncate().truncate(),
			Self::Float32(v) if fill_all => Vector2::splat(*v),
			Self::Float32(v) => Vector2::new(*v, 0.0),
			_ => Vector2::ZERO,
		}
	}

	/// Vector3 with widening from float and truncation from Vector4.
	pub fn get_vector3_safe(&self, fill_all: bool) -> Vector3 {
		match self {
			Self::Vector3(v) => *v,
			Self::Vector4(v) => v.truncate(),
			Self::Float32(v) if fill_all => Vector3::splat(*v),
			Self::Float32(v) => Vector3::new(*v, 0.0, 0.0),
			_ => Vector3::ZERO,
		}
	}

	/// Vector4 with widening from float.
	pub fn get_vector4_safe(&self, fill_all: bool) -> Vector4 {
		match self {
			Self::Vector4(v) => *v,
			Self::Float32(v) if fill_all => Vector4::splat(*v),
			Self::Float32(v) => Vector4::new(*v, 0.0, 0.0, 0.0),
			_ => Vector4::ZERO,
		}
	}

	/// Color from Color, Vector4 (rgba), Vector3 (opaque rgb), or float (gray or red only).
	pub fn get_color_safe(&self, fill_all: bool) -> Color {
		match self {
			Self::Color(c) => *c,
			Self::Vector4(v) => Color::new(v.x, v.y, v.z, v.w),
			Self::Vector3(v) => Color::rgb(v.x, v.y, v.z),
			Self::Float32(v) if fill_all => Color::rgb(*v, *v, *v),
			Self::Float32(v) => Color::rgb(*v, 0.0, 0.0),
			_ => Color::TRANSPARENT_BLACK,
		}
	}
}

macro_rules! copy_accessors {
	($($get:ident, $set:ident, $variant:ident, $ty:ty;)*) => {
		impl Value {
			$(
				#[doc = concat!("Payload of a `", stringify!($variant), "` value, or `fallback` for other kinds.")]
				pub fn $get(&self, fallback: $ty) -> $ty {
					match self {
						Self::$variant(v) => *v,
						_ => fallback,
					}
				}

				#[doc = concat!("Become a `", stringify!($variant), "` value.")]
				pub fn $set(&mut self, value: $ty) {
					*self = Self::$variant(value);
				}
			)*
		}

		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::$variant(value)
				}
			}
		)*
	};
}

copy_accessors! {
	get_byte, set_byte, Byte, u8;
	get_bool, set_bool, Bool, bool;
	get_int32, set_int32, Int32, i32;
	get_uint32, set_uint32, UInt32, u32;
	get_float32, set_float32, Float32, f32;
	get_ranged_int, set_ranged_int, RangedInt, RangedInt;
	get_ranged_float, set_ranged_float, RangedFloat, RangedFloat;
	get_int_vector2, set_int_vector2, IntVector2, IntVector2;
	get_vector2, set_vector2, Vector2, Vector2;
	get_vector3, set_vector3, Vector3, Vector3;
	get_vector4, set_vector4, Vector4, Vector4;
	get_quaternion, set_quaternion, Quaternion, Quaternion;
	get_color, set_color, Color, Color;
	get_type_tag, set_type_tag, TypeTag, TypeTag;
	get_opaque_pointer, set_opaque_pointer, OpaquePointer, OpaquePointer;
}

macro_rules! boxed_accessors {
	($($get:ident, $set:ident, $variant:ident, $ty:ty;)*) => {
		impl Value {
			$(
				#[doc = concat!("Copy of a `", stringify!($variant), "` payload, or `fallback` for other kinds.")]
				pub fn $get(&self, fallback: $ty) -> $ty {
					match self {
						Self::$variant(v) => **v,
						_ => fallback,
					}
				}

				#[doc = concat!("Become a `", stringify!($variant), "` value, writing into the existing box when the kind matches.")]
				pub fn $set(&mut self, value: $ty) {
					self.set_kind(Kind::$variant);
					if let Self::$variant(slot) = self {
						**slot = value;
					}
				}
			)*
		}

		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::$variant(Box::new(value))
				}
			}
		)*
	};
}

boxed_accessors! {
	get_matrix3x3, set_matrix3x3, Matrix3x3, Matrix3x3;
	get_matrix3x4, set_matrix3x4, Matrix3x4, Matrix3x4;
	get_plane, set_plane, Plane, Plane;
	get_bounding_box, set_bounding_box, BoundingBox, BoundingBox;
	get_ray, set_ray, Ray, Ray;
	get_disc, set_disc, Disc, Disc;
}

macro_rules! owned_setters {
	($($set:ident, $variant:ident, $ty:ty;)*) => {
		impl Value {
			$(
				#[doc = concat!("Become a `", stringify!($variant), "` value by deep copy.")]
				pub fn $set(&mut self, value: &$ty) {
					self.set_kind(Kind::$variant);
					if let Self::$variant(slot) = self {
						(**slot).clone_from(value);
					}
				}
			)*
		}

		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::$variant(Box::new(value))
				}
			}
		)*
	};
}

owned_setters! {
	set_response_curve, ResponseCurve, ResponseCurve;
	set_color_curve_set, ColorCurveSet, ColorCurveSet;
	set_color_ramp, ColorRamp, ColorRamp;
}

impl From<ResourceHandle> for Value {
	fn from(value: ResourceHandle) -> Self {
		Self::ResourceHandle(Box::new(value))
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::ValueVector(value)
	}
}

impl From<ValueMap> for Value {
	fn from(value: ValueMap) -> Self {
		Self::ValueMap(value)
	}
}

impl From<Vec<u8>> for Value {
	fn from(value: Vec<u8>) -> Self {
		Self::ByteBuffer(value)
	}
}

impl FromIterator<(TypeTag, Value)> for Value {
	fn from_iter<I: IntoIterator<Item = (TypeTag, Value)>>(iter: I) -> Self {
		Self::ValueMap(iter.into_iter().collect())
	}
}

impl FromIterator<Value> for Value {
	fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
		Self::ValueVector(iter.into_iter().collect())
	}
}

impl Clone for Value {
	fn clone(&self) -> Self {
		match self {
			Self::None => Self::None,
			Self::Byte(v) => Self::Byte(*v),
			Self::Bool(v) => Self::Bool(*v),
			Self::Int32(v) => Self::Int32(*v),
			Self::UInt32(v) => Self::UInt32(*v),
			Self::Float32(v) => Self::Float32(*v),
			Self::RangedInt(v) => Self::RangedInt(*v),
			Self::RangedFloat(v) => Self::RangedFloat(*v),
			Self::IntVector2(v) => Self::IntVector2(*v),
			Self::Vector2(v) => Self::Vector2(*v),
			Self::Vector3(v) => Self::Vector3(*v),
			Self::Vector4(v) => Self::Vector4(*v),
			Self::Matrix3x3(v) => Self::Matrix3x3(v.clone()),
			Self::Quaternion(v) => Self::Quaternion(*v),
			Self::Matrix3x4(v) => Self::Matrix3x4(v.clone()),
			Self::Plane(v) => Self::Plane(v.clone()),
			Self::BoundingBox(v) => Self::BoundingBox(v.clone()),
			Self::Color(v) => Self::Color(*v),
			Self::Ray(v) => Self::Ray(v.clone()),
			Self::Disc(v) => Self::Disc(v.clone()),
			Self::String(v) => Self::String(v.clone()),
			Self::ValueVector(v) => Self::ValueVector(v.clone()),
			Self::ValueMap(v) => Self::ValueMap(v.clone()),
			Self::TypeTag(v) => Self::TypeTag(*v),
			Self::ResponseCurve(v) => Self::ResponseCurve(v.clone()),
			Self::ResourceHandle(v) => Self::ResourceHandle(v.clone()),
			Self::OpaquePointer(v) => Self::OpaquePointer(*v),
			Self::ColorCurveSet(v) => Self::ColorCurveSet(v.clone()),
			Self::ColorRamp(v) => Self::ColorRamp(v.clone()),
			Self::ByteBuffer(v) => Self::ByteBuffer(v.clone()),
		}
	}

	fn clone_from(&mut self, source: &Self) {
		self.assign(source);
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_text())
	}
}

#[cfg(test)]
mod tests;
