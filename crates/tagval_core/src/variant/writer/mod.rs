use crate::variant::wire::VLE_TIERS;
use crate::variant::{
	BoundingBox, ByteSink, CodecError, Color, ColorCurveSet, ColorRamp, Disc, IntVector2, Matrix3x3, Matrix3x4, OpaquePointer, Plane,
	Quaternion, RangedFloat, RangedInt, Ray, ResourceHandle, ResponseCurve, Result, TypeTag, VLE_MAX, Value, ValueMap, Vector2, Vector3, Vector4,
	quantize,
};

/// Little-endian encoder over a [`ByteSink`].
///
/// Every write checks that the sink accepted the full byte count. A short write returns
/// [`CodecError::ShortWrite`] and the caller should treat the sink contents as truncated.
pub struct Writer<S> {
	sink: S,
	written: usize,
}

impl<S: ByteSink> Writer<S> {
	/// Create a writer over `sink`.
	pub fn new(sink: S) -> Self {
		Self { sink, written: 0 }
	}

	/// Unwrap the sink.
	pub fn into_inner(self) -> S {
		self.sink
	}

	/// Borrow the sink.
	pub fn sink(&self) -> &S {
		&self.sink
	}

	/// Total bytes accepted by the sink through this writer.
	pub fn bytes_written(&self) -> usize {
		self.written
	}

	/// Write raw bytes.
	pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
		let wrote = self.sink.write_bytes(bytes);
		self.written += wrote;
		if wrote != bytes.len() {
			return Err(CodecError::ShortWrite { need: bytes.len(), wrote });
		}
		Ok(())
	}

	/// Write one byte.
	pub fn write_u8(&mut self, value: u8) -> Result<()> {
		self.write_bytes(&[value])
	}

	/// Write a bool as one byte (`0` or `1`).
	pub fn write_bool(&mut self, value: bool) -> Result<()> {
		self.write_u8(u8::from(value))
	}

	/// Write a little-endian `i16`.
	pub fn write_i16(&mut self, value: i16) -> Result<()> {
		self.write_bytes(&value.to_le_bytes())
	}

	/// Write a little-endian `u16`.
	pub fn write_u16(&mut self, value: u16) -> Result<()> {
		self.write_bytes(&value.to_le_bytes())
	}

	/// Write a little-endian `i32`.
	pub fn write_i32(&mut self, value: i32) -> Result<()> {
		self.write_bytes(&value.to_le_bytes())
	}

	/// Write a little-endian `u32`.
	pub fn write_u32(&mut self, value: u32) -> Result<()> {
		self.write_bytes(&value.to_le_bytes())
	}

	/// Write a little-endian `u64`.
	pub fn write_u64(&mut self, value: u64) -> Result<()> {
		self.write_bytes(&value.to_le_bytes())
	}

	/// Write a little-endian `f32`.
	pub fn write_f32(&mut self, value: f32) -> Result<()> {
		self.write_bytes(&value.to_le_bytes())
	}

	/// Write a little-endian `f64`.
	pub fn write_f64(&mut self, value: f64) -> Result<()> {
		self.write_bytes(&value.to_le_bytes())
	}

	/// Write a variable-length unsigned integer.
	///
	/// The first three bytes carry 7 bits each, low bits first, with the high bit flagging a
	/// continuation. A fourth byte carries the remaining 8 bits whole.
	pub fn write_vle(&mut self, value: u32) -> Result<()> {
		if value > VLE_MAX {
			return Err(CodecError::VleOverflow { value, max: VLE_MAX });
		}

		let mut buf = [0_u8; 4];
		let mut len = 0;
		let mut rest = value;
		for limit in VLE_TIERS {
			if value < limit {
				buf[len] = rest as u8;
				return self.write_bytes(&buf[..=len]);
			}
			buf[len] = (rest & 0x7F) as u8 | 0x80;
			rest >>= 7;
			len += 1;
		}
		buf[len] = rest as u8;
		self.write_bytes(&buf)
	}

	/// Write a length or count as VLE.
	fn write_len(&mut self, len: usize) -> Result<()> {
		match u32::try_from(len) {
			Ok(value) if value <= VLE_MAX => self.write_vle(value),
			_ => Err(CodecError::LengthOverflow { len, max: VLE_MAX }),
		}
	}

	/// Write UTF-8 bytes followed by a NUL terminator.
	pub fn write_string(&mut self, text: &str) -> Result<()> {
		if let Some(index) = text.bytes().position(|byte| byte == 0) {
			return Err(CodecError::InteriorNul { index });
		}
		self.write_bytes(text.as_bytes())?;
		self.write_u8(0)
	}

	/// Write UTF-8 bytes followed by `\n`.
	pub fn write_line(&mut self, text: &str) -> Result<()> {
		self.write_bytes(text.as_bytes())?;
		self.write_u8(b'\n')
	}

	/// Write a four-character ASCII file identifier.
	pub fn write_file_id(&mut self, id: &str) -> Result<()> {
		let bytes = id.as_bytes();
		if bytes.len() != 4 || !id.is_ascii() {
			return Err(CodecError::InvalidFileId { id: id.to_owned() });
		}
		self.write_bytes(bytes)
	}

	/// Write a VLE length followed by the bytes.
	pub fn write_buffer(&mut self, bytes: &[u8]) -> Result<()> {
		self.write_len(bytes.len())?;
		self.write_bytes(bytes)
	}

	/// Write a type tag as its `u32` hash.
	pub fn write_type_tag(&mut self, tag: TypeTag) -> Result<()> {
		self.write_u32(tag.value())
	}

	/// Write a 3-vector as three 16-bit fixed-point components in `[-max_abs_coord, max_abs_coord]`.
	pub fn write_packed_vector3(&mut self, value: Vector3, max_abs_coord: f32) -> Result<()> {
		if !max_abs_coord.is_finite() || max_abs_coord <= 0.0 {
			return Err(CodecError::InvalidPackedRange { max_abs_coord });
		}
		for component in value.to_array() {
			self.write_i16(quantize(component, max_abs_coord))?;
		}
		Ok(())
	}

	/// Write a quaternion as four 16-bit fixed-point components after normalizing it.
	pub fn write_packed_quaternion(&mut self, value: Quaternion) -> Result<()> {
		for component in value.normalized().to_array() {
			self.write_i16(quantize(component, 1.0))?;
		}
		Ok(())
	}

	fn write_f32s(&mut self, values: &[f32]) -> Result<()> {
		values.iter().try_for_each(|value| self.write_f32(*value))
	}

	/// Write min then max.
	pub fn write_ranged_int(&mut self, value: RangedInt) -> Result<()> {
		self.write_i32(value.min)?;
		self.write_i32(value.max)
	}

	/// Write min then max.
	pub fn write_ranged_float(&mut self, value: RangedFloat) -> Result<()> {
		self.write_f32(value.min)?;
		self.write_f32(value.max)
	}

	/// Write x then y.
	pub fn write_int_vector2(&mut self, value: IntVector2) -> Result<()> {
		self.write_i32(value.x)?;
		self.write_i32(value.y)
	}

	/// Write x, y.
	pub fn write_vector2(&mut self, value: Vector2) -> Result<()> {
		self.write_f32s(&value.to_array())
	}

	/// Write x, y, z.
	pub fn write_vector3(&mut self, value: Vector3) -> Result<()> {
		self.write_f32s(&value.to_array())
	}

	/// Write x, y, z, w.
	pub fn write_vector4(&mut self, value: Vector4) -> Result<()> {
		self.write_f32s(&value.to_array())
	}

	/// Write w, x, y, z at full precision.
	pub fn write_quaternion(&mut self, value: Quaternion) -> Result<()> {
		self.write_f32s(&value.to_array())
	}

	/// Write r, g, b, a.
	pub fn write_color(&mut self, value: Color) -> Result<()> {
		self.write_f32s(&value.to_array())
	}

	/// Write nine floats, row-major.
	pub fn write_matrix3x3(&mut self, value: &Matrix3x3) -> Result<()> {
		self.write_f32s(&value.to_array())
	}

	/// Write twelve floats, row-major.
	pub fn write_matrix3x4(&mut self, value: &Matrix3x4) -> Result<()> {
		self.write_f32s(&value.to_array())
	}

	/// Write the normal then the distance.
	pub fn write_plane(&mut self, value: &Plane) -> Result<()> {
		self.write_f32s(&value.to_array())
	}

	/// Write min then max corners.
	pub fn write_bounding_box(&mut self, value: &BoundingBox) -> Result<()> {
		self.write_f32s(&value.to_array())
	}

	/// Write origin then direction.
	pub fn write_ray(&mut self, value: &Ray) -> Result<()> {
		self.write_f32s(&value.to_array())
	}

	/// Write center, normal, radius.
	pub fn write_disc(&mut self, value: &Disc) -> Result<()> {
		self.write_f32s(&value.to_array())
	}

	/// Write the interpolation mode byte, VLE point count, then `x, y` pairs.
	pub fn write_response_curve(&mut self, value: &ResponseCurve) -> Result<()> {
		self.write_u8(value.interpolation.as_u8())?;
		self.write_len(value.points.len())?;
		for point in &value.points {
			self.write_f32(point.x)?;
			self.write_f32(point.y)?;
		}
		Ok(())
	}

	/// Write the red, green, blue, and alpha curves in order.
	pub fn write_color_curve_set(&mut self, value: &ColorCurveSet) -> Result<()> {
		value.channels().into_iter().try_for_each(|curve| self.write_response_curve(curve))
	}

	/// Write the interpolation mode byte, VLE stop count, then `position, r, g, b, a` per stop.
	pub fn write_color_ramp(&mut self, value: &ColorRamp) -> Result<()> {
		self.write_u8(value.interpolation.as_u8())?;
		self.write_len(value.stops.len())?;
		for stop in &value.stops {
			self.write_f32(stop.position)?;
			self.write_color(stop.color)?;
		}
		Ok(())
	}

	/// Write the resource type tag then the NUL-terminated name.
	pub fn write_resource_handle(&mut self, value: &ResourceHandle) -> Result<()> {
		self.write_type_tag(value.kind)?;
		self.write_string(&value.name)
	}

	/// Write the pointer as a `u64`.
	pub fn write_opaque_pointer(&mut self, value: OpaquePointer) -> Result<()> {
		self.write_u64(value.0)
	}

	/// Write a VLE count then each element.
	pub fn write_value_vector(&mut self, items: &[Value]) -> Result<()> {
		self.write_len(items.len())?;
		items.iter().try_for_each(|item| self.write_value(item))
	}

	/// Write a VLE count then each `(tag, value)` entry in tag order.
	pub fn write_value_map(&mut self, map: &ValueMap) -> Result<()> {
		self.write_len(map.len())?;
		for (key, item) in map {
			self.write_type_tag(*key)?;
			self.write_value(item)?;
		}
		Ok(())
	}

	/// Write the kind byte then the payload.
	pub fn write_value(&mut self, value: &Value) -> Result<()> {
		self.write_u8(value.kind().as_u8())?;
		match value {
			Value::None => Ok(()),
			Value::Byte(v) => self.write_u8(*v),
			Value::Bool(v) => self.write_bool(*v),
			Value::Int32(v) => self.write_i32(*v),
			Value::UInt32(v) => self.write_u32(*v),
			Value::Float32(v) => self.write_f32(*v),
			Value::RangedInt(v) => self.write_ranged_int(*v),
			Value::RangedFloat(v) => self.write_ranged_float(*v),
			Value::IntVector2(v) => self.write_int_vector2(*v),
			Value::Vector2(v) => self.write_vector2(*v),
			Value::Vector3(v) => self.write_vector3(*v),
			Value::Vector4(v) => self.write_vector4(*v),
			Value::Matrix3x3(v) => self.write_matrix3x3(v),
			Value::Quaternion(v) => self.write_quaternion(*v),
			Value::Matrix3x4(v) => self.write_matrix3x4(v),
			Value::Plane(v) => self.write_plane(v),
			Value::BoundingBox(v) => self.write_bounding_box(v),
			Value::Color(v) => self.write_color(*v),
			Value::Ray(v) => self.write_ray(v),
			Value::Disc(v) => self.write_disc(v),
			Value::String(v) => self.write_string(v),
			Value::ValueVector(items) => {
				tracing::trace!(count = items.len(), at = self.written, "write value vector");
				self.write_value_vector(items)
			}
			Value::ValueMap(map) => {
				tracing::trace!(count = map.len(), at = self.written, "write value map");
				self.write_value_map(map)
			}
			Value::TypeTag(v) => self.write_type_tag(*v),
			Value::ResponseCurve(v) => self.write_response_curve(v),
			Value::ResourceHandle(v) => self.write_resource_handle(v),
			Value::OpaquePointer(v) => self.write_opaque_pointer(*v),
			Value::ColorCurveSet(v) => self.write_color_curve_set(v),
			Value::ColorRamp(v) => self.write_color_ramp(v),
			Value::ByteBuffer(v) => self.write_buffer(v),
		}
	}
}
