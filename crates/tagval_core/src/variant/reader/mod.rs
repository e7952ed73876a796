use crate::variant::{
	BoundingBox, ByteSource, CodecError, Color, ColorCurveSet, ColorRamp, ColorStop, CurvePoint, Disc, IntVector2, Interpolation, Kind, Matrix3x3,
	Matrix3x4, OpaquePointer, Plane, Quaternion, RangedFloat, RangedInt, Ray, ReadOptions, ResourceHandle, ResponseCurve, Result, TypeTag, Value,
	ValueMap, Vector2, Vector3, Vector4, dequantize,
};

/// What ended a string read by [`Reader::read_string_until_nul`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
	/// A NUL byte was consumed.
	Nul,
	/// The source ran out first.
	Eof,
}

/// Little-endian decoder over a [`ByteSource`], mirroring [`Writer`](crate::variant::Writer).
///
/// Reads never run past the source: a short read returns [`CodecError::UnexpectedEof`]
/// and leaves the position where the read started.
pub struct Reader<S> {
	source: S,
	options: ReadOptions,
}

impl<S: ByteSource> Reader<S> {
	/// Create a reader with default limits.
	pub fn new(source: S) -> Self {
		Self::with_options(source, ReadOptions::default())
	}

	/// Create a reader with explicit limits.
	pub fn with_options(source: S, options: ReadOptions) -> Self {
		Self { source, options }
	}

	/// Active limits.
	pub fn options(&self) -> &ReadOptions {
		&self.options
	}

	/// Unwrap the source.
	pub fn into_inner(self) -> S {
		self.source
	}

	/// Current byte offset.
	pub fn position(&self) -> usize {
		self.source.position()
	}

	/// Total source size.
	pub fn size(&self) -> usize {
		self.source.size()
	}

	/// Bytes left before the end of the source.
	pub fn remaining(&self) -> usize {
		self.size().saturating_sub(self.position())
	}

	/// Whether the position has reached the end of the source.
	pub fn is_eof(&self) -> bool {
		self.position() >= self.size()
	}

	/// Move to an absolute offset. Returns `false` when out of range.
	pub fn seek(&mut self, position: usize) -> bool {
		self.source.seek(position)
	}

	fn ensure(&self, need: usize) -> Result<()> {
		let rem = self.remaining();
		if need > rem {
			return Err(CodecError::UnexpectedEof {
				at: self.position(),
				need,
				rem,
			});
		}
		Ok(())
	}

	/// Fill `buf` completely.
	pub fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
		self.ensure(buf.len())?;
		let at = self.position();
		let got = self.source.read_bytes(buf);
		if got != buf.len() {
			self.source.seek(at);
			return Err(CodecError::UnexpectedEof { at, need: buf.len(), rem: got });
		}
		Ok(())
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let mut buf = [0; N];
		self.read_into(&mut buf)?;
		Ok(buf)
	}

	/// Read exactly `len` bytes.
	pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
		self.ensure(len)?;
		let mut buf = vec![0; len];
		self.read_into(&mut buf)?;
		Ok(buf)
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Read a bool; any non-zero byte is `true`.
	pub fn read_bool(&mut self) -> Result<bool> {
		Ok(self.read_u8()? != 0)
	}

	/// Read a little-endian `i16`.
	pub fn read_i16(&mut self) -> Result<i16> {
		Ok(i16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u64`.
	pub fn read_u64(&mut self) -> Result<u64> {
		Ok(u64::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f32`.
	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f64`.
	pub fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_le_bytes(self.read_array()?))
	}

	/// Read a variable-length unsigned integer written by [`Writer::write_vle`](crate::variant::Writer::write_vle).
	pub fn read_vle(&mut self) -> Result<u32> {
		let mut value = 0_u32;
		for shift in [0, 7, 14] {
			let byte = self.read_u8()?;
			value |= u32::from(byte & 0x7F) << shift;
			if byte & 0x80 == 0 {
				return Ok(value);
			}
		}
		let last = self.read_u8()?;
		Ok(value | (u32::from(last) << 21))
	}

	/// Read a VLE element count, checking it against the container limit and the bytes left.
	fn read_count(&mut self, min_item_len: usize) -> Result<usize> {
		let count = self.read_vle()? as usize;
		if count > self.options.max_container_len {
			return Err(CodecError::ContainerTooLarge {
				count,
				max: self.options.max_container_len,
			});
		}
		self.ensure(count.saturating_mul(min_item_len))?;
		Ok(count)
	}

	/// Read bytes up to a NUL or the end of the source, reporting which one stopped it.
	pub fn read_string_until_nul(&mut self) -> Result<(String, Terminator)> {
		let start = self.position();
		let mut bytes = Vec::new();
		let mut terminator = Terminator::Eof;
		while !self.is_eof() {
			match self.read_u8()? {
				0 => {
					terminator = Terminator::Nul;
					break;
				}
				byte => bytes.push(byte),
			}
		}
		let text = String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8 { at: start })?;
		Ok((text, terminator))
	}

	/// Read a NUL-terminated string. A missing terminator is an error.
	pub fn read_string(&mut self) -> Result<String> {
		let start = self.position();
		match self.read_string_until_nul()? {
			(text, Terminator::Nul) => Ok(text),
			(_, Terminator::Eof) => Err(CodecError::UnterminatedString { at: start }),
		}
	}

	/// Read one line ending in LF, CR, or CR LF. The terminator is consumed, not returned.
	pub fn read_line(&mut self) -> Result<String> {
		let start = self.position();
		let mut bytes = Vec::new();
		while !self.is_eof() {
			match self.read_u8()? {
				b'\n' => break,
				b'\r' => {
					if !self.is_eof() && self.read_u8()? != b'\n' {
						let back = self.position() - 1;
						self.seek(back);
					}
					break;
				}
				byte => bytes.push(byte),
			}
		}
		String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8 { at: start })
	}

	/// Read a four-byte file identifier.
	pub fn read_file_id(&mut self) -> Result<[u8; 4]> {
		self.read_array()
	}

	/// Read a VLE length followed by that many bytes.
	pub fn read_buffer(&mut self) -> Result<Vec<u8>> {
		let len = self.read_vle()? as usize;
		if len > self.options.max_buffer_len {
			return Err(CodecError::BufferTooLarge {
				len,
				max: self.options.max_buffer_len,
			});
		}
		self.read_bytes(len)
	}

	/// Read a type tag.
	pub fn read_type_tag(&mut self) -> Result<TypeTag> {
		Ok(TypeTag::from_raw(self.read_u32()?))
	}

	/// Read a 3-vector written by [`Writer::write_packed_vector3`](crate::variant::Writer::write_packed_vector3).
	pub fn read_packed_vector3(&mut self, max_abs_coord: f32) -> Result<Vector3> {
		if !max_abs_coord.is_finite() || max_abs_coord <= 0.0 {
			return Err(CodecError::InvalidPackedRange { max_abs_coord });
		}
		let x = dequantize(self.read_i16()?, max_abs_coord);
		let y = dequantize(self.read_i16()?, max_abs_coord);
		let z = dequantize(self.read_i16()?, max_abs_coord);
		Ok(Vector3::new(x, y, z))
	}

	/// Read a packed quaternion and re-normalize it.
	pub fn read_packed_quaternion(&mut self) -> Result<Quaternion> {
		let mut items = [0.0; 4];
		for item in &mut items {
			*item = dequantize(self.read_i16()?, 1.0);
		}
		Ok(Quaternion::from_array(items).normalized())
	}

	fn read_f32s<const N: usize>(&mut self) -> Result<[f32; N]> {
		self.ensure(N * 4)?;
		let mut items = [0.0; N];
		for item in &mut items {
			*item = self.read_f32()?;
		}
		Ok(items)
	}

	/// Read min then max.
	pub fn read_ranged_int(&mut self) -> Result<RangedInt> {
		Ok(RangedInt::new(self.read_i32()?, self.read_i32()?))
	}

	/// Read min then max.
	pub fn read_ranged_float(&mut self) -> Result<RangedFloat> {
		Ok(RangedFloat::new(self.read_f32()?, self.read_f32()?))
	}

	/// Read x then y.
	pub fn read_int_vector2(&mut self) -> Result<IntVector2> {
		Ok(IntVector2::new(self.read_i32()?, self.read_i32()?))
	}

	/// Read x, y.
	pub fn read_vector2(&mut self) -> Result<Vector2> {
		self.read_f32s().map(Vector2::from_array)
	}

	/// Read x, y, z.
	pub fn read_vector3(&mut self) -> Result<Vector3> {
		self.read_f32s().map(Vector3::from_array)
	}

	/// Read x, y, z, w.
	pub fn read_vector4(&mut self) -> Result<Vector4> {
		self.read_f32s().map(Vector4::from_array)
	}

	/// Read w, x, y, z.
	pub fn read_quaternion(&mut self) -> Result<Quaternion> {
		self.read_f32s().map(Quaternion::from_array)
	}

	/// Read r, g, b, a.
	pub fn read_color(&mut self) -> Result<Color> {
		self.read_f32s().map(Color::from_array)
	}

	/// Read nine floats, row-major.
	pub fn read_matrix3x3(&mut self) -> Result<Matrix3x3> {
		self.read_f32s().map(Matrix3x3::from_array)
	}

	/// Read twelve floats, row-major.
	pub fn read_matrix3x4(&mut self) -> Result<Matrix3x4> {
		self.read_f32s().map(Matrix3x4::from_array)
	}

	/// Read the normal then the distance.
	pub fn read_plane(&mut self) -> Result<Plane> {
		self.read_f32s().map(Plane::from_array)
	}

	/// Read min then max corners.
	pub fn read_bounding_box(&mut self) -> Result<BoundingBox> {
		self.read_f32s().map(BoundingBox::from_array)
	}

	/// Read origin then direction.
	pub fn read_ray(&mut self) -> Result<Ray> {
		self.read_f32s().map(Ray::from_array)
	}

	/// Read center, normal, radius.
	pub fn read_disc(&mut self) -> Result<Disc> {
		self.read_f32s().map(Disc::from_array)
	}

	fn read_interpolation(&mut self) -> Result<Interpolation> {
		let at = self.position();
		let mode = self.read_u8()?;
		Interpolation::from_u8(mode).ok_or(CodecError::UnknownInterpolation { mode, at })
	}

	/// Read a response curve, restoring `x` order.
	pub fn read_response_curve(&mut self) -> Result<ResponseCurve> {
		let interpolation = self.read_interpolation()?;
		let count = self.read_count(8)?;
		let mut points = Vec::with_capacity(count);
		for _ in 0..count {
			points.push(CurvePoint::new(self.read_f32()?, self.read_f32()?));
		}
		let mut curve = ResponseCurve { interpolation, points };
		curve.sort_points();
		Ok(curve)
	}

	/// Read the red, green, blue, and alpha curves.
	pub fn read_color_curve_set(&mut self) -> Result<ColorCurveSet> {
		Ok(ColorCurveSet {
			red: self.read_response_curve()?,
			green: self.read_response_curve()?,
			blue: self.read_response_curve()?,
			alpha: self.read_response_curve()?,
		})
	}

	/// Read a color ramp, restoring position order.
	pub fn read_color_ramp(&mut self) -> Result<ColorRamp> {
		let interpolation = self.read_interpolation()?;
		let count = self.read_count(20)?;
		let mut stops = Vec::with_capacity(count);
		for _ in 0..count {
			let position = self.read_f32()?;
			stops.push(ColorStop::new(position, self.read_color()?));
		}
		let mut ramp = ColorRamp { interpolation, stops };
		ramp.sort_stops();
		Ok(ramp)
	}

	/// Read the resource type tag then the NUL-terminated name.
	pub fn read_resource_handle(&mut self) -> Result<ResourceHandle> {
		let kind = self.read_type_tag()?;
		Ok(ResourceHandle::new(kind, self.read_string()?))
	}

	/// Read a pointer-sized identity.
	pub fn read_opaque_pointer(&mut self) -> Result<OpaquePointer> {
		Ok(OpaquePointer(self.read_u64()?))
	}

	/// Read a kind byte and its payload.
	pub fn read_value(&mut self) -> Result<Value> {
		self.read_value_at(0)
	}

	fn read_value_at(&mut self, depth: u32) -> Result<Value> {
		let at = self.position();
		let byte = self.read_u8()?;
		let kind = Kind::from_u8(byte).ok_or(CodecError::UnknownKind { kind: byte, at })?;
		let value = match kind {
			Kind::None => Value::None,
			Kind::Byte => Value::Byte(self.read_u8()?),
			Kind::Bool => Value::Bool(self.read_bool()?),
			Kind::Int32 => Value::Int32(self.read_i32()?),
			Kind::UInt32 => Value::UInt32(self.read_u32()?),
			Kind::Float32 => Value::Float32(self.read_f32()?),
			Kind::RangedInt => Value::RangedInt(self.read_ranged_int()?),
			Kind::RangedFloat => Value::RangedFloat(self.read_ranged_float()?),
			Kind::IntVector2 => Value::IntVector2(self.read_int_vector2()?),
			Kind::Vector2 => Value::Vector2(self.read_vector2()?),
			Kind::Vector3 => Value::Vector3(self.read_vector3()?),
			Kind::Vector4 => Value::Vector4(self.read_vector4()?),
			Kind::Matrix3x3 => Value::from(self.read_matrix3x3()?),
			Kind::Quaternion => Value::Quaternion(self.read_quaternion()?),
			Kind::Matrix3x4 => Value::from(self.read_matrix3x4()?),
			Kind::Plane => Value::from(self.read_plane()?),
			Kind::BoundingBox => Value::from(self.read_bounding_box()?),
			Kind::Color => Value::Color(self.read_color()?),
			Kind::Ray => Value::from(self.read_ray()?),
			Kind::Disc => Value::from(self.read_disc()?),
			Kind::String => Value::String(self.read_string()?),
			Kind::ValueVector => {
				self.enter(depth)?;
				let count = self.read_count(1)?;
				tracing::trace!(count, at, depth, "read value vector");
				let mut items = Vec::with_capacity(count);
				for _ in 0..count {
					items.push(self.read_value_at(depth + 1)?);
				}
				Value::ValueVector(items)
			}
			Kind::ValueMap => {
				self.enter(depth)?;
				let count = self.read_count(5)?;
				tracing::trace!(count, at, depth, "read value map");
				let mut map = ValueMap::new();
				for _ in 0..count {
					let key = self.read_type_tag()?;
					let item = self.read_value_at(depth + 1)?;
					if map.insert(key, item).is_some() {
						tracing::debug!(%key, at, "duplicate map key, keeping last");
					}
				}
				Value::ValueMap(map)
			}
			Kind::TypeTag => Value::TypeTag(self.read_type_tag()?),
			Kind::ResponseCurve => Value::from(self.read_response_curve()?),
			Kind::ResourceHandle => Value::from(self.read_resource_handle()?),
			Kind::OpaquePointer => Value::OpaquePointer(self.read_opaque_pointer()?),
			Kind::ColorCurveSet => Value::from(self.read_color_curve_set()?),
			Kind::ColorRamp => Value::from(self.read_color_ramp()?),
			Kind::ByteBuffer => Value::ByteBuffer(self.read_buffer()?),
		};
		Ok(value)
	}

	fn enter(&self, depth: u32) -> Result<()> {
		if depth >= self.options.max_depth {
			return Err(CodecError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}
		Ok(())
	}
}
