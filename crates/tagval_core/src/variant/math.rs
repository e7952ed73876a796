use serde::{Deserialize, Serialize};

/// Integer range with inclusive bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangedInt {
	/// Lower bound.
	pub min: i32,
	/// Upper bound.
	pub max: i32,
}

impl RangedInt {
	/// Create a range.
	pub const fn new(min: i32, max: i32) -> Self {
		Self { min, max }
	}

	/// Whether `value` lies within the bounds.
	pub fn contains(self, value: i32) -> bool {
		self.min <= value && value <= self.max
	}

	/// Interpolate between the bounds, rounding to the nearest integer.
	pub fn lerp(self, t: f32) -> i32 {
		let span = f64::from(self.max) - f64::from(self.min);
		(f64::from(self.min) + span * f64::from(t)).round() as i32
	}
}

/// Float range with inclusive bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangedFloat {
	/// Lower bound.
	pub min: f32,
	/// Upper bound.
	pub max: f32,
}

impl RangedFloat {
	/// Create a range.
	pub const fn new(min: f32, max: f32) -> Self {
		Self { min, max }
	}

	/// Whether `value` lies within the bounds.
	pub fn contains(self, value: f32) -> bool {
		self.min <= value && value <= self.max
	}

	/// Interpolate between the bounds.
	pub fn lerp(self, t: f32) -> f32 {
		self.min + (self.max - self.min) * t
	}
}

/// Two-component integer vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntVector2 {
	/// X component.
	pub x: i32,
	/// Y component.
	pub y: i32,
}

impl IntVector2 {
	/// Create a vector.
	pub const fn new(x: i32, y: i32) -> Self {
		Self { x, y }
	}
}

/// Two-component float vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
	/// X component.
	pub x: f32,
	/// Y component.
	pub y: f32,
}

impl Vector2 {
	/// All components zero.
	pub const ZERO: Self = Self::new(0.0, 0.0);

	/// Create a vector.
	pub const fn new(x: f32, y: f32) -> Self {
		Self { x, y }
	}

	/// Same value in every component.
	pub const fn splat(value: f32) -> Self {
		Self::new(value, value)
	}

	/// Components in field order.
	pub fn to_array(self) -> [f32; 2] {
		[self.x, self.y]
	}

	/// Build from components in field order.
	pub fn from_array([x, y]: [f32; 2]) -> Self {
		Self::new(x, y)
	}

	/// Euclidean length.
	pub fn length(self) -> f32 {
		self.x.hypot(self.y)
	}
}

/// Three-component float vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
	/// X component.
	pub x: f32,
	/// Y component.
	pub y: f32,
	/// Z component.
	pub z: f32,
}

impl Vector3 {
	/// All components zero.
	pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
	/// Unit Y axis.
	pub const UP: Self = Self::new(0.0, 1.0, 0.0);

	/// Create a vector.
	pub const fn new(x: f32, y: f32, z: f32) -> Self {
		Self { x, y, z }
	}

	/// Same value in every component.
	pub const fn splat(value: f32) -> Self {
		Self::new(value, value, value)
	}

	/// Components in field order.
	pub fn to_array(self) -> [f32; 3] {
		[self.x, self.y, self.z]
	}

	/// Build from components in field order.
	pub fn from_array([x, y, z]: [f32; 3]) -> Self {
		Self::new(x, y, z)
	}

	/// Drop the Z component.
	pub fn truncate(self) -> Vector2 {
		Vector2::new(self.x, self.y)
	}

	/// Dot product.
	pub fn dot(self, other: Self) -> f32 {
		self.x * other.x + self.y * other.y + self.z * other.z
	}

	/// Euclidean length.
	pub fn length(self) -> f32 {
		self.dot(self).sqrt()
	}
}

/// Four-component float vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector4 {
	/// X component.
	pub x: f32,
	/// Y component.
	pub y: f32,
	/// Z component.
	pub z: f32,
	/// W component.
	pub w: f32,
}

impl Vector4 {
	/// All components zero.
	pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

	/// Create a vector.
	pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
		Self { x, y, z, w }
	}

	/// Same value in every component.
	pub const fn splat(value: f32) -> Self {
		Self::new(value, value, value, value)
	}

	/// Components in field order.
	pub fn to_array(self) -> [f32; 4] {
		[self.x, self.y, self.z, self.w]
	}

	/// Build from components in field order.
	pub fn from_array([x, y, z, w]: [f32; 4]) -> Self {
		Self::new(x, y, z, w)
	}

	/// Drop the W component.
	pub fn truncate(self) -> Vector3 {
		Vector3::new(self.x, self.y, self.z)
	}
}

/// Rotation quaternion, stored and serialized as `w, x, y, z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
	/// Real part.
	pub w: f32,
	/// I component.
	pub x: f32,
	/// J component.
	pub y: f32,
	/// K component.
	pub z: f32,
}

impl Default for Quaternion {
	fn default() -> Self {
		Self::IDENTITY
	}
}

impl Quaternion {
	/// No rotation.
	pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

	/// Create a quaternion from `w, x, y, z`.
	pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
		Self { w, x, y, z }
	}

	/// Rotation of `angle` radians about a unit `axis`.
	pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
		let (sin, cos) = (angle * 0.5).sin_cos();
		Self::new(cos, axis.x * sin, axis.y * sin, axis.z * sin)
	}

	/// Components in field order.
	pub fn to_array(self) -> [f32; 4] {
		[self.w, self.x, self.y, self.z]
	}

	/// Build from components in field order.
	pub fn from_array([w, x, y, z]: [f32; 4]) -> Self {
		Self::new(w, x, y, z)
	}

	/// Four-dimensional dot product.
	pub fn dot(self, other: Self) -> f32 {
		self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
	}

	/// Unit-length copy; a zero quaternion becomes the identity.
	pub fn normalized(self) -> Self {
		let len_sq = self.dot(self);
		if len_sq <= f32::EPSILON || !len_sq.is_finite() {
			return Self::IDENTITY;
		}
		let inv = len_sq.sqrt().recip();
		Self::new(self.w * inv, self.x * inv, self.y * inv, self.z * inv)
	}

	/// Rotation angle in radians between two orientations, ignoring sign.
	pub fn angle_to(self, other: Self) -> f32 {
		let dot = self.normalized().dot(other.normalized()).abs().min(1.0);
		2.0 * dot.acos()
	}
}

/// Linear RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
	/// Red channel.
	pub r: f32,
	/// Green channel.
	pub g: f32,
	/// Blue channel.
	pub b: f32,
	/// Alpha channel.
	pub a: f32,
}

impl Default for Color {
	fn default() -> Self {
		Self::WHITE
	}
}

impl Color {
	/// Opaque white.
	pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
	/// Opaque black.
	pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
	/// All channels zero.
	pub const TRANSPARENT_BLACK: Self = Self::new(0.0, 0.0, 0.0, 0.0);

	/// Create a color.
	pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
		Self { r, g, b, a }
	}

	/// Opaque color from RGB.
	pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
		Self::new(r, g, b, 1.0)
	}

	/// Channels in field order.
	pub fn to_array(self) -> [f32; 4] {
		[self.r, self.g, self.b, self.a]
	}

	/// Build from channels in field order.
	pub fn from_array([r, g, b, a]: [f32; 4]) -> Self {
		Self::new(r, g, b, a)
	}

	/// Apply `op` to every channel pair.
	pub fn zip_with(self, other: Self, op: impl Fn(f32, f32) -> f32) -> Self {
		Self::new(op(self.r, other.r), op(self.g, other.g), op(self.b, other.b), op(self.a, other.a))
	}

	/// Apply `op` to every channel.
	pub fn map(self, op: impl Fn(f32) -> f32) -> Self {
		Self::new(op(self.r), op(self.g), op(self.b), op(self.a))
	}

	/// Channel-wise linear interpolation.
	pub fn lerp(self, other: Self, t: f32) -> Self {
		self.zip_with(other, |from, to| from + (to - from) * t)
	}
}

/// Row-major 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3x3 {
	/// Rows of the matrix.
	pub m: [[f32; 3]; 3],
}

impl Default for Matrix3x3 {
	fn default() -> Self {
		Self::IDENTITY
	}
}

impl Matrix3x3 {
	/// Identity matrix.
	pub const IDENTITY: Self = Self {
		m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
	};

	/// Elements in row-major order.
	pub fn to_array(self) -> [f32; 9] {
		let mut out = [0.0; 9];
		for (row, chunk) in self.m.iter().zip(out.chunks_exact_mut(3)) {
			chunk.copy_from_slice(row);
		}
		out
	}

	/// Build from elements in row-major order.
	pub fn from_array(items: [f32; 9]) -> Self {
		let mut m = [[0.0; 3]; 3];
		for (row, chunk) in m.iter_mut().zip(items.chunks_exact(3)) {
			row.copy_from_slice(chunk);
		}
		Self { m }
	}
}

/// Row-major 3x4 affine matrix: rotation/scale columns followed by translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3x4 {
	/// Rows of the matrix.
	pub m: [[f32; 4]; 3],
}

impl Default for Matrix3x4 {
	fn default() -> Self {
		Self::IDENTITY
	}
}

impl Matrix3x4 {
	/// Identity transform.
	pub const IDENTITY: Self = Self {
		m: [[1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 0.0]],
	};

	/// Pure translation.
	pub fn from_translation(offset: Vector3) -> Self {
		let mut out = Self::IDENTITY;
		out.m[0][3] = offset.x;
		out.m[1][3] = offset.y;
		out.m[2][3] = offset.z;
		out
	}

	/// Translation column.
	pub fn translation(&self) -> Vector3 {
		Vector3::new(self.m[0][3], self.m[1][3], self.m[2][3])
	}

	/// Elements in row-major order.
	pub fn to_array(self) -> [f32; 12] {
		let mut out = [0.0; 12];
		for (row, chunk) in self.m.iter().zip(out.chunks_exact_mut(4)) {
			chunk.copy_from_slice(row);
		}
		out
	}

	/// Build from elements in row-major order.
	pub fn from_array(items: [f32; 12]) -> Self {
		let mut m = [[0.0; 4]; 3];
		for (row, chunk) in m.iter_mut().zip(items.chunks_exact(4)) {
			row.copy_from_slice(chunk);
		}
		Self { m }
	}
}

/// Plane `normal . p + d = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
	/// Plane normal.
	pub normal: Vector3,
	/// Signed distance term.
	pub d: f32,
}

impl Default for Plane {
	fn default() -> Self {
		Self { normal: Vector3::UP, d: 0.0 }
	}
}

impl Plane {
	/// Components `nx, ny, nz, d`.
	pub fn to_array(self) -> [f32; 4] {
		[self.normal.x, self.normal.y, self.normal.z, self.d]
	}

	/// Build from components `nx, ny, nz, d`.
	pub fn from_array([x, y, z, d]: [f32; 4]) -> Self {
		Self {
			normal: Vector3::new(x, y, z),
			d,
		}
	}

	/// Signed distance from the plane to `point`.
	pub fn distance(&self, point: Vector3) -> f32 {
		self.normal.dot(point) + self.d
	}
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
	/// Minimum corner.
	pub min: Vector3,
	/// Maximum corner.
	pub max: Vector3,
}

impl BoundingBox {
	/// Components `min.xyz, max.xyz`.
	pub fn to_array(self) -> [f32; 6] {
		[self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z]
	}

	/// Build from components `min.xyz, max.xyz`.
	pub fn from_array([a, b, c, d, e, f]: [f32; 6]) -> Self {
		Self {
			min: Vector3::new(a, b, c),
			max: Vector3::new(d, e, f),
		}
	}

	/// Whether `point` lies inside or on the box.
	pub fn contains(&self, point: Vector3) -> bool {
		(self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y) && (self.min.z..=self.max.z).contains(&point.z)
	}
}

/// Half-line from an origin along a direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
	/// Start point.
	pub origin: Vector3,
	/// Direction, not necessarily normalized.
	pub direction: Vector3,
}

impl Default for Ray {
	fn default() -> Self {
		Self {
			origin: Vector3::ZERO,
			direction: Vector3::new(0.0, 0.0, 1.0),
		}
	}
}

impl Ray {
	/// Components `origin.xyz, direction.xyz`.
	pub fn to_array(self) -> [f32; 6] {
		[self.origin.x, self.origin.y, self.origin.z, self.direction.x, self.direction.y, self.direction.z]
	}

	/// Build from components `origin.xyz, direction.xyz`.
	pub fn from_array([a, b, c, d, e, f]: [f32; 6]) -> Self {
		Self {
			origin: Vector3::new(a, b, c),
			direction: Vector3::new(d, e, f),
		}
	}
}

/// Flat disc in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disc {
	/// Center point.
	pub center: Vector3,
	/// Facing normal.
	pub normal: Vector3,
	/// Radius.
	pub radius: f32,
}

impl Default for Disc {
	fn default() -> Self {
		Self {
			center: Vector3::ZERO,
			normal: Vector3::UP,
			radius: 1.0,
		}
	}
}

impl Disc {
	/// Components `center.xyz, normal.xyz, radius`.
	pub fn to_array(self) -> [f32; 7] {
		[self.center.x, self.center.y, self.center.z, self.normal.x, self.normal.y, self.normal.z, self.radius]
	}

	/// Build from components `center.xyz, normal.xyz, radius`.
	pub fn from_array([a, b, c, d, e, f, radius]: [f32; 7]) -> Self {
		Self {
			center: Vector3::new(a, b, c),
			normal: Vector3::new(d, e, f),
			radius,
		}
	}
}
