use std::cmp::Ordering;

use crate::variant::{Quaternion, Value, ValueError};

/// Largest rotation angle, in radians, at which two quaternions still compare equal.
pub const QUATERNION_ANGLE_EPSILON: f64 = 1e-4;

impl Value {
	/// Order two values.
	///
	/// Vector2 and Vector3 pairs order lexicographically by component, strings lexicographically,
	/// opaque pointers by address, and numeric scalars (byte, bool, int, uint, float) by their
	/// `f64` widening. Quaternions only support equality within [`QUATERNION_ANGLE_EPSILON`] and
	/// return `None` when they differ. `None` is also returned for NaN components.
	/// Any other pair is [`ValueError::Incomparable`].
	pub fn compare(&self, other: &Value) -> Result<Option<Ordering>, ValueError> {
		match (self, other) {
			(Self::Vector2(left), Self::Vector2(right)) => Ok(left.to_array().partial_cmp(&right.to_array())),
			(Self::Vector3(left), Self::Vector3(right)) => Ok(left.to_array().partial_cmp(&right.to_array())),
			(Self::Quaternion(left), Self::Quaternion(right)) => Ok(quaternions_match(*left, *right).then_some(Ordering::Equal)),
			(Self::String(left), Self::String(right)) => Ok(Some(left.cmp(right))),
			(Self::OpaquePointer(left), Self::OpaquePointer(right)) => Ok(Some(left.cmp(right))),
			_ => match (self.as_f64(), other.as_f64()) {
				(Some(left), Some(right)) => Ok(left.partial_cmp(&right)),
				_ => Err(ValueError::Incomparable {
					left: self.kind(),
					right: other.kind(),
				}),
			},
		}
	}

	/// `self < other`.
	pub fn less_than(&self, other: &Value) -> Result<bool, ValueError> {
		Ok(self.compare(other)? == Some(Ordering::Less))
	}

	/// `self > other`.
	pub fn greater_than(&self, other: &Value) -> Result<bool, ValueError> {
		Ok(self.compare(other)? == Some(Ordering::Greater))
	}

	/// `self <= other`.
	pub fn less_equal(&self, other: &Value) -> Result<bool, ValueError> {
		Ok(matches!(self.compare(other)?, Some(Ordering::Less | Ordering::Equal)))
	}

	/// `self >= other`.
	pub fn greater_equal(&self, other: &Value) -> Result<bool, ValueError> {
		Ok(matches!(self.compare(other)?, Some(Ordering::Greater | Ordering::Equal)))
	}

	/// Equality under the comparison rules of [`Value::compare`].
	pub fn loose_eq(&self, other: &Value) -> Result<bool, ValueError> {
		Ok(self.compare(other)? == Some(Ordering::Equal))
	}

	/// Inequality under the comparison rules of [`Value::compare`].
	pub fn loose_ne(&self, other: &Value) -> Result<bool, ValueError> {
		Ok(!self.loose_eq(other)?)
	}
}

fn quaternions_match(left: Quaternion, right: Quaternion) -> bool {
	let (Some(left), Some(right)) = (unit_f64(left), unit_f64(right)) else {
		return false;
	};
	let dot: f64 = left.iter().zip(right.iter()).map(|(a, b)| a * b).sum();
	2.0 * dot.abs().min(1.0).acos() <= QUATERNION_ANGLE_EPSILON
}

fn unit_f64(q: Quaternion) -> Option<[f64; 4]> {
	let items = q.to_array().map(f64::from);
	let len = items.iter().map(|item| item * item).sum::<f64>().sqrt();
	if len == 0.0 || !len.is_finite() {
		return None;
	}
	Some(items.map(|item| item / len))
}
