//! Human-readable text form of values.
//!
//! Scalars, vectors, matrices, and geometry records print as space-separated numbers in field
//! order. Ranges, curves, ramps, and containers print as JSON. Container elements carry their
//! kind name so the text can be parsed back without outside type information.
//!
//! Non-finite floats survive the plain token form but not the JSON form, where they become
//! `null`. JSON text is accepted up to [`MAX_TEXT_DEPTH`] nested containers, the same ceiling
//! [`ReadOptions::trusted`](crate::variant::ReadOptions::trusted) applies to binary streams.

use std::fmt::Write as _;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::variant::{
	BoundingBox, Color, ColorCurveSet, ColorRamp, Disc, IntVector2, Kind, Matrix3x3, Matrix3x4, OpaquePointer, Plane, Quaternion, RangedFloat,
	RangedInt, Ray, ResourceHandle, ResponseCurve, TypeTag, Value, ValueError, ValueMap, Vector2, Vector3, Vector4,
};

/// Deepest container nesting [`Value::from_text`] accepts.
pub const MAX_TEXT_DEPTH: usize = 1024;

/// Each container level costs two JSON levels: the payload array or object and the typed node.
const MAX_JSON_DEPTH: usize = 2 * MAX_TEXT_DEPTH + 2;

impl Value {
	/// Render the payload as text. [`Value::from_text`] with the same kind parses it back.
	pub fn to_text(&self) -> String {
		match self {
			Self::None => String::new(),
			Self::Byte(v) => v.to_string(),
			Self::Bool(v) => v.to_string(),
			Self::Int32(v) => v.to_string(),
			Self::UInt32(v) => v.to_string(),
			Self::Float32(v) => v.to_string(),
			Self::IntVector2(v) => join(&[v.x, v.y]),
			Self::Vector2(v) => join(&v.to_array()),
			Self::Vector3(v) => join(&v.to_array()),
			Self::Vector4(v) => join(&v.to_array()),
			Self::Matrix3x3(v) => join(&v.to_array()),
			Self::Quaternion(v) => join(&v.to_array()),
			Self::Matrix3x4(v) => join(&v.to_array()),
			Self::Plane(v) => join(&v.to_array()),
			Self::BoundingBox(v) => join(&v.to_array()),
			Self::Color(v) => join(&v.to_array()),
			Self::Ray(v) => join(&v.to_array()),
			Self::Disc(v) => join(&v.to_array()),
			Self::String(v) => v.clone(),
			Self::TypeTag(v) => v.to_string(),
			Self::OpaquePointer(v) => format!("0x{:016x}", v.0),
			Self::ResourceHandle(v) => format!("{};{}", v.kind, v.name),
			Self::ByteBuffer(v) => {
				let mut out = String::with_capacity(v.len() * 3);
				for (index, byte) in v.iter().enumerate() {
					if index > 0 {
						out.push(' ');
					}
					let _ = write!(out, "{byte:02x}");
				}
				out
			}
			Self::RangedInt(_) | Self::RangedFloat(_) | Self::ValueVector(_) | Self::ValueMap(_) | Self::ResponseCurve(_) | Self::ColorCurveSet(_) | Self::ColorRamp(_) => {
				self.json_payload().to_string()
			}
		}
	}

	/// Parse text produced by [`Value::to_text`] as a value of `kind`.
	pub fn from_text(kind: Kind, text: &str) -> Result<Self, ValueError> {
		let fail = || ValueError::Parse { kind, text: text.to_owned() };
		let value = match kind {
			Kind::None if text.trim().is_empty() => Self::None,
			Kind::None => return Err(fail()),
			Kind::Byte => Self::Byte(text.trim().parse().map_err(|_| fail())?),
			Kind::Bool => Self::Bool(text.trim().parse().map_err(|_| fail())?),
			Kind::Int32 => Self::Int32(text.trim().parse().map_err(|_| fail())?),
			Kind::UInt32 => Self::UInt32(text.trim().parse().map_err(|_| fail())?),
			Kind::Float32 => Self::Float32(text.trim().parse().map_err(|_| fail())?),
			Kind::IntVector2 => {
				let [x, y] = tokens(text).ok_or_else(fail)?;
				Self::IntVector2(IntVector2::new(x, y))
			}
			Kind::Vector2 => Self::Vector2(Vector2::from_array(tokens(text).ok_or_else(fail)?)),
			Kind::Vector3 => Self::Vector3(Vector3::from_array(tokens(text).ok_or_else(fail)?)),
			Kind::Vector4 => Self::Vector4(Vector4::from_array(tokens(text).ok_or_else(fail)?)),
			Kind::Matrix3x3 => Self::from(Matrix3x3::from_array(tokens(text).ok_or_else(fail)?)),
			Kind::Quaternion => Self::Quaternion(Quaternion::from_array(tokens(text).ok_or_else(fail)?)),
			Kind::Matrix3x4 => Self::from(Matrix3x4::from_array(tokens(text).ok_or_else(fail)?)),
			Kind::Plane => Self::from(Plane::from_array(tokens(text).ok_or_else(fail)?)),
			Kind::BoundingBox => Self::from(BoundingBox::from_array(tokens(text).ok_or_else(fail)?)),
			Kind::Color => Self::Color(Color::from_array(tokens(text).ok_or_else(fail)?)),
			Kind::Ray => Self::from(Ray::from_array(tokens(text).ok_or_else(fail)?)),
			Kind::Disc => Self::from(Disc::from_array(tokens(text).ok_or_else(fail)?)),
			Kind::String => Self::String(text.to_owned()),
			Kind::TypeTag => Self::TypeTag(TypeTag::parse_hex(text.trim()).ok_or_else(fail)?),
			Kind::OpaquePointer => Self::OpaquePointer(parse_pointer(text).ok_or_else(fail)?),
			Kind::ResourceHandle => {
				let (tag, name) = text.split_once(';').ok_or_else(fail)?;
				let tag = TypeTag::parse_hex(tag.trim()).ok_or_else(fail)?;
				Self::from(ResourceHandle::new(tag, name))
			}
			Kind::ByteBuffer => Self::ByteBuffer(parse_hex_bytes(text).ok_or_else(fail)?),
			Kind::RangedInt | Kind::RangedFloat | Kind::ValueVector | Kind::ValueMap | Kind::ResponseCurve | Kind::ColorCurveSet | Kind::ColorRamp => {
				let node = parse_json(text).ok_or_else(fail)?;
				Self::from_json_payload(kind, &node)?
			}
		};
		Ok(value)
	}

	/// Self-describing JSON node: `{"type": <kind name>, "value": <payload>}`.
	///
	/// Structured kinds nest their JSON payload; every other kind stores its text form as a
	/// JSON string.
	pub fn to_typed_json(&self) -> JsonValue {
		let mut node = Map::new();
		node.insert("type".to_owned(), JsonValue::String(self.kind().name().to_owned()));
		node.insert("value".to_owned(), self.json_node());
		JsonValue::Object(node)
	}

	/// Parse the serialized form of a [`Value::to_typed_json`] node.
	pub fn parse_typed_json(text: &str) -> Result<Self, ValueError> {
		let node = parse_json(text).ok_or_else(|| ValueError::Parse {
			kind: Kind::None,
			text: text.to_owned(),
		})?;
		Self::from_typed_json(&node)
	}

	/// Parse a node produced by [`Value::to_typed_json`].
	pub fn from_typed_json(node: &JsonValue) -> Result<Self, ValueError> {
		let fail = || ValueError::Parse {
			kind: Kind::None,
			text: node.to_string(),
		};
		let name = node.get("type").and_then(JsonValue::as_str).ok_or_else(fail)?;
		let kind = Kind::from_name(name).ok_or_else(|| ValueError::UnknownKindName { name: name.to_owned() })?;
		match node.get("value") {
			Some(payload) => Self::from_json_node(kind, payload),
			None if kind == Kind::None => Ok(Self::None),
			None => Err(fail()),
		}
	}

	fn json_node(&self) -> JsonValue {
		if is_structured(self.kind()) {
			self.json_payload()
		} else {
			JsonValue::String(self.to_text())
		}
	}

	fn from_json_node(kind: Kind, node: &JsonValue) -> Result<Self, ValueError> {
		if is_structured(kind) {
			return Self::from_json_payload(kind, node);
		}
		match node.as_str() {
			Some(text) => Self::from_text(kind, text),
			None => Err(ValueError::Parse { kind, text: node.to_string() }),
		}
	}

	fn json_payload(&self) -> JsonValue {
		match self {
			Self::RangedInt(v) => to_json(v),
			Self::RangedFloat(v) => to_json(v),
			Self::ResponseCurve(v) => to_json(&**v),
			Self::ColorCurveSet(v) => to_json(&**v),
			Self::ColorRamp(v) => to_json(&**v),
			Self::ValueVector(items) => JsonValue::Array(items.iter().map(Self::to_typed_json).collect()),
			Self::ValueMap(map) => JsonValue::Object(map.iter().map(|(key, item)| (key.to_string(), item.to_typed_json())).collect()),
			other => JsonValue::String(other.to_text()),
		}
	}

	fn from_json_payload(kind: Kind, node: &JsonValue) -> Result<Self, ValueError> {
		let fail = || ValueError::Parse { kind, text: node.to_string() };
		let value = match kind {
			Kind::RangedInt => Self::RangedInt(from_json::<RangedInt>(node).ok_or_else(fail)?),
			Kind::RangedFloat => Self::RangedFloat(from_json::<RangedFloat>(node).ok_or_else(fail)?),
			Kind::ResponseCurve => Self::from(from_json::<ResponseCurve>(node).ok_or_else(fail)?),
			Kind::ColorCurveSet => Self::from(from_json::<ColorCurveSet>(node).ok_or_else(fail)?),
			Kind::ColorRamp => Self::from(from_json::<ColorRamp>(node).ok_or_else(fail)?),
			Kind::ValueVector => {
				let items = node.as_array().ok_or_else(fail)?;
				Self::ValueVector(items.iter().map(Self::from_typed_json).collect::<Result<_, _>>()?)
			}
			Kind::ValueMap => {
				let entries = node.as_object().ok_or_else(fail)?;
				let mut map = ValueMap::new();
				for (key, item) in entries {
					let tag = TypeTag::parse_hex(key).ok_or_else(fail)?;
					map.insert(tag, Self::from_typed_json(item)?);
				}
				Self::ValueMap(map)
			}
			_ => Self::from_json_node(kind, node)?,
		};
		Ok(value)
	}
}

fn is_structured(kind: Kind) -> bool {
	matches!(
		kind,
		Kind::RangedInt | Kind::RangedFloat | Kind::ValueVector | Kind::ValueMap | Kind::ResponseCurve | Kind::ColorCurveSet | Kind::ColorRamp
	)
}

fn join<T: ToString>(items: &[T]) -> String {
	items.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

/// Exactly `N` whitespace-separated tokens.
fn tokens<T: FromStr + Copy + Default, const N: usize>(text: &str) -> Option<[T; N]> {
	let mut out = [T::default(); N];
	let mut parts = text.split_whitespace();
	for slot in &mut out {
		*slot = parts.next()?.parse().ok()?;
	}
	parts.next().is_none().then_some(out)
}

fn parse_pointer(text: &str) -> Option<OpaquePointer> {
	let text = text.trim();
	let digits = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
	if digits.is_empty() || digits.len() > 16 {
		return None;
	}
	u64::from_str_radix(digits, 16).ok().map(OpaquePointer)
}

fn parse_hex_bytes(text: &str) -> Option<Vec<u8>> {
	text.split_whitespace()
		.map(|token| if token.len() <= 2 { u8::from_str_radix(token, 16).ok() } else { None })
		.collect()
}

/// Parse JSON without serde_json's fixed recursion limit, bounded by [`MAX_JSON_DEPTH`] instead.
fn parse_json(text: &str) -> Option<JsonValue> {
	if json_depth(text) > MAX_JSON_DEPTH {
		return None;
	}
	let mut de = serde_json::Deserializer::from_str(text);
	de.disable_recursion_limit();
	let node = JsonValue::deserialize(&mut de).ok()?;
	de.end().ok()?;
	Some(node)
}

/// Deepest bracket nesting outside string literals.
fn json_depth(text: &str) -> usize {
	let (mut depth, mut max) = (0_usize, 0_usize);
	let (mut in_string, mut escaped) = (false, false);
	for byte in text.bytes() {
		if in_string {
			match byte {
				_ if escaped => escaped = false,
				b'\\' => escaped = true,
				b'"' => in_string = false,
				_ => {}
			}
			continue;
		}
		match byte {
			b'"' => in_string = true,
			b'[' | b'{' => {
				depth += 1;
				max = max.max(depth);
			}
			b']' | b'}' => depth = depth.saturating_sub(1),
			_ => {}
		}
	}
	max
}

fn to_json<T: Serialize>(payload: &T) -> JsonValue {
	serde_json::to_value(payload).unwrap_or(JsonValue::Null)
}

fn from_json<T: DeserializeOwned>(node: &JsonValue) -> Option<T> {
	T::deserialize(node).ok()
}

#[cfg(test)]
mod tests;
