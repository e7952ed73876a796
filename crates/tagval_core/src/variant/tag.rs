use std::collections::HashMap;
use std::fmt;
use std::hash::Hasher;

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a hash of a name, used as a compact identifier for kinds, keys, and type names.
///
/// Distinct names may collide; equality of tags is taken at face value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TypeTag(u32);

impl TypeTag {
	/// Tag of the empty name.
	pub const EMPTY: Self = Self(FNV_OFFSET_BASIS);

	/// Hash a name.
	pub const fn new(name: &str) -> Self {
		Self::from_bytes(name.as_bytes())
	}

	/// Hash raw bytes.
	pub const fn from_bytes(bytes: &[u8]) -> Self {
		let mut hash = FNV_OFFSET_BASIS;
		let mut idx = 0;
		while idx < bytes.len() {
			hash = step(hash, bytes[idx]);
			idx += 1;
		}
		Self(hash)
	}

	/// Wrap an already computed hash value.
	pub const fn from_raw(value: u32) -> Self {
		Self(value)
	}

	/// Raw hash value.
	pub const fn value(self) -> u32 {
		self.0
	}

	/// Parse the `#xxxxxxxx` display form; the `#` is optional.
	pub fn parse_hex(text: &str) -> Option<Self> {
		let digits = text.strip_prefix('#').unwrap_or(text);
		if digits.is_empty() || digits.len() > 8 {
			return None;
		}
		u32::from_str_radix(digits, 16).ok().map(Self)
	}
}

impl fmt::Display for TypeTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{:08x}", self.0)
	}
}

impl From<&str> for TypeTag {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

const fn step(hash: u32, byte: u8) -> u32 {
	(hash ^ byte as u32).wrapping_mul(FNV_PRIME)
}

/// Incremental FNV-1a accumulator; every overload feeds the same byte-wise state.
#[derive(Debug, Clone, Copy)]
pub struct Fnv1a {
	hash: u32,
}

impl Default for Fnv1a {
	fn default() -> Self {
		Self::new()
	}
}

impl Fnv1a {
	/// Start from the FNV offset basis.
	pub const fn new() -> Self {
		Self { hash: FNV_OFFSET_BASIS }
	}

	/// Continue hashing from an existing tag.
	pub const fn from_tag(tag: TypeTag) -> Self {
		Self { hash: tag.0 }
	}

	/// Feed raw bytes.
	pub fn write_bytes(&mut self, bytes: &[u8]) {
		for byte in bytes {
			self.hash = step(self.hash, *byte);
		}
	}

	/// Feed UTF-8 bytes of a string.
	pub fn write_str(&mut self, text: &str) {
		self.write_bytes(text.as_bytes());
	}

	/// Feed the little-endian bytes of an `f32`.
	pub fn write_f32(&mut self, value: f32) {
		self.write_bytes(&value.to_le_bytes());
	}

	/// Feed the little-endian bytes of an `f64`.
	pub fn write_f64(&mut self, value: f64) {
		self.write_bytes(&value.to_le_bytes());
	}

	/// Feed the little-endian bytes of an `i16`.
	pub fn write_i16(&mut self, value: i16) {
		self.write_bytes(&value.to_le_bytes());
	}

	/// Current accumulated tag.
	pub const fn tag(&self) -> TypeTag {
		TypeTag(self.hash)
	}
}

impl Hasher for Fnv1a {
	fn finish(&self) -> u64 {
		u64::from(self.hash)
	}

	fn write(&mut self, bytes: &[u8]) {
		self.write_bytes(bytes);
	}
}

/// Reverse lookup from tags to the names that produced them.
#[derive(Debug, Default, Clone)]
pub struct TagRegistry {
	names: HashMap<TypeTag, Box<str>>,
}

impl TagRegistry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a registry from a list of names.
	pub fn with_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
		let mut registry = Self::new();
		for name in names {
			registry.register(name);
		}
		registry
	}

	/// Hash `name` and remember it. On collision the first name wins.
	pub fn register(&mut self, name: &str) -> TypeTag {
		let tag = TypeTag::new(name);
		match self.names.get(&tag) {
			Some(existing) if &**existing != name => {
				tracing::warn!(%tag, existing = &**existing, rejected = name, "type tag collision");
			}
			Some(_) => {}
			None => {
				self.names.insert(tag, name.into());
			}
		}
		tag
	}

	/// Name registered for `tag`.
	pub fn name(&self, tag: TypeTag) -> Option<&str> {
		self.names.get(&tag).map(|name| &**name)
	}

	/// Registered name, or the hex form when unknown.
	pub fn label(&self, tag: TypeTag) -> String {
		match self.name(tag) {
			Some(name) => name.to_owned(),
			None => tag.to_string(),
		}
	}

	/// Number of registered names.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	/// Whether no names are registered.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}
}
