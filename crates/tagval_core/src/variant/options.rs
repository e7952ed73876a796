/// Limits applied while decoding values from untrusted bytes.
#[derive(Debug, Clone)]
pub struct ReadOptions {
	/// Maximum container nesting depth.
	pub max_depth: u32,
	/// Maximum element count of a single value vector, map, curve, or ramp.
	pub max_container_len: usize,
	/// Maximum byte length of a single byte buffer.
	pub max_buffer_len: usize,
}

impl Default for ReadOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			max_container_len: 1 << 20,
			max_buffer_len: 64 * 1024 * 1024,
		}
	}
}

impl ReadOptions {
	/// Preset for bytes this process wrote itself; only the encoding's own limits apply.
	pub fn trusted() -> Self {
		Self {
			max_depth: 1024,
			max_container_len: usize::MAX,
			max_buffer_len: usize::MAX,
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::variant::ReadOptions;

	#[test]
	fn trusted_is_looser_than_default() {
		let default = ReadOptions::default();
		let trusted = ReadOptions::trusted();
		assert!(trusted.max_depth > default.max_depth);
		assert!(trusted.max_container_len > default.max_container_len);
		assert!(trusted.max_buffer_len > default.max_buffer_len);
	}
}
