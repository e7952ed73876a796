//! Wire-format constants shared by the writer and reader.

/// Largest value the four-byte variable-length encoding can carry (7 + 7 + 7 + 8 bits).
pub const VLE_MAX: u32 = 0x1FFF_FFFF;

/// Exclusive upper bounds of the one-, two-, and three-byte VLE tiers.
pub(crate) const VLE_TIERS: [u32; 3] = [0x80, 0x4000, 0x20_0000];

/// Fixed-point scale for 16-bit packed components.
pub const PACKED_SCALE: f32 = 32767.0;

/// File identifier at the start of a value document.
pub const DOCUMENT_FILE_ID: [u8; 4] = *b"TVAL";

/// Encoded byte length of `value` under the variable-length encoding.
pub fn vle_len(value: u32) -> usize {
	VLE_TIERS.iter().position(|limit| value < *limit).map_or(4, |tier| tier + 1)
}

/// Quantize `value` to a signed 16-bit fixed-point number in `[-max_abs, max_abs]`.
pub fn quantize(value: f32, max_abs: f32) -> i16 {
	let clamped = if value.is_nan() { 0.0 } else { value.clamp(-max_abs, max_abs) };
	(clamped * (PACKED_SCALE / max_abs)).round() as i16
}

/// Inverse of [`quantize`].
pub fn dequantize(value: i16, max_abs: f32) -> f32 {
	f32::from(value) * (max_abs / PACKED_SCALE)
}

#[cfg(test)]
mod tests {
	use crate::variant::{dequantize, quantize, vle_len};

	#[test]
	fn vle_tier_lengths() {
		assert_eq!(vle_len(0), 1);
		assert_eq!(vle_len(0x7F), 1);
		assert_eq!(vle_len(0x80), 2);
		assert_eq!(vle_len(0x3FFF), 2);
		assert_eq!(vle_len(0x4000), 3);
		assert_eq!(vle_len(0x1F_FFFF), 3);
		assert_eq!(vle_len(0x20_0000), 4);
		assert_eq!(vle_len(u32::MAX), 4);
	}

	#[test]
	fn quantize_clamps_and_scales() {
		assert_eq!(quantize(1.0, 1.0), 32767);
		assert_eq!(quantize(-5.0, 1.0), -32767);
		assert_eq!(quantize(0.0, 100.0), 0);
		assert_eq!(quantize(f32::NAN, 1.0), 0);
		assert!((dequantize(32767, 10.0) - 10.0).abs() < 1e-5);

		let step = 50.0 / 32767.0;
		let back = dequantize(quantize(12.345, 50.0), 50.0);
		assert!((back - 12.345).abs() <= step);
	}
}
