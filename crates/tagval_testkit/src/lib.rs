//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

use tagval::variant::{
	BoundingBox, Color, ColorCurveSet, ColorRamp, CurvePoint, Disc, IntVector2, Interpolation, Matrix3x3, Matrix3x4, OpaquePointer, Plane,
	Quaternion, RangedFloat, RangedInt, Ray, ResourceHandle, ResponseCurve, TypeTag, Value, ValueMap, Vector2, Vector3, Vector4,
};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Fresh path under `<target>/tagval-tests`, removing any file left by an earlier run.
pub fn scratch_path(name: &str) -> PathBuf {
	let dir = target_dir().join("tagval-tests");
	std::fs::create_dir_all(&dir).expect("create scratch dir");
	let path = dir.join(name);
	let _ = std::fs::remove_file(&path);
	path
}

/// Parse command stdout as JSON.
pub fn parse_json(stdout: &[u8]) -> serde_json::Value {
	serde_json::from_slice(stdout).expect("stdout is json")
}

/// One value of every kind with non-default payloads, in kind order.
pub fn sample_values() -> Vec<Value> {
	let curve = ResponseCurve::from_points(Interpolation::Smooth, [CurvePoint::new(0.0, 0.25), CurvePoint::new(1.0, 0.75)]);
	let mut curves = ColorCurveSet::default();
	curves.alpha = curve.clone();

	vec![
		Value::None,
		Value::from(0xA5_u8),
		Value::from(true),
		Value::from(-123_456_i32),
		Value::from(3_000_000_000_u32),
		Value::from(0.1_f32),
		Value::from(RangedInt::new(-5, 5)),
		Value::from(RangedFloat::new(0.25, 4.5)),
		Value::from(IntVector2::new(-1, 2)),
		Value::from(Vector2::new(1.5, -2.5)),
		Value::from(Vector3::new(1.0, 2.0, 3.0)),
		Value::from(Vector4::new(0.1, 0.2, 0.3, 0.4)),
		Value::from(Matrix3x3::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0])),
		Value::from(Quaternion::from_axis_angle(Vector3::UP, 0.75)),
		Value::from(Matrix3x4::from_translation(Vector3::new(10.0, -4.0, 2.5))),
		Value::from(Plane {
			normal: Vector3::UP,
			d: -2.0,
		}),
		Value::from(BoundingBox {
			min: Vector3::splat(-1.0),
			max: Vector3::new(2.0, 3.0, 4.0),
		}),
		Value::from(Color::new(0.9, 0.5, 0.1, 0.8)),
		Value::from(Ray {
			origin: Vector3::ZERO,
			direction: Vector3::new(0.0, 0.0, -1.0),
		}),
		Value::from(Disc {
			center: Vector3::new(1.0, 0.0, 1.0),
			normal: Vector3::UP,
			radius: 0.5,
		}),
		Value::from("Root"),
		Value::from(vec![Value::from(1_i32), Value::from("two")]),
		nested_tree(),
		Value::from(TypeTag::new("Position")),
		Value::from(curve),
		Value::from(ResourceHandle::typed("Texture", "bark.png")),
		Value::from(OpaquePointer(0x7FFF_0000_1234)),
		Value::from(curves),
		Value::from(ColorRamp::default()),
		Value::from(vec![0_u8, 1, 2, 0xFF]),
	]
}

/// Map with a vector, a string, and a two-level child list.
pub fn nested_tree() -> Value {
	let leaf: ValueMap = [(TypeTag::new("Weight"), Value::from(0.5_f32))].into_iter().collect();
	let children = Value::from(vec![Value::from(leaf), Value::from(vec![Value::from(7_u8)])]);

	[
		(TypeTag::new("Position"), Value::from(Vector3::new(1.0, 2.0, 3.0))),
		(TypeTag::new("Name"), Value::from("Root")),
		(TypeTag::new("Children"), children),
	]
	.into_iter()
	.collect()
}
