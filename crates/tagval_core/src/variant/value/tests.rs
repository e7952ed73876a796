use std::cmp::Ordering;

use crate::variant::{
	Color, Kind, Matrix3x3, OpaquePointer, Quaternion, ResourceHandle, TypeTag, Value, ValueError, ValueMap, Vector2, Vector3, Vector4,
};

#[test]
fn default_is_none_and_set_kind_installs_defaults() {
	let mut value = Value::default();
	assert_eq!(value.kind(), Kind::None);
	assert!(value.is_none());

	for kind in Kind::ALL {
		value.set_kind(kind);
		assert_eq!(value.kind(), kind);
		assert_eq!(value, Value::default_of(kind));
	}

	value.set_kind(Kind::None);
	value.set_kind(Kind::None);
	assert!(value.is_none());
}

#[test]
fn set_kind_to_same_kind_keeps_payload() {
	let mut value = Value::from("Root");
	value.set_kind(Kind::String);
	assert_eq!(value.get_string(""), "Root");

	let mut matrix = Value::from(Matrix3x3::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]));
	matrix.set_kind(Kind::Matrix3x3);
	assert_eq!(matrix.get_matrix3x3(Matrix3x3::IDENTITY).m[1], [4.0, 5.0, 6.0]);
}

#[test]
fn same_kind_assignment_reuses_heap_payload() {
	let mut value = Value::from(Matrix3x3::IDENTITY);
	let before = match &value {
		Value::Matrix3x3(slot) => std::ptr::from_ref(&**slot),
		_ => panic!("expected matrix"),
	};

	let source = Value::from(Matrix3x3::from_array([2.0; 9]));
	value.assign(&source);

	let after = match &value {
		Value::Matrix3x3(slot) => std::ptr::from_ref(&**slot),
		_ => panic!("expected matrix"),
	};
	assert_eq!(before, after, "same-kind assignment should write into the existing box");
	assert_eq!(value, source);
}

#[test]
fn string_assignment_reuses_capacity() {
	let mut value = Value::from(String::with_capacity(64));
	value.set_string("abc");
	let Value::String(text) = &value else {
		panic!("expected string");
	};
	assert!(text.capacity() >= 64);
	assert_eq!(text, "abc");
}

#[test]
fn clone_from_goes_through_assign() {
	let nested: Value = vec![Value::from(1_i32), Value::from("two"), Value::from(vec![Value::from(3.0_f32)])].into_iter().collect();
	let mut target = Value::from(Vector3::new(1.0, 2.0, 3.0));
	target.clone_from(&nested);
	assert_eq!(target, nested);

	let shorter: Value = vec![Value::from(5_i32)].into_iter().collect();
	target.set_value_vector(shorter.as_value_vector().unwrap_or_default());
	assert_eq!(target, shorter);
}

#[test]
fn typed_getters_fall_back_on_kind_mismatch() {
	let value = Value::from(7_i32);
	assert_eq!(value.get_int32(-1), 7);
	assert_eq!(value.get_uint32(99), 99);
	assert_eq!(value.get_float32(0.5), 0.5);
	assert_eq!(value.get_string("fallback"), "fallback");
	assert!(value.as_value_map().is_none());
	assert_eq!(value.get_vector3(Vector3::UP), Vector3::UP);
}

#[test]
fn safe_getters_follow_coercion_table() {
	let float = Value::from(2.0_f32);
	assert_eq!(float.get_vector2_safe(true), Vector2::new(2.0, 2.0));
	assert_eq!(float.get_vector2_safe(false), Vector2::new(2.0, 0.0));
	assert_eq!(float.get_vector3_safe(true), Vector3::splat(2.0));
	assert_eq!(float.get_vector4_safe(false), Vector4::new(2.0, 0.0, 0.0, 0.0));
	assert_eq!(float.get_color_safe(true), Color::rgb(2.0, 2.0, 2.0));
	assert_eq!(float.get_float_safe(), 2.0);

	let v4 = Value::from(Vector4::new(1.0, 2.0, 3.0, 4.0));
	assert_eq!(v4.get_vector3_safe(false), Vector3::new(1.0, 2.0, 3.0));
	assert_eq!(v4.get_vector2_safe(false), Vector2::new(1.0, 2.0));
	assert_eq!(v4.get_color_safe(false), Color::new(1.0, 2.0, 3.0, 4.0));

	let v3 = Value::from(Vector3::new(1.0, 2.0, 3.0));
	assert_eq!(v3.get_vector2_safe(true), Vector2::new(1.0, 2.0));
	assert_eq!(v3.get_vector4_safe(true), Vector4::ZERO);

	let v2 = Value::from(Vector2::new(1.0, 2.0));
	assert_eq!(v2.get_vector3_safe(true), Vector3::ZERO);

	let text = Value::from("1.5");
	assert_eq!(text.get_float_safe(), 0.0);
	assert_eq!(text.get_vector3_safe(true), Vector3::ZERO);
	assert_eq!(Value::from(3_u32).get_float_safe(), 3.0);
	assert_eq!(Value::from(true).get_float_safe(), 1.0);
}

#[test]
fn defined_comparisons_are_consistent() {
	let pairs = [
		(Value::from(Vector2::new(1.0, 2.0)), Value::from(Vector2::new(1.0, 3.0))),
		(Value::from(Vector3::new(0.0, 0.0, 1.0)), Value::from(Vector3::new(0.0, 1.0, 0.0))),
		(Value::from("apple"), Value::from("banana")),
		(Value::from(OpaquePointer(16)), Value::from(OpaquePointer(32))),
		(Value::from(1_i32), Value::from(1.5_f32)),
	];

	for (small, large) in &pairs {
		assert!(small.less_than(large).expect("comparable"));
		assert!(!large.less_than(small).expect("comparable"));
		assert!(large.greater_than(small).expect("comparable"));
		assert!(small.less_equal(small).expect("comparable"));
		assert!(small.greater_equal(small).expect("comparable"));
		assert!(small.loose_eq(small).expect("comparable"));
		assert!(small.loose_ne(large).expect("comparable"));
	}
}

#[test]
fn quaternions_compare_by_angle_only() {
	let q = Quaternion::from_axis_angle(Vector3::UP, 0.5);
	let flipped = Value::from(Quaternion::new(-q.w, -q.x, -q.y, -q.z));
	let q = Value::from(q);
	assert!(q.loose_eq(&flipped).expect("comparable"));
	assert!(!q.less_than(&flipped).expect("comparable"));
	assert!(!flipped.less_than(&q).expect("comparable"));

	let other = Value::from(Quaternion::from_axis_angle(Vector3::UP, 0.6));
	assert_eq!(q.compare(&other), Ok(None));
	assert!(q.loose_ne(&other).expect("comparable"));
	assert!(!q.less_equal(&other).expect("comparable"));
}

#[test]
fn undefined_pairs_are_incomparable() {
	let err = Value::from("text").compare(&Value::from(Vector3::ZERO)).expect_err("string vs vector3");
	assert_eq!(
		err,
		ValueError::Incomparable {
			left: Kind::String,
			right: Kind::Vector3,
		}
	);
	assert!(Value::None.loose_eq(&Value::from(0.0_f32)).is_err());
	assert!(Value::from(Vector4::ZERO).less_than(&Value::from(Vector4::ZERO)).is_err());
}

#[test]
fn arithmetic_on_floats_and_colors() {
	assert_eq!(&Value::from(1.5_f32) + &Value::from(2.0_f32), Value::from(3.5_f32));
	assert_eq!(Value::from(6.0_f32) / Value::from(2.0_f32), Value::from(3.0_f32));

	let color = Value::from(Color::new(0.5, 0.25, 1.0, 1.0));
	assert_eq!(&color * &Value::from(2.0_f32), Value::from(Color::new(1.0, 0.5, 2.0, 2.0)));
	assert_eq!(&color - &color, Value::from(Color::TRANSPARENT_BLACK));

	assert_eq!(&Value::from(1_i32) + &Value::from(2_i32), Value::None);
	assert_eq!(&Value::from(2.0_f32) * &color, Value::None);
}

#[test]
fn map_lookup_and_resource_handles() {
	let mut map = ValueMap::new();
	map.insert(TypeTag::new("Mesh"), Value::from(ResourceHandle::typed("Model", "rock.mdl")));
	let value = Value::from(map);

	let handle = value.get(TypeTag::new("Mesh")).and_then(Value::as_resource_handle).expect("handle");
	assert_eq!(handle.kind, TypeTag::new("Model"));
	assert_eq!(handle.name, "rock.mdl");
	assert!(value.get(TypeTag::new("Missing")).is_none());

	let mut other = Value::from(4_u8);
	other.set_resource_handle(TypeTag::new("Texture"), "bark.png");
	assert_eq!(other.as_resource_handle(), Some(&ResourceHandle::typed("Texture", "bark.png")));
}

#[test]
fn opaque_pointer_identity() {
	let a = 1_u32;
	let b = 2_u32;
	assert_eq!(OpaquePointer::of(&a), OpaquePointer::of(&a));
	assert_ne!(OpaquePointer::of(&a), OpaquePointer::of(&b));
	assert!(OpaquePointer::NULL.is_null());
	let value = Value::from(OpaquePointer::of(&a));
	assert!(value.loose_eq(&Value::from(OpaquePointer::of(&a))).expect("comparable"));
	assert_eq!(value.compare(&Value::from(OpaquePointer::NULL)), Ok(Some(Ordering::Greater)));
}
