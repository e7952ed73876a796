use crate::variant::{
	BoundingBox, Color, ColorRamp, ColorStop, CurvePoint, Interpolation, Kind, MAX_TEXT_DEPTH, Matrix3x4, OpaquePointer, Quaternion, RangedFloat, RangedInt,
	ResourceHandle, ResponseCurve, TypeTag, Value, ValueError, ValueMap, Vector3,
};

fn assert_round_trip(value: &Value) {
	let text = value.to_text();
	let parsed = Value::from_text(value.kind(), &text).unwrap_or_else(|err| panic!("{} failed to parse {text:?}: {err}", value.kind()));
	assert_eq!(&parsed, value, "text was {text:?}");
}

#[test]
fn plain_tokens() {
	assert_eq!(Value::from(-7_i32).to_text(), "-7");
	assert_eq!(Value::from(true).to_text(), "true");
	assert_eq!(Value::from(0.1_f32).to_text(), "0.1");
	assert_eq!(Value::from(Vector3::new(1.0, -2.5, 3.0)).to_text(), "1 -2.5 3");
	assert_eq!(Value::from(Quaternion::IDENTITY).to_text(), "1 0 0 0");
	assert_eq!(Value::from(TypeTag::from_raw(0xBF9C_F968)).to_text(), "#bf9cf968");
	assert_eq!(Value::from(OpaquePointer(0xABC)).to_text(), "0x0000000000000abc");
	assert_eq!(Value::from(vec![0x00_u8, 0x7F, 0xFF]).to_text(), "00 7f ff");
	assert_eq!(Value::None.to_text(), "");
}

#[test]
fn scalar_and_geometry_kinds_round_trip() {
	let values = [
		Value::None,
		Value::from(200_u8),
		Value::from(false),
		Value::from(i32::MIN),
		Value::from(u32::MAX),
		Value::from(1.0e-7_f32),
		Value::from(Vector3::new(0.1, 0.2, 0.3)),
		Value::from(Quaternion::from_axis_angle(Vector3::UP, 1.25)),
		Value::from(Color::new(0.25, 0.5, 0.75, 1.0)),
		Value::from(Matrix3x4::from_translation(Vector3::new(4.0, 5.0, 6.0))),
		Value::from(BoundingBox {
			min: Vector3::splat(-1.0),
			max: Vector3::splat(2.0),
		}),
		Value::from("with spaces ; and semicolons"),
		Value::from(TypeTag::new("Position")),
		Value::from(OpaquePointer(u64::MAX)),
		Value::from(ResourceHandle::typed("Texture", "stone;wet.png")),
		Value::from(Vec::<u8>::new()),
		Value::from(vec![1_u8, 2, 3, 254]),
	];
	for value in &values {
		assert_round_trip(value);
	}
}

#[test]
fn structured_kinds_round_trip() {
	let curve = ResponseCurve::from_points(Interpolation::Smooth, [CurvePoint::new(0.0, 1.0), CurvePoint::new(0.5, 0.25)]);
	let mut ramp = ColorRamp::default();
	ramp.insert_stop(ColorStop::new(0.5, Color::rgb(1.0, 0.0, 0.0)));

	let mut map = ValueMap::new();
	map.insert(TypeTag::new("Position"), Value::from(Vector3::new(1.0, 2.0, 3.0)));
	map.insert(TypeTag::new("Name"), Value::from("Root"));
	map.insert(TypeTag::new("Children"), Value::from(vec![Value::from(1_i32), Value::from(curve.clone())]));

	let values = [
		Value::from(RangedInt::new(-3, 9)),
		Value::from(RangedFloat::new(0.5, 1.5)),
		Value::from(curve),
		Value::from(ramp),
		Value::from(crate::variant::ColorCurveSet::default()),
		Value::from(Vec::<Value>::new()),
		Value::from(ValueMap::new()),
		Value::from(map),
	];
	for value in &values {
		assert_round_trip(value);
	}
}

#[test]
fn container_text_names_element_kinds() {
	let value = Value::from(vec![Value::from(5_u32), Value::from("hi")]);
	let node: serde_json::Value = serde_json::from_str(&value.to_text()).expect("json");
	assert_eq!(node[0]["type"], "UInt32");
	assert_eq!(node[0]["value"], "5");
	assert_eq!(node[1]["type"], "String");
	assert_eq!(node[1]["value"], "hi");
}

#[test]
fn typed_json_wraps_any_value() {
	let value = Value::from(RangedInt::new(1, 2));
	let node = value.to_typed_json();
	assert_eq!(node["type"], "RangedInt");
	assert_eq!(node["value"]["min"], 1);
	assert_eq!(Value::from_typed_json(&node), Ok(value));

	let unknown = serde_json::json!({ "type": "Teapot", "value": "" });
	assert_eq!(
		Value::from_typed_json(&unknown),
		Err(ValueError::UnknownKindName { name: "Teapot".to_owned() })
	);
}

#[test]
fn malformed_text_is_a_parse_error() {
	let cases = [
		(Kind::Int32, "twelve"),
		(Kind::Byte, "256"),
		(Kind::Bool, "yes"),
		(Kind::Vector3, "1 2"),
		(Kind::Vector2, "1 2 3"),
		(Kind::TypeTag, "#xyz"),
		(Kind::OpaquePointer, "0x"),
		(Kind::ByteBuffer, "0g"),
		(Kind::ByteBuffer, "123"),
		(Kind::ResourceHandle, "no separator"),
		(Kind::RangedInt, "{\"min\": 1}"),
		(Kind::ValueVector, "[1, 2]"),
		(Kind::ValueMap, "{\"not-a-tag\": {\"type\": \"None\"}}"),
		(Kind::None, "something"),
	];
	for (kind, text) in cases {
		let err = Value::from_text(kind, text).expect_err(text);
		assert!(matches!(err, ValueError::Parse { .. }), "{kind} {text:?} gave {err:?}");
	}
}

#[test]
fn display_matches_text_form() {
	let value = Value::from(Vector3::new(1.0, 2.0, 3.0));
	assert_eq!(format!("{value}"), value.to_text());
}

fn nested_vector(levels: usize) -> Value {
	let mut value = Value::from(1_u8);
	for _ in 0..levels {
		value = Value::from(vec![value]);
	}
	value
}

#[test]
fn deeply_nested_containers_round_trip() {
	for levels in [63, 64, 65, 100] {
		assert_round_trip(&nested_vector(levels));
	}

	let typed = nested_vector(100).to_typed_json().to_string();
	assert_eq!(Value::parse_typed_json(&typed).expect("typed json"), nested_vector(100));
}

#[test]
fn nesting_past_the_text_ceiling_is_rejected() {
	let text = format!("{}{}", "[".repeat(2 * MAX_TEXT_DEPTH + 3), "]".repeat(2 * MAX_TEXT_DEPTH + 3));
	assert!(matches!(Value::from_text(Kind::ValueVector, &text), Err(ValueError::Parse { kind: Kind::ValueVector, .. })));

	let bracketed = Value::from(vec![Value::from("[[[[{{{{"), Value::from("\\\"]")]);
	assert_round_trip(&bracketed);
}
