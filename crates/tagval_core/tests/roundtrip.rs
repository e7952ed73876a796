#![allow(missing_docs)]

use tagval::variant::{
	CodecError, Compression, Document, Kind, Quaternion, ReadOptions, Reader, SliceSource, TypeTag, VLE_MAX, Value, ValueMap, Vector3, Writer,
	vle_len,
};
use tagval_testkit::{nested_tree, sample_values, scratch_path};

fn encode(value: &Value) -> Vec<u8> {
	let mut writer = Writer::new(Vec::new());
	writer.write_value(value).expect("write value");
	writer.into_inner()
}

fn decode(bytes: &[u8]) -> Value {
	let mut reader = Reader::new(SliceSource::new(bytes));
	let value = reader.read_value().expect("read value");
	assert!(reader.is_eof(), "reader left {} bytes", reader.remaining());
	value
}

#[test]
fn every_kind_round_trips_exactly() {
	let values = sample_values();
	let kinds: Vec<Kind> = values.iter().map(Value::kind).collect();
	assert_eq!(kinds, Kind::ALL, "samples cover every kind in order");

	for value in &values {
		let bytes = encode(value);
		assert_eq!(bytes[0], value.kind().as_u8());
		assert_eq!(&decode(&bytes), value, "{} did not round trip", value.kind());
	}
}

#[test]
fn float_payloads_round_trip_bit_for_bit() {
	let payload_nan = f32::from_bits(0x7FC0_1234);
	let values = [
		Value::from(-0.0_f32),
		Value::from(payload_nan),
		Value::from(f32::NEG_INFINITY),
		Value::from(Vector3::new(-0.0, payload_nan, 1.0)),
		Value::from(Quaternion::new(-0.0, 0.0, f32::NAN, 1.0)),
	];

	for value in &values {
		let bytes = encode(value);
		let back = decode(&bytes);
		assert_eq!(back.kind(), value.kind());
		assert_eq!(encode(&back), bytes, "{} changed on re-encode", value.kind());
	}

	assert_eq!(decode(&encode(&values[0])).get_float32(0.0).to_bits(), (-0.0_f32).to_bits());
	assert_eq!(decode(&encode(&values[1])).get_float32(0.0).to_bits(), 0x7FC0_1234);
}

#[test]
fn every_kind_round_trips_through_text() {
	for value in sample_values() {
		let text = value.to_text();
		let parsed = Value::from_text(value.kind(), &text).unwrap_or_else(|err| panic!("{}: {err}", value.kind()));
		assert_eq!(parsed, value, "{} text was {text:?}", value.kind());
	}
}

#[test]
fn position_name_map_scenario() {
	let position = TypeTag::new("Position");
	let name = TypeTag::new("Name");
	let value: Value = [(position, Value::from(Vector3::new(1.0, 2.0, 3.0))), (name, Value::from("Root"))]
		.into_iter()
		.collect();

	let back = decode(&encode(&value));
	assert_eq!(back.get(position).map(|v| v.get_vector3(Vector3::ZERO)), Some(Vector3::new(1.0, 2.0, 3.0)));
	assert_eq!(back.get(name).map(|v| v.get_string("")), Some("Root"));
	assert_eq!(back.as_value_map().map(|map| map.len()), Some(2));
}

#[test]
fn nested_containers_round_trip() {
	let tree = nested_tree();
	assert_eq!(decode(&encode(&tree)), tree);

	let deep = Value::from(vec![Value::from(vec![Value::from(vec![Value::from(vec![Value::from(1_u8)])])])]);
	assert_eq!(decode(&encode(&deep)), deep);
}

#[test]
fn vector_of_map_of_vector_round_trips() {
	let inner = Value::from(vec![Value::from(1_i32), Value::from("leaf"), Value::from(Vector3::UP)]);
	let map: Value = [(TypeTag::new("Items"), inner.clone()), (TypeTag::new("Count"), Value::from(3_u32))]
		.into_iter()
		.collect();
	let outer = Value::from(vec![map, Value::from(0.5_f32)]);

	let back = decode(&encode(&outer));
	assert_eq!(back, outer);
	let items = back.as_value_vector().and_then(|items| items[0].get(TypeTag::new("Items")));
	assert_eq!(items, Some(&inner));
}

#[test]
fn empty_containers_decode_as_empty_containers() {
	let vector = decode(&encode(&Value::from(Vec::<Value>::new())));
	assert_eq!(vector.kind(), Kind::ValueVector);
	assert_eq!(vector.as_value_vector().map(<[Value]>::len), Some(0));

	let map = decode(&encode(&Value::from(ValueMap::new())));
	assert_eq!(map.kind(), Kind::ValueMap);
	assert!(map.as_value_map().is_some_and(ValueMap::is_empty));

	let nested = Value::from(vec![Value::from(ValueMap::new()), Value::from(Vec::<Value>::new())]);
	assert_eq!(decode(&encode(&nested)), nested);
}

#[test]
fn empty_containers_write_a_zero_count() {
	assert_eq!(encode(&Value::from(Vec::<Value>::new())), [Kind::ValueVector.as_u8(), 0]);
	assert_eq!(encode(&Value::from(ValueMap::new())), [Kind::ValueMap.as_u8(), 0]);
	assert_eq!(encode(&Value::from(Vec::<u8>::new())), [Kind::ByteBuffer.as_u8(), 0]);
	assert_eq!(encode(&Value::from("")), [Kind::String.as_u8(), 0]);
}

#[test]
fn vle_boundaries() {
	for (value, len) in [
		(0, 1),
		(1, 1),
		(0x7F, 1),
		(0x80, 2),
		(0x3FFF, 2),
		(0x4000, 3),
		(0x1F_FFFF, 3),
		(0x20_0000, 4),
		(VLE_MAX, 4),
	] {
		let mut writer = Writer::new(Vec::new());
		writer.write_vle(value).expect("write");
		let bytes = writer.into_inner();
		assert_eq!(bytes.len(), len, "{value:#x}");
		assert_eq!(vle_len(value), len);
		assert_eq!(Reader::new(SliceSource::new(&bytes)).read_vle().expect("read"), value);
	}

	let mut writer = Writer::new(Vec::new());
	assert!(matches!(writer.write_vle(0xFFFF_FFFF), Err(CodecError::VleOverflow { .. })));
}

#[test]
fn packed_values_stay_within_quantization_bounds() {
	let max_abs = 100.0;
	let step = max_abs / 32767.0;
	let inputs = [Vector3::new(0.0, 0.0, 0.0), Vector3::new(99.9, -50.25, 0.001), Vector3::new(-100.0, 100.0, 33.3)];

	let mut writer = Writer::new(Vec::new());
	for input in inputs {
		writer.write_packed_vector3(input, max_abs).expect("write");
	}
	let bytes = writer.into_inner();
	assert_eq!(bytes.len(), inputs.len() * 6);

	let mut reader = Reader::new(SliceSource::new(&bytes));
	for input in inputs {
		let out = reader.read_packed_vector3(max_abs).expect("read");
		for (a, b) in input.to_array().into_iter().zip(out.to_array()) {
			assert!((a - b).abs() <= step, "{a} vs {b}");
		}
	}

	let q = Quaternion::from_axis_angle(Vector3::new(1.0, 1.0, 0.0), 2.0);
	let mut writer = Writer::new(Vec::new());
	writer.write_packed_quaternion(q).expect("write");
	let bytes = writer.into_inner();
	let back = Reader::new(SliceSource::new(&bytes)).read_packed_quaternion().expect("read");
	assert!((back.dot(back) - 1.0).abs() < 1e-5);
	assert!(back.dot(q).abs() > 0.9999);
}

#[test]
fn truncated_streams_fail_cleanly() {
	let bytes = encode(&nested_tree());
	for len in 0..bytes.len() {
		let mut reader = Reader::with_options(SliceSource::new(&bytes[..len]), ReadOptions::default());
		let err = reader.read_value().expect_err("truncated stream must fail");
		assert!(err.is_corrupt_data(), "len {len}: {err}");
	}
}

#[test]
fn documents_save_and_open() {
	for compression in [Compression::None, Compression::Zstd] {
		let path = scratch_path(&format!("roundtrip-{}.tval", compression.as_str()));
		let doc = Document::new(nested_tree());
		let written = doc.save(&path, compression).expect("save");

		let opened = Document::open(&path).expect("open");
		assert_eq!(opened.compression, compression);
		assert_eq!(opened.stored_len, written);
		assert_eq!(opened.root, doc.root);
	}
}
