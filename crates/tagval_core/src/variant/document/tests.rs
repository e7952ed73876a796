use crate::variant::{CodecError, Compression, FORMAT_VERSION, ReadOptions, TypeTag, Value, ValueMap, Vector3, decode_document, encode_document};

fn sample() -> Value {
	let mut map = ValueMap::new();
	map.insert(TypeTag::new("Position"), Value::from(Vector3::new(1.0, 2.0, 3.0)));
	map.insert(TypeTag::new("Name"), Value::from("Root"));
	Value::from(map)
}

#[test]
fn uncompressed_layout() {
	let bytes = encode_document(&Value::from(7_u8), Compression::None).expect("encode");
	assert_eq!(bytes, [b'T', b'V', b'A', b'L', 1, 0, 1, 7]);

	let doc = decode_document(bytes, &ReadOptions::default()).expect("decode");
	assert_eq!(doc.compression, Compression::None);
	assert_eq!(doc.version, FORMAT_VERSION);
	assert_eq!(doc.root, Value::from(7_u8));
	assert_eq!(doc.stored_len, 8);
}

#[test]
fn zstd_round_trip() {
	let root = sample();
	let bytes = encode_document(&root, Compression::Zstd).expect("encode");
	assert!(bytes.starts_with(&[0x28, 0xB5, 0x2F, 0xFD]));

	let doc = decode_document(bytes, &ReadOptions::default()).expect("decode");
	assert_eq!(doc.compression, Compression::Zstd);
	assert_eq!(doc.root, root);
	assert_eq!(doc.decoded_len, 4 + 2 + 1 + 1 + (4 + 1 + 12) + (4 + 1 + 5));
}

#[test]
fn rejects_foreign_and_damaged_streams() {
	let err = decode_document(b"NOPE\x01\x00\x00".to_vec(), &ReadOptions::default()).expect_err("magic");
	assert!(matches!(err, CodecError::BadMagic { magic } if &magic == b"NOPE"));
	assert!(err.is_corrupt_data());

	let err = decode_document(b"TV".to_vec(), &ReadOptions::default()).expect_err("short");
	assert!(matches!(err, CodecError::BadMagic { magic: [b'T', b'V', 0, 0] }));

	let err = decode_document(b"TVAL\x02\x00\x00".to_vec(), &ReadOptions::default()).expect_err("version");
	assert!(matches!(err, CodecError::UnsupportedVersion { version: 2, expected: 1 }));

	let err = decode_document(b"TVAL\x01\x00\x00\xAA".to_vec(), &ReadOptions::default()).expect_err("trailing");
	assert!(matches!(err, CodecError::TrailingBytes { at: 7, count: 1 }));

	let mut bytes = encode_document(&sample(), Compression::None).expect("encode");
	bytes.truncate(bytes.len() - 3);
	let err = decode_document(bytes, &ReadOptions::default()).expect_err("truncated");
	assert!(err.is_corrupt_data(), "{err}");
}

#[test]
fn labels() {
	assert_eq!(Compression::None.as_str(), "none");
	assert_eq!(Compression::Zstd.as_str(), "zstd");
}
