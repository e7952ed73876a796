use std::fs;
use std::io::Read;
use std::path::Path;

use crate::variant::{CodecError, DOCUMENT_FILE_ID, ReadOptions, Reader, Result, SliceSource, Value, Writer};

/// Format version written after the file id.
pub const FORMAT_VERSION: u16 = 1;
/// Upper bound on decompressed document size.
pub const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];
const ZSTD_LEVEL: i32 = 3;

/// Compression mode of a stored document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
	/// Raw uncompressed stream.
	#[default]
	None,
	/// zstd-compressed stream.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Decoded value document: a single root value plus how it was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
	/// Compression detected on load, or requested for a new document.
	pub compression: Compression,
	/// Format version from the header.
	pub version: u16,
	/// Root value.
	pub root: Value,
	/// Size of the stored bytes, before decompression.
	pub stored_len: usize,
	/// Size of the decoded stream, after decompression.
	pub decoded_len: usize,
}

impl Document {
	/// New uncompressed document around `root`.
	pub fn new(root: Value) -> Self {
		Self {
			compression: Compression::None,
			version: FORMAT_VERSION,
			root,
			stored_len: 0,
			decoded_len: 0,
		}
	}

	/// Read and decode a document from disk with default limits.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::open_with(path, &ReadOptions::default())
	}

	/// Read and decode a document from disk.
	pub fn open_with(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Self> {
		let path = path.as_ref();
		let raw = fs::read(path)?;
		tracing::debug!(path = %path.display(), len = raw.len(), "open document");
		decode_document(raw, options)
	}

	/// Encode the root value and write it to disk.
	pub fn save(&self, path: impl AsRef<Path>, compression: Compression) -> Result<usize> {
		let bytes = encode_document(&self.root, compression)?;
		fs::write(path.as_ref(), &bytes)?;
		tracing::debug!(path = %path.as_ref().display(), len = bytes.len(), compression = compression.as_str(), "saved document");
		Ok(bytes.len())
	}
}

/// Encode `root` as a document stream.
pub fn encode_document(root: &Value, compression: Compression) -> Result<Vec<u8>> {
	let mut writer = Writer::new(Vec::new());
	writer.write_bytes(&DOCUMENT_FILE_ID)?;
	writer.write_u16(FORMAT_VERSION)?;
	writer.write_value(root)?;
	let bytes = writer.into_inner();

	match compression {
		Compression::None => Ok(bytes),
		Compression::Zstd => Ok(zstd::stream::encode_all(bytes.as_slice(), ZSTD_LEVEL)?),
	}
}

/// Detect compression and decode a document stream.
pub fn decode_document(raw: Vec<u8>, options: &ReadOptions) -> Result<Document> {
	let stored_len = raw.len();
	let (compression, bytes) = decode_bytes(raw)?;

	let mut reader = Reader::with_options(SliceSource::new(&bytes), options.clone());
	let magic = reader.read_file_id().map_err(|_| CodecError::BadMagic { magic: first4(&bytes) })?;
	if magic != DOCUMENT_FILE_ID {
		return Err(CodecError::BadMagic { magic });
	}
	let version = reader.read_u16()?;
	if version != FORMAT_VERSION {
		return Err(CodecError::UnsupportedVersion {
			version,
			expected: FORMAT_VERSION,
		});
	}

	let root = reader.read_value()?;
	if !reader.is_eof() {
		return Err(CodecError::TrailingBytes {
			at: reader.position(),
			count: reader.remaining(),
		});
	}

	tracing::debug!(compression = compression.as_str(), stored_len, decoded_len = bytes.len(), root = %root.kind(), "decoded document");
	Ok(Document {
		compression,
		version,
		root,
		stored_len,
		decoded_len: bytes.len(),
	})
}

fn decode_bytes(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	if raw.starts_with(&ZSTD_MAGIC) {
		let out = decode_zstd(&raw)?;
		return Ok((Compression::Zstd, out));
	}
	Ok((Compression::None, raw))
}

fn decode_zstd(raw: &[u8]) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(CodecError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}

fn first4(bytes: &[u8]) -> [u8; 4] {
	let mut magic = [0_u8; 4];
	let take = bytes.len().min(4);
	magic[..take].copy_from_slice(&bytes[..take]);
	magic
}

#[cfg(test)]
mod tests;
