use thiserror::Error;

use crate::variant::Kind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Value-level failures: text parsing and undefined comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
	/// Text could not be parsed as the requested kind.
	#[error("cannot parse {kind} from text {text:?}")]
	Parse {
		/// Requested kind.
		kind: Kind,
		/// Offending input text.
		text: String,
	},
	/// Text named a kind that does not exist.
	#[error("unknown kind name {name:?}")]
	UnknownKindName {
		/// Offending kind label.
		name: String,
	},
	/// Comparison between two kinds with no defined ordering.
	#[error("values of kind {left} and {right} are not comparable")]
	Incomparable {
		/// Kind of the left operand.
		left: Kind,
		/// Kind of the right operand.
		right: Kind,
	},
}

/// Errors produced while writing, reading, and loading value streams.
#[derive(Debug, Error)]
pub enum CodecError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Value-level failure surfaced while encoding or decoding.
	#[error(transparent)]
	Value(#[from] ValueError),
	/// Sink accepted fewer bytes than requested.
	#[error("short write: need {need} bytes, wrote {wrote}")]
	ShortWrite {
		/// Requested bytes.
		need: usize,
		/// Bytes the sink accepted.
		wrote: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Integer does not fit the four-byte variable-length encoding.
	#[error("value {value:#x} exceeds variable-length encoding maximum {max:#x}")]
	VleOverflow {
		/// Rejected value.
		value: u32,
		/// Largest encodable value.
		max: u32,
	},
	/// Length or element count too large for a VLE prefix.
	#[error("length {len} exceeds variable-length encoding maximum {max:#x}")]
	LengthOverflow {
		/// Rejected length.
		len: usize,
		/// Largest encodable length.
		max: u32,
	},
	/// Kind byte outside the closed kind enumeration.
	#[error("unknown kind byte {kind} at offset {at}")]
	UnknownKind {
		/// Raw kind byte.
		kind: u8,
		/// Offset of the kind byte.
		at: usize,
	},
	/// Interpolation byte outside the known modes.
	#[error("unknown interpolation mode {mode} at offset {at}")]
	UnknownInterpolation {
		/// Raw mode byte.
		mode: u8,
		/// Offset of the mode byte.
		at: usize,
	},
	/// String reached end of stream before its NUL terminator.
	#[error("unterminated string starting at offset {at}")]
	UnterminatedString {
		/// Offset where the string started.
		at: usize,
	},
	/// String bytes are not valid UTF-8.
	#[error("invalid utf-8 in string starting at offset {at}")]
	InvalidUtf8 {
		/// Offset where the string started.
		at: usize,
	},
	/// NUL-terminated strings cannot carry an interior NUL byte.
	#[error("string contains an interior nul at byte {index}")]
	InteriorNul {
		/// Byte index of the first NUL.
		index: usize,
	},
	/// File identifiers are exactly four ASCII bytes.
	#[error("invalid file id {id:?}")]
	InvalidFileId {
		/// Offending identifier.
		id: String,
	},
	/// Packed vector scale must be finite and positive.
	#[error("invalid packed coordinate range {max_abs_coord}")]
	InvalidPackedRange {
		/// Offending maximum absolute coordinate.
		max_abs_coord: f32,
	},
	/// Nested containers exceeded the configured depth.
	#[error("value nesting exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Container element count exceeded the configured limit.
	#[error("container too large: count={count}, max={max}")]
	ContainerTooLarge {
		/// Declared element count.
		count: usize,
		/// Maximum permitted element count.
		max: usize,
	},
	/// Byte buffer length exceeded the configured limit.
	#[error("buffer too large: len={len}, max={max}")]
	BufferTooLarge {
		/// Declared byte length.
		len: usize,
		/// Maximum permitted byte length.
		max: usize,
	},
	/// Document did not start with the expected file id.
	#[error("not a value document (magic={magic:?})")]
	BadMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Document format version is not understood.
	#[error("unsupported document version {version} (expected {expected})")]
	UnsupportedVersion {
		/// Parsed version.
		version: u16,
		/// Version this build reads.
		expected: u16,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Bytes remained after the document root value.
	#[error("{count} trailing bytes after document root at offset {at}")]
	TrailingBytes {
		/// Offset of the first unread byte.
		at: usize,
		/// Number of unread bytes.
		count: usize,
	},
}

impl CodecError {
	/// Whether the error indicates a damaged or foreign stream rather than an IO or caller problem.
	pub fn is_corrupt_data(&self) -> bool {
		matches!(
			self,
			Self::UnexpectedEof { .. }
				| Self::UnknownKind { .. }
				| Self::UnknownInterpolation { .. }
				| Self::UnterminatedString { .. }
				| Self::InvalidUtf8 { .. }
				| Self::DepthExceeded { .. }
				| Self::ContainerTooLarge { .. }
				| Self::BufferTooLarge { .. }
				| Self::BadMagic { .. }
				| Self::UnsupportedVersion { .. }
				| Self::DecompressedTooLarge { .. }
				| Self::TrailingBytes { .. }
		)
	}
}
