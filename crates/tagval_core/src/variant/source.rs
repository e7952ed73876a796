use std::io::{Read, Seek, SeekFrom};

/// Origin of encoded bytes with a known size and a seekable position.
pub trait ByteSource {
	/// Read up to `buf.len()` bytes, returning how many were read.
	fn read_bytes(&mut self, buf: &mut [u8]) -> usize;
	/// Move to an absolute position. Returns `false` when out of range.
	fn seek(&mut self, position: usize) -> bool;
	/// Current absolute position.
	fn position(&self) -> usize;
	/// Total size in bytes.
	fn size(&self) -> usize;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
	fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
		(**self).read_bytes(buf)
	}

	fn seek(&mut self, position: usize) -> bool {
		(**self).seek(position)
	}

	fn position(&self) -> usize {
		(**self).position()
	}

	fn size(&self) -> usize {
		(**self).size()
	}
}

/// In-memory source over a byte slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> SliceSource<'a> {
	/// Create a source at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Unread bytes.
	pub fn rest(&self) -> &'a [u8] {
		&self.bytes[self.pos..]
	}
}

impl ByteSource for SliceSource<'_> {
	fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
		let take = buf.len().min(self.bytes.len() - self.pos);
		buf[..take].copy_from_slice(&self.bytes[self.pos..self.pos + take]);
		self.pos += take;
		take
	}

	fn seek(&mut self, position: usize) -> bool {
		if position > self.bytes.len() {
			return false;
		}
		self.pos = position;
		true
	}

	fn position(&self) -> usize {
		self.pos
	}

	fn size(&self) -> usize {
		self.bytes.len()
	}
}

/// Adapter over any seekable reader. The size is measured once at construction.
pub struct IoSource<R> {
	inner: R,
	pos: usize,
	size: usize,
}

impl<R: Read + Seek> IoSource<R> {
	/// Wrap a reader, measuring its length and rewinding to its current position.
	pub fn new(mut inner: R) -> std::io::Result<Self> {
		let start = inner.stream_position()?;
		let end = inner.seek(SeekFrom::End(0))?;
		inner.seek(SeekFrom::Start(start))?;
		Ok(Self {
			inner,
			pos: usize::try_from(start).unwrap_or(usize::MAX),
			size: usize::try_from(end).unwrap_or(usize::MAX),
		})
	}

	/// Unwrap the reader.
	pub fn into_inner(self) -> R {
		self.inner
	}
}

impl<R: Read + Seek> ByteSource for IoSource<R> {
	fn read_bytes(&mut self, buf: &mut [u8]) -> usize {
		let mut read = 0;
		while read < buf.len() {
			match self.inner.read(&mut buf[read..]) {
				Ok(0) => break,
				Ok(n) => read += n,
				Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {}
				Err(_) => break,
			}
		}
		self.pos += read;
		read
	}

	fn seek(&mut self, position: usize) -> bool {
		if position > self.size {
			return false;
		}
		match self.inner.seek(SeekFrom::Start(position as u64)) {
			Ok(_) => {
				self.pos = position;
				true
			}
			Err(_) => false,
		}
	}

	fn position(&self) -> usize {
		self.pos
	}

	fn size(&self) -> usize {
		self.size
	}
}
