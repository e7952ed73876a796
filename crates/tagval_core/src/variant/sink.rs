use std::io::Write;

/// Destination for encoded bytes.
pub trait ByteSink {
	/// Append `bytes`, returning how many were accepted.
	fn write_bytes(&mut self, bytes: &[u8]) -> usize;
}

impl ByteSink for Vec<u8> {
	fn write_bytes(&mut self, bytes: &[u8]) -> usize {
		self.extend_from_slice(bytes);
		bytes.len()
	}
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
	fn write_bytes(&mut self, bytes: &[u8]) -> usize {
		(**self).write_bytes(bytes)
	}
}

/// Bounded sink over a caller-provided buffer. Writes past capacity are truncated.
pub struct FixedSink<'a> {
	buf: &'a mut [u8],
	len: usize,
}

impl<'a> FixedSink<'a> {
	/// Create an empty sink over `buf`.
	pub fn new(buf: &'a mut [u8]) -> Self {
		Self { buf, len: 0 }
	}

	/// Bytes written so far.
	pub fn written(&self) -> &[u8] {
		&self.buf[..self.len]
	}

	/// Unused capacity.
	pub fn remaining(&self) -> usize {
		self.buf.len() - self.len
	}
}

impl ByteSink for FixedSink<'_> {
	fn write_bytes(&mut self, bytes: &[u8]) -> usize {
		let take = bytes.len().min(self.remaining());
		self.buf[self.len..self.len + take].copy_from_slice(&bytes[..take]);
		self.len += take;
		take
	}
}

/// Adapter writing into any [`std::io::Write`]. IO errors count as zero bytes written.
pub struct IoSink<W> {
	inner: W,
	error: Option<std::io::Error>,
}

impl<W: Write> IoSink<W> {
	/// Wrap a writer.
	pub fn new(inner: W) -> Self {
		Self { inner, error: None }
	}

	/// Last IO error seen by the sink, if any.
	pub fn take_error(&mut self) -> Option<std::io::Error> {
		self.error.take()
	}

	/// Unwrap the writer.
	pub fn into_inner(self) -> W {
		self.inner
	}
}

impl<W: Write> ByteSink for IoSink<W> {
	fn write_bytes(&mut self, bytes: &[u8]) -> usize {
		let mut written = 0;
		while written < bytes.len() {
			match self.inner.write(&bytes[written..]) {
				Ok(0) => break,
				Ok(n) => written += n,
				Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {}
				Err(err) => {
					self.error = Some(err);
					break;
				}
			}
		}
		written
	}
}
