//! Memory-backed buffer implementation.

use std::io::{Read, Write};

use tracing::trace;

use crate::buffer::{Backing, ScratchBuffer};
use crate::error::{BufferError, BufferResult};

/// A scratch buffer held entirely in process memory.
///
/// There is only one view of the content, so reads always start at offset
/// 0 and writes always land at the end without any position bookkeeping.
/// This is the reference behavior the file backing reproduces.
///
/// # Example
///
/// ```
/// use fpdf_buffer::{MemBuffer, ScratchBuffer};
///
/// let mut buf = MemBuffer::new();
/// buf.write(b"abc").unwrap();
/// buf.write_str("def").unwrap();
/// assert_eq!(buf.bytes().unwrap(), b"abcdef");
/// assert_eq!(buf.len().unwrap(), 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemBuffer {
    buf: Vec<u8>,
}

impl MemBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    ///
    /// The buffer still grows past this as needed; the capacity is only a
    /// hint.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Borrows the content without copying.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the buffer and returns its content.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

impl From<Vec<u8>> for MemBuffer {
    fn from(buf: Vec<u8>) -> Self {
        Self { buf }
    }
}

impl ScratchBuffer for MemBuffer {
    fn kind(&self) -> Backing {
        Backing::Memory
    }

    fn write(&mut self, data: &[u8]) -> BufferResult<usize> {
        self.buf.extend_from_slice(data);
        trace!("mem buffer: appended {} bytes", data.len());
        Ok(data.len())
    }

    fn read_from(&mut self, src: &mut dyn Read) -> BufferResult<u64> {
        let n = src.read_to_end(&mut self.buf)?;
        Ok(n as u64)
    }

    fn read_at(&mut self, offset: u64, dst: &mut [u8]) -> BufferResult<usize> {
        let start = usize::try_from(offset).unwrap_or(usize::MAX);
        if start >= self.buf.len() {
            return Ok(0);
        }
        let n = std::cmp::min(dst.len(), self.buf.len() - start);
        dst[..n].copy_from_slice(&self.buf[start..start + n]);
        Ok(n)
    }

    fn write_to(&mut self, dst: &mut dyn Write) -> BufferResult<u64> {
        dst.write_all(&self.buf)?;
        trace!("mem buffer: dumped {} bytes", self.buf.len());
        Ok(self.buf.len() as u64)
    }

    fn truncate(&mut self, size: u64) -> BufferResult<()> {
        let len = self.buf.len() as u64;
        if size > len {
            return Err(BufferError::TruncateBeyondLength { size, len });
        }
        // size <= len, so it fits in usize
        self.buf.truncate(size as usize);
        Ok(())
    }

    fn bytes(&mut self) -> BufferResult<Vec<u8>> {
        Ok(self.buf.clone())
    }

    fn len(&self) -> BufferResult<u64> {
        Ok(self.buf.len() as u64)
    }

    fn close(&mut self) -> BufferResult<()> {
        Ok(())
    }
}
