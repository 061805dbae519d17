//! `std::io` adapters over any [`ScratchBuffer`].
//!
//! [`ScratchBuffer::read`] always starts at offset 0, which suits one-shot
//! snapshots but not generic stream consumers. [`Reader`] walks the content
//! from 0 to the end with positional reads, and [`Writer`] turns the append
//! operations into an `io::Write`, so `write!` and `io::copy` work on any
//! backing.

use std::io;

use crate::buffer::ScratchBuffer;

/// An `io::Read` over the full content of a buffer, starting at offset 0.
pub struct Reader<'a> {
    buf: &'a mut dyn ScratchBuffer,
    pos: u64,
}

impl<'a> Reader<'a> {
    /// Creates a reader positioned at the start of `buf`.
    pub fn new(buf: &'a mut dyn ScratchBuffer) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the number of bytes read so far.
    pub fn position(&self) -> u64 {
        self.pos
    }
}

impl io::Read for Reader<'_> {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        let n = self.buf.read_at(self.pos, dst)?;
        self.pos += n as u64;
        Ok(n)
    }
}

/// An `io::Write` that appends to a buffer.
pub struct Writer<'a> {
    buf: &'a mut dyn ScratchBuffer,
}

impl<'a> Writer<'a> {
    /// Creates a writer appending to `buf`.
    pub fn new(buf: &'a mut dyn ScratchBuffer) -> Self {
        Self { buf }
    }
}

impl io::Write for Writer<'_> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        Ok(self.buf.write(data)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Returns a reader over the entire content of `buf`.
///
/// ```
/// use std::io::Read;
/// use fpdf_buffer::{reader, MemBuffer, ScratchBuffer};
///
/// let mut buf = MemBuffer::new();
/// buf.write(b"stream").unwrap();
///
/// let mut out = String::new();
/// reader(&mut buf).read_to_string(&mut out).unwrap();
/// assert_eq!(out, "stream");
/// ```
pub fn reader(buf: &mut dyn ScratchBuffer) -> Reader<'_> {
    Reader::new(buf)
}

/// Returns a writer appending to `buf`.
///
/// ```
/// use std::io::Write;
/// use fpdf_buffer::{writer, MemBuffer, ScratchBuffer};
///
/// let mut buf = MemBuffer::new();
/// write!(writer(&mut buf), "<< /Length {} >>", 42).unwrap();
/// assert_eq!(buf.string().unwrap(), "<< /Length 42 >>");
/// ```
pub fn writer(buf: &mut dyn ScratchBuffer) -> Writer<'_> {
    Writer::new(buf)
}
