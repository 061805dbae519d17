//! The scratch buffer contract shared by every backing.

use std::fmt;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::BufferResult;

/// Storage medium behind a buffer. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backing {
    /// Growable in-process byte vector.
    Memory,
    /// Auto-named file in a caller-chosen directory, removed on close.
    TempFile,
    /// File at a caller-chosen path, kept after close.
    NamedFile,
}

impl fmt::Display for Backing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backing::Memory => write!(f, "memory"),
            Backing::TempFile => write!(f, "temp_file"),
            Backing::NamedFile => write!(f, "named_file"),
        }
    }
}

/// A single-owner byte accumulation area.
///
/// Every backing honors the same cursor discipline:
///
/// - **Writes** (`write`, `write_str`, `read_from`, `printf`) always append
///   after all previously written bytes.
/// - **Reads** (`read`, `bytes`, `string`, `write_to`) always observe the
///   content from offset 0, whatever earlier calls did.
/// - **Truncate** only shrinks; asking it to grow is an error.
///
/// Callers pick a backing once and then only talk to this trait, usually
/// through [`BoxedBuffer`].
pub trait ScratchBuffer: Send {
    /// Returns the backing kind of this buffer.
    fn kind(&self) -> Backing;

    /// Appends `data` to the end of the content.
    ///
    /// Returns the number of bytes written (always `data.len()` on success).
    fn write(&mut self, data: &[u8]) -> BufferResult<usize>;

    /// Appends the UTF-8 bytes of `s`.
    fn write_str(&mut self, s: &str) -> BufferResult<usize> {
        self.write(s.as_bytes())
    }

    /// Appends everything `src` produces until it is exhausted.
    fn read_from(&mut self, src: &mut dyn Read) -> BufferResult<u64>;

    /// Copies content starting at `offset` into `dst`.
    ///
    /// Fills `dst` as far as the content allows. Returns `Ok(0)` when
    /// `offset` is at or past the end.
    fn read_at(&mut self, offset: u64, dst: &mut [u8]) -> BufferResult<usize>;

    /// Copies content starting at offset 0 into `dst`.
    ///
    /// This is not an incremental cursor: every call starts over. `Ok(0)`
    /// means there is nothing to read. Use [`crate::reader`] to walk the
    /// whole content.
    fn read(&mut self, dst: &mut [u8]) -> BufferResult<usize> {
        self.read_at(0, dst)
    }

    /// Writes the entire content, from offset 0, to `dst`.
    ///
    /// The content is left unchanged.
    fn write_to(&mut self, dst: &mut dyn Write) -> BufferResult<u64>;

    /// Discards all bytes past `size`.
    ///
    /// Fails with [`crate::BufferError::TruncateBeyondLength`] if `size` is
    /// larger than the current length.
    fn truncate(&mut self, size: u64) -> BufferResult<()>;

    /// Returns a copy of the entire content.
    fn bytes(&mut self) -> BufferResult<Vec<u8>>;

    /// Returns the entire content as text.
    fn string(&mut self) -> BufferResult<String> {
        Ok(String::from_utf8(self.bytes()?)?)
    }

    /// Returns the content length in bytes without reading it.
    fn len(&self) -> BufferResult<u64>;

    /// Returns true if the buffer holds no bytes.
    fn is_empty(&self) -> BufferResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Formats `args` and appends the result.
    ///
    /// ```
    /// use fpdf_buffer::{MemBuffer, ScratchBuffer};
    ///
    /// let mut buf = MemBuffer::new();
    /// buf.printf(format_args!("{} 0 obj", 7)).unwrap();
    /// assert_eq!(buf.string().unwrap(), "7 0 obj");
    /// ```
    fn printf(&mut self, args: fmt::Arguments<'_>) -> BufferResult<usize> {
        match args.as_str() {
            Some(s) => self.write_str(s),
            None => self.write_str(&fmt::format(args)),
        }
    }

    /// Releases the backing resources.
    ///
    /// A no-op for memory buffers. File buffers close their handle and
    /// refuse every later operation; temp files are removed from disk.
    fn close(&mut self) -> BufferResult<()>;
}

impl fmt::Debug for dyn ScratchBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScratchBuffer {{ kind: {} }}", self.kind())
    }
}

/// A boxed buffer for backing-agnostic callers.
pub type BoxedBuffer = Box<dyn ScratchBuffer>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_display() {
        assert_eq!(Backing::Memory.to_string(), "memory");
        assert_eq!(Backing::TempFile.to_string(), "temp_file");
        assert_eq!(Backing::NamedFile.to_string(), "named_file");
    }

    #[test]
    fn test_backing_serde_names() {
        let kind: Backing = serde_yaml::from_str("temp_file").unwrap();
        assert_eq!(kind, Backing::TempFile);
        assert_eq!(serde_yaml::to_string(&Backing::NamedFile).unwrap().trim(), "named_file");
    }

    #[test]
    fn test_trait_object_debug() {
        let buf: BoxedBuffer = Box::new(crate::MemBuffer::new());
        assert_eq!(format!("{:?}", buf), "ScratchBuffer { kind: memory }");
    }
}
