//! Dual-mode scratch buffers for document generation.
//!
//! A PDF writer accumulates content streams, object tables and embedded
//! resources before serializing them. This crate lets it keep that working
//! data either in RAM or on disk behind one contract, [`ScratchBuffer`]:
//!
//! - [`MemBuffer`]: a growable in-memory byte vector
//! - [`FileBuffer`]: a temp file in a given directory, or a named file
//!
//! # Cursor Discipline
//!
//! Writes always append. Reads, snapshots and dumps always start from
//! offset 0. The file backing repositions its handle before every
//! operation so that both backings are observably identical.
//!
//! ```
//! use fpdf_buffer::{FileBuffer, MemBuffer, ScratchBuffer};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut backings: Vec<Box<dyn ScratchBuffer>> = vec![
//!     Box::new(MemBuffer::new()),
//!     Box::new(FileBuffer::temp_in(dir.path()).unwrap()),
//! ];
//!
//! for buf in backings.iter_mut() {
//!     buf.write(b"abc").unwrap();
//!     buf.write(b"def").unwrap();
//!     buf.truncate(3).unwrap();
//!     buf.write(b"xyz").unwrap();
//!
//!     let mut sink = Vec::new();
//!     assert_eq!(buf.write_to(&mut sink).unwrap(), 6);
//!     assert_eq!(sink, b"abcxyz");
//!     buf.close().unwrap();
//! }
//! ```
//!
//! # Choosing a Backing
//!
//! [`BufferConfig`] picks the backing from configuration and hands back a
//! [`BoxedBuffer`]:
//!
//! ```
//! use fpdf_buffer::{Backing, BufferConfig, ScratchBuffer};
//!
//! let cfg = BufferConfig::from_yaml("kind: memory\ncapacity: 65536\n").unwrap();
//! let mut buf = cfg.open().unwrap();
//! assert_eq!(buf.kind(), Backing::Memory);
//! buf.printf(format_args!("{} 0 obj\n", 3)).unwrap();
//! assert_eq!(buf.len().unwrap(), 8);
//! ```
//!
//! # Closing Buffers
//!
//! `close()` releases the file handle of a file buffer and removes temp
//! files; any later operation fails with [`BufferError::Closed`]. Dropping a
//! file buffer also releases it. Closing a memory buffer does nothing.
//!
//! # Stream Adapters
//!
//! [`reader`] and [`writer`] wrap any buffer in `std::io::Read` /
//! `std::io::Write`, for use with `io::copy` and `write!`.

mod buffer;
mod bytes;
mod config;
mod error;
mod file_buffer;
mod mem_buffer;
mod stream;

pub use buffer::{Backing, BoxedBuffer, ScratchBuffer};
pub use bytes::*;
pub use config::BufferConfig;
pub use error::{BufferError, BufferResult};
pub use file_buffer::{FileBuffer, TEMP_FILE_PREFIX};
pub use mem_buffer::MemBuffer;
pub use stream::{reader, writer, Reader, Writer};
