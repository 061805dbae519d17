//! Error types for buffer operations.

use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Buffer operation error.
///
/// I/O failures leave a file-backed buffer in an undefined state: the
/// caller should close and discard it.
#[derive(Error, Debug)]
pub enum BufferError {
    /// The backing medium rejected the operation.
    #[error("buffer: io error: {0}")]
    Io(#[from] io::Error),

    /// The file handle has already been released by `close()`.
    #[error("buffer: closed")]
    Closed,

    /// Truncation was asked to grow the content.
    #[error("buffer: cannot truncate to {size} bytes, length is {len}")]
    TruncateBeyondLength { size: u64, len: u64 },

    /// The content is not valid UTF-8 text.
    #[error("buffer: invalid utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// The buffer configuration could not be parsed.
    #[error("buffer: config error: {0}")]
    Config(String),
}

/// Result type for buffer operations.
pub type BufferResult<T> = Result<T, BufferError>;

impl From<BufferError> for io::Error {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::Io(e) => e,
            BufferError::TruncateBeyondLength { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, err)
            }
            BufferError::Utf8(_) => io::Error::new(io::ErrorKind::InvalidData, err),
            other => io::Error::other(other),
        }
    }
}
