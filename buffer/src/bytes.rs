//! Convenience functions for creating pre-sized memory buffers.
//!
//! Content streams and object tables tend to land in a few size classes;
//! sizing the buffer up front avoids the early reallocations.

use crate::MemBuffer;

/// Creates a 4KB memory buffer.
pub fn mem_bytes_4kb() -> MemBuffer {
    MemBuffer::with_capacity(4096)
}

/// Creates a 64KB memory buffer.
pub fn mem_bytes_64kb() -> MemBuffer {
    MemBuffer::with_capacity(65536)
}

/// Creates a 1MB memory buffer.
pub fn mem_bytes_1mb() -> MemBuffer {
    MemBuffer::with_capacity(1 << 20)
}

/// Creates a default 4KB memory buffer.
pub fn mem_bytes() -> MemBuffer {
    mem_bytes_4kb()
}
