//! File-backed buffer implementation.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::buffer::{Backing, ScratchBuffer};
use crate::error::{BufferError, BufferResult};

/// Name prefix for temp files created by [`FileBuffer::temp_in`].
pub const TEMP_FILE_PREFIX: &str = "fpdf-";

#[derive(Debug)]
enum Handle {
    Temp(NamedTempFile),
    Named { file: File, path: PathBuf },
}

impl Handle {
    fn file(&self) -> &File {
        match self {
            Handle::Temp(tmp) => tmp.as_file(),
            Handle::Named { file, .. } => file,
        }
    }

    fn file_mut(&mut self) -> &mut File {
        match self {
            Handle::Temp(tmp) => tmp.as_file_mut(),
            Handle::Named { file, .. } => file,
        }
    }

    fn path(&self) -> &Path {
        match self {
            Handle::Temp(tmp) => tmp.path(),
            Handle::Named { path, .. } => path,
        }
    }
}

/// A scratch buffer spilled to a file on disk.
///
/// A file handle has a single shared cursor, so every operation positions
/// it explicitly before acting: appends seek to the end, reads and dumps
/// seek to the start. Callers see exactly the behavior of
/// [`crate::MemBuffer`].
///
/// Temp-file buffers are removed from disk when closed or dropped.
/// Named-file buffers leave their file in place.
///
/// # Example
///
/// ```
/// use fpdf_buffer::{FileBuffer, ScratchBuffer};
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut buf = FileBuffer::temp_in(dir.path()).unwrap();
/// buf.write(b"abc").unwrap();
/// buf.write(b"def").unwrap();
///
/// let mut sink = Vec::new();
/// buf.write_to(&mut sink).unwrap();
/// assert_eq!(sink, b"abcdef");
/// buf.close().unwrap();
/// ```
#[derive(Debug)]
pub struct FileBuffer {
    kind: Backing,
    handle: Option<Handle>,
}

impl FileBuffer {
    /// Creates an auto-named temp file buffer in `dir`.
    ///
    /// Fails if `dir` does not exist or is not writable.
    ///
    /// The file is removed by [`ScratchBuffer::close`] or when the buffer is
    /// dropped. It keeps a name so that [`FileBuffer::path`] works, which
    /// means it is left behind if the process exits without unwinding
    /// (`process::exit`, abort, `mem::forget`).
    pub fn temp_in<P: AsRef<Path>>(dir: P) -> BufferResult<Self> {
        let tmp = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .tempfile_in(dir)?;
        debug!("Created temp file buffer at {}", tmp.path().display());
        Ok(Self {
            kind: Backing::TempFile,
            handle: Some(Handle::Temp(tmp)),
        })
    }

    /// Creates a buffer backed by the file at `path`.
    ///
    /// An existing file is truncated. The file stays on disk after
    /// [`ScratchBuffer::close`].
    pub fn create<P: AsRef<Path>>(path: P) -> BufferResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        debug!("Created named file buffer at {}", path.display());
        Ok(Self {
            kind: Backing::NamedFile,
            handle: Some(Handle::Named { file, path }),
        })
    }

    /// Returns the on-disk path, or `None` once closed.
    pub fn path(&self) -> Option<&Path> {
        self.handle.as_ref().map(Handle::path)
    }

    /// Returns true once [`ScratchBuffer::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.handle.is_none()
    }

    fn file(&self) -> BufferResult<&File> {
        self.handle
            .as_ref()
            .map(Handle::file)
            .ok_or(BufferError::Closed)
    }

    /// Returns the file positioned at `pos`.
    fn seek(&mut self, pos: SeekFrom) -> BufferResult<&mut File> {
        let file = self
            .handle
            .as_mut()
            .map(Handle::file_mut)
            .ok_or(BufferError::Closed)?;
        file.seek(pos)?;
        Ok(file)
    }
}

impl ScratchBuffer for FileBuffer {
    fn kind(&self) -> Backing {
        self.kind
    }

    fn write(&mut self, data: &[u8]) -> BufferResult<usize> {
        let file = self.seek(SeekFrom::End(0))?;
        file.write_all(data)?;
        trace!("file buffer: appended {} bytes", data.len());
        Ok(data.len())
    }

    fn read_from(&mut self, src: &mut dyn Read) -> BufferResult<u64> {
        let file = self.seek(SeekFrom::End(0))?;
        let n = io::copy(src, file)?;
        trace!("file buffer: appended {} bytes from reader", n);
        Ok(n)
    }

    fn read_at(&mut self, offset: u64, dst: &mut [u8]) -> BufferResult<usize> {
        // Offsets past i64::MAX are rejected by lseek
        if offset >= self.len()? {
            return Ok(0);
        }
        let file = self.seek(SeekFrom::Start(offset))?;
        let mut filled = 0;
        while filled < dst.len() {
            match file.read(&mut dst[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    fn write_to(&mut self, dst: &mut dyn Write) -> BufferResult<u64> {
        // Always dump from the start, wherever earlier calls left the cursor
        let file = self.seek(SeekFrom::Start(0))?;
        let n = io::copy(file, dst)?;
        trace!("file buffer: dumped {} bytes", n);
        Ok(n)
    }

    fn truncate(&mut self, size: u64) -> BufferResult<()> {
        let len = self.len()?;
        if size > len {
            return Err(BufferError::TruncateBeyondLength { size, len });
        }
        self.file()?.set_len(size)?;
        debug!("file buffer: truncated from {} to {} bytes", len, size);
        Ok(())
    }

    fn bytes(&mut self) -> BufferResult<Vec<u8>> {
        let len = self.len()?;
        let file = self.seek(SeekFrom::Start(0))?;
        let mut data = Vec::with_capacity(usize::try_from(len).unwrap_or(0));
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    fn len(&self) -> BufferResult<u64> {
        Ok(self.file()?.metadata()?.len())
    }

    fn close(&mut self) -> BufferResult<()> {
        match self.handle.take() {
            None => Err(BufferError::Closed),
            Some(Handle::Temp(tmp)) => {
                let path = tmp.path().to_path_buf();
                tmp.close()?;
                debug!("Closed and removed temp file buffer {}", path.display());
                Ok(())
            }
            Some(Handle::Named { file, path }) => {
                drop(file);
                debug!("Closed named file buffer {}", path.display());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_temp_file_lifecycle() {
        let dir = tempdir().unwrap();
        let mut buf = FileBuffer::temp_in(dir.path()).unwrap();
        assert_eq!(buf.kind(), Backing::TempFile);

        let path = buf.path().unwrap().to_path_buf();
        assert!(path.starts_with(dir.path()));
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(TEMP_FILE_PREFIX));
        assert!(path.exists());

        buf.write(b"scratch").unwrap();
        buf.close().unwrap();

        assert!(buf.is_closed());
        assert!(buf.path().is_none());
        assert!(!path.exists(), "temp file should be removed on close");
    }

    #[test]
    fn test_temp_file_removed_on_drop() {
        let dir = tempdir().unwrap();
        let path = {
            let mut buf = FileBuffer::temp_in(dir.path()).unwrap();
            buf.write(b"forgotten").unwrap();
            buf.path().unwrap().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_temp_in_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let result = FileBuffer::temp_in(dir.path().join("does/not/exist"));
        assert!(matches!(result, Err(BufferError::Io(_))));
    }

    #[test]
    fn test_named_file_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("content.bin");

        let mut buf = FileBuffer::create(&path).unwrap();
        assert_eq!(buf.kind(), Backing::NamedFile);
        assert_eq!(buf.path(), Some(path.as_path()));

        buf.write(b"stream data").unwrap();
        buf.close().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"stream data");
    }

    #[test]
    fn test_named_file_truncates_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("old.bin");
        std::fs::write(&path, b"stale content").unwrap();

        let mut buf = FileBuffer::create(&path).unwrap();
        assert_eq!(buf.len().unwrap(), 0);
        buf.write(b"new").unwrap();
        assert_eq!(buf.bytes().unwrap(), b"new");
    }

    #[test]
    fn test_write_after_read_appends() {
        let dir = tempdir().unwrap();
        let mut buf = FileBuffer::temp_in(dir.path()).unwrap();
        buf.write(b"abcdef").unwrap();

        // Leave the cursor in the middle of the file
        let mut dst = [0u8; 2];
        assert_eq!(buf.read(&mut dst).unwrap(), 2);

        buf.write(b"ghi").unwrap();
        assert_eq!(buf.bytes().unwrap(), b"abcdefghi");
    }

    #[test]
    fn test_write_to_after_write_dumps_everything() {
        let dir = tempdir().unwrap();
        let mut buf = FileBuffer::temp_in(dir.path()).unwrap();
        buf.write(b"abc").unwrap();
        buf.write(b"xyz").unwrap();

        // The cursor sits at the end here; the dump must still start at 0
        let mut sink = Vec::new();
        assert_eq!(buf.write_to(&mut sink).unwrap(), 6);
        assert_eq!(sink, b"abcxyz");
    }

    #[test]
    fn test_read_fills_destination() {
        let dir = tempdir().unwrap();
        let mut buf = FileBuffer::temp_in(dir.path()).unwrap();
        buf.write(b"0123456789").unwrap();

        let mut dst = [0u8; 4];
        assert_eq!(buf.read(&mut dst).unwrap(), 4);
        assert_eq!(&dst, b"0123");
        assert_eq!(buf.read_at(8, &mut dst).unwrap(), 2);
        assert_eq!(&dst[..2], b"89");
        assert_eq!(buf.read_at(10, &mut dst).unwrap(), 0);
        assert_eq!(buf.read_at(i64::MAX as u64 + 1, &mut dst).unwrap(), 0);
        assert_eq!(buf.read_at(u64::MAX, &mut dst).unwrap(), 0);
    }

    #[test]
    fn test_truncate_beyond_length_fails() {
        let dir = tempdir().unwrap();
        let mut buf = FileBuffer::temp_in(dir.path()).unwrap();
        buf.write(b"abc").unwrap();

        assert!(matches!(
            buf.truncate(10),
            Err(BufferError::TruncateBeyondLength { size: 10, len: 3 })
        ));
        assert_eq!(buf.len().unwrap(), 3);

        buf.truncate(1).unwrap();
        buf.write(b"z").unwrap();
        assert_eq!(buf.string().unwrap(), "az");
    }

    #[test]
    fn test_operations_after_close_fail() {
        let dir = tempdir().unwrap();
        let mut buf = FileBuffer::temp_in(dir.path()).unwrap();
        buf.close().unwrap();

        assert!(matches!(buf.write(b"x"), Err(BufferError::Closed)));
        assert!(matches!(buf.write_str("x"), Err(BufferError::Closed)));
        let mut src: &[u8] = b"late";
        assert!(matches!(buf.read_from(&mut src), Err(BufferError::Closed)));
        let mut dst = [0u8; 4];
        assert!(matches!(buf.read(&mut dst), Err(BufferError::Closed)));
        assert!(matches!(buf.read_at(0, &mut dst), Err(BufferError::Closed)));
        let mut sink = Vec::new();
        assert!(matches!(buf.write_to(&mut sink), Err(BufferError::Closed)));
        assert!(sink.is_empty());
        assert!(matches!(buf.string(), Err(BufferError::Closed)));
        assert!(matches!(buf.bytes(), Err(BufferError::Closed)));
        assert!(matches!(buf.len(), Err(BufferError::Closed)));
        assert!(matches!(buf.truncate(0), Err(BufferError::Closed)));
        assert!(matches!(buf.close(), Err(BufferError::Closed)));

        // Kind survives close
        assert_eq!(buf.kind(), Backing::TempFile);
    }

    #[test]
    fn test_printf_appends_after_read() {
        let dir = tempdir().unwrap();
        let mut buf = FileBuffer::temp_in(dir.path()).unwrap();
        buf.write_str("%PDF-1.3\n").unwrap();
        let _ = buf.bytes().unwrap();

        buf.printf(format_args!("{} 0 obj\n", 1)).unwrap();
        assert_eq!(buf.string().unwrap(), "%PDF-1.3\n1 0 obj\n");
    }
}
