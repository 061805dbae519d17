//! Backing selection from configuration.
//!
//! A pipeline usually decides between memory and disk once, from a config
//! flag, and then only deals with [`BoxedBuffer`]. The YAML form is:
//!
//! ```yaml
//! kind: temp_file   # memory | temp_file | named_file
//! dir: /var/tmp     # temp_file: directory for the file, defaults to the OS temp dir
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::{Backing, BoxedBuffer};
use crate::error::{BufferError, BufferResult};
use crate::file_buffer::FileBuffer;
use crate::mem_buffer::MemBuffer;

/// How to construct a scratch buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BufferConfig {
    /// Keep the content in process memory.
    Memory {
        /// Initial capacity hint in bytes.
        #[serde(default, skip_serializing_if = "is_zero")]
        capacity: usize,
    },

    /// Spill to an auto-named temp file.
    TempFile {
        /// Directory for the temp file. Defaults to the OS temp dir.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dir: Option<PathBuf>,
    },

    /// Spill to a file that is kept after the buffer is closed.
    NamedFile {
        /// Path of the file; an existing file is truncated.
        path: PathBuf,
    },
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl Default for BufferConfig {
    fn default() -> Self {
        BufferConfig::Memory { capacity: 0 }
    }
}

impl BufferConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml(text: &str) -> BufferResult<Self> {
        serde_yaml::from_str(text).map_err(|e| BufferError::Config(e.to_string()))
    }

    /// Loads a configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> BufferResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Serializes the configuration to YAML text.
    pub fn to_yaml(&self) -> BufferResult<String> {
        serde_yaml::to_string(self).map_err(|e| BufferError::Config(e.to_string()))
    }

    /// Returns the backing kind this configuration selects.
    pub fn backing(&self) -> Backing {
        match self {
            BufferConfig::Memory { .. } => Backing::Memory,
            BufferConfig::TempFile { .. } => Backing::TempFile,
            BufferConfig::NamedFile { .. } => Backing::NamedFile,
        }
    }

    /// Constructs a buffer with the configured backing.
    pub fn open(&self) -> BufferResult<BoxedBuffer> {
        debug!("Opening {} scratch buffer", self.backing());
        let buf: BoxedBuffer = match self {
            BufferConfig::Memory { capacity } => Box::new(MemBuffer::with_capacity(*capacity)),
            BufferConfig::TempFile { dir: Some(dir) } => Box::new(FileBuffer::temp_in(dir)?),
            BufferConfig::TempFile { dir: None } => {
                Box::new(FileBuffer::temp_in(std::env::temp_dir())?)
            }
            BufferConfig::NamedFile { path } => Box::new(FileBuffer::create(path)?),
        };
        Ok(buf)
    }
}
