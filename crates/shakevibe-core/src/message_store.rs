//! [`MessageStore`] – flat single-string files in a private data directory.
//!
//! Each named entry is one file holding one string. The infallible
//! [`read`][MessageStore::read] and [`write`][MessageStore::write] apply the
//! storage policy: a failed read yields an empty string, a failed write is
//! logged and dropped.

use std::fs;
use std::path::{Path, PathBuf};

use shakevibe_types::ShakeError;
use tracing::{debug, warn};

/// File holding the user's draft message.
pub const MESSAGES_FILE: &str = "messages";
/// File holding the path of the last captured photo.
pub const PHOTO_FILE: &str = "photo";

#[derive(Debug, Clone)]
pub struct MessageStore {
    dir: PathBuf,
}

impl MessageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Read `name`, joining its lines without separators.
    pub fn try_read(&self, name: &str) -> Result<String, ShakeError> {
        let path = self.path_of(name);
        let raw = fs::read_to_string(&path).map_err(|e| storage_error(&path, e))?;
        Ok(raw.lines().collect())
    }

    /// Replace the contents of `name` with `data`, creating the data
    /// directory if needed.
    pub fn try_write(&self, name: &str, data: &str) -> Result<(), ShakeError> {
        fs::create_dir_all(&self.dir).map_err(|e| storage_error(&self.dir, e))?;
        let path = self.path_of(name);
        fs::write(&path, data).map_err(|e| storage_error(&path, e))
    }

    /// Read `name`, or an empty string if it cannot be read.
    pub fn read(&self, name: &str) -> String {
        match self.try_read(name) {
            Ok(data) => data,
            Err(e) => {
                debug!(file = name, error = %e, "read failed; using empty string");
                String::new()
            }
        }
    }

    /// Write `data` to `name`; failures are logged and the write is dropped.
    pub fn write(&self, name: &str, data: &str) {
        if let Err(e) = self.try_write(name, data) {
            warn!(file = name, error = %e, "write dropped");
        }
    }
}

fn storage_error(path: &Path, e: std::io::Error) -> ShakeError {
    ShakeError::Storage {
        path: path.display().to_string(),
        details: e.to_string(),
    }
}
