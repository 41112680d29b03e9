//! Photo capture helpers: unique image file creation and the user notice
//! shown once a capture finishes.

use std::fmt;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use shakevibe_types::ShakeError;
use tracing::info;

const MAX_SUFFIX: u32 = 1000;

/// Create an empty, uniquely named `JPEG_<yyMMdd_HHmmss>_<n>.jpg` file in
/// `dir` and return its path. `dir` is created if missing.
pub fn create_image_file<Tz: TimeZone>(dir: &Path, now: &DateTime<Tz>) -> Result<PathBuf, ShakeError>
where
    Tz::Offset: fmt::Display,
{
    let storage_error = |path: &Path, e: std::io::Error| ShakeError::Storage {
        path: path.display().to_string(),
        details: e.to_string(),
    };

    std::fs::create_dir_all(dir).map_err(|e| storage_error(dir, e))?;
    let prefix = format!("JPEG_{}_", now.format("%y%m%d_%H%M%S"));

    for n in 0..MAX_SUFFIX {
        let path = dir.join(format!("{prefix}{n}.jpg"));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => {
                info!(path = %path.display(), "image file created");
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(storage_error(&path, e)),
        }
    }

    Err(ShakeError::Storage {
        path: dir.display().to_string(),
        details: format!("no free name for prefix {prefix}"),
    })
}

/// How a camera capture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// `location` is set when the camera reported where it stored the image.
    Saved { location: Option<String> },
    Cancelled,
}

impl fmt::Display for CaptureOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureOutcome::Saved { location: None } => write!(f, "Image saved successfully"),
            CaptureOutcome::Saved {
                location: Some(loc),
            } => write!(f, "Image saved successfully in: {loc}"),
            CaptureOutcome::Cancelled => write!(f, "Cancelled"),
        }
    }
}
