use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {} is unusable: {reason}", path.display())]
    OutputDir { path: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Creates the artifact directory if missing and probes that files can
/// be created inside it. Callers run this once before the first write;
/// [`AtomicFileWriter`] itself assumes a usable directory.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    let unusable = |reason: String| PersistError::OutputDir {
        path: dir.to_path_buf(),
        reason,
    };

    if dir.exists() && !dir.is_dir() {
        return Err(unusable("path exists but is not a directory".to_string()));
    }
    fs::create_dir_all(dir).map_err(|err| unusable(err.to_string()))?;
    NamedTempFile::new_in(dir)
        .map(drop)
        .map_err(|err| unusable(err.to_string()))
}

/// Writes run artifacts into one directory without ever exposing a
/// partial file: content is staged in a temp file next to the target,
/// synced, then renamed into place.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        let target = self.dir.join(filename);
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(content)?;
        staged.as_file().sync_all()?;

        // Renaming over an existing file fails on Windows.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        staged
            .persist(&target)
            .map_err(|err| PersistError::Io(err.error))?;
        Ok(target)
    }
}
