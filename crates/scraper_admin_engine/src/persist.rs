use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("download directory {path:?} unusable: {reason}")]
    DownloadDir { path: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Creates `dir` if needed and rejects paths that exist but are not directories.
pub fn ensure_download_dir(dir: &Path) -> Result<(), PersistError> {
    let unusable = |reason: String| PersistError::DownloadDir {
        path: dir.to_path_buf(),
        reason,
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(unusable("not a directory".into())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| unusable(e.to_string()))
        }
        Err(err) => Err(unusable(err.to_string())),
    }
}

/// Flattens an S3 key into a single file name (`html/2024/17.html` ->
/// `html_2024_17.html`).
pub fn download_filename(s3_key: &str) -> String {
    let flat: String = s3_key
        .trim_matches('/')
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => c,
            _ => '-',
        })
        .collect();
    if flat.is_empty() || flat.chars().all(|c| c == '.') {
        "object.html".to_string()
    } else {
        flat
    }
}

/// Saves downloaded objects under one directory. Each save goes through a
/// temp file in the same directory, so readers never see partial content.
#[derive(Debug, Clone)]
pub struct DownloadWriter {
    dir: PathBuf,
}

impl DownloadWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, s3_key: &str) -> PathBuf {
        self.dir.join(download_filename(s3_key))
    }

    /// Writes `content` for `s3_key`, replacing an earlier download of the same key.
    pub fn save(&self, s3_key: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_download_dir(&self.dir)?;
        let target = self.path_for(s3_key);

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(content)?;
        staged.as_file().sync_all()?;
        staged.persist(&target).map_err(|err| err.error)?;
        Ok(target)
    }
}
