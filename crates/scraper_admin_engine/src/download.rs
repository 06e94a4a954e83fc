use std::path::{Path, PathBuf};

use admin_logging::{admin_info, admin_warn};
use thiserror::Error;

use crate::{fingerprint_matches, sha256_hex, AdminApi, ApiError, DownloadWriter, PersistError};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedObject {
    pub path: PathBuf,
    pub byte_len: u64,
    pub sha256: String,
    /// `None` when the backend has no hash on record.
    pub hash_matches: Option<bool>,
}

/// Saves a cached HTML object under `dir` and checks it against the stored hash.
pub async fn download_s3_object(
    api: &dyn AdminApi,
    s3_key: &str,
    dir: &Path,
) -> Result<DownloadedObject, DownloadError> {
    let content = api.get_s3_content(s3_key).await?;
    let bytes = content.html.as_bytes();
    let hash_matches = content
        .content_hash
        .as_deref()
        .map(|expected| fingerprint_matches(bytes, expected));
    if hash_matches == Some(false) {
        admin_warn!("{}: content does not match recorded hash", s3_key);
    }

    let path = DownloadWriter::new(dir).save(s3_key, bytes)?;
    admin_info!("downloaded {} to {:?}", s3_key, path);

    Ok(DownloadedObject {
        path,
        byte_len: bytes.len() as u64,
        sha256: sha256_hex(bytes),
        hash_matches,
    })
}
