use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// Persists uploaded resumes under a single directory so the extractor can read them by path.
///
/// Files are keyed by the client-supplied filename; a re-upload overwrites the previous file.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the upload directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Storage(format!("cannot create {}: {e}", self.root.display())))
    }

    /// Writes `data` to `<root>/<filename>` and returns the path.
    pub async fn save(&self, filename: &str, data: Bytes) -> Result<PathBuf, AppError> {
        let name = sanitize_filename(filename)
            .ok_or_else(|| AppError::Validation(format!("Invalid filename '{filename}'")))?;

        self.ensure_root().await?;
        let path = self.root.join(name);
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| AppError::Storage(format!("cannot write {}: {e}", path.display())))?;

        debug!("Saved upload {} ({} bytes)", path.display(), data.len());
        Ok(path)
    }
}

/// Keeps only the final path component so uploads cannot escape the root.
/// Both separators are honoured regardless of platform.
pub fn sanitize_filename(filename: &str) -> Option<&str> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    match name {
        "" | "." | ".." => None,
        _ => Some(name),
    }
}
