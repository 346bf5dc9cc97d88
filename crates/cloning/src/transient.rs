use std::{
    io,
    path::{Path, PathBuf},
};

use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Extension used when the upload's own extension is unusable
const DEFAULT_EXTENSION: &str = "wav";

/// Writes uploads to request-scoped files under one directory
#[derive(Debug, Clone)]
pub struct TransientStore {
    dir: PathBuf,
}

impl TransientStore {
    /// Use `dir` for transient files, creating it if needed
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` to a fresh `<slot>-<uuid>.<ext>` file
    ///
    /// The returned guard owns the file; it is removed when the guard is
    /// deleted or dropped. A failed write leaves nothing behind.
    pub async fn save(&self, slot: &str, filename: &str, bytes: &[u8]) -> io::Result<TransientFile> {
        let path = self
            .dir
            .join(format!("{slot}-{}.{}", Uuid::new_v4().simple(), extension(filename)));

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        let guard = TransientFile { path, armed: true };

        file.write_all(bytes).await?;
        file.flush().await?;

        tracing::debug!(path = %guard.path.display(), bytes = bytes.len(), "saved transient upload");

        Ok(guard)
    }
}

/// A transient file that is removed on every exit path
#[derive(Debug)]
pub struct TransientFile {
    path: PathBuf,
    armed: bool,
}

impl TransientFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file now
    pub async fn delete(mut self) {
        self.armed = false;
        remove_if_exists(&self.path).await;
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed transient upload on drop"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), "failed to remove transient upload: {e}"),
        }
    }
}

/// Remove `path`, treating an already-missing file as success
///
/// Never fails; unexpected errors are logged.
pub async fn remove_if_exists(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "removed transient upload"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), "failed to remove transient upload: {e}"),
    }
}

/// Short alphanumeric extension of the client filename, else `wav`
fn extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| (1..=8).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map_or_else(|| DEFAULT_EXTENSION.to_string(), str::to_ascii_lowercase)
}
