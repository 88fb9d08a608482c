//! File Store Module
//!
//! Owns the uploads and outputs directories. All mutation of the two areas
//! goes through here so concurrent races (a sweeper deleting a file a handler
//! is about to delete) stay benign and logged.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::storage::names;

// == File Store ==
/// Filesystem-backed store for uploaded images and processed artifacts.
///
/// Cloning is cheap; clones share the same directories. No locking is applied:
/// the directories are process-wide mutable state and every delete tolerates
/// "already gone".
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Where accepted uploads are persisted until processed
    upload_dir: PathBuf,
    /// Where background-removed artifacts are written
    output_dir: PathBuf,
}

impl FileStore {
    // == Constructor ==
    /// Creates a new FileStore over the given directories.
    pub fn new(upload_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Creates both directories if absent. Called once at process start.
    pub async fn ensure_dirs(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        tokio::fs::create_dir_all(&self.output_dir).await?;
        Ok(())
    }

    /// Uploads directory path.
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Outputs directory path.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    // == Uploads ==
    /// Persists an accepted upload under a collision-resistant name and
    /// returns the stored path. Exactly one file is written per call.
    pub async fn save_upload(
        &self,
        original_name: &str,
        media_type: &str,
        bytes: &[u8],
    ) -> io::Result<PathBuf> {
        let name = names::upload_file_name(original_name, media_type);
        let path = self.upload_dir.join(name);
        tokio::fs::write(&path, bytes).await?;
        info!("Stored upload at {}", path.display());
        Ok(path)
    }

    /// Reads a stored upload back for processing.
    pub async fn read_upload(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    /// Deletes a consumed upload. A missing file is benign (the sweeper may
    /// have won the race); any other failure is logged and swallowed, leaving
    /// the file for the next sweep.
    pub async fn delete_upload(&self, path: &Path) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => debug!("Deleted consumed upload {}", path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Upload {} already gone", path.display());
            }
            Err(e) => warn!("Failed to delete upload {}: {}", path.display(), e),
        }
    }

    // == Outputs ==
    /// Writes a processed artifact and returns its stored path.
    pub async fn write_output(&self, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.output_dir.join(name);
        tokio::fs::write(&path, bytes).await?;
        info!("Wrote artifact {}", path.display());
        Ok(path)
    }

    /// Best-effort bulk delete of every existing artifact. Used only by the
    /// opt-in eager-clear policy. Returns the number of files removed;
    /// individual failures are logged and skipped.
    pub async fn clear_outputs(&self) -> usize {
        let mut removed = 0;
        let mut entries = match tokio::fs::read_dir(&self.output_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Failed to read outputs dir {}: {}",
                    self.output_dir.display(),
                    e
                );
                return 0;
            }
        };

        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => match tokio::fs::remove_file(entry.path()).await {
                    Ok(()) => removed += 1,
                    Err(e) => warn!("Failed to delete {}: {}", entry.path().display(), e),
                },
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to enumerate outputs: {}", e);
                    break;
                }
            }
        }

        if removed > 0 {
            info!("Eager clear removed {} artifact(s)", removed);
        }
        removed
    }

    /// Public URL under which a named artifact is served.
    pub fn output_url(&self, name: &str) -> String {
        format!("/outputs/{name}")
    }
}
