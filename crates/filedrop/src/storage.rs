//! Local-disk storage for uploaded files.
//!
//! Files land directly under the storage root using the client-supplied
//! filename, after a path-safety check. A later upload with the same name
//! silently overwrites the earlier one — last write wins, with no detection.

use std::path::{Component, Path, PathBuf};

use common::UploadError;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Handle to the storage directory.
///
/// The root is passed in explicitly (never a process-wide constant) so tests
/// can point an instance at a temporary directory.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Create a storage handle rooted at `root`. No filesystem access occurs
    /// until [`Storage::ensure_root`] is called.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The storage root directory.
    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// Create the storage directory if it does not already exist. Idempotent.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// Map a client-supplied filename to its destination path.
    ///
    /// The filename must be a single plain path component: empty names,
    /// absolute paths, `..`, and anything containing a separator are
    /// rejected before they can address a file outside the storage root.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::InvalidFilename`] for any unsafe name.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf, UploadError> {
        let name = filename.trim();
        if name.is_empty() {
            return Err(UploadError::InvalidFilename("empty filename".into()));
        }

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(name)),
            _ => Err(UploadError::InvalidFilename(name.into())),
        }
    }

    /// Open a sink that streams one upload to disk.
    ///
    /// The destination file is created immediately — or truncated, when a
    /// file with the same name already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the filename is unsafe or the file cannot be
    /// created.
    pub async fn create(&self, filename: &str) -> Result<UploadSink, UploadError> {
        let path = self.resolve(filename)?;
        let file = File::create(&path).await?;
        Ok(UploadSink {
            file,
            path,
            written: 0,
        })
    }
}

/// Incremental writer for a single upload.
///
/// Callers either drive it to [`UploadSink::finish`] or call
/// [`UploadSink::abort`] to remove the partially written file.
pub struct UploadSink {
    file: File,
    path: PathBuf,
    written: u64,
}

impl UploadSink {
    /// Bytes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Append one chunk to the destination file.
    pub async fn append(&mut self, chunk: &[u8]) -> Result<(), UploadError> {
        self.file.write_all(chunk).await?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    /// Flush and close the file, returning the total byte count.
    pub async fn finish(mut self) -> Result<u64, UploadError> {
        self.file.flush().await?;
        Ok(self.written)
    }

    /// Close and remove the partially written file.
    ///
    /// Removal failures are logged and swallowed — the caller is already on
    /// an error path.
    pub async fn abort(self) {
        drop(self.file);
        if let Err(e) = fs::remove_file(&self.path).await {
            warn!(path = %self.path.display(), error = %e, "failed to remove partial upload");
        }
    }
}
