//! Per-request scratch directories.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// A uniquely-named scratch directory for one request.
///
/// Holds the staged uploads, the extracted site tree, and the packaged
/// output. Each request gets its own UUID-named directory under the
/// configured work root, so concurrent requests never observe each
/// other's files.
///
/// Removal happens on drop, best-effort with failures logged, so every
/// exit path tears the directory down: success, any error, a panic, or a
/// client disconnecting while the response is still streaming.
#[derive(Debug)]
pub struct RequestWorkspace {
    id: Uuid,
    root: PathBuf,
}

impl RequestWorkspace {
    /// Allocate a fresh workspace under `work_root`.
    pub async fn create(work_root: &Path) -> io::Result<Self> {
        let id = Uuid::new_v4();
        let root = work_root.join(id.to_string());
        fs::create_dir_all(root.join("uploads")).await?;
        fs::create_dir_all(root.join("site")).await?;
        tracing::debug!(workspace = %id, path = %root.display(), "workspace created");
        Ok(Self { id, root })
    }

    /// Request identifier this workspace was allocated for.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Workspace root directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Directory the uploaded archive is extracted into.
    pub fn site_dir(&self) -> PathBuf {
        self.root.join("site")
    }

    /// Staging path for the uploaded site archive.
    pub fn staged_archive(&self) -> PathBuf {
        self.root.join("uploads").join("site.zip")
    }

    /// Staging path for the uploaded icon.
    pub fn staged_icon(&self) -> PathBuf {
        self.root.join("uploads").join("icon.png")
    }

    /// Path the packaged output archive is written to.
    pub fn output_archive(&self) -> PathBuf {
        self.root.join("modified-site.zip")
    }
}

impl Drop for RequestWorkspace {
    fn drop(&mut self) {
        if let Err(error) = std::fs::remove_dir_all(&self.root) {
            if error.kind() != io::ErrorKind::NotFound {
                tracing::warn!(
                    workspace = %self.id,
                    path = %self.root.display(),
                    %error,
                    "failed to remove workspace"
                );
            }
        }
    }
}
