//! Create, rename and delete operations on tree entries.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::core::error::{Error, Result};
use crate::core::mover;
use crate::core::refresh::RefreshSignal;

/// Collaborator that must approve a delete before it runs.
///
/// Hosts plug in whatever fits their surface: a modal dialog, a terminal
/// prompt, a policy object in tests. Deletion is not reachable without one.
#[async_trait]
pub trait ConfirmDelete: Send + Sync {
    async fn confirm(&self, path: &Path) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
}

pub struct EntryOps {
    refresh: RefreshSignal,
}

impl EntryOps {
    pub fn new(refresh: RefreshSignal) -> Self {
        Self { refresh }
    }

    /// Create an empty file named `name` under `dir`.
    ///
    /// Any existing entry of that name, whatever its kind, refuses the
    /// creation.
    pub async fn create_file(&self, dir: &Path, name: &str) -> Result<PathBuf> {
        let target = dir.join(name);
        if fs::symlink_metadata(&target).await.is_ok() {
            return Err(Error::AlreadyExists { path: target });
        }

        fs::write(&target, b"").await.map_err(|source| Error::EntryIo {
            path: target.clone(),
            source,
        })?;

        info!(path = %target.display(), "created file");
        self.refresh.notify();
        Ok(target)
    }

    /// Create a directory named `name` under `dir`.
    pub async fn create_dir(&self, dir: &Path, name: &str) -> Result<PathBuf> {
        let target = dir.join(name);
        if fs::symlink_metadata(&target).await.is_ok() {
            return Err(Error::AlreadyExists { path: target });
        }

        fs::create_dir(&target)
            .await
            .map_err(|source| Error::EntryIo {
                path: target.clone(),
                source,
            })?;

        info!(path = %target.display(), "created folder");
        self.refresh.notify();
        Ok(target)
    }

    /// Rename `path` to `new_name` within its parent directory.
    ///
    /// Renaming to the current name is a no-op. An occupied name is
    /// refused; the rename itself is a single host rename call.
    pub async fn rename(&self, path: &Path, new_name: &str) -> Result<PathBuf> {
        let parent = path.parent().ok_or_else(|| Error::NotFound {
            path: path.to_path_buf(),
        })?;
        let dest = parent.join(new_name);
        if dest == path {
            return Ok(dest);
        }

        mover::move_entry(path, &dest).await?;
        self.refresh.notify();
        Ok(dest)
    }

    /// Delete a file or a whole directory tree once `confirmer` approves.
    ///
    /// A declined confirmation removes nothing and reports
    /// [`DeleteOutcome::Declined`]. Directories are removed recursively; a
    /// symlink is unlinked, never followed.
    pub async fn delete(
        &self,
        path: &Path,
        confirmer: &dyn ConfirmDelete,
    ) -> Result<DeleteOutcome> {
        if !confirmer.confirm(path).await {
            info!(path = %path.display(), "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        let meta = fs::symlink_metadata(path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::EntryIo {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        if meta.is_dir() {
            fs::remove_dir_all(path)
                .await
                .map_err(|source| Error::EntryIo {
                    path: path.to_path_buf(),
                    source,
                })?;
        } else {
            fs::remove_file(path)
                .await
                .map_err(|source| Error::EntryIo {
                    path: path.to_path_buf(),
                    source,
                })?;
        }

        info!(path = %path.display(), "deleted entry");
        self.refresh.notify();
        Ok(DeleteOutcome::Deleted)
    }
}
