//! Clipboard-driven transfer coordination.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::core::copier;
use crate::core::error::{Error, Result};
use crate::core::mover;
use crate::core::naming;
use crate::core::refresh::RefreshSignal;

/// What a paste does with the held entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Copy,
    Cut,
}

/// The single pending transfer awaiting a paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clipboard {
    pub source: PathBuf,
    pub mode: TransferMode,
}

/// Coordinates copy/cut/paste over the one-slot clipboard.
///
/// State machine: `Empty -> Holding(source, mode) -> Empty`. Marking always
/// overwrites whatever was held. A successful paste clears the slot and
/// fires the refresh signal; a failed paste leaves the slot untouched so
/// the action can be retried or replaced.
pub struct TransferOrchestrator {
    clipboard: Option<Clipboard>,
    refresh: RefreshSignal,
}

impl TransferOrchestrator {
    pub fn new(refresh: RefreshSignal) -> Self {
        Self {
            clipboard: None,
            refresh,
        }
    }

    /// Currently held entry, if any.
    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    pub fn mark_for_copy(&mut self, source: &Path) {
        info!(path = %source.display(), "marked for copy");
        self.clipboard = Some(Clipboard {
            source: source.to_path_buf(),
            mode: TransferMode::Copy,
        });
    }

    pub fn mark_for_cut(&mut self, source: &Path) {
        info!(path = %source.display(), "marked for cut");
        self.clipboard = Some(Clipboard {
            source: source.to_path_buf(),
            mode: TransferMode::Cut,
        });
    }

    /// Paste the held entry into `target_dir`.
    ///
    /// Resolves a collision-free name, rejects a directory paste into the
    /// source's own subtree before touching the filesystem, then moves or
    /// copies. Returns the resolved destination, or `None` when nothing is
    /// held (an empty-clipboard paste is a no-op, not an error).
    pub async fn paste_into(&mut self, target_dir: &Path) -> Result<Option<PathBuf>> {
        let Some(held) = self.clipboard.clone() else {
            return Ok(None);
        };

        let desired = held
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::NotFound {
                path: held.source.clone(),
            })?;

        // Same fail-safe default as the lister: unreadable means file.
        let is_dir = fs::symlink_metadata(&held.source)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);

        let final_name = naming::resolve_available_name(target_dir, &desired, is_dir).await?;
        let dest = target_dir.join(&final_name);

        if is_dir && dest.starts_with(&held.source) {
            warn!(
                source = %held.source.display(),
                dest = %dest.display(),
                "refusing paste into own subtree"
            );
            return Err(Error::SelfNestedPaste {
                source_path: held.source.clone(),
                dest,
            });
        }

        match held.mode {
            TransferMode::Cut => mover::move_entry(&held.source, &dest).await?,
            TransferMode::Copy => copier::copy_tree(held.source.clone(), dest.clone()).await?,
        }

        self.clipboard = None;
        self.refresh.notify();
        info!(dest = %dest.display(), mode = ?held.mode, "paste complete");
        Ok(Some(dest))
    }
}
