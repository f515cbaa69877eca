//! Durable registry of browsing roots.
//!
//! The registry is a JSON array of absolute path strings living in a single
//! file under the data directory. There is no in-memory cache: every call
//! re-reads the file and every mutation rewrites it whole, so the registry
//! always reflects the latest durable state even across external edits.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::core::error::{Error, Result};
use crate::core::refresh::RefreshSignal;

/// Fixed file name under the data directory.
pub const REGISTRY_FILE: &str = "roots.json";

pub struct RootRegistry {
    file_path: PathBuf,
    refresh: RefreshSignal,
}

impl RootRegistry {
    pub fn new(data_dir: &Path, refresh: RefreshSignal) -> Self {
        Self {
            file_path: data_dir.join(REGISTRY_FILE),
            refresh,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Registered roots in insertion order.
    ///
    /// On first use the registry file is created holding an empty list, and
    /// that empty state is persisted before returning.
    pub async fn load(&self) -> Result<Vec<PathBuf>> {
        match fs::read(&self.file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| Error::RegistryFormat {
                path: self.file_path.clone(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.persist(&[]).await?;
                Ok(Vec::new())
            }
            Err(source) => Err(Error::RegistryIo {
                path: self.file_path.clone(),
                source,
            }),
        }
    }

    /// Append `path` unless an equal path is already registered. Idempotent.
    pub async fn add(&self, path: &Path) -> Result<()> {
        let mut roots = self.load().await?;
        if roots.iter().any(|r| r == path) {
            debug!(path = %path.display(), "root already registered");
            return Ok(());
        }
        roots.push(path.to_path_buf());
        self.persist(&roots).await?;
        info!(path = %path.display(), "registered root");
        self.refresh.notify();
        Ok(())
    }

    /// Remove every entry equal to `path`. Unknown paths are a no-op.
    pub async fn remove(&self, path: &Path) -> Result<()> {
        let mut roots = self.load().await?;
        let before = roots.len();
        roots.retain(|r| r != path);
        if roots.len() < before {
            info!(path = %path.display(), "unregistered root");
        }
        self.persist(&roots).await?;
        self.refresh.notify();
        Ok(())
    }

    async fn persist(&self, roots: &[PathBuf]) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| Error::RegistryIo {
                    path: self.file_path.clone(),
                    source,
                })?;
        }

        let bytes = serde_json::to_vec(roots).map_err(|source| Error::RegistryFormat {
            path: self.file_path.clone(),
            source,
        })?;

        fs::write(&self.file_path, bytes)
            .await
            .map_err(|source| Error::RegistryIo {
                path: self.file_path.clone(),
                source,
            })
    }
}
