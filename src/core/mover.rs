use std::io;
use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::core::error::{Error, Result};

/// Relocate `source` to `dest` with a single host rename.
///
/// The destination must be free: a bare rename on Unix silently replaces an
/// existing file, so an occupied destination is refused up front. Failures
/// from the rename itself (cross-device link, permissions, destination
/// directory occupied) surface as [`Error::MoveIo`]; there is no
/// copy-and-delete fallback.
pub async fn move_entry(source: &Path, dest: &Path) -> Result<()> {
    if fs::symlink_metadata(dest).await.is_ok() {
        return Err(Error::AlreadyExists {
            path: dest.to_path_buf(),
        });
    }

    fs::rename(source, dest).await.map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            Error::NotFound {
                path: source.to_path_buf(),
            }
        } else {
            Error::MoveIo {
                path: source.to_path_buf(),
                source: e,
            }
        }
    })?;

    info!(from = %source.display(), to = %dest.display(), "moved entry");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn moves_a_file() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("a.txt");
        let dest = temp.path().join("b.txt");
        std::fs::write(&source, b"payload").unwrap();

        move_entry(&source, &dest).await.unwrap();

        assert!(!source.exists());
        assert_eq!(std::fs::read(&dest).unwrap(), b"payload");
    }

    #[tokio::test]
    async fn refuses_occupied_destination() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("a.txt");
        let dest = temp.path().join("b.txt");
        std::fs::write(&source, b"a").unwrap();
        std::fs::write(&dest, b"b").unwrap();

        let err = move_entry(&source, &dest).await.unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { .. }));
        assert_eq!(std::fs::read(&dest).unwrap(), b"b");
    }

    #[tokio::test]
    async fn missing_source_is_not_found() {
        let temp = tempdir().unwrap();
        let err = move_entry(&temp.path().join("gone"), &temp.path().join("dst"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
