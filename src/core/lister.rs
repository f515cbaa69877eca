use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::core::error::{Error, Result};

/// A direct child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// List the direct children of `dir`, in host enumeration order.
///
/// Classification uses the non-following file type, so a symlink to a
/// directory lists as a file. An entry whose classification fails (broken
/// link, permission, race with deletion) stays in the listing as a file
/// rather than dropping or failing the whole listing; only the top-level
/// enumeration failing is an error.
pub async fn list(dir: &Path) -> Result<Vec<ChildEntry>> {
    let mut read_dir = fs::read_dir(dir)
        .await
        .map_err(|source| Error::DirectoryUnreadable {
            path: dir.to_path_buf(),
            source,
        })?;

    let mut children = Vec::new();
    loop {
        let entry = match read_dir.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(source) => {
                return Err(Error::DirectoryUnreadable {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        };

        let is_dir = match entry.file_type().await {
            Ok(file_type) => file_type.is_dir(),
            Err(e) => {
                debug!(path = %entry.path().display(), error = %e, "classification failed, treating as file");
                false
            }
        };

        children.push(ChildEntry {
            path: entry.path(),
            is_dir,
        });
    }

    Ok(children)
}
