//! Recursive copy engine.
//!
//! Deep-copies a file or directory tree. At each directory level the child
//! copies are fired concurrently and joined before the level counts as
//! done; the first failing child fails the subtree and aborts its still-
//! running siblings. Children copied before the failure are left in place:
//! there is no rollback, and a failed copy can leave a partial destination
//! tree behind.

use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use tokio::fs;
use tokio::task::JoinSet;
use tracing::debug;

use crate::core::error::{Error, Result};

/// Deep-copy the tree rooted at `source` to `dest`.
///
/// Directories are created along with missing intermediates; file copies
/// carry contents and size only and overwrite an existing destination.
/// A vanished source surfaces as [`Error::NotFound`], everything else as
/// [`Error::CopyIo`] naming the failing path.
pub fn copy_tree(
    source: PathBuf,
    dest: PathBuf,
) -> Pin<Box<dyn Future<Output = Result<()>> + Send>> {
    Box::pin(async move {
        let meta = fs::metadata(&source).await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::NotFound {
                    path: source.clone(),
                }
            } else {
                Error::CopyIo {
                    path: source.clone(),
                    source: e,
                }
            }
        })?;

        if meta.is_dir() {
            fs::create_dir_all(&dest).await.map_err(|e| Error::CopyIo {
                path: dest.clone(),
                source: e,
            })?;

            let mut entries = fs::read_dir(&source).await.map_err(|e| Error::CopyIo {
                path: source.clone(),
                source: e,
            })?;

            let mut children: JoinSet<Result<()>> = JoinSet::new();
            loop {
                match entries.next_entry().await {
                    Ok(Some(entry)) => {
                        let name = entry.file_name();
                        children.spawn(copy_tree(source.join(&name), dest.join(&name)));
                    }
                    Ok(None) => break,
                    Err(e) => {
                        return Err(Error::CopyIo {
                            path: source.clone(),
                            source: e,
                        });
                    }
                }
            }

            // Returning early drops the set and aborts outstanding siblings.
            while let Some(joined) = children.join_next().await {
                match joined {
                    Ok(result) => result?,
                    Err(join_err) => {
                        return Err(Error::CopyIo {
                            path: source.clone(),
                            source: io::Error::other(join_err),
                        });
                    }
                }
            }
        } else {
            debug!(from = %source.display(), to = %dest.display(), "copying file");
            fs::copy(&source, &dest).await.map_err(|e| Error::CopyIo {
                path: source.clone(),
                source: e,
            })?;
        }

        Ok(())
    })
}
