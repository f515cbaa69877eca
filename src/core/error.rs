use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy for the tree panel core.
///
/// Every fallible core operation returns one of these; nothing panics its
/// way out to the host. Variants carry the path the failure is about so
/// front ends can report which entry an action tripped over.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read or write registry {}: {}", .path.display(), .source)]
    RegistryIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("registry {} is not a valid JSON path list: {}", .path.display(), .source)]
    RegistryFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot list directory {}: {}", .path.display(), .source)]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("copy failed at {}: {}", .path.display(), .source)]
    CopyIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("move failed for {}: {}", .path.display(), .source)]
    MoveIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("operation failed on {}: {}", .path.display(), .source)]
    EntryIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot paste {} into itself or its own subtree ({})", .source_path.display(), .dest.display())]
    SelfNestedPaste { source_path: PathBuf, dest: PathBuf },

    #[error("no free name for \"{}\" under {} after {} attempts", .name, .dir.display(), .attempts)]
    NameCollisionExhausted {
        dir: PathBuf,
        name: String,
        attempts: u32,
    },

    #[error("{} already exists", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("{} does not exist", .path.display())]
    NotFound { path: PathBuf },
}
