pub mod copier;
pub mod error;
pub mod lister;
pub mod mover;
pub mod naming;
pub mod ops;
pub mod orchestrator;
pub mod refresh;
pub mod registry;

pub use error::{Error, Result};
pub use lister::{ChildEntry, list};
pub use ops::{ConfirmDelete, DeleteOutcome, EntryOps};
pub use orchestrator::{Clipboard, TransferMode, TransferOrchestrator};
pub use refresh::RefreshSignal;
pub use registry::RootRegistry;
