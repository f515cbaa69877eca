//! File-tree panel core: a durable registry of browsable roots plus the
//! filesystem engine behind copy/cut/paste, create, rename and delete.
//!
//! The core is UI-agnostic. Hosts pull state through
//! [`context::AppContext`] (`list_roots` / `list_children`), drive
//! mutations through [`core::TransferOrchestrator`], [`core::EntryOps`] and
//! [`core::RootRegistry`], and subscribe to [`core::RefreshSignal`] for
//! re-render hints. The `treefm` binary is one such host.

pub mod config;
pub mod context;
pub mod core;
pub mod logging;
