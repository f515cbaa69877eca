use crate::config::AppConfig;
use crate::core::{self, ChildEntry, RefreshSignal, Result, RootRegistry};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared handle bundling configuration and the core services.
///
/// This is also the pull-based query surface for view layers: roots and
/// children are fetched on demand, and [`AppContext::refresh`] carries the
/// re-render hints fired after mutations.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub registry: Arc<RootRegistry>,
    pub refresh: RefreshSignal,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let refresh = RefreshSignal::new();
        let registry = Arc::new(RootRegistry::new(&config.data_dir, refresh.clone()));
        Self {
            config: Arc::new(config),
            registry,
            refresh,
        }
    }

    /// Registered roots in insertion order.
    pub async fn list_roots(&self) -> Result<Vec<PathBuf>> {
        self.registry.load().await
    }

    /// Direct children of `path`, in host enumeration order.
    pub async fn list_children(&self, path: &Path) -> Result<Vec<ChildEntry>> {
        core::lister::list(path).await
    }
}
