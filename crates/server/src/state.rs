//! Application state shared across handlers.

use pwapack_core::AppConfig;
use std::path::Path;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Root directory request workspaces are allocated under.
    pub fn work_root(&self) -> &Path {
        &self.config.work.root
    }
}
