//! Application state for the API server

use crate::{Config, ExportCoordinator};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// This struct is cloned for each request (cheap Arc clone) and provides
/// access to the export coordinator and configuration.
#[derive(Clone)]
pub struct AppState {
    /// The export coordinator handling submissions and downloads
    pub coordinator: Arc<ExportCoordinator>,

    /// Configuration (read access for link rendering and TTL reporting)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(coordinator: Arc<ExportCoordinator>, config: Arc<Config>) -> Self {
        Self {
            coordinator,
            config,
        }
    }
}
