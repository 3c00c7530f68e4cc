//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::DashboardSession;
use crate::theme::ThemeStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single dashboard session driven by this server
    pub session: Arc<DashboardSession>,
    /// Persisted theme preference
    pub theme: Arc<ThemeStore>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(session: Arc<DashboardSession>, theme: Arc<ThemeStore>) -> Self {
        Self { session, theme }
    }
}
