//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::planner::PlannerConfig;
use crate::poll::Poller;
use crate::signal::SignalBackend;

/// Shared application state.
///
/// The catalog is read-only; the poller's cache is the only shared state
/// that changes between requests.
#[derive(Clone)]
pub struct AppState {
    /// Line catalog
    pub catalog: Arc<Catalog>,

    /// Cached, bounded countdown poller
    pub poller: Arc<Poller<SignalBackend>>,

    /// Inference configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: Catalog, poller: Poller<SignalBackend>, config: PlannerConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            poller: Arc::new(poller),
            config: Arc::new(config),
        }
    }
}
