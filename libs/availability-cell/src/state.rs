use std::sync::Arc;

use shared_backend::BackendClient;
use shared_config::AppConfig;

use crate::services::availability::{Clock, SystemClock};

/// Shared across requests so the backend client's response cache outlives
/// any single handler call.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub backend: Arc<BackendClient>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Self {
        let backend = Arc::new(BackendClient::new(&config));
        Self {
            config,
            backend,
            clock,
        }
    }
}
