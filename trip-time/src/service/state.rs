//! Shared state for the service's handlers.

use std::sync::Arc;

use super::config::ServiceConfig;

/// Shared application state.
#[derive(Clone)]
pub struct ServiceState {
    /// Listener configuration, used to advertise the service location
    pub config: Arc<ServiceConfig>,
}

impl ServiceState {
    /// Create a new service state.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
