//! Shared application state.

use std::sync::Arc;

use crate::config::Config;
use crate::ilp::IlpSource;

/// State injected into every handler: the configuration and the ILP
/// accessor. Fleet data is fetched fresh per request; nothing is cached
/// across calls.
pub struct AppState {
    pub config: Config,
    pub ilp: Arc<dyn IlpSource>,
}

impl AppState {
    pub fn new(config: Config, ilp: Arc<dyn IlpSource>) -> Self {
        Self { config, ilp }
    }
}
