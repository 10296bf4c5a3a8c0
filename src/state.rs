use std::sync::Arc;

use crate::config::Config;
use crate::translate::{StubBackend, TranslationBackend};

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: Arc<dyn TranslationBackend>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn TranslationBackend>) -> Self {
        Self {
            config: Arc::new(config),
            backend,
        }
    }

    /// State serving the canned mock responses
    pub fn stub(config: Config) -> Self {
        Self::new(config, Arc::new(StubBackend))
    }
}
