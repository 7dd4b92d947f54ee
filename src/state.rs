use std::sync::Arc;

/// Per-process state shared with every handler. The core holds no
/// cross-request state; each request re-touches the OS directly.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<crate::config::Config>,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
