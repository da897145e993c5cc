//! Shared application state.

use devlog::Devlog;

/// State handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub devlog: Devlog,
}

impl AppState {
    pub fn new(devlog: Devlog) -> Self {
        Self { devlog }
    }
}
