//! Shared application state.

use pathvault_core::PathVault;

/// State handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The vault all requests operate on.
    pub vault: PathVault,
}

impl AppState {
    /// Creates a new application state.
    #[must_use]
    pub const fn new(vault: PathVault) -> Self {
        Self { vault }
    }
}
