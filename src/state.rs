//! Application state for the surat client.
//!
//! Holds the shared API client and the keyring-backed session store.
//! Constructed once in `main` and handed to every command handler.

use std::sync::Arc;

use crate::api::client::ApiClient;
use crate::session::store::KeyringStore;

pub struct AppState {
    /// HTTP client for surat backend communication.
    pub api: Arc<ApiClient>,

    /// Client-side storage for the API token and profile fields.
    pub store: KeyringStore,
}

impl AppState {
    /// Create a new AppState with the given API base URL.
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api: Arc::new(ApiClient::new(api_base_url)),
            store: KeyringStore,
        }
    }
}
