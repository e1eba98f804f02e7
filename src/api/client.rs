//! HTTP client with API token header injection.
//!
//! All requests include the `X-API-TOKEN` header once a token is stored,
//! matching the session header the surat backend expects.

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Name of the session header carried by every authenticated request.
const TOKEN_HEADER: &str = "X-API-TOKEN";

/// HTTP client wrapper for surat backend communication.
///
/// Manages the base URL and the API token, and ensures every request is
/// built through one helper so no call site attaches headers itself.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new API client with the given base URL.
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Store the API token for subsequent requests.
    pub async fn set_token(&self, token: String) {
        let mut guard = self.token.write().await;
        *guard = Some(token);
    }

    /// Clear the API token (used on logout).
    pub async fn clear_token(&self) {
        let mut guard = self.token.write().await;
        *guard = None;
    }

    /// Send a GET request to a relative API path.
    ///
    /// The path may carry a pre-built query string.
    pub async fn get(&self, path: &str) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.get(&url);
        self.send(builder).await
    }

    /// Send a POST request with a JSON body to a relative API path.
    pub async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.post(&url).json(body);
        self.send(builder).await
    }

    /// Send a POST request with a multipart body to a relative API path.
    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.post(&url).multipart(form);
        self.send(builder).await
    }

    /// Send a DELETE request to a relative API path.
    pub async fn delete(&self, path: &str) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.delete(&url);
        self.send(builder).await
    }

    /// Attach the stored token header (when present) and send.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, reqwest::Error> {
        let token = self.token.read().await;
        let builder = match *token {
            Some(ref t) => builder.header(TOKEN_HEADER, t),
            None => builder,
        };
        builder.send().await
    }
}
