//! HTTP client for the site API.
//!
//! Provides a minimal client with bearer auth, generic GET/POST/PUT
//! helpers, and the domain operations (list records, create record, the
//! three-step asset upload). The CLI crate uses this client directly.

pub mod api;

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use sitekit_core::{ClientError, Config};

/// Authentication strategy for the CMS API. The presigned-PUT leg of an
/// upload deliberately bypasses this: the storage host is a different
/// auth domain and must not see CMS credentials.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
}

/// HTTP client for the site API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Auth,
}

impl ApiClient {
    pub fn new(base_url: String, auth: Auth) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ClientError::network("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(config.base_url.clone(), Auth::Bearer(config.token.clone()))
    }

    /// Create client from environment: SITEKIT_API_URL (optional) and
    /// SITEKIT_API_TOKEN.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Config::from_env()?;
        Ok(Self::from_config(&config)?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Headers every CMS request carries: bearer auth plus the Accept
    /// header the API requires.
    fn apply_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header("Accept", "application/json");
        match &self.auth {
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
        }
    }

    /// GET request with optional query parameters. Status-checks, then
    /// parses the JSON body.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ClientError> {
        let url = self.build_url(path);
        let mut request = self.client.get(&url);
        request = self.apply_headers(request);

        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::network("Failed to send request", e))?;

        Self::read_json(response).await
    }

    /// POST a JSON body and parse the JSON response.
    pub async fn post_json<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ClientError> {
        let url = self.build_url(path);
        let request = self.client.post(&url).json(body);
        let request = self.apply_headers(request);

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::network("Failed to send request", e))?;

        Self::read_json(response).await
    }

    /// PUT raw bytes to an absolute URL outside the CMS auth domain. No
    /// Authorization or Accept headers are attached.
    pub async fn put_raw(&self, url: &str, bytes: Vec<u8>) -> Result<(), ClientError> {
        let response = self
            .client
            .put(url)
            .body(bytes)
            .send()
            .await
            .map_err(|e| ClientError::network("Failed to send request", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| {
            ClientError::MalformedResponse(format!("response body is not valid JSON: {}", e))
        })
    }
}

// Re-export the wire types callers see in the domain method signatures.
pub use sitekit_core::models::{RegisteredUpload, StoredObject, UploadPermission};
