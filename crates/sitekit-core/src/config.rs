//! Configuration module
//!
//! Client configuration is built from environment variables once and
//! handed to the client constructor; nothing reads the environment after
//! startup and there are no process-wide globals.

use std::env;

/// Content-management API host used when SITEKIT_API_URL is not set.
const DEFAULT_API_URL: &str = "https://site-api.datocms.com";

/// Client configuration: API host, access token, and the default model id
/// for record operations.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub token: String,
    /// Default model (item type) id. Record operations need one; the CLI
    /// lets a flag override it per invocation.
    pub model_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let base_url =
            env::var("SITEKIT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let token = env::var("SITEKIT_API_TOKEN")
            .map_err(|_| anyhow::anyhow!("SITEKIT_API_TOKEN must be set"))?;

        let model_id = env::var("SITEKIT_MODEL_ID")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let config = Config {
            base_url,
            token,
            model_id,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.token.trim().is_empty() {
            return Err(anyhow::anyhow!("SITEKIT_API_TOKEN cannot be empty"));
        }

        if self.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("SITEKIT_API_URL cannot be empty"));
        }

        if let Some(model_id) = &self.model_id {
            if model_id.trim().is_empty() {
                return Err(anyhow::anyhow!("SITEKIT_MODEL_ID cannot be empty"));
            }
        }

        Ok(())
    }
}
