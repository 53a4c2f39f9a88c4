use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::SidecarError;
use crate::models::SecretResponse;

/// Shareable client for the sidecar secrets API
///
/// Wraps a single `reqwest::Client` so connections are pooled across
/// handlers. Cloning is cheap.
#[derive(Clone)]
pub struct SidecarClient {
    http: reqwest::Client,
    store_url: Arc<str>,
    max_attempts: u32,
    backoff: Duration,
}

impl SidecarClient {
    /// Create a new sidecar client from configuration
    ///
    /// No request timeout is set; a hung sidecar holds the caller until the
    /// transport gives up.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client for the sidecar")?;

        let store_url = config.store_url();
        tracing::info!("Using sidecar secret store at: {}", store_url);

        Ok(Self {
            http,
            store_url: store_url.into(),
            max_attempts: config.fetch_max_attempts.max(1),
            backoff: config.fetch_backoff(),
        })
    }

    /// URL of a single secret in the configured store
    pub fn secret_url(&self, name: &str) -> String {
        format!("{}/{}", self.store_url, name)
    }

    /// Fetch one secret value by name
    ///
    /// The sidecar answers with a JSON object keyed by secret name. The
    /// value under `name` is returned, or an empty string when the object
    /// does not contain it, or when the value or the whole body is `null`.
    /// The response status is not inspected, so an error page from the
    /// sidecar surfaces as a decode error.
    ///
    /// Transport and body-read failures are retried until the configured
    /// number of attempts is used up, doubling the backoff after each one.
    ///
    /// # Errors
    /// Returns the error of the last attempt.
    pub async fn get_secret(&self, name: &str) -> std::result::Result<String, SidecarError> {
        let mut attempt = 1;
        loop {
            match self.fetch_once(name).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    let delay = self
                        .backoff
                        .saturating_mul(2u32.saturating_pow(attempt - 1));
                    tracing::warn!(
                        secret = name,
                        attempt,
                        max_attempts = self.max_attempts,
                        "Sidecar request failed, retrying in {:?}: {}",
                        delay,
                        err
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn fetch_once(&self, name: &str) -> std::result::Result<String, SidecarError> {
        let url = self.secret_url(name);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(SidecarError::Transport)?;
        tracing::debug!(%url, status = %response.status(), "Sidecar responded");

        let body = response.bytes().await.map_err(SidecarError::Body)?;

        let secrets: SecretResponse = serde_json::from_slice(&body)?;
        Ok(secrets
            .and_then(|mut secrets| secrets.remove(name).flatten())
            .unwrap_or_default())
    }
}
