use std::env;
use std::time::Duration;
use anyhow::{Context, Result, ensure};

#[derive(Debug, Clone)]
pub struct Config {
    pub service_host: String,
    pub service_port: u16,
    pub sidecar_secrets_url: String,
    pub secret_store_name: String,
    pub secret_one_name: String,
    pub secret_two_name: String,
    pub fetch_max_attempts: u32,
    pub fetch_backoff_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service_host: "0.0.0.0".to_string(),
            service_port: 5000,
            sidecar_secrets_url: "http://localhost:3500/v1.0/secrets".to_string(),
            secret_store_name: "azurekeyvault".to_string(),
            secret_one_name: "secretone".to_string(),
            secret_two_name: "secretTwo".to_string(),
            fetch_max_attempts: 1,
            fetch_backoff_ms: 100,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let service_host = env::var("SERVICE_HOST").unwrap_or(defaults.service_host);

        let service_port = match env::var("SERVICE_PORT") {
            Ok(port) => port
                .parse::<u16>()
                .context("SERVICE_PORT must be a valid port number (0-65535)")?,
            Err(_) => defaults.service_port,
        };

        let sidecar_secrets_url =
            env::var("SIDECAR_SECRETS_URL").unwrap_or(defaults.sidecar_secrets_url);

        let secret_store_name =
            env::var("SECRET_STORE_NAME").unwrap_or(defaults.secret_store_name);

        let secret_one_name = env::var("SECRET_ONE_NAME").unwrap_or(defaults.secret_one_name);

        let secret_two_name = env::var("SECRET_TWO_NAME").unwrap_or(defaults.secret_two_name);

        let fetch_max_attempts = match env::var("FETCH_MAX_ATTEMPTS") {
            Ok(attempts) => attempts
                .parse::<u32>()
                .context("FETCH_MAX_ATTEMPTS must be a positive integer")?,
            Err(_) => defaults.fetch_max_attempts,
        };
        ensure!(
            fetch_max_attempts >= 1,
            "FETCH_MAX_ATTEMPTS must be at least 1, got {}",
            fetch_max_attempts
        );

        let fetch_backoff_ms = match env::var("FETCH_BACKOFF_MS") {
            Ok(backoff) => backoff
                .parse::<u64>()
                .context("FETCH_BACKOFF_MS must be a number of milliseconds")?,
            Err(_) => defaults.fetch_backoff_ms,
        };

        Ok(Config {
            service_host,
            service_port,
            sidecar_secrets_url,
            secret_store_name,
            secret_one_name,
            secret_two_name,
            fetch_max_attempts,
            fetch_backoff_ms,
        })
    }

    /// Base URL of the configured secret store on the sidecar.
    pub fn store_url(&self) -> String {
        format!(
            "{}/{}",
            self.sidecar_secrets_url.trim_end_matches('/'),
            self.secret_store_name
        )
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn fetch_backoff(&self) -> Duration {
        Duration::from_millis(self.fetch_backoff_ms)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Sidecar secret store: {}", self.store_url());
        tracing::info!("  Secrets: {}, {}", self.secret_one_name, self.secret_two_name);
        tracing::info!(
            "  Fetch attempts: {} (backoff {}ms)",
            self.fetch_max_attempts,
            self.fetch_backoff_ms
        );
        tracing::info!("  Service listening on: {}", self.listen_addr());
    }
}
