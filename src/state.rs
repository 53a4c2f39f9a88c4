use crate::config::Config;
use crate::sidecar::SidecarClient;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sidecar: SidecarClient,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let sidecar = SidecarClient::from_config(&config)?;
        Ok(Self {
            sidecar,
            config: Arc::new(config),
        })
    }
}
