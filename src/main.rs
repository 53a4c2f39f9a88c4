mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod server;
mod shutdown;
mod sidecar;
mod state;
mod version;

#[cfg(test)]
mod test_support;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loaded first so RUST_LOG from .env reaches the filter.
    let dotenv_path = dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Some(path) = dotenv_path {
        tracing::info!("Loaded environment from {}", path.display());
    }

    tracing::info!(
        version = version::version(),
        commit = version::commit(),
        "Application started."
    );

    let config = Config::from_env()?;
    config.log_startup();

    let addr = config.listen_addr();
    let state = AppState::from_config(config)?;

    let _server = server::spawn(addr, routes::app(state));
    tracing::info!("Server started.");

    shutdown::wait_for_shutdown().await?;

    tracing::info!("Execution stopped.");
    std::process::exit(0);
}
