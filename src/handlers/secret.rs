use crate::error::ApiError;
use crate::models::CombinedSecrets;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode};

/// GET /secret handler - Fetch both configured secrets from the sidecar
///
/// The second secret is requested only after the first one has been
/// fully fetched and decoded. Either failure ends the request with a 500
/// carrying the error text.
pub async fn secret_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, String), ApiError> {
    let config = &state.config;

    let secret_one = state
        .sidecar
        .get_secret(&config.secret_one_name)
        .await
        .inspect_err(|e| {
            tracing::error!("Failed to fetch secret {}: {}", config.secret_one_name, e)
        })?;

    let secret_two = state
        .sidecar
        .get_secret(&config.secret_two_name)
        .await
        .inspect_err(|e| {
            tracing::error!("Failed to fetch secret {}: {}", config.secret_two_name, e)
        })?;

    tracing::info!("Successfully fetched both secrets");
    let combined = CombinedSecrets {
        secret_one,
        secret_two,
    };

    Ok((StatusCode::OK, combined.to_string()))
}
