use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve `app` on `addr` from a background task
///
/// Returns immediately. A bind or serve failure is logged and ends the
/// task; it is never propagated to the caller.
pub fn spawn(addr: String, app: Router) -> JoinHandle<()> {
    tokio::spawn(async move {
        let listener = match TcpListener::bind(&addr).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!("Failed to bind {}: {}", addr, e);
                return;
            }
        };

        match listener.local_addr() {
            Ok(local) => tracing::info!("Listening on {}", local),
            Err(_) => tracing::info!("Listening on {}", addr),
        }

        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Server error: {}", e);
        }
    })
}
