//! Stand-ins for the sidecar used by unit tests.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::config::Config;

pub const STORE: &str = "azurekeyvault";

#[derive(Clone, Default)]
struct MockState {
    bodies: Arc<HashMap<String, String>>,
    hits: Arc<Mutex<Vec<String>>>,
}

/// Local HTTP server mimicking `GET /v1.0/secrets/{store}/{name}`.
///
/// Each secret name maps to the raw body returned for it. Unknown names get
/// a 404 with a plain-text body, the way the real sidecar reports an
/// unknown secret.
pub struct MockSidecar {
    pub base_url: String,
    state: MockState,
}

impl MockSidecar {
    pub async fn start(bodies: &[(&str, &str)]) -> Self {
        let state = MockState {
            bodies: Arc::new(
                bodies
                    .iter()
                    .map(|(name, body)| (name.to_string(), body.to_string()))
                    .collect(),
            ),
            hits: Arc::default(),
        };

        let app = Router::new()
            .route("/v1.0/secrets/{store}/{name}", get(serve_secret))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/v1.0/secrets", addr),
            state,
        }
    }

    /// Secret names requested so far, in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.state.hits.lock().unwrap().clone()
    }

    pub fn config(&self) -> Config {
        config_for(&self.base_url)
    }
}

async fn serve_secret(
    State(state): State<MockState>,
    Path((_store, name)): Path<(String, String)>,
) -> (StatusCode, String) {
    state.hits.lock().unwrap().push(name.clone());
    match state.bodies.get(&name) {
        Some(body) => (StatusCode::OK, body.clone()),
        None => (StatusCode::NOT_FOUND, format!("secret {} not found", name)),
    }
}

/// Config pointing at `sidecar_secrets_url`, everything else default.
pub fn config_for(sidecar_secrets_url: &str) -> Config {
    Config {
        service_host: "127.0.0.1".to_string(),
        service_port: 0,
        sidecar_secrets_url: sidecar_secrets_url.to_string(),
        secret_store_name: STORE.to_string(),
        fetch_backoff_ms: 1,
        ..Config::default()
    }
}

/// Address nothing is listening on, so connecting to it is refused.
pub async fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// TCP listener that accepts and immediately drops every connection.
/// Returns its base URL and a counter of accepted connections.
pub async fn hang_up_server() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));

    let counter = accepted.clone();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            drop(stream);
        }
    });

    (format!("http://{}/v1.0/secrets", addr), accepted)
}

/// TCP listener that answers every request with a 200 whose body stops
/// well short of its `Content-Length`, then closes the connection.
/// Returns its base URL and a counter of accepted connections.
pub async fn truncated_body_server() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));

    let counter = accepted.clone();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);

            // Drain the request head so closing sends FIN rather than RST.
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let _ = stream
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"sec")
                .await;
            let _ = stream.shutdown().await;
        }
    });

    (format!("http://{}/v1.0/secrets", addr), accepted)
}
