//! A mock RIPE Atlas API server.
//!
//! Serves canned JSON for the four endpoints the netmet tools touch and
//! records every request it receives, so tests can assert both on what
//! the client got back and on what it actually sent.

use axum::*;
use std::sync::{Arc, Mutex};

/// One request observed by the mock server.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    /// HTTP method.
    pub method: String,

    /// Path and query as received.
    pub path_and_query: String,

    /// The request body, empty for GETs.
    pub body: String,
}

#[derive(Debug)]
struct MockState {
    probes: Mutex<serde_json::Value>,
    description: Mutex<serde_json::Value>,
    results: Mutex<serde_json::Value>,
    submit_response: Mutex<serde_json::Value>,
    seen: Mutex<Vec<SeenRequest>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            probes: Mutex::new(serde_json::json!({ "results": [] })),
            description: Mutex::new(serde_json::json!({})),
            results: Mutex::new(serde_json::json!([])),
            submit_response: Mutex::new(serde_json::json!({})),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl MockState {
    fn record(&self, method: &str, uri: &http::Uri, body: String) {
        self.seen.lock().unwrap().push(SeenRequest {
            method: method.into(),
            path_and_query: uri
                .path_and_query()
                .map(|pq| pq.to_string())
                .unwrap_or_else(|| uri.path().to_string()),
            body,
        });
    }
}

/// A mock Atlas API server bound to a random localhost port.
///
/// The tokio runtime serving it lives on its own thread; dropping the
/// server shuts it down and joins that thread.
pub struct MockAtlasSrv {
    state: Arc<MockState>,
    addr: std::net::SocketAddr,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
    t_join: Option<std::thread::JoinHandle<()>>,
}

impl Drop for MockAtlasSrv {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(t_join) = self.t_join.take() {
            let _ = t_join.join();
        }
    }
}

impl MockAtlasSrv {
    /// Spawn a mock server on a random localhost port.
    pub fn new() -> std::io::Result<Self> {
        let state = Arc::new(MockState::default());

        let (s_ready, r_ready) = tokio::sync::oneshot::channel();
        let (s_shutdown, r_shutdown) = tokio::sync::oneshot::channel();

        let t_state = state.clone();
        let t_join = std::thread::spawn(move || {
            tokio_thread(t_state, s_ready, r_shutdown)
        });

        let addr = match r_ready.blocking_recv() {
            Ok(Ok(addr)) => addr,
            Ok(Err(err)) => return Err(err),
            Err(_) => return Err(std::io::Error::other("failed to bind server")),
        };

        Ok(Self {
            state,
            addr,
            shutdown: Some(s_shutdown),
            t_join: Some(t_join),
        })
    }

    /// The base URL of the mock server.
    pub fn server_url(&self) -> url::Url {
        url::Url::parse(&format!("http://{}/", self.addr))
            .expect("failed to build server url")
    }

    /// The result URL the mock serves for a measurement id, suitable
    /// for embedding in a canned description.
    pub fn result_url(&self, measurement_id: u64) -> url::Url {
        url::Url::parse(&format!(
            "http://{}/api/v2/measurements/{measurement_id}/results/",
            self.addr,
        ))
        .expect("failed to build result url")
    }

    /// Set the probe listing response.
    pub fn set_probes(&self, value: serde_json::Value) {
        *self.state.probes.lock().unwrap() = value;
    }

    /// Set the measurement description response.
    pub fn set_description(&self, value: serde_json::Value) {
        *self.state.description.lock().unwrap() = value;
    }

    /// Set the measurement results response.
    pub fn set_results(&self, value: serde_json::Value) {
        *self.state.results.lock().unwrap() = value;
    }

    /// Set the submission response.
    pub fn set_submit_response(&self, value: serde_json::Value) {
        *self.state.submit_response.lock().unwrap() = value;
    }

    /// Every request the server has seen, in arrival order.
    pub fn seen(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().unwrap().clone()
    }
}

fn tokio_thread(
    state: Arc<MockState>,
    ready: tokio::sync::oneshot::Sender<std::io::Result<std::net::SocketAddr>>,
    shutdown: tokio::sync::oneshot::Receiver<()>,
) {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
        .block_on(async move {
            let app: Router = Router::new()
                .route("/api/v2/probes/", routing::get(handle_probes))
                .route(
                    "/api/v2/measurements/:id/",
                    routing::get(handle_description),
                )
                .route(
                    "/api/v2/measurements/:id/results/",
                    routing::get(handle_results),
                )
                .route("/api/v2/measurements/", routing::post(handle_submit))
                .with_state(state);

            let listener = match tokio::net::TcpListener::bind(
                (std::net::Ipv4Addr::LOCALHOST, 0),
            )
            .await
            {
                Ok(listener) => listener,
                Err(err) => {
                    let _ = ready.send(Err(err));
                    return;
                }
            };

            let addr = match listener.local_addr() {
                Ok(addr) => addr,
                Err(err) => {
                    let _ = ready.send(Err(err));
                    return;
                }
            };

            if ready.send(Ok(addr)).is_err() {
                return;
            }

            let _ = serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown.await;
                })
                .await;
        });
}

async fn handle_probes(
    extract::State(state): extract::State<Arc<MockState>>,
    uri: http::Uri,
) -> Json<serde_json::Value> {
    state.record("GET", &uri, String::new());
    Json(state.probes.lock().unwrap().clone())
}

async fn handle_description(
    extract::State(state): extract::State<Arc<MockState>>,
    uri: http::Uri,
) -> Json<serde_json::Value> {
    state.record("GET", &uri, String::new());
    Json(state.description.lock().unwrap().clone())
}

async fn handle_results(
    extract::State(state): extract::State<Arc<MockState>>,
    uri: http::Uri,
) -> Json<serde_json::Value> {
    state.record("GET", &uri, String::new());
    Json(state.results.lock().unwrap().clone())
}

async fn handle_submit(
    extract::State(state): extract::State<Arc<MockState>>,
    uri: http::Uri,
    body: String,
) -> Json<serde_json::Value> {
    state.record("POST", &uri, body);
    Json(state.submit_response.lock().unwrap().clone())
}
