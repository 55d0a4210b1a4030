//! Mock Autotask API server.
//!
//! Provides an axum-based HTTP server that simulates the Autotask REST API.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::MockState;

/// A mock Autotask API server for testing.
///
/// The server runs in the background and answers on both `/` and `/V1.0/`,
/// so its URL works as a client base URL and as a zone URL.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Fixtures::default_state()).await
    }

    /// Start a mock server with no records.
    ///
    /// The standard entity endpoints exist but are empty.
    pub async fn start_empty() -> Self {
        Self::with_state(Fixtures::empty_state()).await
    }

    /// Start a mock server with custom state.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_state(mut state: MockState) -> Self {
        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");
        let url = format!("http://{addr}");

        state.base_url = url.clone();
        let shared_state = state.shared();
        let app = create_router(shared_state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url,
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating an `AutotaskClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }
}

/// Create the axum router with all routes.
pub(crate) fn create_router(state: Arc<RwLock<MockState>>) -> Router {
    let api = Router::new()
        .route("/zoneInformation", get(handlers::zone_information))
        .route("/:entity/query", get(handlers::query_entities))
        .route("/:entity/query/count", get(handlers::count_entities))
        .route("/:entity/:id", get(handlers::get_entity));

    Router::new()
        .nest("/V1.0", api.clone())
        .merge(api)
        .route("/health", get(handlers::health_check))
        .with_state(state)
}
