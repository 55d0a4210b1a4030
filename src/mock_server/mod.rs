//! Mock Autotask API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! Autotask query endpoints for integration and end-to-end testing. Unlike
//! wiremock which matches requests per-test, this server evaluates the
//! `search` filter against stored records, so query-building behavior can
//! be checked end to end.
//!
//! # Example
//!
//! ```ignore
//! use autotask::mock_server::{Fixtures, MockServer};
//! use autotask::{AutotaskClient, Entity, Ticket};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = AutotaskClient::new(Fixtures::credentials(), server.url()).unwrap();
//!
//!     let mut query = Ticket::query();
//!     query.where_("status", "eq", 1).unwrap();
//!     let page = query.execute(&client).await.unwrap();
//!     assert!(!page.is_empty());
//!
//!     server.shutdown().await;
//! }
//! ```

mod evaluate;
mod fixtures;
mod handlers;
mod server;
mod state;

pub use evaluate::matches;
pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
