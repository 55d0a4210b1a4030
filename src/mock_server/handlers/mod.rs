//! HTTP request handlers for the mock server.

pub mod entities;
pub mod query;
pub mod zone;

pub use entities::*;
pub use query::*;
pub use zone::*;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::mock_server::state::MockState;

/// Build an Autotask-style `{"errors": [...]}` response.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "errors": [message.into()] }))).into_response()
}

/// Reject requests whose auth headers don't match the required credentials.
pub(crate) fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(expected) = &state.required_credentials else {
        return Ok(());
    };

    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let valid = header("UserName") == Some(expected.username.as_str())
        && header("Secret") == Some(expected.secret.as_str())
        && header("ApiIntegrationCode") == Some(expected.integration_code.as_str());

    if valid {
        Ok(())
    } else {
        Err(error_response(
            StatusCode::UNAUTHORIZED,
            "Invalid credentials or integration code",
        ))
    }
}

/// Reject requests for endpoints with no registered records.
pub(crate) fn require_entity(state: &MockState, entity: &str) -> Result<(), Response> {
    if state.has_entity(entity) {
        Ok(())
    } else {
        Err(error_response(
            StatusCode::NOT_FOUND,
            format!("Entity '{entity}' is not supported"),
        ))
    }
}
