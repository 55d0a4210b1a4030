//! Single-entity endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tokio::sync::RwLock;

use super::{authorize, error_response, require_entity};
use crate::mock_server::state::MockState;

/// GET /{entity}/{id}
///
/// Unknown IDs answer `{"item": null}` with status 200, like the real API.
pub async fn get_entity(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path((entity, id)): Path<(String, String)>,
) -> Response {
    let state = state.read().await;

    if let Err(rejection) = authorize(&state, &headers) {
        return rejection;
    }
    if let Err(rejection) = require_entity(&state, &entity) {
        return rejection;
    }

    let id: i64 = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("'{id}' is not a valid id"),
            )
        }
    };

    let item = state.get_record(&entity, id).cloned();
    (StatusCode::OK, Json(json!({ "item": item }))).into_response()
}
