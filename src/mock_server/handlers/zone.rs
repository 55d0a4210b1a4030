//! Zone lookup and health handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::error_response;
use crate::mock_server::state::MockState;
use crate::ZoneInformation;

/// Query parameters for the zone lookup.
#[derive(Debug, Default, Deserialize)]
pub struct ZoneQuery {
    pub user: Option<String>,
}

/// GET /zoneInformation?user=...
///
/// Without a configured zone, the server points users back at itself.
pub async fn zone_information(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ZoneQuery>,
) -> Response {
    if query.user.as_deref().map_or(true, str::is_empty) {
        return error_response(StatusCode::BAD_REQUEST, "The user parameter is required");
    }

    let state = state.read().await;
    let zone = state.zone.clone().unwrap_or_else(|| ZoneInformation {
        zone_name: Some("Mock Zone".to_string()),
        url: format!("{}/", state.base_url),
        web_url: Some(state.base_url.clone()),
        ci: Some(0),
    });

    (StatusCode::OK, Json(zone)).into_response()
}

/// GET /health
pub async fn health_check() -> &'static str {
    "ok"
}
