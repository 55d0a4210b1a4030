//! Query and count endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query as QueryParams, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;

use super::{authorize, error_response, require_entity};
use crate::mock_server::state::MockState;
use crate::query::{Query, MAX_RECORDS};

/// Query parameters accepted by the query endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
    /// Records to skip; only present on server-issued `nextPageUrl`s.
    pub offset: Option<usize>,
}

/// GET /{entity}/query?search=...
pub async fn query_entities(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(entity): Path<String>,
    QueryParams(params): QueryParams<SearchQuery>,
) -> Response {
    let state = state.read().await;

    let query = match prepare(&state, &headers, &entity, params.search.as_deref()) {
        Ok(query) => query,
        Err(rejection) => return rejection,
    };

    let page_size = match query.max_records {
        Some(n) if n == 0 || n > MAX_RECORDS => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("MaxRecords must be between 1 and {MAX_RECORDS}"),
            )
        }
        Some(n) => n as usize,
        None => MAX_RECORDS as usize,
    };

    let matched = state.query(&entity, &query.filter);
    let offset = params.offset.unwrap_or(0).min(matched.len());
    let end = (offset + page_size).min(matched.len());

    let items: Vec<Value> = matched[offset..end]
        .iter()
        .map(|record| project(record, &query.include_fields))
        .collect();

    let search = params.search.unwrap_or_default();
    let page_url = |offset: usize| {
        format!(
            "{}/{}/query?search={}&offset={}",
            state.base_url,
            entity,
            urlencoding::encode(&search),
            offset
        )
    };
    let next_page_url = (end < matched.len()).then(|| page_url(end));
    let prev_page_url = (offset > 0).then(|| page_url(offset.saturating_sub(page_size)));

    tracing::debug!(%entity, matched = matched.len(), offset, returned = items.len(), "mock query");

    (
        StatusCode::OK,
        Json(json!({
            "items": items,
            "pageDetails": {
                "count": items.len(),
                "requestCount": page_size,
                "prevPageUrl": prev_page_url,
                "nextPageUrl": next_page_url,
            }
        })),
    )
        .into_response()
}

/// GET /{entity}/query/count?search=...
pub async fn count_entities(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(entity): Path<String>,
    QueryParams(params): QueryParams<SearchQuery>,
) -> Response {
    let state = state.read().await;

    let query = match prepare(&state, &headers, &entity, params.search.as_deref()) {
        Ok(query) => query,
        Err(rejection) => return rejection,
    };

    let count = state.query(&entity, &query.filter).len();
    (StatusCode::OK, Json(json!({ "queryCount": count }))).into_response()
}

/// Authorize the request and parse its `search` payload.
fn prepare(
    state: &MockState,
    headers: &HeaderMap,
    entity: &str,
    search: Option<&str>,
) -> Result<Query, Response> {
    authorize(state, headers)?;
    require_entity(state, entity)?;

    let search = search
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "The search parameter is required"))?;
    let query = Query::from_search(search).map_err(|e| {
        error_response(StatusCode::BAD_REQUEST, format!("Invalid search payload: {e}"))
    })?;

    if query.filter.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "A filter with at least one condition is required",
        ));
    }

    Ok(query)
}

/// Keep only the requested fields (and `id`) when `IncludeFields` is set.
fn project(record: &Value, include_fields: &[String]) -> Value {
    if include_fields.is_empty() {
        return record.clone();
    }

    let Some(object) = record.as_object() else {
        return record.clone();
    };

    let projected: Map<String, Value> = object
        .iter()
        .filter(|(key, _)| {
            key.as_str() == "id" || include_fields.iter().any(|f| f.eq_ignore_ascii_case(key))
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Value::Object(projected)
}
