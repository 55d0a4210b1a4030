//! Mock server state management.
//!
//! Provides the in-memory record store for the mock Autotask API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::mock_server::evaluate::matches;
use crate::query::FilterNode;
use crate::{Credentials, Entity, ZoneInformation};

/// Shared state for the mock server.
///
/// Records are raw JSON so the server returns exactly what was stored.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Records per entity endpoint (lowercased, e.g. "tickets"), ordered by ID.
    pub records: HashMap<String, BTreeMap<i64, Value>>,

    /// If set, requests must carry these credentials.
    pub required_credentials: Option<Credentials>,

    /// Zone returned by `zoneInformation`. Defaults to the server itself.
    pub zone: Option<ZoneInformation>,

    /// Public base URL of the running server, used for `nextPageUrl`.
    pub base_url: String,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a raw record under an entity endpoint. The record must carry a
    /// numeric `id`; records without one are ignored.
    pub fn with_record(mut self, entity: &str, record: Value) -> Self {
        self.insert(entity, record);
        self
    }

    /// Add a typed entity.
    ///
    /// # Panics
    ///
    /// Panics if the entity does not serialize to JSON.
    pub fn with_entity<T: Entity + Serialize>(mut self, item: &T) -> Self {
        let record = serde_json::to_value(item).expect("Failed to serialize fixture entity");
        self.insert(T::PATH, record);
        self
    }

    /// Register an endpoint with no records, so queries return empty pages
    /// rather than 404.
    pub fn with_empty_entity(mut self, entity: &str) -> Self {
        self.records.entry(entity.to_ascii_lowercase()).or_default();
        self
    }

    /// Set the required credentials.
    pub fn with_required_credentials(mut self, credentials: Credentials) -> Self {
        self.required_credentials = Some(credentials);
        self
    }

    /// Set the zone returned by `zoneInformation`.
    pub fn with_zone(mut self, zone: ZoneInformation) -> Self {
        self.zone = Some(zone);
        self
    }

    fn insert(&mut self, entity: &str, record: Value) {
        if let Some(id) = record.get("id").and_then(Value::as_i64) {
            self.records
                .entry(entity.to_ascii_lowercase())
                .or_default()
                .insert(id, record);
        }
    }

    /// Whether an endpoint exists.
    pub fn has_entity(&self, entity: &str) -> bool {
        self.records.contains_key(&entity.to_ascii_lowercase())
    }

    /// Get a record by endpoint and ID.
    pub fn get_record(&self, entity: &str, id: i64) -> Option<&Value> {
        self.records.get(&entity.to_ascii_lowercase())?.get(&id)
    }

    /// Records of an endpoint matching `filter`, in ID order.
    pub fn query(&self, entity: &str, filter: &[FilterNode]) -> Vec<&Value> {
        self.records
            .get(&entity.to_ascii_lowercase())
            .map(|records| {
                records
                    .values()
                    .filter(|record| matches(filter, record))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;
    use crate::query::Filter;
    use crate::Ticket;
    use serde_json::json;

    #[test]
    fn test_state_add_and_get_record() {
        let state = MockState::new().with_record("Tickets", json!({"id": 1, "title": "One"}));

        assert!(state.has_entity("tickets"));
        let record = state.get_record("TICKETS", 1);
        assert_eq!(record.unwrap()["title"], "One");
        assert!(state.get_record("Tickets", 2).is_none());
    }

    #[test]
    fn test_state_ignores_records_without_id() {
        let state = MockState::new().with_record("Tickets", json!({"title": "No id"}));
        assert!(!state.has_entity("Tickets"));
    }

    #[test]
    fn test_state_with_entity_stores_serialized_record() {
        let ticket = Fixtures::minimal_ticket(7, "Typed");
        let state = MockState::new().with_entity(&ticket);

        let record = state.get_record(Ticket::PATH, 7).unwrap();
        assert_eq!(record["title"], "Typed");
        assert_eq!(record["ticketNumber"], "T20240115.0007");
    }

    #[test]
    fn test_state_query_filters_and_orders_by_id() {
        let state = MockState::new()
            .with_record("Tickets", json!({"id": 3, "status": 1}))
            .with_record("Tickets", json!({"id": 1, "status": 1}))
            .with_record("Tickets", json!({"id": 2, "status": 5}));

        let mut filter = Filter::new();
        filter.where_("status", "eq", 1).unwrap();

        let ids: Vec<i64> = state
            .query("Tickets", filter.items())
            .iter()
            .filter_map(|r| r["id"].as_i64())
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(state.query("Companies", filter.items()).is_empty());
    }
}
