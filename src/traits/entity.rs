//! Entity trait naming an Autotask resource endpoint.

use serde::de::DeserializeOwned;

use crate::query::QueryBuilder;

/// A CRUD-addressable Autotask resource type.
///
/// # Example
///
/// ```ignore
/// use autotask::{AutotaskClient, Entity, Ticket};
///
/// let client = AutotaskClient::from_env()?;
/// let mut query = Ticket::query();
/// query.where_("status", "eq", 1)?;
/// let open = query.execute(&client).await?;
/// ```
pub trait Entity: DeserializeOwned + Send + Sync + 'static {
    /// Endpoint path segment, e.g. `"Tickets"`.
    const PATH: &'static str;

    /// Singular display name, e.g. `"Ticket"`.
    const NAME: &'static str;

    /// Start a query against this entity's endpoint.
    fn query() -> QueryBuilder<Self> {
        QueryBuilder::new()
    }
}
