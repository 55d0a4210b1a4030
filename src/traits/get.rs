//! Get trait for fetching single entities.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::AutotaskClient;
use crate::error::{AutotaskError, Result};
use crate::traits::Entity;

/// Fetch a single entity by ID.
///
/// Implemented for every [`Entity`]. The endpoint answers
/// `{"item": {...}}`, with a `null` item when the ID does not exist.
///
/// # Example
///
/// ```ignore
/// use autotask::{AutotaskClient, Company, Get};
///
/// let client = AutotaskClient::from_env()?;
/// let company = Company::get(&client, 175).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::NotFound`] for a `null` item,
    /// [`AutotaskError::MalformedResponse`] when the `item` key is missing,
    /// or the transport error if the request fails.
    async fn get(client: &AutotaskClient, id: Self::Id) -> Result<Self>;
}

#[async_trait]
impl<T: Entity> Get for T {
    type Id = i64;

    #[tracing::instrument(skip(client), fields(entity = T::NAME))]
    async fn get(client: &AutotaskClient, id: i64) -> Result<Self> {
        let path = format!("{}/{id}", T::PATH);
        let response = client.get(&path).await?;
        let mut body: Value = response.json().await.map_err(AutotaskError::HttpError)?;

        match body.get_mut("item").map(Value::take) {
            None => Err(AutotaskError::MalformedResponse { key: "item" }),
            Some(Value::Null) => Err(AutotaskError::NotFound {
                entity_type: T::NAME,
                id: id.to_string(),
            }),
            Some(item) => Ok(serde_json::from_value(item)?),
        }
    }
}
