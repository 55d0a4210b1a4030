//! Query snapshots and the per-entity query builder.

use std::fmt;
use std::marker::PhantomData;

use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::AutotaskClient;
use crate::error::{AutotaskError, Result};
use crate::pagination::{Page, Paginator};
use crate::query::filter::{Clause, Field, Filter, FilterNode};
use crate::traits::Entity;

/// Largest page the query endpoint will return.
pub const MAX_RECORDS: u32 = 500;

/// The body of the `search` parameter sent to `<Entity>/query`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Query {
    /// Filter nodes in evaluation order.
    pub filter: Vec<FilterNode>,

    /// Page size, 1 to 500. Server default when unset.
    #[serde(rename = "MaxRecords", default, skip_serializing_if = "Option::is_none")]
    pub max_records: Option<u32>,

    /// Restrict the returned fields.
    #[serde(rename = "IncludeFields", default, skip_serializing_if = "Vec::is_empty")]
    pub include_fields: Vec<String>,
}

impl Query {
    /// Serialize to the string carried by the `search` parameter.
    pub fn to_search(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a `search` parameter.
    pub fn from_search(search: &str) -> Result<Self> {
        Ok(serde_json::from_str(search)?)
    }

    /// JSON Schema of the `search` payload.
    pub fn schema() -> RootSchema {
        schemars::schema_for!(Query)
    }
}

/// Query-string wrapper for the `search` parameter.
#[derive(Debug, Serialize)]
pub(crate) struct SearchParams<'a> {
    pub search: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountResponse {
    query_count: Option<u64>,
}

/// Builds and runs a query against one entity endpoint.
///
/// The builder only accumulates state; the client is supplied when the
/// query is executed. Validation errors never leave partial state behind.
///
/// # Example
///
/// ```no_run
/// use autotask::{AutotaskClient, Entity, Ticket};
///
/// # async fn example() -> autotask::Result<()> {
/// let client = AutotaskClient::from_env()?;
///
/// let mut query = Ticket::query();
/// query
///     .with_limit(100)?
///     .where_("companyID", "eq", 175)?
///     .or_where_group(|g| g.where_("priority", "eq", 1)?.or_where("priority", "eq", 2))?;
///
/// let page = query.execute(&client).await?;
/// for ticket in &page {
///     println!("{} {}", ticket.ticket_number.as_deref().unwrap_or("-"), ticket.title);
/// }
/// # Ok(())
/// # }
/// ```
pub struct QueryBuilder<T> {
    filter: Filter,
    max_records: Option<u32>,
    include_fields: Vec<String>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for QueryBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("filter", &self.filter)
            .field("max_records", &self.max_records)
            .field("include_fields", &self.include_fields)
            .finish()
    }
}

impl<T> Clone for QueryBuilder<T> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            max_records: self.max_records,
            include_fields: self.include_fields.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> Default for QueryBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QueryBuilder<T> {
    pub fn new() -> Self {
        Self {
            filter: Filter::new(),
            max_records: None,
            include_fields: Vec::new(),
            _entity: PhantomData,
        }
    }

    /// Set the page size.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::InvalidArgument`] unless `1 <= n <= 500`.
    pub fn with_limit(&mut self, n: u32) -> Result<&mut Self> {
        if !(1..=MAX_RECORDS).contains(&n) {
            return Err(AutotaskError::InvalidArgument(format!(
                "record limit must be between 1 and {MAX_RECORDS}, got {n}"
            )));
        }
        self.max_records = Some(n);
        Ok(self)
    }

    /// Only return the named fields.
    pub fn include_fields<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// See [`Filter::push`].
    pub fn push(&mut self, clause: Clause) -> &mut Self {
        self.filter.push(clause);
        self
    }

    /// See [`Filter::where_`].
    pub fn where_(
        &mut self,
        field: impl Into<Field>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.filter.where_(field, operator, value)?;
        Ok(self)
    }

    /// See [`Filter::or_where`].
    pub fn or_where(
        &mut self,
        field: impl Into<Field>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.filter.or_where(field, operator, value)?;
        Ok(self)
    }

    /// See [`Filter::where_with`].
    pub fn where_with(
        &mut self,
        conjunction: &str,
        field: impl Into<Field>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.filter.where_with(conjunction, field, operator, value)?;
        Ok(self)
    }

    /// See [`Filter::where_unary`].
    pub fn where_unary(&mut self, field: impl Into<Field>, operator: &str) -> Result<&mut Self> {
        self.filter.where_unary(field, operator)?;
        Ok(self)
    }

    /// See [`Filter::or_where_unary`].
    pub fn or_where_unary(&mut self, field: impl Into<Field>, operator: &str) -> Result<&mut Self> {
        self.filter.or_where_unary(field, operator)?;
        Ok(self)
    }

    /// See [`Filter::where_group`].
    pub fn where_group<F>(&mut self, build: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Filter) -> Result<&mut Filter>,
    {
        self.filter.where_group(build)?;
        Ok(self)
    }

    /// See [`Filter::or_where_group`].
    pub fn or_where_group<F>(&mut self, build: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Filter) -> Result<&mut Filter>,
    {
        self.filter.or_where_group(build)?;
        Ok(self)
    }

    /// See [`Filter::group_with`].
    pub fn group_with<F>(&mut self, conjunction: &str, build: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Filter) -> Result<&mut Filter>,
    {
        self.filter.group_with(conjunction, build)?;
        Ok(self)
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Snapshot the accumulated query. Builder state is kept.
    pub fn build(&self) -> Query {
        Query {
            filter: self.filter.items().to_vec(),
            max_records: self.max_records,
            include_fields: self.include_fields.clone(),
        }
    }
}

impl<T: Entity> QueryBuilder<T> {
    /// Run the query and return the first page of results.
    ///
    /// # Errors
    ///
    /// Transport errors propagate unchanged. A body without an `items` key
    /// fails with [`AutotaskError::MalformedResponse`].
    #[tracing::instrument(skip(self, client), fields(entity = T::NAME))]
    pub async fn execute(&self, client: &AutotaskClient) -> Result<Page<T>> {
        let body = self.send(client, &format!("{}/query", T::PATH)).await?;
        Page::from_body(body)
    }

    /// Run the query and return a paginator positioned on the first page.
    #[tracing::instrument(skip(self, client), fields(entity = T::NAME))]
    pub async fn paginate(&self, client: &AutotaskClient) -> Result<Paginator<T>> {
        let body = self.send(client, &format!("{}/query", T::PATH)).await?;
        Ok(Paginator::new(Page::from_body(body)?))
    }

    /// Count the records matching the filter.
    #[tracing::instrument(skip(self, client), fields(entity = T::NAME))]
    pub async fn count(&self, client: &AutotaskClient) -> Result<u64> {
        let body = self
            .send(client, &format!("{}/query/count", T::PATH))
            .await?;
        let data: CountResponse = serde_json::from_value(body)?;
        data.query_count
            .ok_or(AutotaskError::MalformedResponse { key: "queryCount" })
    }

    async fn send(&self, client: &AutotaskClient, path: &str) -> Result<Value> {
        let search = self.build().to_search()?;
        tracing::debug!(%search, "sending query");

        let response = client
            .get_with_query(path, &SearchParams { search: &search })
            .await?;
        response.json().await.map_err(AutotaskError::HttpError)
    }
}
