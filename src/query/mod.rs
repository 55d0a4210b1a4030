//! Filter expressions for the `<Entity>/query` endpoint.
//!
//! A query is a list of filter nodes plus an optional page size, sent as a
//! JSON string in the `search` query parameter:
//!
//! ```json
//! {"filter":[{"field":"status","op":"noteq","value":5},
//!            {"op":"OR","items":[{"field":"priority","op":"eq","value":1},
//!                                {"field":"priority","op":"eq","value":2}]}],
//!  "MaxRecords":50}
//! ```
//!
//! [`Filter`] accumulates nodes and is shared by top-level queries and
//! nested groups. [`QueryBuilder`] wraps a filter for one entity type and
//! runs it through an [`AutotaskClient`](crate::AutotaskClient).

mod builder;
mod filter;
mod operator;

pub use builder::{Query, QueryBuilder, MAX_RECORDS};
pub use filter::{Clause, Field, Filter, FilterCondition, FilterGroup, FilterNode};
pub use operator::{Conjunction, Existence, Operator};
