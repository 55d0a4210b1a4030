//! Autotask PSA API client library.
//!
//! A Rust library for querying the Autotask REST API. Each entity type
//! (like [`Ticket`] or [`Company`]) implements [`Entity`], which names its
//! endpoint and opens a [`QueryBuilder`] for the `<Entity>/query`
//! convention.
//!
//! # Quick Start
//!
//! ```no_run
//! use autotask::{AutotaskClient, Company, Entity, Field, Get, Ticket};
//!
//! #[tokio::main]
//! async fn main() -> autotask::Result<()> {
//!     // Create client from environment variables
//!     let client = AutotaskClient::from_env()?;
//!
//!     // Get a company by ID
//!     let company = Company::get(&client, 175).await?;
//!     println!("Company: {}", company.company_name);
//!
//!     // Open tickets for that company, priority 1 or 2
//!     let mut query = Ticket::query();
//!     query
//!         .with_limit(50)?
//!         .where_("companyID", "eq", company.id)?
//!         .where_("status", "noteq", 5)?
//!         .where_(Field::udf("Region"), "eq", "North")?
//!         .or_where_group(|g| g.where_("priority", "eq", 1)?.or_where("priority", "eq", 2))?;
//!
//!     let tickets = query.paginate(&client).await?.collect_all(&client).await?;
//!     println!("Found {} tickets", tickets.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Filters
//!
//! Conditions and groups accumulate in insertion order. Operators are
//! validated against a fixed whitelist (`eq`, `noteq`, `gt`, `gte`, `lt`,
//! `lte`, `in`, `notIn`, `exist`, `notExist`, `beginsWith`, `endsWith`,
//! `contains`); an invalid operator or conjunction is reported before the
//! builder is touched. See [`Filter`] and [`Clause`].
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `AUTOTASK_USERNAME` (required) - API user name
//! - `AUTOTASK_SECRET` (required) - API user secret
//! - `AUTOTASK_INTEGRATION_CODE` (required) - API tracking identifier
//! - `AUTOTASK_API_URL` (optional) - Zone base URL (defaults to
//!   `https://webservices.autotask.net/ATServicesRest/V1.0/`)

pub mod cli;
mod client;
mod error;
#[cfg(feature = "test-server")]
pub mod mock_server;
mod models;
pub mod output;
mod pagination;
mod query;
mod traits;

// Re-export core types
pub use client::{AutotaskClient, Credentials, ZoneInformation};
pub use error::{AutotaskError, Result};
pub use pagination::{Page, PageDetails, Paginator};

// Re-export query building
pub use query::{
    Clause, Conjunction, Existence, Field, Filter, FilterCondition, FilterGroup, FilterNode,
    Operator, Query, QueryBuilder, MAX_RECORDS,
};

// Re-export traits
pub use traits::{Entity, Get};

// Re-export models
pub use models::{
    Company, Contact, Resource, Ticket, UserDefinedField, TICKET_STATUS_COMPLETE,
};
