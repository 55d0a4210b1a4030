//! Trait definitions for Autotask entities.
//!
//! Every entity type implements [`Entity`], which names its endpoint and
//! opens queries. Single-record lookups come from the blanket [`Get`]
//! implementation.

mod entity;
mod get;

pub use entity::Entity;
pub use get::Get;
