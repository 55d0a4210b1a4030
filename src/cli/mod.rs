//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the autotask binary.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::error::{AutotaskError, Result};
use crate::query::{Field, QueryBuilder};

/// Autotask API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "autotask", about = "Autotask PSA API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests and query payloads to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: EntityType,

        /// The numeric entity ID.
        id: i64,
    },

    /// Query entities with filters.
    Query {
        /// The type of entity to query.
        entity: EntityType,

        #[command(flatten)]
        filters: FilterArgs,

        /// Page size (1-500).
        #[arg(long)]
        limit: Option<u32>,

        /// Follow pagination and return every matching record.
        #[arg(long, default_value = "false")]
        all: bool,
    },

    /// Count entities matching filters.
    Count {
        /// The type of entity to count.
        entity: EntityType,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Print the JSON Schema of the query payload.
    Schema,
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityType {
    /// A service ticket.
    #[value(alias = "tickets")]
    Ticket,
    /// A customer, prospect or vendor company.
    #[value(alias = "companies")]
    Company,
    /// A person at a company.
    #[value(alias = "contacts")]
    Contact,
    /// An Autotask user.
    #[value(alias = "resources")]
    Resource,
}

/// Filter flags shared by `query` and `count`.
///
/// Each expression has the form `FIELD:OP[:VALUE]`. The value may itself
/// contain colons.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Condition on a standard field, ANDed with the others.
    #[arg(long = "filter", value_name = "FIELD:OP[:VALUE]")]
    pub filters: Vec<String>,

    /// Condition placed in a single OR group with the other --or-filter flags.
    #[arg(long = "or-filter", value_name = "FIELD:OP[:VALUE]")]
    pub or_filters: Vec<String>,

    /// Condition on a user-defined field.
    #[arg(long = "udf-filter", value_name = "FIELD:OP[:VALUE]")]
    pub udf_filters: Vec<String>,
}

/// One parsed `FIELD:OP[:VALUE]` expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpr {
    pub field: String,
    pub operator: String,
    pub value: Option<String>,
}

impl FilterExpr {
    /// Parse a `FIELD:OP[:VALUE]` expression.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::InvalidArgument`] if the field or operator is empty.
    pub fn parse(expr: &str) -> Result<Self> {
        let mut parts = expr.splitn(3, ':');
        let field = parts.next().unwrap_or_default().trim();
        let operator = parts.next().unwrap_or_default().trim();

        if field.is_empty() || operator.is_empty() {
            return Err(AutotaskError::InvalidArgument(format!(
                "filter '{expr}' must look like FIELD:OP[:VALUE]"
            )));
        }

        Ok(Self {
            field: field.to_string(),
            operator: operator.to_string(),
            value: parts.next().map(str::to_string),
        })
    }
}

impl FilterArgs {
    /// Whether no filter flags were given.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.or_filters.is_empty() && self.udf_filters.is_empty()
    }

    /// Add the parsed filters to `query`.
    ///
    /// With no flags at all, a match-everything `id gte 0` condition is
    /// added since the query endpoint rejects an empty filter.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed expressions, unknown operators, or a
    /// binary operator given without a value.
    pub fn apply<T>(&self, query: &mut QueryBuilder<T>) -> Result<()> {
        if self.is_empty() {
            query.where_("id", "gte", 0)?;
            return Ok(());
        }

        for expr in &self.filters {
            add_expr(query, FilterExpr::parse(expr)?, |name| Field::new(name))?;
        }

        for expr in &self.udf_filters {
            add_expr(query, FilterExpr::parse(expr)?, |name| Field::udf(name))?;
        }

        if !self.or_filters.is_empty() {
            let exprs = self
                .or_filters
                .iter()
                .map(|e| FilterExpr::parse(e))
                .collect::<Result<Vec<_>>>()?;

            query.or_where_group(|group| {
                for expr in exprs {
                    match expr.value {
                        Some(value) => group.or_where(expr.field, &expr.operator, value)?,
                        None => group.or_where_unary(expr.field, &expr.operator)?,
                    };
                }
                Ok(group)
            })?;
        }

        Ok(())
    }
}

fn add_expr<T>(
    query: &mut QueryBuilder<T>,
    expr: FilterExpr,
    field: fn(String) -> Field,
) -> Result<()> {
    match expr.value {
        Some(value) => query.where_(field(expr.field), &expr.operator, value)?,
        None => query.where_unary(field(expr.field), &expr.operator)?,
    };
    Ok(())
}
