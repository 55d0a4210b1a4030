//! Filter conditions, groups and the filter accumulator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AutotaskError, Result};
use crate::query::operator::{Conjunction, Existence, Operator};

/// A field referenced by a filter condition.
///
/// Plain strings convert into standard entity fields. Use [`Field::udf`] for
/// tenant-specific user-defined fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    name: String,
    udf: bool,
}

impl Field {
    /// A standard entity field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            udf: false,
        }
    }

    /// A user-defined field.
    pub fn udf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            udf: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_udf(&self) -> bool {
        self.udf
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Field::new(name)
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Field::new(name)
    }
}

impl From<&String> for Field {
    fn from(name: &String) -> Self {
        Field::new(name.as_str())
    }
}

/// A leaf comparison applied to one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FilterCondition {
    pub field: String,
    pub op: Operator,
    /// Absent for existence checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Set only for user-defined fields.
    #[serde(default, skip_serializing_if = "is_false")]
    pub udf: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A nested boolean combination of filter nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FilterGroup {
    #[serde(rename = "op")]
    pub conjunction: Conjunction,
    pub items: Vec<FilterNode>,
}

/// One element of a filter list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum FilterNode {
    Condition(FilterCondition),
    Group(FilterGroup),
}

impl FilterNode {
    /// The condition, if this node is a leaf.
    pub fn as_condition(&self) -> Option<&FilterCondition> {
        match self {
            FilterNode::Condition(c) => Some(c),
            FilterNode::Group(_) => None,
        }
    }

    /// The group, if this node is nested.
    pub fn as_group(&self) -> Option<&FilterGroup> {
        match self {
            FilterNode::Group(g) => Some(g),
            FilterNode::Condition(_) => None,
        }
    }
}

/// An explicit, already-validated filter clause.
///
/// Conditions are validated when constructed, so pushing a clause onto a
/// [`Filter`] cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Binary comparison with a value.
    Condition {
        field: Field,
        operator: Operator,
        value: Value,
    },
    /// Existence check without a value.
    Unary { field: Field, operator: Existence },
    /// Nested group built from its own filter.
    Group {
        conjunction: Conjunction,
        filter: Filter,
    },
}

impl Clause {
    /// A comparison clause. A unary `operator` yields [`Clause::Unary`] and
    /// `value` is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::InvalidArgument`] if a binary `operator` is
    /// given a null value.
    pub fn condition(
        field: impl Into<Field>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Result<Self> {
        let field = field.into();
        match operator {
            Operator::Exist => Ok(Clause::Unary {
                field,
                operator: Existence::Exist,
            }),
            Operator::NotExist => Ok(Clause::Unary {
                field,
                operator: Existence::NotExist,
            }),
            operator => match value.into() {
                Value::Null => Err(AutotaskError::InvalidArgument(format!(
                    "operator '{operator}' on '{}' requires a value",
                    field.name
                ))),
                value => Ok(Clause::Condition {
                    field,
                    operator,
                    value,
                }),
            },
        }
    }

    pub fn exists(field: impl Into<Field>) -> Self {
        Clause::Unary {
            field: field.into(),
            operator: Existence::Exist,
        }
    }

    pub fn not_exists(field: impl Into<Field>) -> Self {
        Clause::Unary {
            field: field.into(),
            operator: Existence::NotExist,
        }
    }

    pub fn group(conjunction: Conjunction, filter: Filter) -> Self {
        Clause::Group {
            conjunction,
            filter,
        }
    }
}

impl From<Clause> for FilterNode {
    fn from(clause: Clause) -> Self {
        match clause {
            Clause::Condition {
                field,
                operator,
                value,
            } => FilterNode::Condition(FilterCondition {
                field: field.name,
                op: operator,
                value: Some(value),
                udf: field.udf,
            }),
            Clause::Unary { field, operator } => FilterNode::Condition(FilterCondition {
                field: field.name,
                op: operator.into(),
                value: None,
                udf: field.udf,
            }),
            Clause::Group {
                conjunction,
                filter,
            } => FilterNode::Group(FilterGroup {
                conjunction,
                items: filter.into_items(),
            }),
        }
    }
}

/// Ordered accumulator of filter nodes.
///
/// Used both for the top level of a query and for nested groups. It holds
/// no transport, so groups are built on a fresh, independent `Filter`.
///
/// String-typed methods validate their operator and conjunction before
/// touching the list; on error the filter is left exactly as it was.
///
/// # Example
///
/// ```
/// use autotask::{Field, Filter};
///
/// # fn main() -> autotask::Result<()> {
/// let mut filter = Filter::new();
/// filter
///     .where_("status", "noteq", 5)?
///     .where_unary("dueDateTime", "exist")?
///     .where_(Field::udf("Region"), "eq", "North")?
///     .or_where_group(|g| g.where_("priority", "eq", 1)?.or_where("priority", "eq", 2))?;
/// assert_eq!(filter.len(), 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    items: Vec<FilterNode>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an already-validated clause.
    pub fn push(&mut self, clause: Clause) -> &mut Self {
        self.items.push(clause.into());
        self
    }

    /// Append a comparison condition.
    ///
    /// If `operator` is `exist` or `notexist` in any case the condition is
    /// an existence check and `value` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::InvalidOperator`](crate::AutotaskError::InvalidOperator)
    /// if `operator` is not recognized, or
    /// [`AutotaskError::InvalidArgument`](crate::AutotaskError::InvalidArgument)
    /// if a binary operator is given a null value.
    pub fn where_(
        &mut self,
        field: impl Into<Field>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        let operator = Operator::parse(operator)?;
        Ok(self.push(Clause::condition(field, operator, value)?))
    }

    /// Append a comparison condition joined with OR.
    ///
    /// Leaf conditions carry no conjunction on the wire, so this appends the
    /// same condition as [`Filter::where_`]. The conjunction only takes effect
    /// for groups.
    pub fn or_where(
        &mut self,
        field: impl Into<Field>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.where_with("OR", field, operator, value)
    }

    /// Append a comparison condition with an explicit conjunction string.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::InvalidConjunction`](crate::AutotaskError::InvalidConjunction)
    /// or [`AutotaskError::InvalidOperator`](crate::AutotaskError::InvalidOperator).
    pub fn where_with(
        &mut self,
        conjunction: &str,
        field: impl Into<Field>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        conjunction.parse::<Conjunction>()?;
        self.where_(field, operator, value)
    }

    /// Append an existence check.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::InvalidOperator`](crate::AutotaskError::InvalidOperator)
    /// unless `operator` is `exist` or `notexist` (any case).
    pub fn where_unary(&mut self, field: impl Into<Field>, operator: &str) -> Result<&mut Self> {
        let operator = unary_operator(operator)?;
        Ok(self.push(Clause::Unary {
            field: field.into(),
            operator,
        }))
    }

    /// Append an existence check joined with OR.
    pub fn or_where_unary(&mut self, field: impl Into<Field>, operator: &str) -> Result<&mut Self> {
        self.where_unary(field, operator)
    }

    /// Append an AND group built by `build` on a fresh filter.
    ///
    /// Errors raised inside `build` propagate and nothing is appended.
    pub fn where_group<F>(&mut self, build: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Filter) -> Result<&mut Filter>,
    {
        self.push_group(Conjunction::And, build)
    }

    /// Append an OR group built by `build` on a fresh filter.
    pub fn or_where_group<F>(&mut self, build: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Filter) -> Result<&mut Filter>,
    {
        self.push_group(Conjunction::Or, build)
    }

    /// Append a group with an explicit conjunction string.
    ///
    /// # Errors
    ///
    /// Returns [`AutotaskError::InvalidConjunction`](crate::AutotaskError::InvalidConjunction)
    /// before `build` is invoked if the conjunction is not AND or OR.
    pub fn group_with<F>(&mut self, conjunction: &str, build: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Filter) -> Result<&mut Filter>,
    {
        let conjunction = conjunction.parse()?;
        self.push_group(conjunction, build)
    }

    fn push_group<F>(&mut self, conjunction: Conjunction, build: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Filter) -> Result<&mut Filter>,
    {
        let mut nested = Filter::new();
        build(&mut nested)?;
        Ok(self.push(Clause::group(conjunction, nested)))
    }

    /// The accumulated nodes, in insertion order.
    pub fn items(&self) -> &[FilterNode] {
        &self.items
    }

    pub fn into_items(self) -> Vec<FilterNode> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn unary_operator(operator: &str) -> Result<Existence> {
    Operator::parse_unary(operator)
        .ok_or_else(|| AutotaskError::InvalidOperator(operator.to_string()))
}
