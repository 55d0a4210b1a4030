//! Server-side evaluation of query filters against JSON records.
//!
//! Mirrors how the query endpoint treats a filter list: top-level nodes are
//! ANDed, groups combine their items with their own conjunction, field names
//! and string comparisons ignore case, and numeric strings compare as
//! numbers.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde_json::Value;

use crate::query::{Conjunction, FilterCondition, FilterNode, Operator};

/// Whether `record` satisfies every node of `filter`.
pub fn matches(filter: &[FilterNode], record: &Value) -> bool {
    filter.iter().all(|node| node_matches(node, record))
}

fn node_matches(node: &FilterNode, record: &Value) -> bool {
    match node {
        FilterNode::Condition(condition) => condition_matches(condition, record),
        FilterNode::Group(group) => match group.conjunction {
            Conjunction::And => group.items.iter().all(|n| node_matches(n, record)),
            Conjunction::Or => group.items.iter().any(|n| node_matches(n, record)),
        },
    }
}

fn condition_matches(condition: &FilterCondition, record: &Value) -> bool {
    let actual = field_value(record, &condition.field, condition.udf);

    match condition.op {
        Operator::Exist => actual.is_some(),
        Operator::NotExist => actual.is_none(),
        op => {
            let Some(expected) = condition.value.as_ref() else {
                return false;
            };
            // Missing values fail every comparison, as SQL NULLs do.
            actual.is_some_and(|actual| compare(op, actual, expected))
        }
    }
}

fn compare(op: Operator, actual: &Value, expected: &Value) -> bool {
    match op {
        Operator::Eq => loosely_equal(actual, expected),
        Operator::NotEq => !loosely_equal(actual, expected),
        Operator::Gt => ordering(actual, expected) == Some(Ordering::Greater),
        Operator::Gte => matches!(
            ordering(actual, expected),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Operator::Lt => ordering(actual, expected) == Some(Ordering::Less),
        Operator::Lte => matches!(
            ordering(actual, expected),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Operator::In => candidates(expected).any(|e| loosely_equal(actual, e)),
        Operator::NotIn => !candidates(expected).any(|e| loosely_equal(actual, e)),
        Operator::BeginsWith => lower(actual).starts_with(lower(expected).as_str()),
        Operator::EndsWith => lower(actual).ends_with(lower(expected).as_str()),
        Operator::Contains => lower(actual).contains(lower(expected).as_str()),
        Operator::Exist | Operator::NotExist => false,
    }
}

/// Look up a non-null field value, ignoring case in the field name.
fn field_value<'a>(record: &'a Value, field: &str, udf: bool) -> Option<&'a Value> {
    let value = if udf {
        record
            .get("userDefinedFields")?
            .as_array()?
            .iter()
            .find(|f| {
                f.get("name")
                    .and_then(Value::as_str)
                    .is_some_and(|name| name.eq_ignore_ascii_case(field))
            })?
            .get("value")?
    } else {
        record
            .as_object()?
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(field))
            .map(|(_, value)| value)?
    };

    (!value.is_null()).then_some(value)
}

fn candidates(expected: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match expected {
        Value::Array(values) => Box::new(values.iter()),
        other => Box::new(std::iter::once(other)),
    }
}

fn text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

fn lower(value: &Value) -> String {
    text(value).to_lowercase()
}

fn number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (number(a), number(b)) {
        (Some(x), Some(y)) => x == y,
        _ => text(a).eq_ignore_ascii_case(&text(b)),
    }
}

fn ordering(a: &Value, b: &Value) -> Option<Ordering> {
    match (number(a), number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y),
        // ISO-8601 timestamps order correctly as text.
        _ => Some(lower(a).cmp(&lower(b))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Filter;
    use crate::Field;
    use serde_json::json;

    fn ticket() -> Value {
        json!({
            "id": 7001,
            "title": "Printer offline on 3rd floor",
            "status": 1,
            "priority": 2,
            "dueDateTime": "2024-01-16T17:00:00Z",
            "contactID": null,
            "userDefinedFields": [
                {"name": "Region", "value": "North"},
                {"name": "Legacy ID", "value": null}
            ]
        })
    }

    fn eval(build: impl FnOnce(&mut Filter) -> crate::Result<&mut Filter>) -> bool {
        let mut filter = Filter::new();
        build(&mut filter).unwrap();
        matches(filter.items(), &ticket())
    }

    #[test]
    fn test_comparisons() {
        assert!(eval(|f| f.where_("status", "eq", 1)));
        assert!(eval(|f| f.where_("STATUS", "eq", "1")));
        assert!(eval(|f| f.where_("status", "noteq", 5)));
        assert!(eval(|f| f.where_("priority", "gt", 1)));
        assert!(eval(|f| f.where_("priority", "gte", 2)));
        assert!(!eval(|f| f.where_("priority", "lt", 2)));
        assert!(eval(|f| f.where_("priority", "lte", 2)));
        assert!(eval(|f| f.where_("dueDateTime", "lt", "2024-02-01T00:00:00Z")));
    }

    #[test]
    fn test_membership() {
        assert!(eval(|f| f.where_("status", "in", json!([1, 8]))));
        assert!(!eval(|f| f.where_("status", "notIn", json!([1, 8]))));
        assert!(eval(|f| f.where_("priority", "notIn", json!([1, 3]))));
    }

    #[test]
    fn test_text_operators_ignore_case() {
        assert!(eval(|f| f.where_("title", "beginsWith", "printer")));
        assert!(eval(|f| f.where_("title", "endsWith", "FLOOR")));
        assert!(eval(|f| f.where_("title", "contains", "offline")));
        assert!(!eval(|f| f.where_("title", "contains", "scanner")));
    }

    #[test]
    fn test_existence_treats_null_as_missing() {
        assert!(eval(|f| f.where_unary("dueDateTime", "exist")));
        assert!(eval(|f| f.where_unary("contactID", "notExist")));
        assert!(eval(|f| f.where_unary("completedDate", "NOTEXIST")));
    }

    #[test]
    fn test_user_defined_fields() {
        assert!(eval(|f| f.where_(Field::udf("region"), "eq", "north")));
        assert!(!eval(|f| f.where_("Region", "eq", "North")));
        assert!(eval(|f| f.where_unary(Field::udf("Legacy ID"), "notExist")));
    }

    #[test]
    fn test_groups() {
        assert!(eval(|f| {
            f.where_("status", "eq", 1)?
                .or_where_group(|g| g.where_("priority", "eq", 9)?.or_where("priority", "eq", 2))
        }));
        assert!(!eval(|f| {
            f.where_group(|g| g.where_("priority", "eq", 9)?.where_("priority", "eq", 2))
        }));
    }
}
