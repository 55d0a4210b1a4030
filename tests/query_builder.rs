//! Query builder behavior tests.
//!
//! These exercise the public builder API and the wire JSON it produces,
//! without any network traffic.

use autotask::{
    AutotaskError, Clause, Conjunction, Entity, Field, FilterNode, Operator, Query, Ticket,
};
use serde_json::{json, Value};

fn wire(query: &Query) -> Value {
    serde_json::from_str(&query.to_search().unwrap()).unwrap()
}

// ============================================================================
// Limits
// ============================================================================

#[test]
fn test_with_limit_rejects_out_of_range() {
    let mut query = Ticket::query();

    for n in [0, 501, 10_000] {
        let result = query.with_limit(n);
        assert!(
            matches!(result, Err(AutotaskError::InvalidArgument(_))),
            "limit {n} should be rejected"
        );
    }
    assert_eq!(query.build().max_records, None);
}

#[test]
fn test_with_limit_accepts_bounds() {
    let mut query = Ticket::query();

    query.with_limit(1).unwrap();
    assert_eq!(query.build().max_records, Some(1));

    query.with_limit(500).unwrap();
    assert_eq!(query.build().max_records, Some(500));
}

// ============================================================================
// Conditions
// ============================================================================

#[test]
fn test_every_binary_operator_yields_one_condition() {
    for op in Operator::ALL.iter().filter(|op| !op.is_unary()) {
        let mut query = Ticket::query();
        query.where_("name", op.as_str(), "x").unwrap();

        let built = query.build();
        assert_eq!(built.filter.len(), 1);
        let condition = built.filter[0].as_condition().unwrap();
        assert_eq!(condition.field, "name");
        assert_eq!(condition.op, *op);
        assert_eq!(condition.value, Some(json!("x")));
        assert!(!condition.udf);
    }
}

#[test]
fn test_existence_operators_have_no_value_key() {
    for op in ["exist", "EXIST", "notExist", "NOTEXIST", "notexist"] {
        let mut query = Ticket::query();
        query.where_("name", op, "ignored").unwrap();

        let value = wire(&query.build());
        let condition = &value["filter"][0];
        assert_eq!(condition["field"], "name");
        assert!(condition.get("value").is_none(), "{op} must not carry a value");
    }
}

#[test]
fn test_existence_operators_normalize_spelling() {
    let mut query = Ticket::query();
    query
        .where_unary("dueDateTime", "EXIST")
        .unwrap()
        .where_unary("completedDate", "notexist")
        .unwrap();

    assert_eq!(
        wire(&query.build())["filter"],
        json!([
            {"field": "dueDateTime", "op": "exist"},
            {"field": "completedDate", "op": "notExist"}
        ])
    );
}

#[test]
fn test_binary_operators_are_case_sensitive() {
    let mut query = Ticket::query();

    let result = query.where_("status", "EQ", 1);
    assert!(matches!(result, Err(AutotaskError::InvalidOperator(op)) if op == "EQ"));

    let result = query.where_("title", "beginswith", "Printer");
    assert!(matches!(result, Err(AutotaskError::InvalidOperator(_))));
    assert!(query.filter().is_empty());
}

#[test]
fn test_invalid_operator_leaves_state_unchanged() {
    let mut query = Ticket::query();
    query.with_limit(25).unwrap().where_("status", "eq", 1).unwrap();
    let before = query.build();

    let result = query.where_("name", "bogus_op", "y");
    assert!(matches!(result, Err(AutotaskError::InvalidOperator(_))));
    assert_eq!(query.build(), before);

    let result = query.where_unary("name", "eq");
    assert!(matches!(result, Err(AutotaskError::InvalidOperator(_))));
    assert_eq!(query.build(), before);
}

#[test]
fn test_invalid_conjunction_leaves_state_unchanged() {
    let mut query = Ticket::query();
    query.where_("status", "eq", 1).unwrap();
    let before = query.build();

    let result = query.where_with("XOR", "priority", "eq", 2);
    assert!(matches!(result, Err(AutotaskError::InvalidConjunction(_))));

    let mut called = false;
    let result = query.group_with("nand", |g| {
        called = true;
        g.where_("priority", "eq", 2)
    });
    assert!(matches!(result, Err(AutotaskError::InvalidConjunction(_))));
    assert!(!called);
    assert_eq!(query.build(), before);
}

#[test]
fn test_or_where_on_leaf_appends_plain_condition() {
    let mut with_or = Ticket::query();
    with_or.where_("status", "eq", 1).unwrap().or_where("status", "eq", 8).unwrap();

    let mut with_and = Ticket::query();
    with_and.where_("status", "eq", 1).unwrap().where_("status", "eq", 8).unwrap();

    assert_eq!(with_or.build(), with_and.build());
}

#[test]
fn test_binary_operator_without_value_leaves_state_unchanged() {
    let mut query = Ticket::query();
    query.where_("status", "eq", 1).unwrap();
    let before = query.build();

    let result = query.where_("title", "eq", None::<String>);
    assert!(matches!(result, Err(AutotaskError::InvalidArgument(_))));

    let result = query.or_where("status", "gt", Value::Null);
    assert!(matches!(result, Err(AutotaskError::InvalidArgument(_))));

    let result = query.where_group(|g| g.where_("a", "eq", 1)?.where_("b", "lte", Value::Null));
    assert!(matches!(result, Err(AutotaskError::InvalidArgument(_))));

    assert_eq!(query.build(), before);
    assert_eq!(
        wire(&query.build())["filter"],
        json!([{"field": "status", "op": "eq", "value": 1}])
    );
}

#[test]
fn test_udf_condition_carries_flag() {
    let mut query = Ticket::query();
    query
        .where_(Field::udf("Region"), "eq", "North")
        .unwrap()
        .where_unary(Field::udf("Legacy ID"), "notExist")
        .unwrap();

    assert_eq!(
        wire(&query.build())["filter"],
        json!([
            {"field": "Region", "op": "eq", "value": "North", "udf": true},
            {"field": "Legacy ID", "op": "notExist", "udf": true}
        ])
    );
}

#[test]
fn test_membership_values_can_be_arrays() {
    let mut query = Ticket::query();
    query.where_("status", "in", json!([1, 8, 9])).unwrap();

    assert_eq!(
        wire(&query.build())["filter"][0],
        json!({"field": "status", "op": "in", "value": [1, 8, 9]})
    );
}

#[test]
fn test_push_typed_clauses() {
    let mut query = Ticket::query();
    query
        .push(Clause::condition("priority", Operator::Lte, 2).unwrap())
        .push(Clause::exists("assignedResourceID"))
        .push(Clause::condition("contactID", Operator::NotExist, Value::Null).unwrap());

    let built = query.build();
    assert_eq!(built.filter.len(), 3);
    assert_eq!(built.filter[2].as_condition().unwrap().value, None);
}

// ============================================================================
// Groups
// ============================================================================

#[test]
fn test_where_group_is_and_group() {
    let mut query = Ticket::query();
    query
        .where_group(|g| g.where_("a", "eq", "1")?.or_where("b", "eq", "2"))
        .unwrap();

    let built = query.build();
    assert_eq!(built.filter.len(), 1);
    let group = built.filter[0].as_group().unwrap();
    assert_eq!(group.conjunction, Conjunction::And);
    assert_eq!(group.items.len(), 2);
    assert_eq!(group.items[0].as_condition().unwrap().field, "a");
    assert_eq!(group.items[1].as_condition().unwrap().field, "b");
}

#[test]
fn test_nested_groups_serialize_with_uppercase_conjunctions() {
    let mut query = Ticket::query();
    query
        .where_("companyID", "eq", 175)
        .unwrap()
        .or_where_group(|g| {
            g.where_("priority", "eq", 1)?
                .where_group(|inner| inner.where_("priority", "eq", 2)?.where_unary("dueDateTime", "exist"))
        })
        .unwrap();

    assert_eq!(
        wire(&query.build()),
        json!({
            "filter": [
                {"field": "companyID", "op": "eq", "value": 175},
                {"op": "OR", "items": [
                    {"field": "priority", "op": "eq", "value": 1},
                    {"op": "AND", "items": [
                        {"field": "priority", "op": "eq", "value": 2},
                        {"field": "dueDateTime", "op": "exist"}
                    ]}
                ]}
            ]
        })
    );
}

#[test]
fn test_group_with_accepts_any_case() {
    let mut query = Ticket::query();
    query.group_with("or", |g| g.where_("status", "eq", 1)).unwrap();

    let group = query.build().filter[0].as_group().cloned().unwrap();
    assert_eq!(group.conjunction, Conjunction::Or);
}

#[test]
fn test_error_inside_group_appends_nothing() {
    let mut query = Ticket::query();
    query.where_("status", "eq", 1).unwrap();
    let before = query.build();

    let result = query.where_group(|g| g.where_("a", "eq", 1)?.where_("b", "nope", 2));
    assert!(matches!(result, Err(AutotaskError::InvalidOperator(_))));
    assert_eq!(query.build(), before);
}

// ============================================================================
// Build and wire format
// ============================================================================

#[test]
fn test_build_is_idempotent() {
    let mut query = Ticket::query();
    query
        .with_limit(50)
        .unwrap()
        .where_("status", "noteq", 5)
        .unwrap()
        .or_where_group(|g| g.where_("priority", "eq", 1)?.or_where("priority", "eq", 2))
        .unwrap();

    assert_eq!(query.build(), query.build());
}

#[test]
fn test_wire_round_trip_preserves_order() {
    let mut query = Ticket::query();
    query
        .where_("z", "eq", 1)
        .unwrap()
        .where_("a", "eq", 2)
        .unwrap()
        .where_("m", "eq", 3)
        .unwrap();

    let search = query.build().to_search().unwrap();
    let parsed: Value = serde_json::from_str(&search).unwrap();

    let fields: Vec<&str> = parsed["filter"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["z", "a", "m"]);
    assert!(parsed.get("MaxRecords").is_none());

    query.with_limit(3).unwrap();
    let parsed = wire(&query.build());
    assert_eq!(parsed["MaxRecords"], 3);

    assert_eq!(Query::from_search(&query.build().to_search().unwrap()).unwrap(), query.build());
}

#[test]
fn test_parsed_search_distinguishes_groups() {
    let search = r#"{"filter":[{"op":"OR","items":[{"field":"id","op":"gt","value":1}]},{"field":"id","op":"exist"}]}"#;
    let query = Query::from_search(search).unwrap();

    assert!(matches!(query.filter[0], FilterNode::Group(_)));
    assert!(matches!(query.filter[1], FilterNode::Condition(_)));
}

#[test]
fn test_parsed_search_accepts_conjunction_in_any_case() {
    let search = r#"{"filter":[{"op":"Or","items":[{"field":"id","op":"eq","value":1}]}]}"#;
    let query = Query::from_search(search).unwrap();

    let group = query.filter[0].as_group().unwrap();
    assert_eq!(group.conjunction, Conjunction::Or);
    assert_eq!(wire(&query)["filter"][0]["op"], "OR");
}

#[test]
fn test_query_schema_describes_payload() {
    let schema = serde_json::to_value(Query::schema()).unwrap();
    let properties = &schema["properties"];

    assert!(properties.get("filter").is_some());
    assert!(properties.get("MaxRecords").is_some());
    assert!(properties.get("IncludeFields").is_some());
}
