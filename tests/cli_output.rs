//! Tests for CLI output formatting.
//!
//! JSON output with --json, pretty-print output as default.

use autotask::output::PrettyPrint;
use autotask::{Company, Contact, Resource, Ticket};
use serde_json::json;

fn make_test_ticket() -> Ticket {
    serde_json::from_value(json!({
        "id": 7001,
        "ticketNumber": "T20240115.0001",
        "title": "Printer offline on 3rd floor",
        "status": 1,
        "priority": 2,
        "companyID": 175,
        "assignedResourceID": 29682885,
        "createDate": "2024-01-15T09:30:00Z",
        "dueDateTime": "2024-01-16T17:00:00.000Z",
        "userDefinedFields": [
            {"name": "Region", "value": "North"},
            {"name": "Legacy ID", "value": null}
        ]
    }))
    .unwrap()
}

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_uses_api_field_names() {
    let json_output = serde_json::to_string_pretty(&make_test_ticket()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();

    assert_eq!(parsed["ticketNumber"], "T20240115.0001");
    assert_eq!(parsed["companyID"], 175);
    assert_eq!(parsed["assignedResourceID"], 29682885);
    assert_eq!(parsed["userDefinedFields"][0]["name"], "Region");
}

#[test]
fn test_json_output_for_lists_is_array() {
    let tickets = vec![make_test_ticket(), make_test_ticket()];
    let json_output = serde_json::to_string_pretty(&tickets).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

// ============================================================================
// Pretty-Print Output Tests
// ============================================================================

#[test]
fn test_ticket_pretty_print_shows_key_fields() {
    let output = make_test_ticket().pretty_print();

    assert!(output.starts_with("Ticket T20240115.0001 (#7001)"));
    assert!(output.contains("Priority:       2"));
    assert!(output.contains("Assigned:       29682885"));
    assert!(output.contains("Due:            2024-01-16 17:00:00 UTC"));
    assert!(output.contains("  Region: North"));
    assert!(!output.contains("Legacy ID"));
}

#[test]
fn test_ticket_pretty_print_without_number() {
    let ticket: Ticket = serde_json::from_value(json!({"id": 1, "title": "Bare"})).unwrap();
    let output = ticket.pretty_print();

    assert!(output.starts_with("Ticket - (#1)"));
    assert!(!output.contains("User-defined:"));
}

#[test]
fn test_company_pretty_print() {
    let company: Company = serde_json::from_value(json!({
        "id": 175,
        "companyName": "Acme Corporation",
        "isActive": true,
        "phone": "555-0100",
        "address1": "1 Main Street",
        "city": "Springfield"
    }))
    .unwrap();

    let output = company.pretty_print();
    assert!(output.starts_with("Company: Acme Corporation (#175)"));
    assert!(output.contains("Active:         yes"));
    assert!(output.contains("Phone:          555-0100"));
    assert!(output.contains("1 Main Street"));
}

#[test]
fn test_contact_pretty_print_inactive() {
    let contact: Contact = serde_json::from_value(json!({
        "id": 30,
        "firstName": "Hank",
        "lastName": "Scorpio",
        "isActive": 0
    }))
    .unwrap();

    let output = contact.pretty_print();
    assert!(output.starts_with("Contact: Hank Scorpio (#30)"));
    assert!(output.contains("Active:         no"));
}

#[test]
fn test_resource_pretty_print() {
    let resource: Resource = serde_json::from_value(json!({
        "id": 29682885,
        "firstName": "Alice",
        "lastName": "Admin",
        "email": "alice@msp.example.com",
        "isActive": true
    }))
    .unwrap();

    let output = resource.pretty_print();
    assert!(output.contains("Email:          alice@msp.example.com"));
    assert!(output.contains("Active:         yes"));
}
