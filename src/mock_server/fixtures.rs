//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{DateTime, Utc};

use super::state::MockState;
use crate::{
    Company, Contact, Credentials, Entity, Resource, Ticket, UserDefinedField,
    TICKET_STATUS_COMPLETE,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

fn at(timestamp: &str) -> Option<DateTime<Utc>> {
    timestamp.parse().ok()
}

fn udf(name: &str, value: Option<&str>) -> UserDefinedField {
    UserDefinedField {
        name: name.to_string(),
        value: value.map(str::to_string),
    }
}

impl Fixtures {
    /// Credentials of the fixture API user.
    pub fn credentials() -> Credentials {
        Credentials::new("api-user@example.com", "mock-secret", "MOCK-INTEGRATION")
    }

    // =========================================================================
    // Ticket Fixtures
    // =========================================================================

    /// Create a minimal ticket with required fields only.
    pub fn minimal_ticket(id: i64, title: &str) -> Ticket {
        Ticket {
            id,
            ticket_number: Some(format!("T20240115.{id:04}")),
            title: title.to_string(),
            description: None,
            status: Some(1),
            priority: Some(2),
            issue_type: None,
            sub_issue_type: None,
            ticket_type: Some(1),
            source: None,
            queue_id: None,
            company_id: None,
            contact_id: None,
            assigned_resource_id: None,
            assigned_resource_role_id: None,
            create_date: at("2024-01-15T09:30:00Z"),
            due_date_time: None,
            completed_date: None,
            last_activity_date: None,
            estimated_hours: None,
            user_defined_fields: vec![],
        }
    }

    /// Create an open ticket for a company, assigned to a resource.
    pub fn assigned_ticket(id: i64, title: &str, company_id: i64, resource_id: i64) -> Ticket {
        let mut ticket = Self::minimal_ticket(id, title);
        ticket.company_id = Some(company_id);
        ticket.assigned_resource_id = Some(resource_id);
        ticket.assigned_resource_role_id = Some(29683);
        ticket.queue_id = Some(29682833);
        ticket
    }

    /// Create a completed ticket.
    pub fn completed_ticket(id: i64, title: &str, company_id: i64) -> Ticket {
        let mut ticket = Self::minimal_ticket(id, title);
        ticket.company_id = Some(company_id);
        ticket.status = Some(TICKET_STATUS_COMPLETE);
        ticket.completed_date = at("2024-01-17T15:45:00Z");
        ticket
    }

    // =========================================================================
    // Company Fixtures
    // =========================================================================

    /// Create an active customer company.
    pub fn company(id: i64, name: &str) -> Company {
        Company {
            id,
            company_name: name.to_string(),
            company_number: Some(format!("C{id}")),
            company_type: Some(1),
            is_active: true,
            phone: None,
            web_address: None,
            address1: None,
            address2: None,
            city: None,
            state: None,
            postal_code: None,
            country_id: None,
            owner_resource_id: None,
            parent_company_id: None,
            create_date: at("2023-06-01T12:00:00Z"),
            last_activity_date: None,
            user_defined_fields: vec![],
        }
    }

    // =========================================================================
    // Contact Fixtures
    // =========================================================================

    /// Create an active contact at a company.
    pub fn contact(id: i64, company_id: i64, first_name: &str, last_name: &str) -> Contact {
        Contact {
            id,
            company_id: Some(company_id),
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            email_address: Some(format!(
                "{}.{}@example.com",
                first_name.to_lowercase(),
                last_name.to_lowercase()
            )),
            phone: None,
            mobile_phone: None,
            title: None,
            is_active: 1,
            create_date: at("2023-06-02T08:00:00Z"),
            last_activity_date: None,
            user_defined_fields: vec![],
        }
    }

    // =========================================================================
    // Resource Fixtures
    // =========================================================================

    /// Create an active resource (Autotask user).
    pub fn resource(id: i64, first_name: &str, last_name: &str) -> Resource {
        Resource {
            id,
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            user_name: Some(first_name.to_lowercase()),
            email: Some(format!("{}@msp.example.com", first_name.to_lowercase())),
            title: Some("Technician".to_string()),
            resource_type: Some("Employee".to_string()),
            is_active: true,
            location_id: None,
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// State with the standard endpoints registered and no records.
    pub fn empty_state() -> MockState {
        MockState::new()
            .with_empty_entity(Ticket::PATH)
            .with_empty_entity(Company::PATH)
            .with_empty_entity(Contact::PATH)
            .with_empty_entity(Resource::PATH)
    }

    /// Create a default scenario with common test data.
    ///
    /// Two companies, their contacts, two resources and five tickets with a
    /// mix of statuses, priorities and user-defined fields.
    pub fn default_state() -> MockState {
        let mut acme = Self::company(100, "Acme Corporation");
        acme.phone = Some("555-0100".to_string());
        acme.address1 = Some("1 Main Street".to_string());
        acme.city = Some("Springfield".to_string());
        acme.user_defined_fields = vec![udf("Tier", Some("Gold"))];

        let mut globex = Self::company(101, "Globex Inc");
        globex.user_defined_fields = vec![udf("Tier", Some("Silver"))];

        let mut inactive = Self::company(102, "Initech (closed)");
        inactive.is_active = false;

        let mut former = Self::contact(501, 101, "Hank", "Scorpio");
        former.is_active = 0;

        let mut printer = Self::assigned_ticket(7001, "Printer offline on 3rd floor", 100, 29682885);
        printer.contact_id = Some(500);
        printer.due_date_time = at("2024-01-16T17:00:00Z");
        printer.user_defined_fields = vec![udf("Region", Some("North")), udf("Legacy ID", None)];

        let mut vpn = Self::assigned_ticket(7002, "VPN drops every hour", 101, 29682886);
        vpn.priority = Some(1);
        vpn.user_defined_fields = vec![udf("Region", Some("South"))];

        let mut email = Self::minimal_ticket(7003, "New starter email account");
        email.company_id = Some(100);
        email.priority = Some(3);
        email.status = Some(8);

        let mut laptop = Self::completed_ticket(7004, "Replace laptop battery", 100);
        laptop.user_defined_fields = vec![udf("Region", Some("North"))];

        let backup = Self::completed_ticket(7005, "Backup job failed", 101);

        Self::empty_state()
            .with_entity(&acme)
            .with_entity(&globex)
            .with_entity(&inactive)
            .with_entity(&Self::contact(500, 100, "Jane", "Doe"))
            .with_entity(&former)
            .with_entity(&Self::resource(29682885, "Alice", "Admin"))
            .with_entity(&Self::resource(29682886, "Bob", "Builder"))
            .with_entity(&printer)
            .with_entity(&vpn)
            .with_entity(&email)
            .with_entity(&laptop)
            .with_entity(&backup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_contents() {
        let state = Fixtures::default_state();

        assert_eq!(state.records["tickets"].len(), 5);
        assert_eq!(state.records["companies"].len(), 3);
        assert_eq!(state.records["contacts"].len(), 2);
        assert_eq!(state.records["resources"].len(), 2);

        let printer = state.get_record("Tickets", 7001).unwrap();
        assert_eq!(printer["companyID"], 100);
        assert_eq!(printer["userDefinedFields"][0]["name"], "Region");
    }

    #[test]
    fn test_completed_ticket_is_complete() {
        let ticket = Fixtures::completed_ticket(1, "Done", 100);
        assert!(ticket.is_complete());
        assert!(ticket.completed_date.is_some());
    }

    #[test]
    fn test_empty_state_registers_endpoints() {
        let state = Fixtures::empty_state();
        assert!(state.has_entity("Tickets"));
        assert!(state.query("Tickets", &[]).is_empty());
    }
}
