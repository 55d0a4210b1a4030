//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use chrono::{DateTime, Utc};

use crate::{Company, Contact, Resource, Ticket, UserDefinedField};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn push_udfs(lines: &mut Vec<String>, fields: &[UserDefinedField]) {
    for field in fields {
        if let Some(ref value) = field.value {
            lines.push(format!("  {}: {}", field.name, value));
        }
    }
}

impl PrettyPrint for Ticket {
    fn pretty_print(&self) -> String {
        let number = self.ticket_number.as_deref().unwrap_or("-");
        let mut lines = header(format!("Ticket {} (#{})", number, self.id));
        lines.push(format!("Title:          {}", self.title));

        if let Some(status) = self.status {
            lines.push(format!("Status:         {}", status));
        }

        if let Some(priority) = self.priority {
            lines.push(format!("Priority:       {}", priority));
        }

        if let Some(company) = self.company_id {
            lines.push(format!("Company:        {}", company));
        }

        if let Some(resource) = self.assigned_resource_id {
            lines.push(format!("Assigned:       {}", resource));
        }

        if let Some(ref created) = self.create_date {
            lines.push(format!("Created:        {}", timestamp(created)));
        }

        if let Some(ref due) = self.due_date_time {
            lines.push(format!("Due:            {}", timestamp(due)));
        }

        if self.user_defined_fields.iter().any(|f| f.value.is_some()) {
            lines.push("User-defined:".to_string());
            push_udfs(&mut lines, &self.user_defined_fields);
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Company {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Company: {} (#{})", self.company_name, self.id));
        lines.push(format!(
            "Active:         {}",
            if self.is_active { "yes" } else { "no" }
        ));

        if let Some(ref phone) = self.phone {
            lines.push(format!("Phone:          {}", phone));
        }

        if let Some(ref web) = self.web_address {
            lines.push(format!("Web:            {}", web));
        }

        if let Some(address) = self.address() {
            lines.push(format!("Address:        {}", address));
        }

        if self.user_defined_fields.iter().any(|f| f.value.is_some()) {
            lines.push("User-defined:".to_string());
            push_udfs(&mut lines, &self.user_defined_fields);
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Contact {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Contact: {} (#{})", self.full_name(), self.id));

        if let Some(ref email) = self.email_address {
            lines.push(format!("Email:          {}", email));
        }

        if let Some(ref phone) = self.phone {
            lines.push(format!("Phone:          {}", phone));
        }

        if let Some(company) = self.company_id {
            lines.push(format!("Company:        {}", company));
        }

        lines.push(format!(
            "Active:         {}",
            if self.is_active() { "yes" } else { "no" }
        ));

        lines.join("\n")
    }
}

impl PrettyPrint for Resource {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Resource: {} (#{})", self.display_name(), self.id));

        if let Some(ref email) = self.email {
            lines.push(format!("Email:          {}", email));
        }

        if let Some(ref kind) = self.resource_type {
            lines.push(format!("Type:           {}", kind));
        }

        lines.push(format!(
            "Active:         {}",
            if self.is_active { "yes" } else { "no" }
        ));

        lines.join("\n")
    }
}
