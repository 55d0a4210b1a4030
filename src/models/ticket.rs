//! Ticket model.
//!
//! Tickets are service requests tracked against a company. Status, priority
//! and queue are picklist values whose labels are tenant-configurable, so
//! they are kept as their numeric IDs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user_defined::{find_udf, UserDefinedField};
use crate::traits::Entity;

/// Picklist value Autotask ships for the "Complete" ticket status.
pub const TICKET_STATUS_COMPLETE: i32 = 5;

// =============================================================================
// TESTS
// =============================================================================


// =============================================================================
// IMPLEMENTATION
// =============================================================================

/// An Autotask service ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Unique ticket ID.
    pub id: i64,

    /// Human-facing ticket number (e.g., "T20240115.0042").
    #[serde(default)]
    pub ticket_number: Option<String>,

    /// Ticket title.
    #[serde(default)]
    pub title: String,

    /// Ticket description.
    #[serde(default)]
    pub description: Option<String>,

    /// Status picklist value.
    #[serde(default)]
    pub status: Option<i32>,

    /// Priority picklist value.
    #[serde(default)]
    pub priority: Option<i32>,

    /// Issue type picklist value.
    #[serde(default)]
    pub issue_type: Option<i32>,

    /// Sub-issue type picklist value.
    #[serde(default)]
    pub sub_issue_type: Option<i32>,

    /// Ticket type picklist value (service request, incident, ...).
    #[serde(default)]
    pub ticket_type: Option<i32>,

    /// Source picklist value (email, phone, portal, ...).
    #[serde(default)]
    pub source: Option<i32>,

    /// Queue the ticket is in.
    #[serde(rename = "queueID", default)]
    pub queue_id: Option<i64>,

    /// Owning company.
    #[serde(rename = "companyID", default)]
    pub company_id: Option<i64>,

    /// Requesting contact.
    #[serde(rename = "contactID", default)]
    pub contact_id: Option<i64>,

    /// Primary assigned resource.
    #[serde(rename = "assignedResourceID", default)]
    pub assigned_resource_id: Option<i64>,

    /// Role of the primary assigned resource.
    #[serde(rename = "assignedResourceRoleID", default)]
    pub assigned_resource_role_id: Option<i64>,

    /// When the ticket was created.
    #[serde(default)]
    pub create_date: Option<DateTime<Utc>>,

    /// When the ticket is due.
    #[serde(default)]
    pub due_date_time: Option<DateTime<Utc>>,

    /// When the ticket was completed.
    #[serde(default)]
    pub completed_date: Option<DateTime<Utc>>,

    /// Last activity on the ticket.
    #[serde(default)]
    pub last_activity_date: Option<DateTime<Utc>>,

    /// Estimated effort in hours.
    #[serde(default)]
    pub estimated_hours: Option<f64>,

    /// Tenant-specific custom fields.
    #[serde(default)]
    pub user_defined_fields: Vec<UserDefinedField>,
}

impl Ticket {
    /// Whether the ticket carries the built-in "Complete" status.
    pub fn is_complete(&self) -> bool {
        self.status == Some(TICKET_STATUS_COMPLETE)
    }

    /// Whether a primary resource is assigned.
    pub fn is_assigned(&self) -> bool {
        self.assigned_resource_id.is_some()
    }

    /// Value of a user-defined field by name.
    pub fn udf(&self, name: &str) -> Option<&str> {
        find_udf(&self.user_defined_fields, name)
    }
}

impl Entity for Ticket {
    const PATH: &'static str = "Tickets";
    const NAME: &'static str = "Ticket";
}
