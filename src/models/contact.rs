//! Contact model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user_defined::{find_udf, UserDefinedField};
use crate::traits::Entity;

/// A person at a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Unique contact ID.
    pub id: i64,

    /// Company the contact belongs to.
    #[serde(rename = "companyID", default)]
    pub company_id: Option<i64>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    /// Primary email address.
    #[serde(default)]
    pub email_address: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub mobile_phone: Option<String>,

    /// Job title.
    #[serde(default)]
    pub title: Option<String>,

    /// Active flag. Contacts report this as 1/0 rather than a boolean.
    #[serde(default)]
    pub is_active: i32,

    #[serde(default)]
    pub create_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_activity_date: Option<DateTime<Utc>>,

    /// Tenant-specific custom fields.
    #[serde(default)]
    pub user_defined_fields: Vec<UserDefinedField>,
}

impl Contact {
    /// First and last name joined, skipping missing parts.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_active(&self) -> bool {
        self.is_active != 0
    }

    /// Value of a user-defined field by name.
    pub fn udf(&self, name: &str) -> Option<&str> {
        find_udf(&self.user_defined_fields, name)
    }
}

impl Entity for Contact {
    const PATH: &'static str = "Contacts";
    const NAME: &'static str = "Contact";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_deserialize() {
        let json = r#"{
            "id": 30682001,
            "companyID": 175,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "emailAddress": "ada@contoso.example",
            "isActive": 1,
            "userDefinedFields": []
        }"#;

        let contact: Contact = serde_json::from_str(json).expect("Failed to deserialize contact");

        assert_eq!(contact.company_id, Some(175));
        assert_eq!(contact.full_name(), "Ada Lovelace");
        assert_eq!(contact.email_address.as_deref(), Some("ada@contoso.example"));
        assert!(contact.is_active());
    }

    #[test]
    fn test_contact_partial_name() {
        let contact: Contact =
            serde_json::from_str(r#"{"id": 1, "lastName": "Hopper", "isActive": 0}"#).unwrap();
        assert_eq!(contact.full_name(), "Hopper");
        assert!(!contact.is_active());
    }
}
