//! Company model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user_defined::{find_udf, UserDefinedField};
use crate::traits::Entity;

/// An Autotask company (customer, prospect, vendor, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Unique company ID.
    pub id: i64,

    /// Company name.
    #[serde(default)]
    pub company_name: String,

    /// External company number.
    #[serde(default)]
    pub company_number: Option<String>,

    /// Company type picklist value (1 = customer, 3 = prospect, ...).
    #[serde(default)]
    pub company_type: Option<i32>,

    /// Whether the company is active.
    #[serde(default)]
    pub is_active: bool,

    /// Main phone number.
    #[serde(default)]
    pub phone: Option<String>,

    /// Web site.
    #[serde(default)]
    pub web_address: Option<String>,

    /// Street address.
    #[serde(default)]
    pub address1: Option<String>,

    /// Second address line.
    #[serde(default)]
    pub address2: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub postal_code: Option<String>,

    /// Country reference.
    #[serde(rename = "countryID", default)]
    pub country_id: Option<i64>,

    /// Account manager.
    #[serde(rename = "ownerResourceID", default)]
    pub owner_resource_id: Option<i64>,

    /// Parent company, for company hierarchies.
    #[serde(rename = "parentCompanyID", default)]
    pub parent_company_id: Option<i64>,

    /// When the company was created.
    #[serde(default)]
    pub create_date: Option<DateTime<Utc>>,

    /// Last activity on the company.
    #[serde(default)]
    pub last_activity_date: Option<DateTime<Utc>>,

    /// Tenant-specific custom fields.
    #[serde(default)]
    pub user_defined_fields: Vec<UserDefinedField>,
}

impl Company {
    /// Single-line postal address built from the populated parts.
    pub fn address(&self) -> Option<String> {
        let parts: Vec<&str> = [
            self.address1.as_deref(),
            self.address2.as_deref(),
            self.city.as_deref(),
            self.state.as_deref(),
            self.postal_code.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect();

        (!parts.is_empty()).then(|| parts.join(", "))
    }

    /// Value of a user-defined field by name.
    pub fn udf(&self, name: &str) -> Option<&str> {
        find_udf(&self.user_defined_fields, name)
    }
}

impl Entity for Company {
    const PATH: &'static str = "Companies";
    const NAME: &'static str = "Company";
}
