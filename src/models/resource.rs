//! Resource model.

use serde::{Deserialize, Serialize};

use crate::traits::Entity;

/// An Autotask user (technician, manager, API user, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Unique resource ID.
    pub id: i64,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    /// Login name.
    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Job title.
    #[serde(default)]
    pub title: Option<String>,

    /// Resource type ("Employee", "Contractor", ...).
    #[serde(default)]
    pub resource_type: Option<String>,

    /// Whether the resource is active.
    #[serde(default)]
    pub is_active: bool,

    /// Office location.
    #[serde(rename = "locationID", default)]
    pub location_id: Option<i64>,
}

impl Resource {
    /// First and last name joined, falling back to the login name.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        if name.is_empty() {
            self.user_name.clone().unwrap_or_default()
        } else {
            name
        }
    }
}

impl Entity for Resource {
    const PATH: &'static str = "Resources";
    const NAME: &'static str = "Resource";
}
