//! User-defined field values attached to entities.

use serde::{Deserialize, Serialize};

/// A tenant-specific custom field and its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDefinedField {
    /// Field label as configured in Autotask.
    pub name: String,
    /// Field value. Autotask sends every UDF value as a string or null.
    #[serde(default)]
    pub value: Option<String>,
}

/// Look up a UDF value by name, ignoring case.
pub(crate) fn find_udf<'a>(fields: &'a [UserDefinedField], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(name))
        .and_then(|f| f.value.as_deref())
}
