//! Request DTOs for the clipboard API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::{Deserialize, Deserializer};

/// Request body for the save operation (POST /save)
///
/// A body without a `value` field, or with `"value": null`, is accepted
/// and treated as empty.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveRequest {
    /// The text to store
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl SaveRequest {
    /// The value with leading and trailing whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.trimmed().is_empty() {
            return Some("Value cannot be empty".to_string());
        }
        None
    }
}
