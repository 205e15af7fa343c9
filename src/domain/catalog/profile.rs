//! User profile - read-only preferences owned by the document store.

use serde::Serialize;
use serde_json::{Map, Value};

/// Attribute holding the user's interest tags.
pub const INTERESTS_FIELD: &str = "interests";

/// Attributes checked, in order, when addressing the user by name.
const NAME_FIELDS: [&str; 3] = ["name", "display_name", "first_name"];

/// A user's profile as stored in the `users` collection.
///
/// Attributes are open-ended; only `interests` and the name fields carry
/// meaning for recommendations. Serializes to the raw attribute map so tool
/// output matches the stored record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserProfile {
    attributes: Map<String, Value>,
}

impl UserProfile {
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Interest tags in stored order, exactly as stored.
    ///
    /// Only non-string entries are skipped; a missing or non-array
    /// `interests` attribute yields an empty list.
    pub fn interests(&self) -> Vec<String> {
        match self.attributes.get(INTERESTS_FIELD) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Name to address the user by, if the profile carries one.
    pub fn display_name(&self) -> Option<&str> {
        NAME_FIELDS
            .iter()
            .filter_map(|field| self.attributes.get(*field).and_then(Value::as_str))
            .map(str::trim)
            .find(|name| !name.is_empty())
    }
}
