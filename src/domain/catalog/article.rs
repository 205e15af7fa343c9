//! Article - a read-only entry of the `articles` collection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::ArticleId;

/// Attribute holding an article's tag list.
pub const TAGS_FIELD: &str = "tags";

/// An article with its store-assigned id and open-ended fields.
///
/// Serializes flat, as `{"id": ..., ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    id: ArticleId,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Article {
    /// Creates an article. An `id` entry inside `fields` is dropped so the
    /// store-assigned id always wins.
    pub fn new(id: impl Into<ArticleId>, mut fields: Map<String, Value>) -> Self {
        fields.remove("id");
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn id(&self) -> &ArticleId {
        &self.id
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn title(&self) -> Option<&str> {
        self.fields
            .get("title")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn tags(&self) -> Vec<&str> {
        match self.fields.get(TAGS_FIELD) {
            Some(Value::Array(values)) => values.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().contains(&tag)
    }
}
