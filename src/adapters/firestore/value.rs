//! Firestore REST value decoding.
//!
//! The REST API wraps every field in a typed envelope such as
//! `{"stringValue": "x"}` or `{"arrayValue": {"values": [...]}}`. This module
//! flattens those envelopes into plain JSON and builds the typed values the
//! query API expects.

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::ports::{Document, StoreError};

/// A document as returned by the REST API.
#[derive(Debug, Deserialize)]
pub(crate) struct RestDocument {
    /// Full resource name, `projects/{p}/databases/{d}/documents/{coll}/{id}`
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl RestDocument {
    pub fn into_document(self) -> Result<Document, StoreError> {
        let id = document_id(&self.name)
            .ok_or_else(|| StoreError::decode(format!("invalid document name '{}'", self.name)))?
            .to_string();
        Ok(Document::new(id, decode_fields(self.fields)?))
    }
}

/// Last path segment of a document resource name.
pub(crate) fn document_id(name: &str) -> Option<&str> {
    name.rsplit('/').next().filter(|id| !id.is_empty())
}

/// Decodes a `fields` map.
pub(crate) fn decode_fields(fields: Map<String, Value>) -> Result<Map<String, Value>, StoreError> {
    fields
        .into_iter()
        .map(|(key, value)| decode_value(value).map(|decoded| (key, decoded)))
        .collect()
}

/// Decodes one typed value into plain JSON.
pub(crate) fn decode_value(value: Value) -> Result<Value, StoreError> {
    let Value::Object(mut envelope) = value else {
        return Err(StoreError::decode("value is not an object"));
    };

    let Some((kind, inner)) = envelope.iter_mut().next().map(|(k, v)| (k.clone(), v.take()))
    else {
        return Err(StoreError::decode("empty value envelope"));
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" | "doubleValue" => Ok(inner),
        // int64 is transported as a decimal string
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(|n| Value::Number(Number::from(n)))
                .map_err(|e| StoreError::decode(format!("invalid integerValue '{}': {}", s, e))),
            Value::Number(n) => Ok(Value::Number(n)),
            other => Err(StoreError::decode(format!(
                "invalid integerValue {}",
                other
            ))),
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => Ok(inner),
        "geoPointValue" => Ok(inner),
        "arrayValue" => {
            let values = match inner {
                Value::Object(mut obj) => obj.remove("values").unwrap_or(Value::Array(Vec::new())),
                _ => return Err(StoreError::decode("arrayValue is not an object")),
            };
            match values {
                Value::Array(items) => items
                    .into_iter()
                    .map(decode_value)
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array),
                _ => Err(StoreError::decode("arrayValue.values is not an array")),
            }
        }
        "mapValue" => {
            let fields = match inner {
                Value::Object(mut obj) => match obj.remove("fields") {
                    Some(Value::Object(fields)) => fields,
                    None => Map::new(),
                    Some(_) => return Err(StoreError::decode("mapValue.fields is not an object")),
                },
                _ => return Err(StoreError::decode("mapValue is not an object")),
            };
            decode_fields(fields).map(Value::Object)
        }
        other => Err(StoreError::decode(format!("unsupported value type '{}'", other))),
    }
}

/// Typed value for a string, as used in query filters.
pub(crate) fn string_value(s: &str) -> Value {
    serde_json::json!({ "stringValue": s })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_scalars() {
        assert_eq!(decode_value(json!({"nullValue": null})).unwrap(), Value::Null);
        assert_eq!(decode_value(json!({"booleanValue": true})).unwrap(), json!(true));
        assert_eq!(decode_value(json!({"integerValue": "42"})).unwrap(), json!(42));
        assert_eq!(decode_value(json!({"doubleValue": 1.5})).unwrap(), json!(1.5));
        assert_eq!(decode_value(json!({"stringValue": "hi"})).unwrap(), json!("hi"));
        assert_eq!(
            decode_value(json!({"timestampValue": "2024-01-01T00:00:00Z"})).unwrap(),
            json!("2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn decodes_nested_arrays_and_maps() {
        let value = json!({
            "mapValue": {
                "fields": {
                    "tags": {"arrayValue": {"values": [
                        {"stringValue": "space"},
                        {"stringValue": "ai"}
                    ]}},
                    "stats": {"mapValue": {"fields": {"views": {"integerValue": "7"}}}}
                }
            }
        });
        assert_eq!(
            decode_value(value).unwrap(),
            json!({"tags": ["space", "ai"], "stats": {"views": 7}})
        );
    }

    #[test]
    fn empty_array_and_map_have_no_inner_key() {
        assert_eq!(decode_value(json!({"arrayValue": {}})).unwrap(), json!([]));
        assert_eq!(decode_value(json!({"mapValue": {}})).unwrap(), json!({}));
    }

    #[test]
    fn geo_point_is_passed_through() {
        let value = json!({"geoPointValue": {"latitude": 1.0, "longitude": 2.0}});
        assert_eq!(
            decode_value(value).unwrap(),
            json!({"latitude": 1.0, "longitude": 2.0})
        );
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(decode_value(json!("raw")).is_err());
        assert!(decode_value(json!({})).is_err());
        assert!(decode_value(json!({"integerValue": "abc"})).is_err());
        assert!(decode_value(json!({"mysteryValue": 1})).is_err());
    }

    #[test]
    fn document_id_is_last_segment() {
        assert_eq!(
            document_id("projects/p/databases/(default)/documents/articles/a1"),
            Some("a1")
        );
        assert_eq!(document_id("trailing/"), None);
    }

    #[test]
    fn rest_document_converts() {
        let doc: RestDocument = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/users/u1",
            "fields": {"interests": {"arrayValue": {"values": [{"stringValue": "space"}]}}},
            "createTime": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        let document = doc.into_document().unwrap();
        assert_eq!(document.id, "u1");
        assert_eq!(document.fields.get("interests"), Some(&json!(["space"])));
    }
}
