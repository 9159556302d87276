// Collection responses come either as a bare JSON array or wrapped in a
// `{"results": [...]}` envelope.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;

/// Flatten a response body into its ordered records.
///
/// Anything that is neither an array nor an object with a `results` array
/// counts as an empty collection.
pub fn normalize(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Normalize and decode every record, preserving server order
pub fn decode_records<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, ApiError> {
    normalize(body)
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(ApiError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let items = normalize(json!([{"_id": "a"}, {"_id": "b"}, {"_id": "c"}]));
        assert_eq!(items.len(), 3);
        assert_eq!(items[2]["_id"], "c");
    }

    #[test]
    fn test_results_envelope() {
        let items = normalize(json!({"count": 2, "results": [{"_id": "x"}, {"_id": "y"}]}));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["_id"], "x");
    }

    #[test]
    fn test_unexpected_shapes_are_empty() {
        assert!(normalize(json!({"detail": "ok"})).is_empty());
        assert!(normalize(json!({"results": {"_id": "x"}})).is_empty());
        assert!(normalize(json!("text")).is_empty());
        assert!(normalize(Value::Null).is_empty());
    }

    #[test]
    fn test_decode_rejects_non_object_records() {
        #[derive(serde::Deserialize)]
        struct Named {
            #[allow(dead_code)]
            name: String,
        }

        let result = decode_records::<Named>(json!([1, 2]));
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }
}
