//! JSON payload extraction.
//!
//! Locates the first JSON object in a classified line and unwraps the
//! single-level `Payload` nesting convention: Quick/Bot draft messages
//! wrap their real content as a JSON-encoded string under `Payload`.

use serde_json::Value;

use super::error::LineError;

/// Key under which MTGA nests a string-encoded inner payload.
const NESTED_PAYLOAD_KEY: &str = "Payload";

/// Extract and parse the JSON object embedded in `line`.
///
/// The substring from the first `{` to the end of the line is parsed. If
/// the resulting object has a `Payload` field holding a string that itself
/// parses to a JSON object, the inner fields are shallow-merged over the
/// outer ones (inner wins on collision). A failed inner parse is swallowed
/// and the outer object returned as-is. Only one level is unwrapped.
///
/// # Errors
///
/// `NoJsonFound` if the line contains no `{`; `MalformedJson` if the
/// substring does not parse.
pub fn extract(line: &str) -> Result<Value, LineError> {
    let start = line.find('{').ok_or(LineError::NoJsonFound)?;
    let value: Value = serde_json::from_str(&line[start..])?;
    Ok(unwrap_nested(value))
}

/// Shallow-merge a string-encoded `Payload` object into its parent.
fn unwrap_nested(value: Value) -> Value {
    let Value::Object(mut outer) = value else {
        return value;
    };

    let inner = outer
        .get(NESTED_PAYLOAD_KEY)
        .and_then(Value::as_str)
        .and_then(|raw| serde_json::from_str::<Value>(raw).ok());

    if let Some(Value::Object(inner)) = inner {
        for (key, val) in inner {
            outer.insert(key, val);
        }
    }

    Value::Object(outer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_json_after_prefix() {
        let value = extract(r#"[UnityCrossThreadLogger]Draft.Notify {"DraftPack":["1","2"]}"#)
            .unwrap();
        assert_eq!(value["DraftPack"], json!(["1", "2"]));
    }

    #[test]
    fn test_no_brace_is_no_json_found() {
        let err = extract("a line without any object").unwrap_err();
        assert!(matches!(err, LineError::NoJsonFound));
    }

    #[test]
    fn test_garbage_after_brace_is_malformed() {
        let err = extract("marker {not json at all").unwrap_err();
        assert!(matches!(err, LineError::MalformedJson(_)));
    }

    #[test]
    fn test_nested_payload_merged_over_outer() {
        let value =
            extract(r#"x {"Outer":1,"Payload":"{\"DraftPack\":[\"5\"],\"Outer\":2}"}"#).unwrap();
        assert_eq!(value["DraftPack"], json!(["5"]));
        // Inner wins on collision.
        assert_eq!(value["Outer"], json!(2));
        // The raw Payload string survives unless the inner object shadows it.
        assert!(value["Payload"].is_string());
    }

    #[test]
    fn test_bad_nested_payload_swallowed() {
        let value = extract(r#"x {"Payload":"{broken","Kept":true}"#).unwrap();
        assert_eq!(value["Kept"], json!(true));
        assert_eq!(value["Payload"], json!("{broken"));
    }

    #[test]
    fn test_non_string_payload_left_alone() {
        let value = extract(r#"x {"Payload":{"DraftPack":["9"]}}"#).unwrap();
        // Only string-encoded payloads are unwrapped.
        assert!(value.get("DraftPack").is_none());
        assert_eq!(value["Payload"]["DraftPack"], json!(["9"]));
    }

    #[test]
    fn test_only_one_nesting_level_unwrapped() {
        let doubly = r#"x {"Payload":"{\"Payload\":\"{\\\"DraftPack\\\":[\\\"3\\\"]}\"}"}"#;
        let value = extract(doubly).unwrap();
        // The second level stays string-encoded.
        assert!(value.get("DraftPack").is_none());
        assert!(value["Payload"].is_string());
    }
}
