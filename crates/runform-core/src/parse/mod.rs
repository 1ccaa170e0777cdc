pub mod reader;
pub mod schema;

use std::fs;
use std::path::Path;

use serde_json::{Map, Number, Value};
use serde_yaml_ng::Value as YamlValue;

use crate::error::ParseError;

/// Parse an OpenAPI document from JSON.
///
/// Only the text has to be valid JSON. A document with an unexpected shape is
/// still returned; the readers degrade to empty results on it.
pub fn from_json(input: &str) -> Result<Value, ParseError> {
    let doc: Value = serde_json::from_str(input)?;
    check_version(&doc);
    Ok(doc)
}

/// Parse an OpenAPI document from YAML into the same JSON value model.
pub fn from_yaml(input: &str) -> Result<Value, ParseError> {
    let yaml: YamlValue = serde_yaml_ng::from_str(input)?;
    let doc = yaml_to_json(yaml);
    check_version(&doc);
    Ok(doc)
}

/// Read a document from disk, choosing the format by file extension.
pub fn from_path(path: &Path) -> Result<Value, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => from_json(&content),
        _ => from_yaml(&content),
    }
}

fn check_version(doc: &Value) {
    match reader::openapi_version(doc) {
        Some(version) if version.starts_with("3.") => {}
        Some(version) => log::warn!("document declares OpenAPI {version}, expected 3.x"),
        None => log::warn!("document has no `openapi` version field"),
    }
}

/// Convert a YAML value into a JSON value, keeping mapping order.
///
/// Scalar keys are stringified, tags are dropped and non-finite floats become
/// null since JSON cannot carry them.
pub fn yaml_to_json(value: YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                let Some(key) = yaml_key(key) else {
                    log::debug!("skipping YAML mapping entry with a non-scalar key");
                    continue;
                };
                map.insert(key, yaml_to_json(value));
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Null => Some("null".to_string()),
        YamlValue::Tagged(tagged) => yaml_key(tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}
