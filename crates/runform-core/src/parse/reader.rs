//! Guarded accessors over an untyped OpenAPI document.
//!
//! Every accessor narrows one level of the document and returns `None` when
//! that level is missing or has the wrong shape. Callers compose them with `?`
//! and treat `None` as "nothing to extract".

use serde_json::{Map, Value};

/// Media type whose schema drives the request body form.
pub const JSON_MEDIA_TYPE: &str = "application/json";

pub type JsonMap = Map<String, Value>;

/// The `openapi` version string, if the document declares one.
pub fn openapi_version(doc: &Value) -> Option<&str> {
    doc.as_object()?.get("openapi")?.as_str()
}

/// The `paths` mapping of a document.
pub fn paths(doc: &Value) -> Option<&JsonMap> {
    doc.as_object()?.get("paths")?.as_object()
}

/// The path item stored under a verbatim path key.
pub fn path_item<'a>(doc: &'a Value, path: &str) -> Option<&'a JsonMap> {
    paths(doc)?.get(path)?.as_object()
}

/// The operation stored under `method` (matched in lowercase) of a path.
pub fn operation<'a>(doc: &'a Value, method: &str, path: &str) -> Option<&'a JsonMap> {
    path_item(doc, path)?
        .get(&method.to_lowercase())?
        .as_object()
}

/// The operation-level `parameters` array.
pub fn parameters(operation: &JsonMap) -> Option<&Vec<Value>> {
    operation.get("parameters")?.as_array()
}

/// The operation's `requestBody` object.
pub fn request_body(operation: &JsonMap) -> Option<&JsonMap> {
    operation.get("requestBody")?.as_object()
}

/// Whether a request body is marked `required: true`.
pub fn request_body_required(body: &JsonMap) -> bool {
    is_true(body.get("required"))
}

/// The schema under `content["application/json"].schema` of a request body.
pub fn json_body_schema(body: &JsonMap) -> Option<&JsonMap> {
    body.get("content")?
        .as_object()?
        .get(JSON_MEDIA_TYPE)?
        .as_object()?
        .get("schema")?
        .as_object()
}

/// A query parameter narrowed to the parts the form compiler reads.
#[derive(Debug, Clone, Copy)]
pub struct QueryParameter<'a> {
    pub name: &'a str,
    pub required: bool,
    pub schema: &'a JsonMap,
}

/// Narrow one entry of a `parameters` array to a query parameter.
///
/// Entries that are not objects, not `in: query`, lack a string `name`, or
/// lack an object `schema` yield `None`.
pub fn query_parameter(param: &Value) -> Option<QueryParameter<'_>> {
    let param = param.as_object()?;
    if param.get("in")?.as_str()? != "query" {
        return None;
    }
    let name = param.get("name")?.as_str()?;
    let schema = param.get("schema")?.as_object()?;
    Some(QueryParameter {
        name,
        required: is_true(param.get("required")),
        schema,
    })
}

/// Optional string attribute of an object (e.g. `summary`).
pub fn string_field<'a>(object: &'a JsonMap, key: &str) -> Option<&'a str> {
    object.get(key)?.as_str()
}

/// Only the JSON literal `true` counts; `"true"` and `1` do not.
pub fn is_true(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}

/// Loose truthiness of an optional JSON value.
///
/// Empty arrays and objects are truthy; `null`, `false`, `0` and `""` are not.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}
