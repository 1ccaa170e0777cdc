use serde_json::Value;

use crate::model::{EndpointMeta, HttpMethod, endpoint_id, split_endpoint_id};
use crate::parse::reader;

/// Extract one [`EndpointMeta`] per `(path, method)` pair of a document.
///
/// Output follows document order: paths first, then methods within a path.
/// A document without a `paths` mapping yields an empty list.
pub fn list_endpoints(doc: &Value) -> Vec<EndpointMeta> {
    let mut endpoints = Vec::new();

    let Some(paths) = reader::paths(doc) else {
        log::debug!("document has no `paths` mapping");
        return endpoints;
    };

    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            log::debug!("skipping non-object path item {path}");
            continue;
        };

        for (key, operation) in item {
            let Some(method) = HttpMethod::from_key(key) else {
                continue;
            };

            let operation = operation.as_object();
            let summary = operation.and_then(|op| reader::string_field(op, "summary"));
            let description = operation.and_then(|op| reader::string_field(op, "description"));

            endpoints.push(EndpointMeta {
                id: endpoint_id(method.as_str(), path),
                method: method.as_str().to_string(),
                path: path.clone(),
                summary: summary.map(str::to_string),
                description: description.map(str::to_string),
            });
        }
    }

    endpoints
}

/// Whether `endpoint_id` names an endpoint [`list_endpoints`] reports.
///
/// Method keys match case-insensitively, as in the listing, so an operation
/// stored under `DELETE` exists even though form lookup reads `delete`.
pub fn has_endpoint(doc: &Value, endpoint_id: &str) -> bool {
    let Some((method, path)) = split_endpoint_id(endpoint_id) else {
        return false;
    };
    let Some(item) = reader::path_item(doc, path) else {
        return false;
    };
    item.keys()
        .filter_map(|key| HttpMethod::from_key(key))
        .any(|m| m.as_str().eq_ignore_ascii_case(method))
}
