use serde::{Deserialize, Serialize};

/// HTTP method recognized as an operation key of a path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Match a path-item key case-insensitively. Keys such as `parameters`,
    /// `servers` or `summary` are not operations and yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(key))
    }
}

/// Metadata for one `(method, path)` operation of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointMeta {
    /// `"<METHOD> <path>"`.
    pub id: String,
    pub method: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Build the endpoint identifier for a method and a verbatim path.
pub fn endpoint_id(method: &str, path: &str) -> String {
    format!("{method} {path}")
}

/// Split an endpoint identifier on its first space.
///
/// Everything after the first space is the path, so paths containing spaces
/// survive. Returns `None` when either part is empty.
pub fn split_endpoint_id(id: &str) -> Option<(&str, &str)> {
    let (method, path) = id.split_once(' ')?;
    if method.is_empty() || path.is_empty() {
        return None;
    }
    Some((method, path))
}
