use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A scalar carried in a query string or path segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Number(Number),
    String(String),
}

impl From<ScalarValue> for Value {
    fn from(value: ScalarValue) -> Self {
        match value {
            ScalarValue::Bool(b) => Value::Bool(b),
            ScalarValue::Number(n) => Value::Number(n),
            ScalarValue::String(s) => Value::String(s),
        }
    }
}

/// Structured inputs of one run, keyed by where they go in the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunInputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<IndexMap<String, ScalarValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<IndexMap<String, ScalarValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, String>>,
}

impl RunInputs {
    pub fn is_empty(&self) -> bool {
        self.query.as_ref().is_none_or(IndexMap::is_empty)
            && self.path.as_ref().is_none_or(IndexMap::is_empty)
            && self.body.is_none()
            && self.headers.as_ref().is_none_or(IndexMap::is_empty)
    }
}
