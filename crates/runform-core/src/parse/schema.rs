use serde_json::{Number, Value};

use super::reader::{JsonMap, is_truthy};

/// A read-only view over one JSON Schema fragment.
///
/// The fragment is untrusted: every accessor checks the JSON type of the
/// keyword it reads and reports `None` on a mismatch.
#[derive(Debug, Clone, Copy)]
pub struct SchemaView<'a>(&'a JsonMap);

impl<'a> SchemaView<'a> {
    pub fn new(schema: &'a JsonMap) -> Self {
        Self(schema)
    }

    /// Narrow an arbitrary value to a schema view; non-objects yield `None`.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self)
    }

    pub fn as_map(&self) -> &'a JsonMap {
        self.0
    }

    /// The `type` keyword when it is a single string.
    pub fn type_name(&self) -> Option<&'a str> {
        self.0.get("type")?.as_str()
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.type_name() == Some(name)
    }

    /// `type: object` together with a truthy `properties` keyword.
    pub fn is_object_with_properties(&self) -> bool {
        self.has_type("object") && is_truthy(self.0.get("properties"))
    }

    /// The `enum` keyword when it is a non-empty array.
    pub fn enum_values(&self) -> Option<&'a [Value]> {
        match self.0.get("enum")?.as_array()?.as_slice() {
            [] => None,
            values => Some(values),
        }
    }

    /// The `default` keyword; an explicit `null` default counts as present.
    pub fn default_value(&self) -> Option<&'a Value> {
        self.0.get("default")
    }

    pub fn description(&self) -> Option<&'a str> {
        self.non_empty_string("description")
    }

    pub fn title(&self) -> Option<&'a str> {
        self.non_empty_string("title")
    }

    /// The `properties` keyword when it is an object.
    pub fn properties(&self) -> Option<&'a JsonMap> {
        self.0.get("properties")?.as_object()
    }

    /// Property entries that are themselves objects, in document order.
    pub fn property_schemas(self) -> impl Iterator<Item = (&'a str, SchemaView<'a>)> + 'a {
        self.properties()
            .into_iter()
            .flat_map(|props| props.iter())
            .filter_map(|(name, schema)| Some((name.as_str(), SchemaView::from_value(schema)?)))
    }

    /// Whether `name` is listed in the `required` array.
    pub fn requires(&self, name: &str) -> bool {
        self.0
            .get("required")
            .and_then(Value::as_array)
            .is_some_and(|names| names.iter().any(|n| n.as_str() == Some(name)))
    }

    /// The `items` keyword when it is an object schema.
    pub fn items(&self) -> Option<SchemaView<'a>> {
        SchemaView::from_value(self.0.get("items")?)
    }

    /// Truthy `oneOf`, `anyOf` or `allOf` at this level.
    pub fn has_composition(&self) -> bool {
        ["oneOf", "anyOf", "allOf"]
            .iter()
            .any(|key| is_truthy(self.0.get(*key)))
    }

    /// A keyword holding a JSON number.
    pub fn number(&self, key: &str) -> Option<&'a Number> {
        match self.0.get(key)? {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// A keyword holding a JSON string (possibly empty).
    pub fn string(&self, key: &str) -> Option<&'a str> {
        self.0.get(key)?.as_str()
    }

    fn non_empty_string(&self, key: &str) -> Option<&'a str> {
        self.string(key).filter(|s| !s.is_empty())
    }
}
