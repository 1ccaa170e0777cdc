use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Input widget family a field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Enum,
    Json,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Enum => "enum",
            FieldKind::Json => "json",
        }
    }
}

/// One UI-agnostic form field.
///
/// `options` is only set for [`FieldKind::Enum`]; the length and pattern
/// constraints only for [`FieldKind::String`]; the bounds only for
/// [`FieldKind::Number`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,

    /// `Some(Value::Null)` is an explicit `null` default, distinct from none.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
}

impl FormField {
    /// A bare field with no default, options or constraints.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        kind: FieldKind,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required,
            default_value: None,
            options: None,
            min_length: None,
            max_length: None,
            pattern: None,
            minimum: None,
            maximum: None,
        }
    }
}

/// The form for one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormModel {
    pub endpoint_id: String,
    pub fields: Vec<FormField>,
}

/// How the request body of an endpoint is presented.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyFields {
    /// No `application/json` body schema.
    None,
    /// The schema is too complex to flatten: one raw JSON field named `body`.
    Raw(FormField),
    /// One field per top-level property.
    Fields(Vec<FormField>),
}

impl BodyFields {
    pub fn fields(&self) -> &[FormField] {
        match self {
            BodyFields::None => &[],
            BodyFields::Raw(field) => std::slice::from_ref(field),
            BodyFields::Fields(fields) => fields,
        }
    }
}

/// A compiled form with query and body fields kept apart.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledForm {
    pub endpoint_id: String,
    pub query: Vec<FormField>,
    pub body: BodyFields,
}

impl CompiledForm {
    /// A form with no fields at all.
    pub fn empty(endpoint_id: &str) -> Self {
        Self {
            endpoint_id: endpoint_id.to_string(),
            query: Vec::new(),
            body: BodyFields::None,
        }
    }

    /// Flatten into the rendered field order: query fields, then body fields.
    pub fn into_model(self) -> FormModel {
        let mut fields = self.query;
        match self.body {
            BodyFields::None => {}
            BodyFields::Raw(field) => fields.push(field),
            BodyFields::Fields(body) => fields.extend(body),
        }
        FormModel {
            endpoint_id: self.endpoint_id,
            fields,
        }
    }
}

/// A key that is present always deserializes to `Some`, even when `null`.
/// Absent keys fall back to `None` through `#[serde(default)]`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_serializes_camel_case_and_omits_absent() {
        let mut field = FormField::new("name", "Name", FieldKind::String, true);
        field.min_length = Some(Number::from(1u64));
        field.default_value = Some(Value::Null);

        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "name",
                "label": "Name",
                "kind": "string",
                "required": true,
                "defaultValue": null,
                "minLength": 1
            })
        );
    }

    #[test]
    fn test_into_model_orders_query_before_body() {
        let form = CompiledForm {
            endpoint_id: "POST /x".to_string(),
            query: vec![FormField::new("q", "Q", FieldKind::String, false)],
            body: BodyFields::Fields(vec![
                FormField::new("a", "A", FieldKind::Number, false),
                FormField::new("b", "B", FieldKind::Boolean, true),
            ]),
        };
        let names: Vec<String> = form.into_model().fields.into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["q", "a", "b"]);
    }

    #[test]
    fn test_kind_as_str_matches_serde() {
        for kind in [
            FieldKind::String,
            FieldKind::Number,
            FieldKind::Boolean,
            FieldKind::Enum,
            FieldKind::Json,
        ] {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }

    #[test]
    fn test_null_default_survives_round_trip() {
        let mut field = FormField::new("note", "Note", FieldKind::String, false);
        field.default_value = Some(Value::Null);

        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["defaultValue"], Value::Null);
        let back: FormField = serde_json::from_value(json).unwrap();
        assert_eq!(back, field);

        let absent = FormField::new("note", "Note", FieldKind::String, false);
        let back: FormField =
            serde_json::from_value(serde_json::to_value(&absent).unwrap()).unwrap();
        assert_eq!(back.default_value, None);
    }
}
