use serde_json::Value;

use crate::model::{BodyFields, CompiledForm, FieldKind, FormField, FormModel, split_endpoint_id};
use crate::parse::reader::{self, JsonMap};
use crate::parse::schema::SchemaView;

use super::complexity::is_complex;
use super::field_mapper::to_field;

/// Name of the single field used when the body is edited as raw JSON.
pub const RAW_BODY_FIELD: &str = "body";
/// Label of the raw body field.
pub const RAW_BODY_LABEL: &str = "Request Body (JSON)";

/// Compile the form for `endpoint_id` (`"<METHOD> <path>"`).
///
/// Query parameters come first in document order, followed by the request
/// body fields. Any lookup that fails yields a model with no fields.
pub fn compile(doc: &Value, endpoint_id: &str) -> FormModel {
    compile_sections(doc, endpoint_id).into_model()
}

/// Like [`compile`], but keeps query and body fields apart.
pub fn compile_sections(doc: &Value, endpoint_id: &str) -> CompiledForm {
    let Some(operation) = resolve_operation(doc, endpoint_id) else {
        log::debug!("no operation found for {endpoint_id:?}");
        return CompiledForm::empty(endpoint_id);
    };

    CompiledForm {
        endpoint_id: endpoint_id.to_string(),
        query: query_fields(operation),
        body: body_fields(operation),
    }
}

/// Resolve the operation object an endpoint identifier points at.
pub fn resolve_operation<'a>(doc: &'a Value, endpoint_id: &str) -> Option<&'a JsonMap> {
    let (method, path) = split_endpoint_id(endpoint_id)?;
    reader::operation(doc, method, path)
}

fn query_fields(operation: &JsonMap) -> Vec<FormField> {
    let Some(params) = reader::parameters(operation) else {
        return Vec::new();
    };

    params
        .iter()
        .filter_map(reader::query_parameter)
        .map(|param| to_field(param.name, SchemaView::new(param.schema), param.required))
        .collect()
}

fn body_fields(operation: &JsonMap) -> BodyFields {
    let Some(body) = reader::request_body(operation) else {
        return BodyFields::None;
    };
    let Some(schema) = reader::json_body_schema(body) else {
        return BodyFields::None;
    };
    let schema = SchemaView::new(schema);

    if is_complex(schema) {
        let required = reader::request_body_required(body);
        return BodyFields::Raw(FormField::new(
            RAW_BODY_FIELD,
            RAW_BODY_LABEL,
            FieldKind::Json,
            required,
        ));
    }

    if schema.properties().is_none() && !schema.has_type("object") {
        log::debug!("request body schema is neither complex nor an object");
        return BodyFields::None;
    }

    let fields = schema
        .property_schemas()
        .map(|(name, prop)| to_field(name, prop, schema.requires(name)))
        .collect();
    BodyFields::Fields(fields)
}
