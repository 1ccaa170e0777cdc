use crate::model::{FieldKind, FormField};
use crate::parse::schema::SchemaView;

use super::label::{display_value, humanize};

/// Map one JSON Schema fragment to a form field.
///
/// Kind priority: non-empty `enum`, then `boolean`, then `number`/`integer`,
/// then `object`/`array` as raw JSON; anything else is a plain string.
/// Constraints are only copied onto the kind they apply to.
pub fn to_field(name: &str, schema: SchemaView<'_>, required: bool) -> FormField {
    let (kind, options) = select_kind(schema);
    let mut field = FormField::new(name, field_label(name, schema), kind, required);

    field.default_value = schema.default_value().cloned();
    field.options = options;

    match kind {
        FieldKind::String => {
            field.min_length = schema.number("minLength").cloned();
            field.max_length = schema.number("maxLength").cloned();
            field.pattern = schema.string("pattern").map(str::to_string);
        }
        FieldKind::Number => {
            field.minimum = schema.number("minimum").cloned();
            field.maximum = schema.number("maximum").cloned();
        }
        FieldKind::Boolean | FieldKind::Enum | FieldKind::Json => {}
    }

    field
}

fn select_kind(schema: SchemaView<'_>) -> (FieldKind, Option<Vec<String>>) {
    if let Some(values) = schema.enum_values() {
        let options = values.iter().map(display_value).collect();
        return (FieldKind::Enum, Some(options));
    }

    let kind = match schema.type_name() {
        Some("boolean") => FieldKind::Boolean,
        Some("number" | "integer") => FieldKind::Number,
        Some("object" | "array") => FieldKind::Json,
        _ => FieldKind::String,
    };
    (kind, None)
}

/// Description, then title, then the humanized field name.
fn field_label(name: &str, schema: SchemaView<'_>) -> String {
    schema
        .description()
        .or_else(|| schema.title())
        .map_or_else(|| humanize(name), str::to_string)
}
