//! Turning submitted form values into run inputs.
//!
//! Values arrive the way a browser form produces them: mostly strings, with
//! numbers and booleans for number inputs and checkboxes. Each value is
//! checked against its field's kind and constraints before it is placed in
//! the query map or the request body.

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Number, Value};

use crate::error::SubmissionError;
use crate::model::{BodyFields, CompiledForm, FieldKind, FormField, RunInputs, ScalarValue};
use crate::parse::reader::JsonMap;
use crate::transform::label::display_value;

/// Validate `values` against a compiled form and split them into run inputs.
///
/// A field with no submitted value falls back to its default. Query fields
/// land in `query`; body fields land in an object under `body`, or become the
/// body itself when the form edits it as raw JSON.
pub fn build_run_inputs(
    form: &CompiledForm,
    values: &JsonMap,
) -> Result<RunInputs, SubmissionError> {
    for key in values.keys() {
        let known = form
            .query
            .iter()
            .chain(form.body.fields())
            .any(|f| &f.name == key);
        if !known {
            log::debug!("ignoring value for unknown field {key:?} of {}", form.endpoint_id);
        }
    }

    let mut query = IndexMap::new();
    for field in &form.query {
        if let Some(value) = coerce_field(field, values)? {
            query.insert(field.name.clone(), to_scalar(value));
        }
    }

    let body = match &form.body {
        BodyFields::None => None,
        BodyFields::Raw(field) => coerce_field(field, values)?,
        BodyFields::Fields(fields) => {
            let mut object = Map::new();
            for field in fields {
                if let Some(value) = coerce_field(field, values)? {
                    object.insert(field.name.clone(), value);
                }
            }
            Some(Value::Object(object))
        }
    };

    Ok(RunInputs {
        query: (!query.is_empty()).then_some(query),
        path: None,
        body,
        headers: None,
    })
}

/// Validate and convert the value submitted for one field.
///
/// `Ok(None)` means the field is optional and was left empty.
pub fn coerce_field(
    field: &FormField,
    values: &JsonMap,
) -> Result<Option<Value>, SubmissionError> {
    let Some(raw) = submitted(field, values) else {
        return match (field.required, field.kind) {
            (true, FieldKind::Boolean) => Ok(Some(Value::Bool(false))),
            (true, _) => Err(SubmissionError::MissingRequired(field.name.clone())),
            (false, _) => Ok(None),
        };
    };

    let value = match field.kind {
        FieldKind::String => coerce_string(field, raw)?,
        FieldKind::Number => coerce_number(field, raw)?,
        FieldKind::Boolean => coerce_boolean(field, raw)?,
        FieldKind::Enum => coerce_enum(field, raw)?,
        FieldKind::Json => coerce_json(field, raw)?,
    };
    Ok(Some(value))
}

/// The submitted value, or the field default; blank values count as absent.
fn submitted<'a>(field: &'a FormField, values: &'a JsonMap) -> Option<&'a Value> {
    values
        .get(&field.name)
        .filter(|v| !is_blank(v))
        .or_else(|| field.default_value.as_ref().filter(|v| !is_blank(v)))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn coerce_string(field: &FormField, raw: &Value) -> Result<Value, SubmissionError> {
    let text = match raw {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return Err(wrong_kind(field, "string")),
    };

    let length = text.chars().count() as f64;
    if let Some(min) = field.min_length.as_ref().and_then(Number::as_f64) {
        if length < min {
            return Err(out_of_range(field, "at least", format!("{min} characters")));
        }
    }
    if let Some(max) = field.max_length.as_ref().and_then(Number::as_f64) {
        if length > max {
            return Err(out_of_range(field, "at most", format!("{max} characters")));
        }
    }

    if let Some(pattern) = &field.pattern {
        match Regex::new(&format!("^(?:{pattern})$")) {
            Ok(re) if !re.is_match(&text) => {
                return Err(SubmissionError::PatternMismatch {
                    field: field.name.clone(),
                    pattern: pattern.clone(),
                });
            }
            Ok(_) => {}
            Err(e) => log::warn!("ignoring invalid pattern on field {}: {e}", field.name),
        }
    }

    Ok(Value::String(text))
}

fn coerce_number(field: &FormField, raw: &Value) -> Result<Value, SubmissionError> {
    let number = match raw {
        Value::Number(n) => n.clone(),
        Value::String(s) => parse_number(s.trim()).ok_or_else(|| wrong_kind(field, "number"))?,
        _ => return Err(wrong_kind(field, "number")),
    };

    let Some(actual) = number.as_f64() else {
        return Err(wrong_kind(field, "number"));
    };
    if let Some(min) = &field.minimum {
        if min.as_f64().is_some_and(|m| actual < m) {
            return Err(out_of_range(field, "at least", min.to_string()));
        }
    }
    if let Some(max) = &field.maximum {
        if max.as_f64().is_some_and(|m| actual > m) {
            return Err(out_of_range(field, "at most", max.to_string()));
        }
    }

    Ok(Value::Number(number))
}

/// Parse a numeric string, keeping integers integral.
fn parse_number(text: &str) -> Option<Number> {
    if let Ok(i) = text.parse::<i64>() {
        return Some(i.into());
    }
    if let Ok(u) = text.parse::<u64>() {
        return Some(u.into());
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

fn coerce_boolean(field: &FormField, raw: &Value) -> Result<Value, SubmissionError> {
    match raw {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::String(s) if s == "true" => Ok(Value::Bool(true)),
        Value::String(s) if s == "false" => Ok(Value::Bool(false)),
        _ => Err(wrong_kind(field, "boolean")),
    }
}

fn coerce_enum(field: &FormField, raw: &Value) -> Result<Value, SubmissionError> {
    let choice = display_value(raw);
    let options = field.options.as_deref().unwrap_or_default();
    if options.iter().any(|o| *o == choice) {
        Ok(Value::String(choice))
    } else {
        Err(SubmissionError::NotAnOption {
            field: field.name.clone(),
            allowed: options.to_vec(),
        })
    }
}

fn coerce_json(field: &FormField, raw: &Value) -> Result<Value, SubmissionError> {
    match raw {
        Value::String(text) => {
            serde_json::from_str(text).map_err(|e| SubmissionError::InvalidJson {
                field: field.name.clone(),
                message: e.to_string(),
            })
        }
        other => Ok(other.clone()),
    }
}

/// Query strings carry scalars; structured values travel as compact JSON.
fn to_scalar(value: Value) -> ScalarValue {
    match value {
        Value::Bool(b) => ScalarValue::Bool(b),
        Value::Number(n) => ScalarValue::Number(n),
        Value::String(s) => ScalarValue::String(s),
        other => ScalarValue::String(other.to_string()),
    }
}

fn wrong_kind(field: &FormField, expected: &'static str) -> SubmissionError {
    SubmissionError::WrongKind {
        field: field.name.clone(),
        expected,
    }
}

fn out_of_range(field: &FormField, bound: &'static str, limit: String) -> SubmissionError {
    SubmissionError::OutOfRange {
        field: field.name.clone(),
        bound,
        limit,
    }
}
