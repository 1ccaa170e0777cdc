use crate::parse::schema::SchemaView;

/// Decide whether a request body schema is too complex to flatten into
/// individual form fields.
///
/// A body is complex when it:
/// 1. uses `oneOf`, `anyOf` or `allOf` at the top level;
/// 2. nests plain objects three levels deep (`body.a.b` is an object or an
///    array); or
/// 3. has a property that is an array of structured objects.
///
/// Rules 2 and 3 only look inside a top-level `type: object` schema with
/// `properties`; the depth cutoff is fixed.
pub fn is_complex(schema: SchemaView<'_>) -> bool {
    if schema.has_composition() {
        return true;
    }

    if !schema.is_object_with_properties() {
        return false;
    }

    schema
        .property_schemas()
        .any(|(_, prop)| has_deep_object(prop) || is_array_of_objects(prop))
}

/// A nested object whose own properties are objects or arrays.
fn has_deep_object(prop: SchemaView<'_>) -> bool {
    prop.is_object_with_properties()
        && prop
            .property_schemas()
            .any(|(_, nested)| nested.has_type("object") || nested.has_type("array"))
}

fn is_array_of_objects(prop: SchemaView<'_>) -> bool {
    prop.has_type("array")
        && prop
            .items()
            .is_some_and(|items| items.is_object_with_properties())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn complex(schema: Value) -> bool {
        is_complex(SchemaView::from_value(&schema).unwrap())
    }

    #[test]
    fn test_flat_object_is_simple() {
        assert!(!complex(json!({
            "type": "object",
            "properties": {"name": {"type": "string"}, "age": {"type": "integer"}}
        })));
    }

    #[test]
    fn test_compositions_are_complex() {
        assert!(complex(json!({"oneOf": [{"type": "string"}, {"type": "integer"}]})));
        assert!(complex(json!({"anyOf": [{"type": "string"}]})));
        assert!(complex(json!({
            "type": "object",
            "properties": {"a": {"type": "string"}},
            "allOf": [{"required": ["a"]}]
        })));
    }

    #[test]
    fn test_nested_composition_is_not_inspected() {
        assert!(!complex(json!({
            "type": "object",
            "properties": {"a": {"oneOf": [{"type": "string"}]}}
        })));
    }

    #[test]
    fn test_three_object_levels_are_complex() {
        assert!(complex(json!({
            "type": "object",
            "properties": {
                "a": {
                    "type": "object",
                    "properties": {
                        "b": {"type": "object", "properties": {"c": {"type": "string"}}}
                    }
                }
            }
        })));
    }

    #[test]
    fn test_two_object_levels_are_simple() {
        assert!(!complex(json!({
            "type": "object",
            "properties": {
                "a": {"type": "object", "properties": {"b": {"type": "string"}}}
            }
        })));
    }

    #[test]
    fn test_array_under_nested_object_is_complex() {
        assert!(complex(json!({
            "type": "object",
            "properties": {
                "a": {
                    "type": "object",
                    "properties": {"tags": {"type": "array", "items": {"type": "string"}}}
                }
            }
        })));
    }

    #[test]
    fn test_nested_object_without_properties_is_not_descended() {
        assert!(!complex(json!({
            "type": "object",
            "properties": {"meta": {"type": "object"}}
        })));
    }

    #[test]
    fn test_array_of_objects_is_complex() {
        assert!(complex(json!({
            "type": "object",
            "properties": {
                "items": {
                    "type": "array",
                    "items": {"type": "object", "properties": {"sku": {"type": "string"}}}
                }
            }
        })));
    }

    #[test]
    fn test_array_of_scalars_is_simple() {
        assert!(!complex(json!({
            "type": "object",
            "properties": {"tags": {"type": "array", "items": {"type": "string"}}}
        })));
        assert!(!complex(json!({
            "type": "object",
            "properties": {"rows": {"type": "array", "items": {"type": "object"}}}
        })));
    }

    #[test]
    fn test_untyped_top_level_is_not_inspected() {
        assert!(!complex(json!({
            "properties": {
                "items": {
                    "type": "array",
                    "items": {"type": "object", "properties": {"sku": {"type": "string"}}}
                }
            }
        })));
    }

    #[test]
    fn test_malformed_properties_are_ignored() {
        assert!(!complex(json!({"type": "object", "properties": {"a": 1, "b": null}})));
        assert!(!complex(json!({"type": "object", "properties": "oops"})));
        assert!(!complex(json!({})));
    }
}
