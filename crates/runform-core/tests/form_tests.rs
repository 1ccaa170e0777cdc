use runform_core::model::{BodyFields, FieldKind, FormField};
use runform_core::parse;
use runform_core::transform::{compile, compile_sections, list_endpoints};
use serde_json::{Number, Value, json};

const USERS_API: &str = include_str!("fixtures/users-api.json");
const PETSTORE: &str = include_str!("fixtures/petstore.yaml");

fn users() -> Value {
    parse::from_json(USERS_API).expect("should parse users-api.json")
}

fn petstore() -> Value {
    parse::from_yaml(PETSTORE).expect("should parse petstore.yaml")
}

fn summary(fields: &[FormField]) -> Vec<(&str, FieldKind, bool)> {
    fields
        .iter()
        .map(|f| (f.name.as_str(), f.kind, f.required))
        .collect()
}

#[test]
fn compile_create_user() {
    let form = compile(&users(), "POST /users");
    assert_eq!(form.endpoint_id, "POST /users");
    assert_eq!(
        summary(&form.fields),
        [("name", FieldKind::String, true), ("age", FieldKind::Number, false)]
    );

    let age = &form.fields[1];
    assert_eq!(age.label, "Age");
    assert_eq!(age.minimum, Some(Number::from(0u64)));
    assert_eq!(age.maximum, None);
}

#[test]
fn compile_item_listing_query() {
    let form = compile(&users(), "GET /items");
    assert_eq!(
        summary(&form.fields),
        [("limit", FieldKind::Number, false), ("sort", FieldKind::Enum, true)]
    );

    assert_eq!(form.fields[0].maximum, Some(Number::from(100u64)));

    let sort = &form.fields[1];
    assert_eq!(sort.options.as_deref(), Some(&["asc".to_string(), "desc".to_string()][..]));
    assert_eq!(sort.default_value, Some(json!("asc")));
    assert_eq!(sort.min_length, None);
}

#[test]
fn compile_path_with_space() {
    let form = compile(&users(), "GET /search results");
    assert_eq!(form.endpoint_id, "GET /search results");
    assert_eq!(summary(&form.fields), [("q", FieldKind::String, true)]);

    let q = &form.fields[0];
    assert_eq!(q.min_length, Some(Number::from(2u64)));
    assert_eq!(q.pattern.as_deref(), Some("[a-z ]+"));
}

#[test]
fn compile_skips_non_query_parameters() {
    let form = compile(&users(), "GET /users");
    assert_eq!(summary(&form.fields), [("page", FieldKind::Number, false)]);
    assert_eq!(form.fields[0].default_value, Some(json!(1)));
}

#[test]
fn compile_array_of_objects_as_raw_body() {
    let sections = compile_sections(&users(), "POST /orders");
    assert!(sections.query.is_empty());
    let BodyFields::Raw(body) = &sections.body else {
        panic!("expected a raw body field, got {:?}", sections.body);
    };
    assert_eq!(body.name, "body");
    assert_eq!(body.label, "Request Body (JSON)");
    assert_eq!(body.kind, FieldKind::Json);
    assert!(body.required);
}

#[test]
fn compile_petstore_query_then_body() {
    let doc = petstore();

    let list = compile(&doc, "GET /pets");
    assert_eq!(
        summary(&list.fields),
        [("limit", FieldKind::Number, false), ("status", FieldKind::Enum, false)]
    );
    assert_eq!(list.fields[0].minimum, Some(Number::from(1u64)));
    assert_eq!(list.fields[0].maximum, Some(Number::from(50u64)));

    let add = compile(&doc, "POST /pets");
    assert_eq!(
        summary(&add.fields),
        [
            ("name", FieldKind::String, true),
            ("vaccinated", FieldKind::Boolean, true),
            ("owner_email", FieldKind::String, false),
            ("tags", FieldKind::Json, false),
            ("extra", FieldKind::Json, false),
        ]
    );
    let labels: Vec<&str> = add.fields.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(labels, ["Pet name", "Vaccinated", "Owner Email", "Tags", "Extra"]);
    assert_eq!(add.fields[0].max_length, Some(Number::from(40u64)));
}

#[test]
fn compile_deep_and_composed_bodies_as_raw() {
    let doc = petstore();

    let update = compile(&doc, "PUT /pets/{petId}");
    assert_eq!(summary(&update.fields), [("body", FieldKind::Json, false)]);

    let inventory = compile(&doc, "PATCH /store/inventory");
    assert_eq!(summary(&inventory.fields), [("body", FieldKind::Json, false)]);
}

#[test]
fn compile_without_json_body_or_operation() {
    let doc = petstore();

    assert!(compile(&doc, "POST /upload").fields.is_empty());
    assert!(compile(&doc, "DELETE /pets/{petId}").fields.is_empty());
    assert!(compile(&doc, "GET /missing").fields.is_empty());
    assert!(compile(&doc, "not-an-id").fields.is_empty());

    let unknown = compile(&doc, "GET /missing");
    assert_eq!(unknown.endpoint_id, "GET /missing");
}

#[test]
fn compile_every_listed_endpoint_is_idempotent() {
    for doc in [users(), petstore()] {
        for endpoint in list_endpoints(&doc) {
            let first = compile(&doc, &endpoint.id);
            let second = compile(&doc, &endpoint.id);
            assert_eq!(first, second, "compile should be stable for {}", endpoint.id);
        }
    }
}

#[test]
fn form_model_serializes_with_camel_case_keys() {
    let form = compile(&users(), "GET /search results");
    let value = serde_json::to_value(&form).unwrap();
    assert_eq!(
        value,
        json!({
            "endpoint_id": "GET /search results",
            "fields": [{
                "name": "q",
                "label": "Q",
                "kind": "string",
                "required": true,
                "minLength": 2,
                "pattern": "[a-z ]+"
            }]
        })
    );
}
