use runform_core::parse;
use runform_core::transform::list_endpoints;

const USERS_API: &str = include_str!("fixtures/users-api.json");
const PETSTORE: &str = include_str!("fixtures/petstore.yaml");

fn ids(doc: &serde_json::Value) -> Vec<String> {
    list_endpoints(doc).into_iter().map(|e| e.id).collect()
}

#[test]
fn list_users_api_in_document_order() {
    let doc = parse::from_json(USERS_API).expect("should parse users-api.json");
    assert_eq!(
        ids(&doc),
        [
            "POST /users",
            "GET /users",
            "GET /items",
            "GET /search results",
            "DELETE /orders",
            "POST /orders",
        ]
    );
}

#[test]
fn list_users_api_metadata() {
    let doc = parse::from_json(USERS_API).unwrap();
    let endpoints = list_endpoints(&doc);

    let create = &endpoints[0];
    assert_eq!(create.method, "POST");
    assert_eq!(create.path, "/users");
    assert_eq!(create.summary.as_deref(), Some("Create a user"));
    assert_eq!(create.description, None);

    let items = endpoints
        .iter()
        .find(|e| e.id == "GET /items")
        .expect("should list GET /items");
    assert_eq!(items.summary, None);
    assert_eq!(items.description.as_deref(), Some("List items"));

    // Uppercase method keys are still listed, normalized.
    let purge = endpoints
        .iter()
        .find(|e| e.path == "/orders" && e.method == "DELETE")
        .expect("should list DELETE /orders");
    assert_eq!(purge.id, "DELETE /orders");
}

#[test]
fn list_petstore_yaml_skips_non_method_keys() {
    let doc = parse::from_yaml(PETSTORE).expect("should parse petstore.yaml");
    assert_eq!(
        ids(&doc),
        [
            "GET /pets",
            "POST /pets",
            "PUT /pets/{petId}",
            "DELETE /pets/{petId}",
            "PATCH /store/inventory",
            "POST /upload",
        ]
    );
}

#[test]
fn list_endpoint_with_space_in_path() {
    let doc = parse::from_json(USERS_API).unwrap();
    let search = list_endpoints(&doc)
        .into_iter()
        .find(|e| e.path == "/search results")
        .expect("should list the search endpoint");
    assert_eq!(search.id, "GET /search results");
}

#[test]
fn list_without_paths_is_empty() {
    for input in [
        r#"{"openapi": "3.0.0"}"#,
        r#"{"openapi": "3.0.0", "paths": null}"#,
        r#"{"openapi": "3.0.0", "paths": ["/a"]}"#,
        r#"{"openapi": "3.0.0", "paths": "nope"}"#,
    ] {
        let doc = parse::from_json(input).unwrap();
        assert!(list_endpoints(&doc).is_empty(), "expected no endpoints for {input}");
    }
}

#[test]
fn yaml_integer_keys_become_strings() {
    let doc = parse::from_yaml(PETSTORE).unwrap();
    let responses = &doc["paths"]["/pets"]["get"]["responses"];
    assert_eq!(responses["200"]["description"], "A page of pets");
    assert_eq!(doc["paths"]["/pets"]["post"]["responses"]["201"]["description"], "Created");
}

#[test]
fn yaml_and_json_documents_share_the_value_model() {
    let yaml = parse::from_yaml(
        "openapi: 3.0.0\npaths:\n  /b:\n    get: {}\n  /a:\n    post: {}\n",
    )
    .unwrap();
    let json = parse::from_json(
        r#"{"openapi": "3.0.0", "paths": {"/b": {"get": {}}, "/a": {"post": {}}}}"#,
    )
    .unwrap();
    assert_eq!(yaml, json);
    assert_eq!(ids(&yaml), ["GET /b", "POST /a"]);
}

#[test]
fn load_fixtures_from_disk() {
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("openapi.json");
    std::fs::write(&json_path, USERS_API).unwrap();
    let doc = parse::from_path(&json_path).expect("should load JSON by extension");
    assert_eq!(list_endpoints(&doc).len(), 6);

    let yaml_path = dir.path().join("openapi.yml");
    std::fs::write(&yaml_path, PETSTORE).unwrap();
    let doc = parse::from_path(&yaml_path).expect("should load YAML by extension");
    assert_eq!(list_endpoints(&doc).len(), 6);
}
