use serde_json::{Value, json};

use super::{CUSTOMER, SALES_ORDER, TODO_MESSAGE, fixture};
use crate::{
  generator::{
    composer::{
      ComposeOptions, DEFAULT_DESCRIPTION, DEFAULT_SERVER_URL, DEFAULT_TITLE, DEFAULT_VERSION, SpecComposer,
      collection_path, item_path,
    },
    metrics::{GenerationWarning, SkipReason},
  },
  metadata::{MetadataProvider, MetadataStore},
};

fn store() -> MetadataStore {
  [
    ("Customer".to_string(), fixture(CUSTOMER)),
    ("Sales Order".to_string(), fixture(SALES_ORDER)),
    ("ToDo".to_string(), fixture(TODO_MESSAGE)),
    ("Empty".to_string(), fixture(r#"{"docs": []}"#)),
  ]
  .into_iter()
  .collect()
}

fn doctypes(names: &[&str]) -> Vec<String> {
  names.iter().map(ToString::to_string).collect()
}

fn compose(names: &[&str]) -> Value {
  let composition = SpecComposer::default().compose(&doctypes(names), &store());
  serde_json::to_value(&composition.document).unwrap()
}

#[test]
fn test_customer_paths() {
  let document = compose(&["Customer"]);

  let paths = document["paths"].as_object().unwrap();
  let keys: Vec<_> = paths.keys().map(String::as_str).collect();
  assert_eq!(keys, vec!["/api/resource/Customer", "/api/resource/Customer/{name}"]);

  let collection: Vec<_> = paths["/api/resource/Customer"].as_object().unwrap().keys().cloned().collect();
  assert_eq!(collection, vec!["get", "post"]);
  let item: Vec<_> = paths["/api/resource/Customer/{name}"]
    .as_object()
    .unwrap()
    .keys()
    .cloned()
    .collect();
  assert_eq!(item, vec!["get", "put", "delete"]);

  assert!(document["components"]["schemas"]["Customer"].is_object());
}

#[test]
fn test_collection_operations() {
  let document = compose(&["Customer"]);
  let collection = &document["paths"]["/api/resource/Customer"];
  let reference = json!({ "$ref": "#/components/schemas/Customer" });

  let list = &collection["get"];
  assert_eq!(list["summary"], "List Customer documents");
  assert_eq!(list["tags"], json!(["Customer"]));
  assert_eq!(
    list["parameters"],
    json!([
      { "name": "fields", "in": "query", "schema": { "type": "string" }, "description": "Comma-separated list of fields" },
      { "name": "filters", "in": "query", "schema": { "type": "string" }, "description": "JSON string of filters" },
      { "name": "limit_start", "in": "query", "schema": { "type": "integer" }, "description": "Starting index" },
      { "name": "limit_page_length", "in": "query", "schema": { "type": "integer" }, "description": "Page size" }
    ])
  );
  assert_eq!(
    list["responses"]["200"]["content"]["application/json"]["schema"],
    json!({ "type": "object", "properties": { "data": { "type": "array", "items": reference } } })
  );

  let create = &collection["post"];
  assert!(create.get("parameters").is_none());
  assert_eq!(create["requestBody"]["required"], true);
  assert_eq!(create["requestBody"]["content"]["application/json"]["schema"], reference);
  assert_eq!(
    create["responses"]["200"]["content"]["application/json"]["schema"],
    json!({ "type": "object", "properties": { "data": reference } })
  );
}

#[test]
fn test_item_operations() {
  let document = compose(&["Customer"]);
  let item = &document["paths"]["/api/resource/Customer/{name}"];
  let name_param = json!([{ "name": "name", "in": "path", "required": true, "schema": { "type": "string" } }]);
  let wrapped = json!({ "type": "object", "properties": { "data": { "$ref": "#/components/schemas/Customer" } } });

  for method in ["get", "put", "delete"] {
    assert_eq!(item[method]["parameters"], name_param, "{method} parameters");
    assert_eq!(item[method]["tags"], json!(["Customer"]));
  }

  assert_eq!(item["get"]["responses"]["200"]["content"]["application/json"]["schema"], wrapped);
  assert_eq!(item["put"]["responses"]["200"]["content"]["application/json"]["schema"], wrapped);
  assert_eq!(
    item["put"]["requestBody"]["content"]["application/json"]["schema"],
    json!({ "$ref": "#/components/schemas/Customer" })
  );
  assert_eq!(
    item["delete"]["responses"],
    json!({ "202": { "description": "Customer document deleted" } })
  );
}

#[test]
fn test_document_skeleton() {
  let document = compose(&[]);

  assert_eq!(document["openapi"], "3.0.3");
  assert_eq!(
    document["info"],
    json!({ "title": DEFAULT_TITLE, "description": DEFAULT_DESCRIPTION, "version": DEFAULT_VERSION })
  );
  assert_eq!(
    document["servers"],
    json!([{ "url": DEFAULT_SERVER_URL, "description": "ERPNext Server" }])
  );
  assert_eq!(
    document["components"]["securitySchemes"]["ApiKeyAuth"],
    json!({ "type": "apiKey", "in": "header", "name": "Authorization", "description": "Use \"token api_key:api_secret\"" })
  );
  assert_eq!(document["components"]["schemas"], json!({}));
  assert_eq!(document["security"], json!([{ "ApiKeyAuth": [] }]));
  assert_eq!(document["paths"], json!({}));

  let keys: Vec<_> = document.as_object().unwrap().keys().cloned().collect();
  assert_eq!(keys, vec!["openapi", "info", "servers", "components", "security", "paths"]);
}

#[test]
fn test_info_overrides() {
  let options = ComposeOptions::builder()
    .title("Acme ERP")
    .version("2.1.0")
    .server_url("https://erp.acme.test")
    .build();
  let composition = SpecComposer::new(options).compose(&[], &store());

  assert_eq!(composition.document.info.title, "Acme ERP");
  assert_eq!(composition.document.info.description, DEFAULT_DESCRIPTION);
  assert_eq!(composition.document.info.version, "2.1.0");
  assert_eq!(composition.document.servers[0].url, "https://erp.acme.test");
}

#[test]
fn test_skips_unknown_and_empty_doctypes() {
  let composition = SpecComposer::default().compose(&doctypes(&["Ghost", "Customer", "Empty"]), &store());

  let schemas: Vec<_> = composition.document.components.schemas.keys().cloned().collect();
  assert_eq!(schemas, vec!["Customer"]);
  assert_eq!(composition.document.paths.len(), 2);

  assert_eq!(
    composition.stats.warnings,
    vec![
      GenerationWarning::DocTypeSkipped {
        doctype: "Ghost".to_string(),
        reason: SkipReason::NoMetadata,
      },
      GenerationWarning::DocTypeSkipped {
        doctype: "Empty".to_string(),
        reason: SkipReason::NoFields,
      },
    ]
  );
  assert_eq!(composition.stats.skipped_count(), 2);
  assert_eq!(composition.stats.doctypes_requested, 3);
  assert_eq!(composition.stats.schemas_generated, 1);
}

#[test]
fn test_repeated_doctype_counted_once() {
  let once = SpecComposer::default().compose(&doctypes(&["Customer"]), &store());
  let twice = SpecComposer::default().compose(&doctypes(&["Customer", "Customer"]), &store());

  assert_eq!(twice.document, once.document);
  assert_eq!(twice.stats.doctypes_requested, 2);
  assert_eq!(twice.stats.schemas_generated, 1);
  assert_eq!(twice.stats.properties_generated, once.stats.properties_generated);
  assert_eq!(twice.stats.properties_generated, 15);
  assert_eq!(twice.stats.enums_generated, once.stats.enums_generated);
  assert_eq!(twice.stats.operations_generated, 5);
}

#[test]
fn test_order_follows_request() {
  let composition = SpecComposer::default().compose(&doctypes(&["ToDo", "Sales Order", "Customer"]), &store());
  let schemas: Vec<_> = composition.document.components.schemas.keys().cloned().collect();
  assert_eq!(schemas, vec!["ToDo", "Sales Order", "Customer"]);

  let paths: Vec<_> = composition.document.paths.keys().cloned().collect();
  assert_eq!(
    paths,
    vec![
      collection_path("ToDo"),
      item_path("ToDo"),
      collection_path("Sales Order"),
      item_path("Sales Order"),
      collection_path("Customer"),
      item_path("Customer"),
    ]
  );
  assert_eq!(composition.stats.paths_generated, 6);
  assert_eq!(composition.stats.operations_generated, 15);
}

#[test]
fn test_output_is_reproducible() {
  let names = doctypes(&["Customer", "Sales Order", "ToDo"]);
  let first = SpecComposer::default().compose(&names, &store()).document.to_json().unwrap();
  let second = SpecComposer::default().compose(&names, &store()).document.to_json().unwrap();
  assert_eq!(first, second);
  assert!(first.ends_with("}\n"));
}

#[test]
fn test_references_resolve() {
  let composition = SpecComposer::default().compose(&doctypes(&["Customer", "Sales Order"]), &store());
  let references = composition.document.references();
  assert_eq!(references.len(), 12);
  assert!(composition.document.dangling_refs().is_empty());
  assert!(
    !composition
      .stats
      .warnings
      .iter()
      .any(|warning| matches!(warning, GenerationWarning::DanglingReference { .. }))
  );
}

#[test]
fn test_dangling_reference_detected() {
  let mut composition = SpecComposer::default().compose(&doctypes(&["Customer"]), &store());
  composition.document.components.schemas.clear();
  let dangling = composition.document.dangling_refs();
  assert_eq!(dangling.len(), 6);
  assert!(dangling.iter().all(|reference| reference == "#/components/schemas/Customer"));
}

#[test]
fn test_fragments_merge_in_given_order() {
  let composer = SpecComposer::default();
  let store = store();
  let names = doctypes(&["Customer", "ToDo"]);

  let mut fragments: Vec<_> = names
    .iter()
    .map(|name| (name.as_str(), composer.fragment(name, store.doctype_meta(name))))
    .collect();
  let sequential = composer.merge(names.len(), fragments.clone());

  fragments.reverse();
  let reversed = composer.merge(names.len(), fragments);

  assert_eq!(sequential, composer.compose(&names, &store));
  let order: Vec<_> = reversed.document.components.schemas.keys().cloned().collect();
  assert_eq!(order, vec!["ToDo", "Customer"]);
}

#[test]
fn test_document_parses_as_openapi() {
  let json = SpecComposer::default()
    .compose(&doctypes(&["Customer", "Sales Order", "ToDo"]), &store())
    .document
    .to_json()
    .unwrap();
  let spec = oas3::from_json(json).expect("generated document should parse");
  let operations: Vec<_> = spec.operations().collect();
  assert_eq!(operations.len(), 15);
  assert!(
    spec
      .components
      .as_ref()
      .is_some_and(|components| components.schemas.contains_key("Sales Order"))
  );
}
