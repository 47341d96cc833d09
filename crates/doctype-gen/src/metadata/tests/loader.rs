use std::path::Path;

use crate::metadata::{
  MetadataError, MetadataLoader, MetadataProvider, MetadataStore,
  loader::{candidate_paths, scrub},
};

const CUSTOMER: &str = include_str!("../../../fixtures/customer.json");
const SALES_ORDER: &str = include_str!("../../../fixtures/sales_order.json");

fn doctypes(names: &[&str]) -> Vec<String> {
  names.iter().map(ToString::to_string).collect()
}

#[test]
fn test_scrub() {
  assert_eq!(scrub("Sales Order"), "sales_order");
  assert_eq!(scrub("ToDo"), "todo");
  assert_eq!(scrub("Item-Price"), "item_price");
}

#[test]
fn test_candidate_paths_order() {
  let dir = Path::new("/meta");
  let candidates = candidate_paths(dir, "Sales Order");
  assert_eq!(
    candidates,
    vec![
      dir.join("Sales Order.json"),
      dir.join("sales_order.json"),
      dir.join("sales_order").join("sales_order.json"),
    ]
  );

  let candidates = candidate_paths(dir, "item");
  assert_eq!(candidates, vec![dir.join("item.json"), dir.join("item").join("item.json")]);
}

#[tokio::test]
async fn test_loader_parses_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("Customer.json");
  std::fs::write(&path, CUSTOMER).unwrap();

  let loader = MetadataLoader::open(&path).await.unwrap();
  assert_eq!(loader.path(), path.as_path());
  let meta = loader.parse().unwrap();
  assert_eq!(meta.name(), Some("Customer"));
  assert!(meta.fields().is_some_and(|fields| !fields.is_empty()));
}

#[tokio::test]
async fn test_load_dir_keeps_order_and_collects_failures() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("Customer.json"), CUSTOMER).unwrap();
  std::fs::create_dir(dir.path().join("sales_order")).unwrap();
  std::fs::write(dir.path().join("sales_order").join("sales_order.json"), SALES_ORDER).unwrap();
  std::fs::write(dir.path().join("Broken.json"), r#"{"fields": [{"fieldname": 42}]}"#).unwrap();

  let report = MetadataStore::load_dir(dir.path(), &doctypes(&["Sales Order", "Missing", "Customer", "Broken"]))
    .await
    .unwrap();

  assert_eq!(report.store.doctypes().collect::<Vec<_>>(), vec!["Sales Order", "Customer"]);
  assert!(report.store.doctype_meta("Sales Order").is_some());

  assert_eq!(report.failures.len(), 2);
  assert_eq!(report.failures[0].0, "Missing");
  assert!(matches!(report.failures[0].1, MetadataError::NotFound { .. }));
  assert_eq!(report.failures[1].0, "Broken");
  assert!(matches!(
    &report.failures[1].1,
    MetadataError::Parse { pointer, .. } if pointer == "fields[0].fieldname"
  ));
}

#[tokio::test]
async fn test_loader_points_at_bad_field_in_envelope() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("Note.json");
  std::fs::write(
    &path,
    r#"{"docs": [{"name": "Note", "fields": [{"fieldname": "a"}, {"fieldname": "b", "options": 5}]}]}"#,
  )
  .unwrap();

  let err = MetadataLoader::open(&path).await.unwrap().parse().unwrap_err();
  match err {
    MetadataError::Parse { pointer, .. } => assert_eq!(pointer, "docs[0].fields[1].options"),
    other => panic!("expected a parse error, got {other:?}"),
  }
}

#[tokio::test]
async fn test_loader_reports_syntax_errors() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("Cut.json");
  std::fs::write(&path, r#"{"fields": ["#).unwrap();

  let err = MetadataLoader::open(&path).await.unwrap().parse().unwrap_err();
  assert!(matches!(err, MetadataError::Parse { .. }));
}

#[tokio::test]
async fn test_load_dir_requires_directory() {
  let dir = tempfile::tempdir().unwrap();
  let missing = dir.path().join("nope");
  let result = MetadataStore::load_dir(&missing, &doctypes(&["Customer"])).await;
  assert!(matches!(result, Err(MetadataError::MissingDirectory(_))));
}

#[tokio::test]
async fn test_load_dir_with_no_doctypes() {
  let dir = tempfile::tempdir().unwrap();
  let report = MetadataStore::load_dir(dir.path(), &[]).await.unwrap();
  assert_eq!(report.store.len(), 0);
  assert!(report.failures.is_empty());
}
