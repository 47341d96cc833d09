//! Composition of the OpenAPI document for a list of DocTypes.
//!
//! Each DocType is turned into an independent [`EntityFragment`] (component schema plus its two
//! resource paths). Fragments are merged in the order the DocTypes were requested, so the output
//! only depends on that order and on the metadata.

use bon::Builder;

use super::{
  assembler::SchemaAssembler,
  document::{Info, OpenApiDocument, Operation, Parameter, PathItem, Response, SchemaRef},
  metrics::{GenerationStats, GenerationWarning, SkipReason},
  schema::{EntitySchema, SchemaType},
};
use crate::metadata::{DocTypeMeta, MetadataProvider};

pub const DEFAULT_TITLE: &str = "ERPNext API";
pub const DEFAULT_DESCRIPTION: &str = "Auto-generated OpenAPI specification for ERPNext";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

const RESOURCE_ROOT: &str = "/api/resource";

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ComposeOptions {
  #[builder(into, default = String::from(DEFAULT_TITLE))]
  pub title: String,
  #[builder(into, default = String::from(DEFAULT_DESCRIPTION))]
  pub description: String,
  #[builder(into, default = String::from(DEFAULT_VERSION))]
  pub version: String,
  #[builder(into, default = String::from(DEFAULT_SERVER_URL))]
  pub server_url: String,
}

impl Default for ComposeOptions {
  fn default() -> Self {
    Self::builder().build()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
  pub document: OpenApiDocument,
  pub stats: GenerationStats,
}

/// Component schema and resource paths contributed by one DocType.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityFragment {
  pub schema: EntitySchema,
  pub paths: [(String, PathItem); 2],
}

#[derive(Debug, Clone, Default)]
pub struct SpecComposer {
  options: ComposeOptions,
  assembler: SchemaAssembler,
}

impl SpecComposer {
  pub fn new(options: ComposeOptions) -> Self {
    Self {
      options,
      assembler: SchemaAssembler::with_envelope(),
    }
  }

  pub fn compose<P>(&self, doctypes: &[String], provider: &P) -> Composition
  where
    P: MetadataProvider + ?Sized,
  {
    let fragments = doctypes
      .iter()
      .map(|doctype| (doctype.as_str(), self.fragment(doctype, provider.doctype_meta(doctype))));
    self.merge(doctypes.len(), fragments)
  }

  /// Fragment for a single DocType; independent of every other DocType.
  pub fn fragment(&self, doctype: &str, meta: Option<&DocTypeMeta>) -> Result<EntityFragment, SkipReason> {
    let Some(meta) = meta else {
      return Err(SkipReason::NoMetadata);
    };
    let schema = self.assembler.assemble(doctype, Some(meta)).ok_or(SkipReason::NoFields)?;
    Ok(EntityFragment {
      schema,
      paths: crud_paths(doctype),
    })
  }

  /// Folds fragments into one document, in iteration order.
  pub fn merge<'a>(
    &self,
    requested: usize,
    fragments: impl IntoIterator<Item = (&'a str, Result<EntityFragment, SkipReason>)>,
  ) -> Composition {
    let mut document = OpenApiDocument::new(self.info(), self.options.server_url.clone());
    let mut stats = GenerationStats {
      doctypes_requested: requested,
      ..Default::default()
    };

    for (doctype, fragment) in fragments {
      match fragment {
        Ok(EntityFragment { schema, paths }) => {
          document.components.schemas.insert(schema.name.clone(), schema);
          document.paths.extend(paths);
        }
        Err(reason) => stats.record_warning(GenerationWarning::DocTypeSkipped {
          doctype: doctype.to_string(),
          reason,
        }),
      }
    }

    stats.record_document(&document);
    stats.record_warnings(
      document
        .dangling_refs()
        .into_iter()
        .map(|reference| GenerationWarning::DanglingReference { reference }),
    );

    Composition { document, stats }
  }

  fn info(&self) -> Info {
    Info {
      title: self.options.title.clone(),
      description: self.options.description.clone(),
      version: self.options.version.clone(),
    }
  }
}

pub fn collection_path(doctype: &str) -> String {
  format!("{RESOURCE_ROOT}/{doctype}")
}

pub fn item_path(doctype: &str) -> String {
  format!("{RESOURCE_ROOT}/{doctype}/{{name}}")
}

/// `GET`/`POST` on the collection and `GET`/`PUT`/`DELETE` on a named document.
pub fn crud_paths(doctype: &str) -> [(String, PathItem); 2] {
  let component = || SchemaRef::component(doctype);
  let wrapped = || SchemaRef::data_envelope(component());

  let collection = PathItem {
    get: Some(
      Operation::new(format!("List {doctype} documents"), doctype)
        .parameter(Parameter::query(
          "fields",
          SchemaType::String,
          "Comma-separated list of fields",
        ))
        .parameter(Parameter::query("filters", SchemaType::String, "JSON string of filters"))
        .parameter(Parameter::query("limit_start", SchemaType::Integer, "Starting index"))
        .parameter(Parameter::query("limit_page_length", SchemaType::Integer, "Page size"))
        .response(
          200,
          Response::json(
            format!("List of {doctype} documents"),
            SchemaRef::data_envelope(SchemaRef::array_of(component())),
          ),
        ),
    ),
    post: Some(
      Operation::new(format!("Create {doctype} document"), doctype)
        .body(component())
        .response(200, Response::json(format!("{doctype} document created"), wrapped())),
    ),
    ..Default::default()
  };

  let item = PathItem {
    get: Some(
      Operation::new(format!("Get {doctype} document"), doctype)
        .parameter(Parameter::path("name"))
        .response(200, Response::json(format!("{doctype} document"), wrapped())),
    ),
    put: Some(
      Operation::new(format!("Update {doctype} document"), doctype)
        .parameter(Parameter::path("name"))
        .body(component())
        .response(200, Response::json(format!("{doctype} document updated"), wrapped())),
    ),
    delete: Some(
      Operation::new(format!("Delete {doctype} document"), doctype)
        .parameter(Parameter::path("name"))
        .response(202, Response::empty(format!("{doctype} document deleted"))),
    ),
    ..Default::default()
  };

  [(collection_path(doctype), collection), (item_path(doctype), item)]
}
