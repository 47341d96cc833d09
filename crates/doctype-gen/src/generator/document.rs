//! OpenAPI 3.0 document model.
//!
//! Only the subset the generator emits is modelled. Maps are insertion ordered so serializing the
//! same document twice yields identical bytes.

use indexmap::IndexMap;
use serde::Serialize;
use strum::Display;

use super::schema::{EntitySchema, SchemaType};
use crate::utils::refs::{SCHEMA_REF_PREFIX, parse_schema_ref_path};

pub const OPENAPI_VERSION: &str = "3.0.3";
pub const JSON_MEDIA_TYPE: &str = "application/json";
pub const API_KEY_SCHEME: &str = "ApiKeyAuth";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenApiDocument {
  pub openapi: String,
  pub info: Info,
  pub servers: Vec<Server>,
  pub components: Components,
  pub security: Vec<IndexMap<String, Vec<String>>>,
  pub paths: IndexMap<String, PathItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
  pub title: String,
  pub description: String,
  pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Server {
  pub url: String,
  pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Components {
  #[serde(rename = "securitySchemes")]
  pub security_schemes: IndexMap<String, SecurityScheme>,
  pub schemas: IndexMap<String, EntitySchema>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityScheme {
  #[serde(rename = "type")]
  pub scheme_type: String,
  #[serde(rename = "in")]
  pub location: ParameterLocation,
  pub name: String,
  pub description: String,
}

impl SecurityScheme {
  /// Frappe token auth: `Authorization: token <api_key>:<api_secret>`.
  pub fn frappe_token() -> Self {
    Self {
      scheme_type: "apiKey".to_string(),
      location: ParameterLocation::Header,
      name: "Authorization".to_string(),
      description: r#"Use "token api_key:api_secret""#.to_string(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathItem {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub get: Option<Operation>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub post: Option<Operation>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub put: Option<Operation>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub delete: Option<Operation>,
}

impl PathItem {
  pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
    [
      ("get", self.get.as_ref()),
      ("post", self.post.as_ref()),
      ("put", self.put.as_ref()),
      ("delete", self.delete.as_ref()),
    ]
    .into_iter()
    .filter_map(|(method, operation)| operation.map(|op| (method, op)))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
  pub summary: String,
  pub tags: Vec<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub parameters: Vec<Parameter>,
  #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
  pub request_body: Option<RequestBody>,
  pub responses: IndexMap<String, Response>,
}

impl Operation {
  pub fn new(summary: impl Into<String>, tag: impl Into<String>) -> Self {
    Self {
      summary: summary.into(),
      tags: vec![tag.into()],
      parameters: vec![],
      request_body: None,
      responses: IndexMap::new(),
    }
  }

  #[must_use]
  pub fn parameter(mut self, parameter: Parameter) -> Self {
    self.parameters.push(parameter);
    self
  }

  #[must_use]
  pub fn body(mut self, schema: SchemaRef) -> Self {
    self.request_body = Some(RequestBody::json(schema));
    self
  }

  #[must_use]
  pub fn response(mut self, status: u16, response: Response) -> Self {
    self.responses.insert(status.to_string(), response);
    self
  }

  fn schema_refs(&self) -> impl Iterator<Item = &SchemaRef> {
    let body = self.request_body.iter().flat_map(|body| body.content.values());
    let responses = self.responses.values().flat_map(|response| response.content.values());
    body
      .chain(responses)
      .map(|media| &media.schema)
      .chain(self.parameters.iter().map(|parameter| &parameter.schema))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParameterLocation {
  Query,
  Path,
  Header,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
  pub name: String,
  #[serde(rename = "in")]
  pub location: ParameterLocation,
  #[serde(skip_serializing_if = "std::ops::Not::not")]
  pub required: bool,
  pub schema: SchemaRef,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl Parameter {
  pub fn query(name: &str, schema_type: SchemaType, description: &str) -> Self {
    Self {
      name: name.to_string(),
      location: ParameterLocation::Query,
      required: false,
      schema: SchemaRef::of(schema_type),
      description: Some(description.to_string()),
    }
  }

  /// Path parameters are always required.
  pub fn path(name: &str) -> Self {
    Self {
      name: name.to_string(),
      location: ParameterLocation::Path,
      required: true,
      schema: SchemaRef::of(SchemaType::String),
      description: None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
  pub required: bool,
  pub content: IndexMap<String, MediaType>,
}

impl RequestBody {
  pub fn json(schema: SchemaRef) -> Self {
    Self {
      required: true,
      content: IndexMap::from([(JSON_MEDIA_TYPE.to_string(), MediaType { schema })]),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
  pub description: String,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  pub content: IndexMap<String, MediaType>,
}

impl Response {
  pub fn empty(description: impl Into<String>) -> Self {
    Self {
      description: description.into(),
      content: IndexMap::new(),
    }
  }

  pub fn json(description: impl Into<String>, schema: SchemaRef) -> Self {
    Self {
      description: description.into(),
      content: IndexMap::from([(JSON_MEDIA_TYPE.to_string(), MediaType { schema })]),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
  pub schema: SchemaRef,
}

/// Either a `$ref` to a component schema or a small inline schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SchemaRef {
  Ref {
    #[serde(rename = "$ref")]
    reference: String,
  },
  Inline(Box<InlineSchema>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineSchema {
  #[serde(rename = "type")]
  pub schema_type: SchemaType,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub items: Option<SchemaRef>,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  pub properties: IndexMap<String, SchemaRef>,
}

impl SchemaRef {
  pub fn component(name: &str) -> Self {
    Self::Ref {
      reference: format!("{SCHEMA_REF_PREFIX}{name}"),
    }
  }

  pub fn of(schema_type: SchemaType) -> Self {
    Self::Inline(Box::new(InlineSchema {
      schema_type,
      items: None,
      properties: IndexMap::new(),
    }))
  }

  pub fn array_of(items: SchemaRef) -> Self {
    Self::Inline(Box::new(InlineSchema {
      schema_type: SchemaType::Array,
      items: Some(items),
      properties: IndexMap::new(),
    }))
  }

  /// Frappe wraps every resource payload as `{"data": ...}`.
  pub fn data_envelope(data: SchemaRef) -> Self {
    Self::Inline(Box::new(InlineSchema {
      schema_type: SchemaType::Object,
      items: None,
      properties: IndexMap::from([("data".to_string(), data)]),
    }))
  }

  fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
    match self {
      Self::Ref { reference } => out.push(reference),
      Self::Inline(inline) => {
        if let Some(items) = &inline.items {
          items.collect_references(out);
        }
        for property in inline.properties.values() {
          property.collect_references(out);
        }
      }
    }
  }
}

impl OpenApiDocument {
  pub fn new(info: Info, server_url: impl Into<String>) -> Self {
    Self {
      openapi: OPENAPI_VERSION.to_string(),
      info,
      servers: vec![Server {
        url: server_url.into(),
        description: "ERPNext Server".to_string(),
      }],
      components: Components {
        security_schemes: IndexMap::from([(API_KEY_SCHEME.to_string(), SecurityScheme::frappe_token())]),
        schemas: IndexMap::new(),
      },
      security: vec![IndexMap::from([(API_KEY_SCHEME.to_string(), vec![])])],
      paths: IndexMap::new(),
    }
  }

  pub fn operation_count(&self) -> usize {
    self.paths.values().map(|item| item.operations().count()).sum()
  }

  /// Every `$ref` used by an operation, in document order.
  pub fn references(&self) -> Vec<&str> {
    let mut references = vec![];
    for item in self.paths.values() {
      for (_, operation) in item.operations() {
        for schema in operation.schema_refs() {
          schema.collect_references(&mut references);
        }
      }
    }
    references
  }

  /// References that do not resolve to an entry of `components.schemas`.
  pub fn dangling_refs(&self) -> Vec<String> {
    self
      .references()
      .into_iter()
      .filter(|reference| {
        parse_schema_ref_path(reference).is_none_or(|name| !self.components.schemas.contains_key(&name))
      })
      .map(str::to_string)
      .collect()
  }

  /// Pretty-printed JSON with a trailing newline.
  pub fn to_json(&self) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(self)?;
    json.push('\n');
    Ok(json)
  }
}
