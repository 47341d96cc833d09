use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

/// One entry of a DocType's `fields` list exactly as Frappe serializes it.
///
/// Every member is optional. Flags (`reqd`, `read_only`) arrive as `0`/`1` from Frappe but are
/// kept as raw JSON so that booleans and strings are tolerated too.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFieldDefinition {
  #[serde(default)]
  pub fieldname: Option<String>,
  #[serde(default)]
  pub fieldtype: Option<String>,
  #[serde(default)]
  pub label: Option<String>,
  #[serde(default)]
  pub options: Option<String>,
  #[serde(default)]
  pub reqd: Value,
  #[serde(default)]
  pub read_only: Value,
  #[serde(default)]
  pub default: Value,
}

/// A DocType document, the record that owns the `fields` list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocTypeDocument {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub fields: Option<Vec<RawFieldDefinition>>,
}

/// Every shape DocType metadata is known to arrive in.
///
/// The shape is picked from the top-level keys (`docs`, `message`, `data`, else a bare document)
/// or from a top-level array. Errors point into the wrapper they occurred in.
#[derive(Debug, Clone, PartialEq)]
pub enum DocTypeMeta {
  /// `frappe.desk.form.load.getdoctype` payload: `{"docs": [doctype, child tables...]}`.
  Envelope { docs: Vec<DocTypeDocument> },
  /// Whitelisted method response: `{"message": ...}`.
  Message { message: Box<DocTypeMeta> },
  /// REST resource response: `{"data": ...}`.
  Data { data: Box<DocTypeMeta> },
  Document(DocTypeDocument),
  Fields(Vec<RawFieldDefinition>),
}

/// Metadata that parsed as JSON but does not fit its shape.
#[derive(Debug, Error)]
#[error("{source} at '{pointer}'")]
pub struct ShapeError {
  pub pointer: String,
  #[source]
  pub source: serde_json::Error,
}

impl ShapeError {
  /// Prefixes the pointer with the wrapper key the value was found under.
  fn under(mut self, key: &str) -> Self {
    self.pointer = match self.pointer.as_str() {
      "." => key.to_string(),
      inner if inner.starts_with('[') => format!("{key}{inner}"),
      inner => format!("{key}.{inner}"),
    };
    self
  }
}

fn typed<T: DeserializeOwned>(value: Value) -> Result<T, ShapeError> {
  serde_path_to_error::deserialize(value).map_err(|err| ShapeError {
    pointer: err.path().to_string(),
    source: err.into_inner(),
  })
}

impl<'de> Deserialize<'de> for DocTypeMeta {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let value = Value::deserialize(deserializer)?;
    Self::from_value(value).map_err(serde::de::Error::custom)
  }
}

impl DocTypeMeta {
  pub fn from_value(value: Value) -> Result<Self, ShapeError> {
    let mut map = match value {
      Value::Object(map) => map,
      other => return typed(other).map(Self::Fields),
    };

    if let Some(docs) = map.remove("docs") {
      return typed(docs).map(|docs| Self::Envelope { docs }).map_err(|err| err.under("docs"));
    }
    if let Some(message) = map.remove("message") {
      return Self::from_value(message)
        .map(|message| Self::Message {
          message: Box::new(message),
        })
        .map_err(|err| err.under("message"));
    }
    if let Some(data) = map.remove("data") {
      return Self::from_value(data)
        .map(|data| Self::Data { data: Box::new(data) })
        .map_err(|err| err.under("data"));
    }

    typed(Value::Object(map)).map(Self::Document)
  }

  /// The DocType document itself; only the first document of an envelope is considered.
  pub fn document(&self) -> Option<&DocTypeDocument> {
    match self {
      Self::Envelope { docs } => docs.first(),
      Self::Message { message } => message.document(),
      Self::Data { data } => data.document(),
      Self::Document(document) => Some(document),
      Self::Fields(_) => None,
    }
  }

  /// The raw field list, or `None` when the metadata carries none.
  pub fn fields(&self) -> Option<&[RawFieldDefinition]> {
    match self {
      Self::Fields(fields) => Some(fields),
      Self::Message { message } => message.fields(),
      Self::Data { data } => data.fields(),
      Self::Envelope { .. } | Self::Document(_) => self.document().and_then(|doc| doc.fields.as_deref()),
    }
  }

  pub fn name(&self) -> Option<&str> {
    self.document().and_then(|doc| doc.name.as_deref())
  }
}

/// Truthiness of a loosely typed JSON value: null, `false`, zero, and empty strings, arrays or
/// objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(flag) => *flag,
    Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
    Value::String(text) => !text.is_empty(),
    Value::Array(items) => !items.is_empty(),
    Value::Object(map) => !map.is_empty(),
  }
}

/// Like [`is_truthy`], but a `"0"` string counts as unset since Frappe flags are `0`/`1`.
pub fn flag_is_set(value: &Value) -> bool {
  match value {
    Value::String(text) => !matches!(text.trim(), "" | "0"),
    other => is_truthy(other),
  }
}
