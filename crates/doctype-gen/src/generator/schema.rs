use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::Value;
use strum::Display;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SchemaType {
  #[default]
  String,
  Integer,
  Number,
  Boolean,
  Array,
  Object,
}

/// Schema of a single DocType field (or envelope property) as it appears in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
  #[serde(rename = "type")]
  pub schema_type: SchemaType,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub format: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pattern: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_length: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub items: Option<Box<PropertyDescriptor>>,
  #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
  pub enum_values: Vec<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub default: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "is_false")]
  pub read_only: bool,
  #[serde(skip_serializing_if = "is_false")]
  pub write_only: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
  !*value
}

impl PropertyDescriptor {
  pub fn new(schema_type: SchemaType) -> Self {
    Self {
      schema_type,
      ..Default::default()
    }
  }

  #[must_use]
  pub fn with_format(mut self, format: impl Into<String>) -> Self {
    self.format = Some(format.into());
    self
  }

  #[must_use]
  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  #[must_use]
  pub fn with_enum(mut self, values: impl IntoIterator<Item = Value>) -> Self {
    self.enum_values = values.into_iter().collect();
    self
  }

  #[must_use]
  pub fn read_only(mut self) -> Self {
    self.read_only = true;
    self
  }

  pub fn is_enum(&self) -> bool {
    !self.enum_values.is_empty()
  }
}

/// Component schema for one DocType.
///
/// `properties` keeps insertion order; `required` only ever names keys of `properties`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySchema {
  #[serde(skip)]
  pub name: String,
  #[serde(rename = "type")]
  pub schema_type: SchemaType,
  pub properties: IndexMap<String, PropertyDescriptor>,
  #[serde(skip_serializing_if = "IndexSet::is_empty")]
  pub required: IndexSet<String>,
}

impl EntitySchema {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      schema_type: SchemaType::Object,
      properties: IndexMap::new(),
      required: IndexSet::new(),
    }
  }

  /// Inserts or replaces a property. A replaced key keeps its original position, and the last
  /// write decides whether it is required.
  pub fn insert(&mut self, name: impl Into<String>, property: PropertyDescriptor, required: bool) {
    let name = name.into();
    if required {
      self.required.insert(name.clone());
    } else {
      self.required.shift_remove(&name);
    }
    self.properties.insert(name, property);
  }

  pub fn is_required(&self, name: &str) -> bool {
    self.required.contains(name)
  }

  pub fn enum_properties(&self) -> impl Iterator<Item = (&str, &PropertyDescriptor)> {
    self
      .properties
      .iter()
      .filter(|(_, property)| property.is_enum())
      .map(|(name, property)| (name.as_str(), property))
  }
}
