use serde_json::json;

use super::{
  fields::{FieldDefinition, normalize},
  mapper::map_field,
  schema::{EntitySchema, PropertyDescriptor, SchemaType},
};
use crate::metadata::DocTypeMeta;

pub const ENVELOPE_PROPERTY_COUNT: usize = 7;

/// Standard properties every Frappe document carries, independent of its DocType.
pub fn envelope_properties() -> [(&'static str, PropertyDescriptor); ENVELOPE_PROPERTY_COUNT] {
  let date_time = || PropertyDescriptor::new(SchemaType::String).with_format("date-time").read_only();
  [
    (
      "name",
      PropertyDescriptor::new(SchemaType::String)
        .with_description("Document ID/name")
        .read_only(),
    ),
    (
      "owner",
      PropertyDescriptor::new(SchemaType::String)
        .with_description("Document owner")
        .read_only(),
    ),
    ("creation", date_time()),
    ("modified", date_time()),
    ("modified_by", PropertyDescriptor::new(SchemaType::String).read_only()),
    (
      "docstatus",
      PropertyDescriptor::new(SchemaType::Integer)
        .with_enum([json!(0), json!(1), json!(2)])
        .read_only(),
    ),
    ("doctype", PropertyDescriptor::new(SchemaType::String).read_only()),
  ]
}

/// Builds [`EntitySchema`]s from DocType metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaAssembler {
  include_envelope: bool,
}

impl Default for SchemaAssembler {
  fn default() -> Self {
    Self::with_envelope()
  }
}

impl SchemaAssembler {
  /// Component schemas: standard properties first, then the DocType's own fields.
  pub const fn with_envelope() -> Self {
    Self { include_envelope: true }
  }

  /// Only the DocType's own fields, as shown in the detail view.
  pub const fn fields_only() -> Self {
    Self {
      include_envelope: false,
    }
  }

  /// Schema for `doctype`, or `None` when there is no metadata or it has no field list.
  pub fn assemble(&self, doctype: &str, meta: Option<&DocTypeMeta>) -> Option<EntitySchema> {
    let fields = meta?.fields()?;
    Some(self.build(doctype, &normalize(fields)))
  }

  /// Schema from an already normalized field list. A field named like a standard property
  /// replaces it in place.
  pub fn build(&self, name: &str, fields: &[FieldDefinition]) -> EntitySchema {
    let mut schema = EntitySchema::new(name);
    if self.include_envelope {
      for (key, property) in envelope_properties() {
        schema.insert(key, property, false);
      }
    }

    for field in fields {
      schema.insert(field.fieldname.clone(), map_field(field), field.reqd);
    }

    schema
  }
}
