//! Frappe fieldtype to schema lookup.
//!
//! The table is plain data: adding a fieldtype is a one-line change here and nothing else.

use std::{collections::HashMap, sync::LazyLock};

use serde_json::Value;

use super::schema::{PropertyDescriptor, SchemaType};

pub(crate) const COLOR_PATTERN: &str = "^#[0-9A-Fa-f]{6}$";
pub(crate) const TEXT_MAX_LENGTH: u32 = 65535;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TypeRule {
  pub(crate) schema_type: SchemaType,
  pub(crate) format: Option<&'static str>,
  pub(crate) pattern: Option<&'static str>,
  pub(crate) max_length: Option<u32>,
  pub(crate) item_type: Option<SchemaType>,
  pub(crate) enum_values: &'static [i64],
  pub(crate) write_only: bool,
}

impl TypeRule {
  const fn of(schema_type: SchemaType) -> Self {
    Self {
      schema_type,
      format: None,
      pattern: None,
      max_length: None,
      item_type: None,
      enum_values: &[],
      write_only: false,
    }
  }

  const fn format(mut self, format: &'static str) -> Self {
    self.format = Some(format);
    self
  }

  const fn pattern(mut self, pattern: &'static str) -> Self {
    self.pattern = Some(pattern);
    self
  }

  const fn max_length(mut self, max_length: u32) -> Self {
    self.max_length = Some(max_length);
    self
  }

  const fn items(mut self, item_type: SchemaType) -> Self {
    self.item_type = Some(item_type);
    self
  }

  const fn one_of(mut self, values: &'static [i64]) -> Self {
    self.enum_values = values;
    self
  }

  const fn write_only(mut self) -> Self {
    self.write_only = true;
    self
  }

  pub(crate) fn to_descriptor(self) -> PropertyDescriptor {
    PropertyDescriptor {
      schema_type: self.schema_type,
      format: self.format.map(str::to_string),
      pattern: self.pattern.map(str::to_string),
      max_length: self.max_length,
      items: self.item_type.map(|item| Box::new(PropertyDescriptor::new(item))),
      enum_values: self.enum_values.iter().copied().map(Value::from).collect(),
      write_only: self.write_only,
      ..Default::default()
    }
  }
}

const STRING: TypeRule = TypeRule::of(SchemaType::String);
const FLOAT: TypeRule = TypeRule::of(SchemaType::Number).format("float");
const URI: TypeRule = STRING.format("uri");

static FIELD_TYPE_TABLE: LazyLock<HashMap<&'static str, TypeRule>> = LazyLock::new(|| {
  HashMap::from([
    ("Data", STRING),
    ("Small Text", STRING),
    ("Long Text", STRING),
    ("Text Editor", STRING),
    ("Text", STRING.max_length(TEXT_MAX_LENGTH)),
    ("Code", STRING),
    ("Int", TypeRule::of(SchemaType::Integer)),
    ("Float", FLOAT),
    ("Currency", FLOAT),
    ("Percent", FLOAT),
    ("Check", TypeRule::of(SchemaType::Integer).one_of(&[0, 1])),
    ("Select", STRING),
    ("Link", STRING),
    ("Date", STRING.format("date")),
    ("Datetime", STRING.format("date-time")),
    ("Time", STRING.format("time")),
    ("Password", STRING.format("password").write_only()),
    ("Attach", URI),
    ("Attach Image", URI),
    ("Table", TypeRule::of(SchemaType::Array).items(SchemaType::Object)),
    ("JSON", TypeRule::of(SchemaType::Object)),
    ("HTML", STRING),
    ("Signature", STRING),
    ("Color", STRING.pattern(COLOR_PATTERN)),
    ("Barcode", STRING),
    ("Geolocation", STRING),
  ])
});

/// Rule for `fieldtype`; anything not in the table is a plain string.
pub(crate) fn rule_for(fieldtype: &str) -> TypeRule {
  FIELD_TYPE_TABLE.get(fieldtype).copied().unwrap_or(STRING)
}

#[cfg(test)]
pub(crate) fn known_field_types() -> impl Iterator<Item = &'static str> {
  FIELD_TYPE_TABLE.keys().copied()
}
