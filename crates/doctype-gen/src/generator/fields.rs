//! Normalization of raw DocType fields.
//!
//! Frappe field lists mix data-bearing fields with layout markers. Only the former become
//! schema properties, and they are validated into [`FieldDefinition`] here so the rest of the
//! pipeline never has to probe optional keys.

use serde_json::Value;

use crate::metadata::{RawFieldDefinition, flag_is_set, is_truthy};

pub(crate) const LAYOUT_FIELD_TYPES: [&str; 4] = ["Section Break", "Column Break", "HTML", "Tab Break"];
pub(crate) const DEFAULT_FIELD_TYPE: &str = "Data";
pub(crate) const SELECT_FIELD_TYPE: &str = "Select";
pub(crate) const LINK_FIELD_TYPE: &str = "Link";

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
  pub fieldname: String,
  pub fieldtype: String,
  pub label: Option<String>,
  pub options: Option<String>,
  pub reqd: bool,
  pub read_only: bool,
  /// Only present when the configured default is truthy; a falsy default reads as "none".
  pub default: Option<Value>,
}

impl FieldDefinition {
  /// Validates a raw field, returning `None` for layout markers and unnamed fields.
  pub fn from_raw(raw: &RawFieldDefinition) -> Option<Self> {
    let fieldname = raw.fieldname.as_deref().filter(|name| !name.is_empty())?;
    let fieldtype = raw.fieldtype.as_deref().unwrap_or(DEFAULT_FIELD_TYPE);
    if is_layout_field_type(fieldtype) {
      return None;
    }

    Some(Self {
      fieldname: fieldname.to_string(),
      fieldtype: fieldtype.to_string(),
      label: non_empty(raw.label.as_deref()),
      options: non_empty(raw.options.as_deref()),
      reqd: flag_is_set(&raw.reqd),
      read_only: flag_is_set(&raw.read_only),
      default: is_truthy(&raw.default).then(|| raw.default.clone()),
    })
  }

  /// Label when set, otherwise the fieldname.
  pub fn description(&self) -> &str {
    self.label.as_deref().unwrap_or(&self.fieldname)
  }

  pub fn is_select(&self) -> bool {
    self.fieldtype == SELECT_FIELD_TYPE
  }

  pub fn is_link(&self) -> bool {
    self.fieldtype == LINK_FIELD_TYPE
  }

  /// Choices of a Select field: one per line, trimmed, blanks dropped.
  pub fn select_options(&self) -> Vec<&str> {
    self
      .options
      .as_deref()
      .map(|options| {
        options
          .split('\n')
          .map(str::trim)
          .filter(|option| !option.is_empty())
          .collect()
      })
      .unwrap_or_default()
  }
}

fn non_empty(value: Option<&str>) -> Option<String> {
  value.filter(|text| !text.is_empty()).map(str::to_string)
}

pub fn is_layout_field_type(fieldtype: &str) -> bool {
  LAYOUT_FIELD_TYPES.contains(&fieldtype)
}

/// Keeps the data-bearing fields in their original order.
pub fn normalize(fields: &[RawFieldDefinition]) -> Vec<FieldDefinition> {
  fields.iter().filter_map(FieldDefinition::from_raw).collect()
}

/// Counts shown next to a DocType's interface text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldStats {
  pub total: usize,
  pub required: usize,
  pub read_only: usize,
  pub links: usize,
}

impl FieldStats {
  pub fn from_fields(fields: &[FieldDefinition]) -> Self {
    fields.iter().fold(Self::default(), |mut stats, field| {
      stats.total += 1;
      stats.required += usize::from(field.reqd);
      stats.read_only += usize::from(field.read_only);
      stats.links += usize::from(field.is_link());
      stats
    })
  }
}
