use serde_json::{Number, Value};

use super::{
  fields::FieldDefinition,
  schema::{PropertyDescriptor, SchemaType},
  type_table,
};

/// Maps one normalized field to its property schema.
///
/// There is no failure mode: unknown fieldtypes become strings and unusable Select options leave
/// the property without an `enum`.
pub(crate) fn map_field(field: &FieldDefinition) -> PropertyDescriptor {
  let mut property = type_table::rule_for(&field.fieldtype).to_descriptor();

  let mut description = field.description().to_string();
  if field.is_link()
    && let Some(target) = field.options.as_deref()
  {
    description.push_str(&format!(" (Links to {target})"));
  }
  property.description = Some(description);

  property.read_only = field.read_only;

  if field.is_select() {
    let choices = field.select_options();
    if !choices.is_empty() {
      property.enum_values = choices.into_iter().map(Value::from).collect();
    }
  }

  property.default = field
    .default
    .as_ref()
    .and_then(|default| coerce_default(default, property.schema_type))
    .filter(|default| !property.is_enum() || property.enum_values.contains(default));

  property
}

/// Frappe stores most defaults as strings (`"0"` for a Check, `"10"` for an Int). Converts them to
/// the property's type; `None` when the value cannot be represented.
pub(crate) fn coerce_default(value: &Value, schema_type: SchemaType) -> Option<Value> {
  match (schema_type, value) {
    (SchemaType::Integer, Value::Number(number)) => number
      .as_i64()
      .or_else(|| number.as_f64().filter(|n| n.fract() == 0.0).map(|n| n as i64))
      .map(Value::from),
    (SchemaType::Integer, Value::String(text)) => text.trim().parse::<i64>().ok().map(Value::from),
    (SchemaType::Number, Value::Number(_)) => Some(value.clone()),
    (SchemaType::Number, Value::String(text)) => text
      .trim()
      .parse::<f64>()
      .ok()
      .and_then(Number::from_f64)
      .map(Value::Number),
    (SchemaType::Boolean, Value::Bool(_)) => Some(value.clone()),
    (SchemaType::String, Value::String(_)) => Some(value.clone()),
    (SchemaType::String, Value::Number(number)) => Some(Value::String(number.to_string())),
    (SchemaType::Array, Value::Array(_)) | (SchemaType::Object, Value::Object(_)) => Some(value.clone()),
    _ => None,
  }
}
