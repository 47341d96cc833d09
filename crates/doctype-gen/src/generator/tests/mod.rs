mod composer;

use serde_json::{Value, json};

use super::fields::FieldDefinition;
use crate::metadata::{DocTypeMeta, RawFieldDefinition};

pub(super) const CUSTOMER: &str = include_str!("../../../fixtures/customer.json");
pub(super) const SALES_ORDER: &str = include_str!("../../../fixtures/sales_order.json");
pub(super) const TODO_MESSAGE: &str = include_str!("../../../fixtures/todo_message.json");

pub(super) fn raw_field(value: Value) -> RawFieldDefinition {
  serde_json::from_value(value).expect("raw field should deserialize")
}

pub(super) fn field(value: Value) -> FieldDefinition {
  FieldDefinition::from_raw(&raw_field(value)).expect("field should survive normalization")
}

pub(super) fn data_field(fieldname: &str) -> FieldDefinition {
  field(json!({ "fieldname": fieldname, "fieldtype": "Data" }))
}

pub(super) fn fixture(json: &str) -> DocTypeMeta {
  serde_json::from_str(json).expect("fixture should deserialize")
}
