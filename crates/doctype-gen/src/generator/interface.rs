//! TypeScript rendering of an [`EntitySchema`].
//!
//! Every enum-typed property gets its own `export enum` block named after the property, placed
//! before the interface in the order the properties are visited. Blocks are not deduplicated,
//! so `Status` and `status` both produce a `StatusEnum`.

use std::fmt;

use itertools::Itertools;
use serde_json::Value;

use super::schema::{EntitySchema, PropertyDescriptor, SchemaType};

const ANY: &str = "any";
const RECORD: &str = "Record<string, any>";

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDeclaration {
  pub name: String,
  pub values: Vec<Value>,
}

impl fmt::Display for EnumDeclaration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let members = self.values.iter().map(enum_member).join(", ");
    write!(f, "export enum {} {{ {members} }}", self.name)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceMember {
  pub name: String,
  pub optional: bool,
  pub type_token: String,
}

impl fmt::Display for InterfaceMember {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let marker = if self.optional { "?" } else { "" };
    write!(f, "{}{marker}: {};", self.name, self.type_token)
  }
}

/// Enum blocks followed by one interface block, separated by blank lines.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceText {
  pub enums: Vec<EnumDeclaration>,
  pub name: String,
  pub members: Vec<InterfaceMember>,
}

impl fmt::Display for InterfaceText {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for declaration in &self.enums {
      write!(f, "{declaration}\n\n")?;
    }
    writeln!(f, "export interface {} {{", self.name)?;
    for member in &self.members {
      writeln!(f, "  {member}")?;
    }
    write!(f, "}}")
  }
}

pub fn emit_interface(schema: &EntitySchema, interface_name: &str) -> InterfaceText {
  let mut enums = vec![];
  let mut members = Vec::with_capacity(schema.properties.len());

  for (name, property) in &schema.properties {
    let type_token = if property.is_enum() {
      let declaration = EnumDeclaration {
        name: enum_name(name),
        values: property.enum_values.clone(),
      };
      let token = declaration.name.clone();
      enums.push(declaration);
      token
    } else {
      type_token(property)
    };

    members.push(InterfaceMember {
      name: name.clone(),
      optional: !schema.is_required(name),
      type_token,
    });
  }

  InterfaceText {
    enums,
    name: interface_name.to_string(),
    members,
  }
}

/// `status` -> `StatusEnum`; only the first character changes case.
pub fn enum_name(property: &str) -> String {
  let mut chars = property.chars();
  match chars.next() {
    Some(first) => format!("{}{}Enum", first.to_uppercase(), chars.as_str()),
    None => "Enum".to_string(),
  }
}

pub fn type_token(property: &PropertyDescriptor) -> String {
  match property.schema_type {
    SchemaType::String => "string".to_string(),
    SchemaType::Integer | SchemaType::Number => "number".to_string(),
    SchemaType::Boolean => "boolean".to_string(),
    SchemaType::Object => RECORD.to_string(),
    SchemaType::Array => {
      let item = match property.items.as_deref().map(|items| items.schema_type) {
        Some(SchemaType::Object) => RECORD.to_string(),
        Some(item_type) => item_type.to_string(),
        None => ANY.to_string(),
      };
      format!("{item}[]")
    }
  }
}

fn enum_member(value: &Value) -> String {
  match value {
    Value::String(text) => format!("'{text}'"),
    other => other.to_string(),
  }
}
