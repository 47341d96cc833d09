use std::path::{Path, PathBuf};

use comfy_table::{Attribute, Cell, ContentArrangement, Row, Table};
use crossterm::style::Stylize;

use crate::{
  generator::{
    assembler::SchemaAssembler,
    fields::{FieldDefinition, FieldStats, normalize},
    interface::{InterfaceText, emit_interface},
  },
  metadata::{DocTypeMeta, MetadataLoader, loader::resolve_metadata_path},
  ui::{Colors, InspectCommand, colors::IntoComfyColor, term_width},
};

#[derive(Debug, Clone)]
pub struct InspectConfig {
  pub input: PathBuf,
  pub doctype: Option<String>,
  pub interface_name: Option<String>,
  pub envelope: bool,
  pub plain: bool,
}

impl InspectConfig {
  pub fn from_command(command: InspectCommand) -> anyhow::Result<Self> {
    let InspectCommand {
      input,
      doctype,
      interface_name,
      envelope,
      plain,
    } = command;

    let doctype = doctype.map(|name| name.trim().to_string()).filter(|name| !name.is_empty());
    if input.is_dir() && doctype.is_none() {
      anyhow::bail!("--doctype is required when the input is a directory");
    }

    Ok(Self {
      input,
      doctype,
      interface_name,
      envelope,
      plain,
    })
  }

  async fn metadata_path(&self) -> anyhow::Result<PathBuf> {
    match self.doctype.as_deref() {
      Some(doctype) if self.input.is_dir() => resolve_metadata_path(&self.input, doctype)
        .await
        .ok_or_else(|| anyhow::anyhow!("Could not load DocType: {doctype}")),
      _ => Ok(self.input.clone()),
    }
  }
}

/// Everything the detail view shows for one DocType.
#[derive(Debug, Clone, PartialEq)]
pub struct DocTypeDetail {
  pub doctype: String,
  pub fields: Vec<FieldDefinition>,
  pub stats: FieldStats,
  pub interface: InterfaceText,
}

impl DocTypeDetail {
  /// Builds the view; stats and interface come from the same normalized field list.
  pub fn build(
    doctype: &str,
    meta: &DocTypeMeta,
    interface_name: Option<&str>,
    envelope: bool,
  ) -> anyhow::Result<Self> {
    let Some(raw_fields) = meta.fields() else {
      anyhow::bail!("Could not load DocType: {doctype}");
    };

    let fields = normalize(raw_fields);
    let assembler = if envelope {
      SchemaAssembler::with_envelope()
    } else {
      SchemaAssembler::fields_only()
    };
    let schema = assembler.build(doctype, &fields);
    let interface_name = interface_name.map_or_else(|| format!("{doctype}Schema"), str::to_string);

    Ok(Self {
      doctype: doctype.to_string(),
      stats: FieldStats::from_fields(&fields),
      interface: emit_interface(&schema, &interface_name),
      fields,
    })
  }
}

fn doctype_name(config: &InspectConfig, meta: &DocTypeMeta, path: &Path) -> String {
  config
    .doctype
    .clone()
    .or_else(|| meta.name().map(str::to_string))
    .or_else(|| path.file_stem().and_then(|stem| stem.to_str()).map(str::to_string))
    .unwrap_or_else(|| "DocType".to_string())
}

pub async fn inspect_doctype(config: InspectConfig, colors: &Colors) -> anyhow::Result<()> {
  let path = config.metadata_path().await?;
  let loader = MetadataLoader::open(&path).await?;
  let meta = loader.parse()?;
  let doctype = doctype_name(&config, &meta, loader.path());
  let detail = DocTypeDetail::build(&doctype, &meta, config.interface_name.as_deref(), config.envelope)?;

  if config.plain {
    println!("{}", detail.interface);
    return Ok(());
  }

  println!("{}", detail.doctype.as_str().with(colors.primary()).bold());
  println!();
  println!("{}", fields_table(&detail.fields, colors));
  println!();
  print_stats(&detail.stats, colors);
  println!();
  println!("{}", detail.interface);

  Ok(())
}

fn fields_table(fields: &[FieldDefinition], colors: &Colors) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["FIELDNAME", "TYPE", "LABEL", "FLAGS"] {
    header.add_cell(Cell::new(title).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(header);

  for field in fields {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(&field.fieldname)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(field_type_label(field)).fg(IntoComfyColor::into(colors.accent())));
    row.add_cell(Cell::new(field.label.as_deref().unwrap_or_default()).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(Cell::new(field_flags(field)).fg(IntoComfyColor::into(colors.info())));
    table.add_row(row);
  }

  table
}

fn field_type_label(field: &FieldDefinition) -> String {
  match field.options.as_deref() {
    Some(target) if field.is_link() => format!("{} → {target}", field.fieldtype),
    _ => field.fieldtype.clone(),
  }
}

pub(crate) fn field_flags(field: &FieldDefinition) -> String {
  [(field.reqd, "required"), (field.read_only, "read-only")]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect::<Vec<_>>()
    .join(", ")
}

fn print_stats(stats: &FieldStats, colors: &Colors) {
  for (label, value) in [
    ("Total fields:", stats.total),
    ("Required:", stats.required),
    ("Read-only:", stats.read_only),
    ("Link fields:", stats.links),
  ] {
    println!(
      "{} {}",
      format!("{label:<16}").with(colors.label()),
      value.to_string().with(colors.value())
    );
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::{DocTypeDetail, field_flags};
  use crate::{
    generator::fields::{FieldDefinition, FieldStats},
    metadata::DocTypeMeta,
  };

  const CUSTOMER: &str = include_str!("../../../fixtures/customer.json");

  #[test]
  fn test_detail_counts_match_interface() {
    let meta: DocTypeMeta = serde_json::from_str(CUSTOMER).unwrap();
    let detail = DocTypeDetail::build("Customer", &meta, None, false).unwrap();

    assert_eq!(
      detail.stats,
      FieldStats {
        total: 8,
        required: 2,
        read_only: 1,
        links: 3,
      }
    );
    assert_eq!(detail.fields.len(), detail.interface.members.len());
    assert_eq!(detail.interface.name, "CustomerSchema");
    let enums: Vec<_> = detail.interface.enums.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(enums, vec!["Naming_seriesEnum", "Customer_typeEnum", "DisabledEnum"]);
  }

  #[test]
  fn test_detail_with_envelope_and_custom_name() {
    let meta: DocTypeMeta = serde_json::from_str(CUSTOMER).unwrap();
    let detail = DocTypeDetail::build("Customer", &meta, Some("CustomerDoc"), true).unwrap();
    assert_eq!(detail.interface.name, "CustomerDoc");
    assert_eq!(detail.interface.members.len(), detail.fields.len() + 7);
    assert_eq!(detail.stats.total, 8);
  }

  #[test]
  fn test_detail_requires_field_list() {
    let meta: DocTypeMeta = serde_json::from_value(json!({ "docs": [] })).unwrap();
    let err = DocTypeDetail::build("Ghost", &meta, None, false).unwrap_err();
    assert_eq!(err.to_string(), "Could not load DocType: Ghost");
  }

  #[test]
  fn test_field_flags() {
    let field: FieldDefinition = FieldDefinition::from_raw(
      &serde_json::from_value(json!({ "fieldname": "x", "reqd": 1, "read_only": 1 })).unwrap(),
    )
    .unwrap();
    assert_eq!(field_flags(&field), "required, read-only");
    assert_eq!(
      field_flags(&FieldDefinition {
        reqd: false,
        read_only: false,
        ..field
      }),
      ""
    );
  }
}
