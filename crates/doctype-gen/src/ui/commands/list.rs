use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  ui::{Colors, colors::IntoComfyColor, term_width},
  utils::spec::SpecLoader,
};

/// Derives an id for operations that carry none: `get /api/resource/{name}` becomes
/// `get_api_resource_by_name`. Spaces in DocType names become underscores.
pub(crate) fn generate_operation_id(method: &str, path: &str) -> String {
  let path_parts: Vec<String> = path
    .split('/')
    .filter(|s| !s.is_empty())
    .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
      Some(param) => format!("by_{param}"),
      None => s.replace([' ', '-'], "_"),
    })
    .collect();

  let method_lower = method.to_lowercase();
  if path_parts.is_empty() {
    method_lower
  } else {
    format!("{method_lower}_{}", path_parts.join("_"))
  }
}

pub async fn list_operations(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let spec = SpecLoader::open(input).await?.parse()?;

  let mut operations = spec
    .operations()
    .map(|(path, method, operation)| {
      let id = operation
        .operation_id
        .clone()
        .unwrap_or_else(|| generate_operation_id(method.as_str(), &path));
      let summary = operation.summary.clone().unwrap_or_default();
      (id, method.as_str().to_string(), path, summary)
    })
    .collect::<Vec<_>>();

  operations.sort_by(|a, b| a.2.cmp(&b.2).then_with(|| a.0.cmp(&b.0)));

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for title in ["OPERATION ID", "METHOD", "PATH", "SUMMARY"] {
    row.add_cell(Cell::new(title).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(row);

  for (operation_id, method, path, summary) in operations {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(operation_id)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(method)
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(path).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(Cell::new(summary).fg(IntoComfyColor::into(colors.info())));
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
