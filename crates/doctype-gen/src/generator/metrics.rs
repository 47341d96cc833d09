use strum::Display;

use super::document::OpenApiDocument;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub doctypes_requested: usize,
  pub schemas_generated: usize,
  pub properties_generated: usize,
  pub enums_generated: usize,
  pub paths_generated: usize,
  pub operations_generated: usize,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  /// Counts what ended up in `document`, so a DocType requested twice is counted once.
  pub fn record_document(&mut self, document: &OpenApiDocument) {
    let schemas = document.components.schemas.values();
    self.schemas_generated = document.components.schemas.len();
    self.properties_generated = schemas.clone().map(|schema| schema.properties.len()).sum();
    self.enums_generated = schemas.map(|schema| schema.enum_properties().count()).sum();
    self.paths_generated = document.paths.len();
    self.operations_generated = document.operation_count();
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }

  pub fn skipped_count(&self) -> usize {
    self.warnings.iter().filter(|warning| warning.is_skipped_item()).count()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SkipReason {
  #[strum(to_string = "no metadata available")]
  NoMetadata,
  #[strum(to_string = "metadata has no field list")]
  NoFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "DocType '{doctype}': {reason}")]
  DocTypeSkipped { doctype: String, reason: SkipReason },
  #[strum(to_string = "DocType '{doctype}': {error}")]
  MetadataUnavailable { doctype: String, error: String },
  #[strum(to_string = "Unresolved schema reference '{reference}'")]
  DanglingReference { reference: String },
}

impl GenerationWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(self, Self::DocTypeSkipped { .. } | Self::MetadataUnavailable { .. })
  }
}
