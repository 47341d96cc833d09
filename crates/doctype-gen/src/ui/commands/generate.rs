use std::path::PathBuf;

use crossterm::style::Stylize;
use indexmap::{IndexMap, IndexSet};

use crate::{
  generator::{
    composer::{ComposeOptions, Composition, SpecComposer},
    metrics::{GenerationStats, GenerationWarning, SkipReason},
  },
  metadata::{LoadReport, MetadataError, MetadataStore},
  ui::{Colors, GenerateCommand, format_timestamp},
  utils::spec::write_document,
};

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub doctypes: Vec<String>,
  pub options: ComposeOptions,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      doctypes,
      output,
      title,
      description,
      api_version,
      server_url,
      verbose,
      quiet,
    } = command;

    let server_url = server_url.map(|url| parse_server_url(&url)).transpose()?;
    let options = ComposeOptions::builder()
      .maybe_title(title)
      .maybe_description(description)
      .maybe_version(api_version)
      .maybe_server_url(server_url)
      .build();

    Ok(Self {
      input,
      output,
      doctypes: parse_doctypes(doctypes),
      options,
      verbose,
      quiet,
    })
  }
}

/// Trims each name and drops blanks and repeats, so `"Lead, ,Customer,Lead"` names two DocTypes.
pub(crate) fn parse_doctypes(raw: Vec<String>) -> Vec<String> {
  raw
    .into_iter()
    .map(|doctype| doctype.trim().to_string())
    .filter(|doctype| !doctype.is_empty())
    .collect::<IndexSet<_>>()
    .into_iter()
    .collect()
}

pub(crate) fn parse_server_url(url: &str) -> anyhow::Result<String> {
  let url = url.trim().trim_end_matches('/');
  if !(url.starts_with("http://") || url.starts_with("https://")) {
    anyhow::bail!("Invalid server URL '{url}': expected an http:// or https:// URL");
  }
  Ok(url.to_string())
}

/// Replaces the composer's generic "no metadata" skips with the loader's reason, in place, so
/// warnings keep the requested order.
pub(crate) fn merge_load_failures(stats: &mut GenerationStats, report: LoadReport) {
  let mut failures: IndexMap<String, MetadataError> = report.failures.into_iter().collect();

  for warning in &mut stats.warnings {
    let GenerationWarning::DocTypeSkipped {
      doctype,
      reason: SkipReason::NoMetadata,
    } = warning
    else {
      continue;
    };
    if let Some(error) = failures.shift_remove(doctype.as_str()) {
      let replacement = GenerationWarning::MetadataUnavailable {
        doctype: doctype.clone(),
        error: error.to_string(),
      };
      *warning = replacement;
    }
  }

  stats.record_warnings(
    failures
      .into_iter()
      .map(|(doctype, error)| GenerationWarning::MetadataUnavailable {
        doctype,
        error: error.to_string(),
      }),
  );
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!(
        "Loading metadata for {} DocTypes from: {}",
        self.config.doctypes.len(),
        self.config.input.display()
      )
      .with(self.colors.primary())
      .to_string(),
    );
  }

  fn log_processing(&self, store: &MetadataStore) {
    self.info(&format!(
      "Loaded metadata for {} of {} DocTypes",
      store.len(),
      self.config.doctypes.len()
    ));
    if !self.config.verbose {
      return;
    }
    for doctype in store.doctypes() {
      self.info(&format!("Processing DocType: {doctype}").with(self.colors.info()).to_string());
    }
  }

  fn log_generating(&self) {
    self.info(&"Generating OpenAPI document...".with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("DocTypes requested:", stats.doctypes_requested.to_string());
    self.stat("Schemas generated:", stats.schemas_generated.to_string());
    self.stat("", format!("{} properties", stats.properties_generated));
    self.stat("", format!("{} enums", stats.enums_generated));
    self.stat("Paths generated:", stats.paths_generated.to_string());
    self.stat("", format!("{} operations", stats.operations_generated));
    if stats.skipped_count() > 0 {
      self.stat("Skipped:", stats.skipped_count().to_string());
    }
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_warnings(stats);
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    let mut printed_header = false;
    for warning in &stats.warnings {
      let should_print = warning.is_skipped_item() || self.config.verbose;
      if !should_print {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let prefix = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        prefix.with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_success(&self, stats: &GenerationStats) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        format!(
          "Successfully generated OpenAPI specification for {} DocTypes",
          stats.schemas_generated
        )
        .with(self.colors.success())
      );
    }
  }
}

pub async fn generate_document(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let report = MetadataStore::load_dir(&config.input, &config.doctypes).await?;
  logger.log_processing(&report.store);

  logger.log_generating();
  let composer = SpecComposer::new(config.options.clone());
  let Composition { document, mut stats } = composer.compose(&config.doctypes, &report.store);
  merge_load_failures(&mut stats, report);

  logger.log_writing();
  write_document(&config.output, &document).await?;

  logger.print_statistics(&stats);
  logger.log_success(&stats);

  Ok(())
}
