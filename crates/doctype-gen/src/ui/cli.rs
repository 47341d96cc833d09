use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "doctype-gen")]
#[command(author, version, about = "OpenAPI and TypeScript generator for Frappe DocTypes")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Generate an OpenAPI document for a list of DocTypes
  Generate(GenerateCommand),
  /// Show the fields, statistics and TypeScript interface of one DocType
  Inspect(InspectCommand),
  /// List information from an OpenAPI document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  /// Directory holding one metadata JSON file per DocType
  #[arg(short, long, value_name = "DIR")]
  pub input: PathBuf,

  /// DocTypes to include (comma-separated, e.g. "Lead,Customer,Sales Order")
  #[arg(short, long, value_name = "DOCTYPES", value_delimiter = ',')]
  pub doctypes: Vec<String>,

  /// Path where the OpenAPI document will be written
  #[arg(short, long, value_name = "FILE", default_value = "static/swagger/openapi.json")]
  pub output: PathBuf,

  /// API title
  #[arg(long)]
  pub title: Option<String>,

  /// API description
  #[arg(long)]
  pub description: Option<String>,

  /// API version
  #[arg(long = "api-version", value_name = "VERSION")]
  pub api_version: Option<String>,

  /// Base URL of the Frappe site, used as the document's server
  #[arg(long, value_name = "URL")]
  pub server_url: Option<String>,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Args, Debug)]
pub struct InspectCommand {
  /// Metadata JSON file, or a directory of them when used with --doctype
  #[arg(short, long, value_name = "PATH")]
  pub input: PathBuf,

  /// DocType name (required when the input is a directory)
  #[arg(short, long, value_name = "DOCTYPE")]
  pub doctype: Option<String>,

  /// Name of the generated interface (default: "<DocType>Schema")
  #[arg(long, value_name = "NAME")]
  pub interface_name: Option<String>,

  /// Include the standard document properties (name, owner, docstatus, ...)
  #[arg(long, default_value_t = false)]
  pub envelope: bool,

  /// Print only the interface text
  #[arg(long, default_value_t = false)]
  pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations defined in an OpenAPI document
  Operations {
    /// Path to the OpenAPI JSON or YAML file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
