use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
  #[error("metadata directory '{}' does not exist", .0.display())]
  MissingDirectory(PathBuf),

  #[error("no metadata file for DocType '{doctype}' in '{}'", .dir.display())]
  NotFound { doctype: String, dir: PathBuf },

  #[error("failed to open '{}': {message}", .path.display())]
  Open { path: PathBuf, message: String },

  #[error("invalid metadata in '{}' at '{pointer}': {source}", .path.display())]
  Parse {
    path: PathBuf,
    pointer: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("metadata loader task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}
