use std::path::{Path, PathBuf};

use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use serde_json::Value;
use tokio::task::JoinSet;

use super::{DocTypeMeta, MetadataError, MetadataStore};

/// A memory-mapped metadata file waiting to be parsed.
pub struct MetadataLoader {
  path: PathBuf,
  file: AsyncMmapFile,
}

impl MetadataLoader {
  pub async fn open(path: &Path) -> Result<Self, MetadataError> {
    let file = AsyncMmapFile::open(path).await.map_err(|err| MetadataError::Open {
      path: path.to_path_buf(),
      message: err.to_string(),
    })?;

    Ok(Self {
      path: path.to_path_buf(),
      file,
    })
  }

  pub fn parse(&self) -> Result<DocTypeMeta, MetadataError> {
    let value: Value = serde_json::from_slice(self.file.as_slice()).map_err(|source| MetadataError::Parse {
      path: self.path.clone(),
      pointer: ".".to_string(),
      source,
    })?;
    DocTypeMeta::from_value(value).map_err(|err| MetadataError::Parse {
      path: self.path.clone(),
      pointer: err.pointer,
      source: err.source,
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

/// Outcome of loading a list of DocTypes from a directory.
///
/// A DocType that fails to load is not fatal; it lands in `failures` and the generator skips it.
#[derive(Debug, Default)]
pub struct LoadReport {
  pub store: MetadataStore,
  pub failures: Vec<(String, MetadataError)>,
}

impl MetadataStore {
  /// Loads each DocType concurrently, one task per file, and keeps the requested order.
  pub async fn load_dir(dir: &Path, doctypes: &[String]) -> Result<LoadReport, MetadataError> {
    if !tokio::fs::metadata(dir).await.is_ok_and(|meta| meta.is_dir()) {
      return Err(MetadataError::MissingDirectory(dir.to_path_buf()));
    }

    let mut tasks = JoinSet::new();
    for (index, doctype) in doctypes.iter().enumerate() {
      let dir = dir.to_path_buf();
      let doctype = doctype.clone();
      tasks.spawn(async move {
        let result = load_doctype(&dir, &doctype).await;
        (index, doctype, result)
      });
    }

    let mut slots: Vec<Option<(String, Result<DocTypeMeta, MetadataError>)>> =
      std::iter::repeat_with(|| None).take(doctypes.len()).collect();
    while let Some(joined) = tasks.join_next().await {
      let (index, doctype, result) = joined?;
      slots[index] = Some((doctype, result));
    }

    let mut report = LoadReport::default();
    for (doctype, result) in slots.into_iter().flatten() {
      match result {
        Ok(meta) => report.store.insert(doctype, meta),
        Err(err) => report.failures.push((doctype, err)),
      }
    }

    Ok(report)
  }
}

async fn load_doctype(dir: &Path, doctype: &str) -> Result<DocTypeMeta, MetadataError> {
  let path = resolve_metadata_path(dir, doctype)
    .await
    .ok_or_else(|| MetadataError::NotFound {
      doctype: doctype.to_string(),
      dir: dir.to_path_buf(),
    })?;
  MetadataLoader::open(&path).await?.parse()
}

/// Finds the file for `doctype`, trying the literal name first and then Frappe's on-disk
/// layout (`sales_order.json`, `sales_order/sales_order.json`).
pub(crate) async fn resolve_metadata_path(dir: &Path, doctype: &str) -> Option<PathBuf> {
  for candidate in candidate_paths(dir, doctype) {
    if tokio::fs::metadata(&candidate).await.is_ok_and(|meta| meta.is_file()) {
      return Some(candidate);
    }
  }
  None
}

pub(crate) fn candidate_paths(dir: &Path, doctype: &str) -> Vec<PathBuf> {
  let scrubbed = scrub(doctype);
  let mut candidates = vec![dir.join(format!("{doctype}.json"))];
  if scrubbed != doctype {
    candidates.push(dir.join(format!("{scrubbed}.json")));
  }
  candidates.push(dir.join(&scrubbed).join(format!("{scrubbed}.json")));
  candidates
}

/// Frappe's module-name scrubbing: lower case with spaces and dashes as underscores.
pub(crate) fn scrub(doctype: &str) -> String {
  doctype.trim().replace([' ', '-'], "_").to_lowercase()
}
