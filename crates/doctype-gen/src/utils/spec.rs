use std::{ffi::OsStr, path::Path};

use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use oas3::OpenApiV3Spec;

use crate::generator::document::OpenApiDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    match path.extension().and_then(OsStr::to_str) {
      Some("yaml" | "yml") => Self::Yaml,
      _ => Self::Json,
    }
  }
}

/// Reads an OpenAPI document back, e.g. one written by `generate`.
pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path).await?;
    Ok(Self {
      file,
      format: SpecFormat::from_path(path),
    })
  }

  pub fn parse(&self) -> anyhow::Result<oas3::Spec> {
    match self.format {
      SpecFormat::Json => Ok(serde_json::from_slice::<OpenApiV3Spec>(self.file.as_slice())?),
      SpecFormat::Yaml => {
        let content = std::str::from_utf8(self.file.as_slice())?;
        Ok(oas3::from_yaml(content)?)
      }
    }
  }
}

/// Writes `document` as pretty JSON, creating parent directories as needed.
pub async fn write_document(path: &Path, document: &OpenApiDocument) -> anyhow::Result<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    tokio::fs::create_dir_all(parent).await?;
  }
  tokio::fs::write(path, document.to_json()?).await?;
  Ok(())
}
