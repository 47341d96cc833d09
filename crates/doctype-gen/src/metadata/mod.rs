//! DocType metadata as delivered by a Frappe site, and the providers that hand it to the
//! generator.
//!
//! The generator never fetches metadata itself. Callers inject a [`MetadataProvider`]; the CLI
//! uses a [`MetadataStore`] filled from JSON files on disk by [`MetadataStore::load_dir`].

mod error;
pub(crate) mod loader;
mod raw;

#[cfg(test)]
mod tests;

use indexmap::IndexMap;

pub use error::MetadataError;
pub use loader::{LoadReport, MetadataLoader};
pub use raw::{DocTypeMeta, RawFieldDefinition, flag_is_set, is_truthy};

/// Source of DocType metadata for the generator.
///
/// Returning `None` means the DocType is unknown to the provider; the generator skips it.
pub trait MetadataProvider {
  fn doctype_meta(&self, doctype: &str) -> Option<&DocTypeMeta>;
}

/// Insertion-ordered, in-memory metadata keyed by DocType name.
#[derive(Debug, Clone, Default)]
pub struct MetadataStore {
  entries: IndexMap<String, DocTypeMeta>,
}

impl MetadataStore {
  pub fn insert(&mut self, doctype: impl Into<String>, meta: DocTypeMeta) {
    self.entries.insert(doctype.into(), meta);
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn doctypes(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }
}

impl MetadataProvider for MetadataStore {
  fn doctype_meta(&self, doctype: &str) -> Option<&DocTypeMeta> {
    self.entries.get(doctype)
  }
}

impl FromIterator<(String, DocTypeMeta)> for MetadataStore {
  fn from_iter<T: IntoIterator<Item = (String, DocTypeMeta)>>(iter: T) -> Self {
    Self {
      entries: iter.into_iter().collect(),
    }
  }
}
