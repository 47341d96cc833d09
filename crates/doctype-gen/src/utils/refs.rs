pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Parses a schema `$ref` path and extracts the referenced schema name.
///
/// Returns `None` for external references and for pointers that do not target
/// `#/components/schemas`.
pub fn parse_schema_ref_path(ref_path: &str) -> Option<String> {
  ref_path
    .strip_prefix(SCHEMA_REF_PREFIX)
    .filter(|name| !name.is_empty() && !name.contains('/'))
    .map(ToString::to_string)
}
