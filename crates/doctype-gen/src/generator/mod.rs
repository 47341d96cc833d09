pub mod assembler;
pub mod composer;
pub mod document;
pub mod fields;
pub mod interface;
pub(crate) mod mapper;
pub mod metrics;
pub mod schema;
pub(crate) mod type_table;

#[cfg(test)]
mod tests;
