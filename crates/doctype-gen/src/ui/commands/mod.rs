pub mod generate;
pub mod inspect;
pub mod list;

pub use generate::{GenerateConfig, generate_document};
pub use inspect::{InspectConfig, inspect_doctype};
pub use list::list_operations;
