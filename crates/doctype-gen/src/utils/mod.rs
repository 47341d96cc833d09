pub mod refs;
pub mod spec;
