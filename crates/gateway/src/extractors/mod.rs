//! Custom request extractors.

mod json_body;

pub use json_body::{null_as_empty, JsonBody};
