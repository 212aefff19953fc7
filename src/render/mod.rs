//! Output rendering for outlines and ranking reports.

mod json;

pub use json::{to_json, write_json, JsonFormat};
