pub mod json;

pub use json::extract_json_object;
