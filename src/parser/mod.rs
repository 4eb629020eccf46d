//! Parsing and serialization of layout save files.

pub mod layout_json;

pub use layout_json::{parse_layout_bytes, parse_layout_json, serialize_layout};
