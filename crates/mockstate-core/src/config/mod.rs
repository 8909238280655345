//! Settings loading and parsing (YAML/JSON/JSONC).

pub mod error;
pub mod parser;
pub mod settings;
