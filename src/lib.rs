pub mod ast;
pub mod config;
pub mod encoding;
pub mod error;
pub mod export;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod resolver;

use std::path::Path;

pub use ast::{Document, Object, Value};
pub use config::KeyValues;
pub use error::{ErrorKind, KvError};
pub use options::ParseOptions;
pub use resolver::Resolver;

/// Parse KeyValues text with default options.
///
/// # Examples
/// ```
/// let doc = valve_kv::parse_str(r#""A" { "B" "C" }"#).unwrap();
/// assert_eq!(doc.get("A").and_then(|a| a.get("B")).and_then(|b| b.as_str()), Some("C"));
/// ```
pub fn parse_str(input: &str) -> Result<Document, KvError> {
    parse_str_with(input, ParseOptions::default())
}

/// Parse KeyValues text. `#base` paths resolve against the working directory.
pub fn parse_str_with(input: &str, options: ParseOptions) -> Result<Document, KvError> {
    Resolver::new(options).load_str(input, None)
}

/// Decode and parse raw bytes (UTF-8, or UTF-16/UTF-32 with a byte order mark).
pub fn parse_bytes(bytes: &[u8], options: ParseOptions) -> Result<Document, KvError> {
    Resolver::new(options).load_bytes(bytes, None)
}

/// Load a KeyValues file with default options, merging its `#base` files.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document, KvError> {
    parse_file_with(path, ParseOptions::default())
}

pub fn parse_file_with<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document, KvError> {
    Resolver::new(options).load_file(path)
}
