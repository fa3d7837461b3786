// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::Path;

use crate::ast::{Document, Value};
use crate::KvError;

/// Write a document back out as KeyValues text.
///
/// Keys and string values are written quoted and verbatim, nested objects as
/// brace blocks indented with tabs. A key that collected several values is
/// written once per value, so parsing the output (without merging
/// duplicates) gives back the same document.
///
/// # Examples
/// ```
/// use valve_kv::{export, parse_str};
///
/// let doc = parse_str(r#""A" { "B" "C" }"#).unwrap();
/// assert_eq!(export::to_kv_string(&doc), "\"A\"\n{\n\t\"B\"\t\t\"C\"\n}\n");
/// ```
pub fn to_kv_string(doc: &Document) -> String {
    let mut out = String::new();
    for (key, value) in doc.iter() {
        write_entry(&mut out, key, value, 0);
    }
    out
}

/// Export a document to pretty-printed JSON.
///
/// Objects become JSON objects in document order, strings stay strings and
/// duplicated keys become arrays.
pub fn to_json(doc: &Document) -> Result<String, KvError> {
    serde_json::to_string_pretty(doc).map_err(|e| KvError::Encoding {
        message: format!("Failed to serialize document to JSON: {}", e),
        hint: None,
        code: Some(320),
    })
}

/// Load a KeyValues file (with its `#base` files) and export it to JSON.
///
/// # Errors
/// Returns error if the file can't be read or contains invalid KeyValues syntax.
pub fn export_file_to_json<P: AsRef<Path>>(path: P) -> Result<String, KvError> {
    let doc = crate::parse_file(path)?;
    to_json(&doc)
}

/// Write `doc` as KeyValues text to `path`.
pub fn write_kv_file<P: AsRef<Path>>(doc: &Document, path: P) -> Result<(), KvError> {
    let path = path.as_ref();
    fs::write(path, to_kv_string(doc)).map_err(|e| KvError::FileError {
        message: format!("Failed to write file: {}", e),
        path: path.display().to_string(),
        hint: Some("Check that the directory exists and is writable".into()),
        code: Some(302),
    })
}

fn write_entry(out: &mut String, key: &str, value: &Value, depth: usize) {
    match value {
        Value::String(s) => {
            indent(out, depth);
            out.push_str(&quote(key));
            out.push_str("\t\t");
            out.push_str(&quote(s));
            out.push('\n');
        }
        Value::Object(items) => {
            indent(out, depth);
            out.push_str(&quote(key));
            out.push('\n');
            indent(out, depth);
            out.push_str("{\n");
            for (k, v) in items {
                write_entry(out, k, v, depth + 1);
            }
            indent(out, depth);
            out.push_str("}\n");
        }
        Value::List(values) => {
            for v in values {
                write_entry(out, key, v, depth);
            }
        }
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

/// Quote `s` so the reader gets it back unchanged.
///
/// Escapes are kept verbatim when reading, so quoting only works when every
/// `"` inside is already escaped and the text doesn't end in an odd run of
/// backslashes. Anything else is written as a quoteless token when it can be.
fn quote(s: &str) -> String {
    if survives_quoting(s) || !survives_bare(s) {
        format!("\"{}\"", s)
    } else {
        s.to_string()
    }
}

fn survives_quoting(s: &str) -> bool {
    let mut backslashes = 0usize;
    for c in s.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' if backslashes % 2 == 0 => return false,
            _ => backslashes = 0,
        }
    }
    backslashes % 2 == 0
}

fn survives_bare(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with(['"', '{', '}', '[', '/', '#'])
        && !s.chars().any(|c| c.is_whitespace() || c.is_control())
}
