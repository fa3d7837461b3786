// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ast::{Document, Object, Value};
use crate::encoding;
use crate::options::ParseOptions;
use crate::parser::Parser;
use crate::KvError;

/// A `#base` file after it has been loaded, waiting to be merged.
#[derive(Debug, Clone)]
pub struct BaseInclusion {
    pub path: PathBuf,
    pub document: Document,
}

/// Loads KeyValues files and the `#base` files they pull in.
///
/// Holds the chain of files currently being parsed so that a file which
/// (directly or indirectly) includes itself is rejected instead of
/// recursing forever.
#[derive(Debug, Default)]
pub struct Resolver {
    options: ParseOptions,
    in_progress: Vec<PathBuf>,
}

impl Resolver {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            in_progress: Vec::new(),
        }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Read, decode and parse a file, resolving its `#base` directives
    /// relative to the file's directory.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Document, KvError> {
        let path = path.as_ref();
        let canonical = fs::canonicalize(path).map_err(|e| file_error(path, &e.to_string()))?;

        if self.in_progress.contains(&canonical) {
            return Err(KvError::CyclicBase {
                path: path.display().to_string(),
                hint: Some(format!("Inclusion chain: {}", self.chain_with(&canonical))),
                code: Some(303),
            });
        }

        let bytes = fs::read(path).map_err(|e| file_error(path, &e.to_string()))?;
        let content = encoding::normalize(&bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "loading KeyValues file");

        self.in_progress.push(canonical);
        let result = Parser::with_options(&content, self.options)
            .with_source(path)
            .parse_document(self);
        self.in_progress.pop();

        result
    }

    /// Parse in-memory text. `#base` paths resolve against `source`'s
    /// directory, or the working directory when there is none.
    pub fn load_str(&mut self, input: &str, source: Option<&Path>) -> Result<Document, KvError> {
        let mut parser = Parser::with_options(encoding::strip_bom(input), self.options);
        if let Some(path) = source {
            parser = parser.with_source(path);
        }
        parser.parse_document(self)
    }

    /// Decode raw bytes (see [`encoding::normalize`]) and parse them.
    pub fn load_bytes(&mut self, bytes: &[u8], source: Option<&Path>) -> Result<Document, KvError> {
        let content = encoding::normalize(bytes)?;
        self.load_str(&content, source)
    }

    /// Resolve and fully parse the target of a `#base` directive.
    pub(crate) fn load_base(&mut self, base_dir: &Path, raw_path: &str) -> Result<BaseInclusion, KvError> {
        let path = resolve_base_path(raw_path, base_dir)?;
        debug!(path = %path.display(), "resolving #base");

        let document = self.load_file(&path)?;
        Ok(BaseInclusion { path, document })
    }

    fn chain_with(&self, repeated: &Path) -> String {
        self.in_progress
            .iter()
            .map(|p| p.display().to_string())
            .chain(std::iter::once(repeated.display().to_string()))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// Merge every base's first root object into the first root of `roots`.
///
/// Keys are only added, never overwritten: a key that already exists in the
/// including root is a [`KvError::KeyCollision`].
pub(crate) fn merge_bases(
    roots: &mut Object,
    bases: Vec<BaseInclusion>,
    source_name: &str,
) -> Result<(), KvError> {
    for base in bases {
        let base_name = base.path.display().to_string();

        let Some((_, base_root)) = base.document.roots.into_iter().next() else {
            debug!(path = %base_name, "#base file is empty, nothing to merge");
            continue;
        };
        let base_items = match base_root {
            Value::Object(items) => items,
            other => {
                return Err(invalid_base(&base_name, format!(
                    "first root is a {}, expected an object",
                    other.type_name()
                )));
            }
        };

        let target = match roots.first_mut() {
            Some((_, Value::Object(items))) => items,
            Some((name, other)) => {
                return Err(invalid_base(&base_name, format!(
                    "root '{}' of '{}' is a {}, expected an object",
                    name,
                    source_name,
                    other.type_name()
                )));
            }
            None => {
                return Err(invalid_base(&base_name, format!(
                    "'{}' has no root object to merge into",
                    source_name
                )));
            }
        };

        debug!(path = %base_name, keys = base_items.len(), "merging #base root");
        for (key, value) in base_items {
            if target.contains_key(&key) {
                return Err(KvError::KeyCollision {
                    key,
                    path: source_name.to_string(),
                    base_path: base_name,
                    hint: Some("Keys from #base files may not redefine keys of the including file".into()),
                    code: Some(304),
                });
            }
            target.insert(key, value);
        }
    }

    Ok(())
}

/// Turn a `#base` argument into a path: backslashes become `/`, a leading
/// `~/` expands to the home directory, relative paths hang off `base_dir`.
pub fn resolve_base_path(raw_path: &str, base_dir: &Path) -> Result<PathBuf, KvError> {
    let normalized = raw_path.trim().replace('\\', "/");

    let mut p = if let Some(rest) = normalized.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or_else(|| KvError::FileError {
            message: "Could not determine home directory for ~ expansion".into(),
            path: raw_path.to_string(),
            hint: Some("Set HOME or use a relative path in #base".into()),
            code: Some(300),
        })?;
        home.join(rest)
    } else {
        PathBuf::from(&normalized)
    };

    if p.is_relative() {
        p = base_dir.join(p);
    }
    Ok(p)
}

fn file_error(path: &Path, message: &str) -> KvError {
    KvError::FileError {
        message: format!("Failed to read file: {}", message),
        path: path.display().to_string(),
        hint: Some("Check that the file exists and is readable".into()),
        code: Some(301),
    }
}

fn invalid_base(path: &str, message: String) -> KvError {
    KvError::InvalidBase {
        message,
        path: path.to_string(),
        hint: None,
        code: Some(305),
    }
}
