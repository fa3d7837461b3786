// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};

use crate::ast::{Document, Value};
use crate::options::ParseOptions;
use crate::resolver::Resolver;
use crate::KvError;

mod access;
mod validation;
mod conversion;
mod helpers;

/// A parsed KeyValues document plus typed, path-based access into it.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValues {
    document: Document,
    source: Option<PathBuf>,
}

impl KeyValues {
    /// Load a KeyValues file, merging any `#base` files it declares.
    ///
    /// # Example
    /// ```no_run
    /// # use valve_kv::KeyValues;
    /// # fn main() -> Result<(), valve_kv::KvError> {
    /// let kv = KeyValues::from_file("scripts/npc_units.txt")?;
    /// let health: u32 = kv.get("DOTAUnits.npc_dota_creep.StatusHealth")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, KvError> {
        Self::from_file_with_options(path, ParseOptions::default())
    }

    pub fn from_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self, KvError> {
        let path = path.as_ref();
        let document = Resolver::new(options).load_file(path)?;

        Ok(Self {
            document,
            source: Some(path.to_path_buf()),
        })
    }

    /// Parse KeyValues text held in memory. `#base` paths resolve against the
    /// working directory.
    pub fn from_str(content: &str) -> Result<Self, KvError> {
        Self::from_str_with_options(content, ParseOptions::default())
    }

    pub fn from_str_with_options(content: &str, options: ParseOptions) -> Result<Self, KvError> {
        let document = Resolver::new(options).load_str(content, None)?;
        Ok(Self::from(document))
    }

    /// Decode raw bytes (UTF-8, or UTF-16/UTF-32 with a byte order mark) and parse them.
    pub fn from_bytes(bytes: &[u8], options: ParseOptions) -> Result<Self, KvError> {
        let document = Resolver::new(options).load_bytes(bytes, None)?;
        Ok(Self::from(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// The file this document was loaded from, if any.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl From<Document> for KeyValues {
    fn from(document: Document) -> Self {
        Self {
            document,
            source: None,
        }
    }
}

#[cfg(test)]
mod tests;
