use std::path::{Path, PathBuf};

use crate::ast::{Document, Object, Value};
use crate::lexer::{Lexer, Pos, Token};
use crate::options::ParseOptions;
use crate::resolver::Resolver;
use crate::KvError;

mod document;
mod merge;
mod value;

/// Recursive-descent parser for one KeyValues source text.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    options: ParseOptions,
    source: Option<PathBuf>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        Self {
            lexer: Lexer::new(input),
            options,
            source: None,
        }
    }

    /// Record the file this text came from; `#base` paths resolve against its directory.
    pub fn with_source<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Display name used in key collision errors.
    pub(crate) fn source_name(&self) -> String {
        self.source
            .as_ref()
            .map_or_else(|| "<string>".to_string(), |p| p.display().to_string())
    }

    /// Directory relative `#base` paths are resolved against.
    pub(crate) fn base_dir(&self) -> PathBuf {
        match self.source.as_ref().and_then(|p| p.parent()) {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub(crate) fn syntax_error(&self, message: impl Into<String>, hint: Option<&str>, code: u32) -> KvError {
        let pos = self.lexer.token_start();
        KvError::SyntaxError {
            message: message.into(),
            line: pos.line,
            column: pos.column,
            offset: pos.offset,
            hint: hint.map(Into::into),
            code: Some(code),
        }
    }

    /// Parse the whole input, loading `#base` files through `resolver`.
    pub fn parse_document(&mut self, resolver: &mut Resolver) -> Result<Document, KvError> {
        document::parse_document(self, resolver)
    }

    /// Parse the whole input with a fresh resolver.
    pub fn parse(&mut self) -> Result<Document, KvError> {
        let mut resolver = Resolver::new(self.options);
        document::parse_document(self, &mut resolver)
    }
}
