use thiserror::Error;

/// Broad classification of a [`KvError`], for callers that only care about
/// which stage of loading failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The text violates the KeyValues grammar.
    Syntax,
    /// A `#base` file defines a key the including root already has.
    KeyCollision,
    /// A file could not be found or read.
    Io,
    /// The input bytes could not be decoded.
    Encoding,
    /// A `#base` directive could not be honoured (cycle, bad target).
    Include,
    /// Typed access on an already parsed document failed.
    Access,
}

/// The main error type for KeyValues loading, parsing and access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KvError {
    #[error("[KV] Syntax Error at {line}:{column}: {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        offset: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for characters that cannot start the token expected at this point.
    #[error("[KV] Unexpected character '{}' at {line}:{column}{}{}", .character.escape_debug(), hint_suffix(.hint), code_suffix(.code))]
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
        offset: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KV] Unexpected EOF at {line}:{column}: {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    UnexpectedEof {
        message: String,
        line: usize,
        column: usize,
        offset: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a quoted string has no closing quote.
    #[error("[KV] Unclosed string starting at {line}:{column}{}{}", hint_suffix(.hint), code_suffix(.code))]
    UnterminatedString {
        line: usize,
        column: usize,
        offset: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KV] Unclosed comment starting at {line}:{column}{}{}", hint_suffix(.hint), code_suffix(.code))]
    UnterminatedComment {
        line: usize,
        column: usize,
        offset: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KV] Unclosed conditional starting at {line}:{column}{}{}", hint_suffix(.hint), code_suffix(.code))]
    UnterminatedConditional {
        line: usize,
        column: usize,
        offset: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when content follows the last root entry.
    #[error("[KV] Expected end of input but found '{}' at {line}:{column}{}{}", .found.escape_debug(), hint_suffix(.hint), code_suffix(.code))]
    ExpectedEndOfInput {
        found: char,
        line: usize,
        column: usize,
        offset: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KV] Key collision on '{key}' between '{path}' and base '{base_path}'{}{}", hint_suffix(.hint), code_suffix(.code))]
    KeyCollision {
        key: String,
        path: String,
        base_path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KV] Cyclic #base inclusion of '{path}'{}{}", hint_suffix(.hint), code_suffix(.code))]
    CyclicBase {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KV] Invalid #base '{path}': {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    InvalidBase {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KV] File Error '{path}': {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KV] Encoding Error: {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    Encoding {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KV] Path '{path}' not found{}{}", hint_suffix(.hint), code_suffix(.code))]
    PathNotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KV] Type Error: {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    TypeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    #[error("[KV] Validation Error: {message}{}{}", hint_suffix(.hint), code_suffix(.code))]
    ValidationError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl KvError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KvError::SyntaxError { .. }
            | KvError::UnexpectedCharacter { .. }
            | KvError::UnexpectedEof { .. }
            | KvError::UnterminatedString { .. }
            | KvError::UnterminatedComment { .. }
            | KvError::UnterminatedConditional { .. }
            | KvError::ExpectedEndOfInput { .. } => ErrorKind::Syntax,
            KvError::KeyCollision { .. } => ErrorKind::KeyCollision,
            KvError::FileError { .. } => ErrorKind::Io,
            KvError::Encoding { .. } => ErrorKind::Encoding,
            KvError::CyclicBase { .. } | KvError::InvalidBase { .. } => ErrorKind::Include,
            KvError::PathNotFound { .. }
            | KvError::TypeError { .. }
            | KvError::ValidationError { .. } => ErrorKind::Access,
        }
    }

    pub fn is_syntax_error(&self) -> bool {
        self.kind() == ErrorKind::Syntax
    }

    /// Line and column (both 1-based) for errors that point into the source text.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            KvError::SyntaxError { line, column, .. }
            | KvError::UnexpectedCharacter { line, column, .. }
            | KvError::UnexpectedEof { line, column, .. }
            | KvError::UnterminatedString { line, column, .. }
            | KvError::UnterminatedComment { line, column, .. }
            | KvError::UnterminatedConditional { line, column, .. }
            | KvError::ExpectedEndOfInput { line, column, .. } => Some((*line, *column)),
            _ => None,
        }
    }

    /// Byte offset into the (normalized) source for syntax errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            KvError::SyntaxError { offset, .. }
            | KvError::UnexpectedCharacter { offset, .. }
            | KvError::UnexpectedEof { offset, .. }
            | KvError::UnterminatedString { offset, .. }
            | KvError::UnterminatedComment { offset, .. }
            | KvError::UnterminatedConditional { offset, .. }
            | KvError::ExpectedEndOfInput { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            KvError::SyntaxError { code, .. }
            | KvError::UnexpectedCharacter { code, .. }
            | KvError::UnexpectedEof { code, .. }
            | KvError::UnterminatedString { code, .. }
            | KvError::UnterminatedComment { code, .. }
            | KvError::UnterminatedConditional { code, .. }
            | KvError::ExpectedEndOfInput { code, .. }
            | KvError::KeyCollision { code, .. }
            | KvError::CyclicBase { code, .. }
            | KvError::InvalidBase { code, .. }
            | KvError::FileError { code, .. }
            | KvError::Encoding { code, .. }
            | KvError::PathNotFound { code, .. }
            | KvError::TypeError { code, .. }
            | KvError::ValidationError { code, .. } => *code,
        }
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h))
}

fn code_suffix(code: &Option<u32>) -> String {
    code.map_or(String::new(), |c| format!(" Code: {}", c))
}
