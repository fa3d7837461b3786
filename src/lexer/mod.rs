// Author: Dustin Pilgrim
// License: MIT

use crate::KvError;

mod scanner;
mod tokenizer;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // --- literals ---
    /// Raw text between double quotes, escapes left as written.
    String(String),
    /// Unquoted run of characters up to the next whitespace.
    Bare(String),
    /// A `[...]` literal in value position, brackets included.
    Bracketed(String),

    // --- structure ---
    LBrace,
    RBrace,

    Eof,
}

/// Where a token or error starts in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

/// Character cursor over one KeyValues source text.
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    peek: Option<char>,
    line: usize,
    column: usize,
    token_start: Pos,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            src: input,
            pos: 0,
            peek: input.chars().next(),
            line: 1,
            column: 1,
            token_start: Pos { offset: 0, line: 1, column: 1 },
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn position(&self) -> Pos {
        Pos { offset: self.pos, line: self.line, column: self.column }
    }

    /// Start of the most recently read token.
    pub fn token_start(&self) -> Pos {
        self.token_start
    }

    pub fn peek_char(&self) -> Option<char> {
        self.peek
    }

    pub fn is_eof(&self) -> bool {
        self.peek.is_none()
    }

    /// Consume the current character; fails at end of input.
    pub fn bump(&mut self) -> Result<char, KvError> {
        scanner::bump(self)
    }

    /// Consume the current character, which must be `expected`.
    pub fn expect_char(&mut self, expected: char) -> Result<(), KvError> {
        scanner::expect_char(self, expected)
    }

    /// Skip whitespace and comments.
    pub fn skip_trivia(&mut self) -> Result<(), KvError> {
        scanner::skip_trivia(self)
    }

    /// Skip whitespace, comments and `[...]` conditionals.
    pub fn skip_insignificant(&mut self) -> Result<(), KvError> {
        scanner::skip_insignificant(self)
    }

    /// Read the token at a key position: a key, a closing brace or the end of input.
    pub fn next_key(&mut self) -> Result<Token, KvError> {
        tokenizer::next_key_token(self)
    }

    /// Read the token at a value position: a string, bracket string or opening brace.
    pub fn next_value(&mut self) -> Result<Token, KvError> {
        tokenizer::next_value_token(self)
    }

    /// Read a `#base` target, quoted or bare.
    pub fn next_path(&mut self) -> Result<String, KvError> {
        tokenizer::next_path_token(self)
    }
}
