use super::*;
use super::scanner::{advance_to, bump, skip_insignificant, skip_trivia};

pub(super) fn next_key_token(lexer: &mut Lexer) -> Result<Token, KvError> {
    skip_insignificant(lexer)?;
    lexer.token_start = lexer.position();

    match lexer.peek {
        None => Ok(Token::Eof),
        Some('}') => {
            bump(lexer)?;
            Ok(Token::RBrace)
        }
        Some('"') => tokenize_quoted(lexer).map(Token::String),
        Some(c) if is_token_char(c) => tokenize_bare(lexer).map(Token::Bare),
        Some(c) => tokenize_unexpected_char(lexer, c, "Expected a key or '}'"),
    }
}

pub(super) fn next_value_token(lexer: &mut Lexer) -> Result<Token, KvError> {
    skip_trivia(lexer)?;
    lexer.token_start = lexer.position();

    match lexer.peek {
        None => Err(KvError::UnexpectedEof {
            message: "Expected a value".into(),
            line: lexer.line,
            column: lexer.column,
            offset: lexer.pos,
            hint: Some("Every key needs a string or '{ ... }' value".into()),
            code: Some(101),
        }),
        Some('"') => tokenize_quoted(lexer).map(Token::String),
        Some('{') => {
            bump(lexer)?;
            Ok(Token::LBrace)
        }
        Some('[') => tokenize_bracketed(lexer).map(Token::Bracketed),
        Some(c) if is_token_char(c) => tokenize_bare(lexer).map(Token::Bare),
        Some(c) => tokenize_unexpected_char(lexer, c, "Expected a value"),
    }
}

pub(super) fn next_path_token(lexer: &mut Lexer) -> Result<String, KvError> {
    skip_trivia(lexer)?;
    lexer.token_start = lexer.position();

    match lexer.peek {
        None => Err(KvError::UnexpectedEof {
            message: "Expected a file path after #base".into(),
            line: lexer.line,
            column: lexer.column,
            offset: lexer.pos,
            hint: None,
            code: Some(101),
        }),
        Some('"') => tokenize_quoted(lexer),
        Some(c) if is_token_char(c) => tokenize_bare(lexer),
        Some(c) => tokenize_unexpected_char(lexer, c, "Expected a file path after #base"),
    }
}

/// Whitespace as far as bare tokens are concerned.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

fn is_token_char(c: char) -> bool {
    !c.is_whitespace() && !c.is_control()
}

/// Read a quoted string. The closing quote is the first `"` preceded by an
/// even number of backslashes; escapes are kept verbatim.
fn tokenize_quoted(lexer: &mut Lexer) -> Result<String, KvError> {
    let start = lexer.position();
    bump(lexer)?; // opening '"'

    let src = lexer.src;
    let content_start = lexer.pos;
    let bytes = src.as_bytes();
    let mut search_from = content_start;

    let end = loop {
        let Some(i) = src[search_from..].find('"') else {
            return Err(KvError::UnterminatedString {
                line: start.line,
                column: start.column,
                offset: start.offset,
                hint: Some("String literal not closed".into()),
                code: Some(103),
            });
        };
        let quote = search_from + i;

        let backslashes = bytes[content_start..quote]
            .iter()
            .rev()
            .take_while(|&&b| b == b'\\')
            .count();
        if backslashes % 2 == 0 {
            break quote;
        }
        search_from = quote + 1;
    };

    let content = src[content_start..end].to_string();
    advance_to(lexer, end)?;
    bump(lexer)?; // closing '"'
    Ok(content)
}

fn tokenize_bare(lexer: &mut Lexer) -> Result<String, KvError> {
    let start = lexer.pos;
    while let Some(c) = lexer.peek {
        if is_space(c) {
            break;
        }
        bump(lexer)?;
    }
    Ok(lexer.src[start..lexer.pos].to_string())
}

fn tokenize_bracketed(lexer: &mut Lexer) -> Result<String, KvError> {
    let start = lexer.position();
    bump(lexer)?; // '['

    let Some(i) = lexer.src[lexer.pos..].find(']') else {
        return Err(KvError::UnexpectedEof {
            message: "Missing ']' for bracketed value".into(),
            line: start.line,
            column: start.column,
            offset: start.offset,
            hint: None,
            code: Some(105),
        });
    };

    let end = lexer.pos + i + 1;
    let content = lexer.src[start.offset..end].to_string();
    advance_to(lexer, end)?;
    Ok(content)
}

fn tokenize_unexpected_char<T>(lexer: &Lexer, ch: char, hint: &str) -> Result<T, KvError> {
    Err(KvError::UnexpectedCharacter {
        character: ch,
        line: lexer.line,
        column: lexer.column,
        offset: lexer.pos,
        hint: Some(hint.into()),
        code: Some(104),
    })
}
