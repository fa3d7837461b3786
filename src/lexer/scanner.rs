use super::*;

/// Advance one character and update line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Result<char, KvError> {
    let curr = lexer.peek.ok_or_else(|| KvError::UnexpectedEof {
        message: "Unexpected end of input".into(),
        line: lexer.line,
        column: lexer.column,
        offset: lexer.pos,
        hint: None,
        code: Some(101),
    })?;

    lexer.pos += curr.len_utf8();
    if curr == '\n' {
        lexer.line += 1;
        lexer.column = 1;
    } else {
        lexer.column += 1;
    }
    lexer.peek = lexer.src[lexer.pos..].chars().next();
    Ok(curr)
}

/// Move forward to byte offset `target`, keeping line/column in step.
pub(super) fn advance_to(lexer: &mut Lexer, target: usize) -> Result<(), KvError> {
    while lexer.pos < target {
        bump(lexer)?;
    }
    Ok(())
}

pub(super) fn expect_char(lexer: &mut Lexer, expected: char) -> Result<(), KvError> {
    match lexer.peek {
        Some(c) if c == expected => {
            bump(lexer)?;
            Ok(())
        }
        Some(c) => Err(KvError::UnexpectedCharacter {
            character: c,
            line: lexer.line,
            column: lexer.column,
            offset: lexer.pos,
            hint: Some(format!("Expected '{}'", expected)),
            code: Some(104),
        }),
        None => Err(KvError::UnexpectedEof {
            message: format!("Expected '{}'", expected),
            line: lexer.line,
            column: lexer.column,
            offset: lexer.pos,
            hint: None,
            code: Some(101),
        }),
    }
}

/// Skip whitespace and comments
pub(super) fn skip_trivia(lexer: &mut Lexer) -> Result<(), KvError> {
    while let Some(c) = lexer.peek {
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                bump(lexer)?;
            }
            '/' => {
                if lexer.src[lexer.pos + 1..].starts_with('*') {
                    skip_block_comment(lexer)?;
                } else {
                    // A lone '/' opens a line comment just like "//".
                    skip_line_comment(lexer)?;
                }
            }
            _ => break,
        }
    }
    Ok(())
}

/// Skip trivia and any `[...]` conditionals between entries
pub(super) fn skip_insignificant(lexer: &mut Lexer) -> Result<(), KvError> {
    skip_trivia(lexer)?;
    while lexer.peek == Some('[') {
        skip_conditional(lexer)?;
        skip_trivia(lexer)?;
    }
    Ok(())
}

fn skip_line_comment(lexer: &mut Lexer) -> Result<(), KvError> {
    // The newline itself is left for the whitespace loop.
    let end = lexer.src[lexer.pos..]
        .find('\n')
        .map_or(lexer.src.len(), |i| lexer.pos + i);
    advance_to(lexer, end)
}

fn skip_block_comment(lexer: &mut Lexer) -> Result<(), KvError> {
    let start = lexer.position();
    bump(lexer)?; // '/'
    bump(lexer)?; // '*'

    match lexer.src[lexer.pos..].find("*/") {
        Some(i) => {
            let end = lexer.pos + i + 2;
            advance_to(lexer, end)
        }
        None => Err(KvError::UnterminatedComment {
            line: start.line,
            column: start.column,
            offset: start.offset,
            hint: Some("Close the comment with '*/'".into()),
            code: Some(106),
        }),
    }
}

fn skip_conditional(lexer: &mut Lexer) -> Result<(), KvError> {
    let start = lexer.position();
    bump(lexer)?; // '['

    // Conditions are never evaluated, so nesting is not tracked either.
    match lexer.src[lexer.pos..].find(']') {
        Some(i) => {
            let end = lexer.pos + i + 1;
            advance_to(lexer, end)
        }
        None => Err(KvError::UnterminatedConditional {
            line: start.line,
            column: start.column,
            offset: start.offset,
            hint: Some("Close the conditional with ']'".into()),
            code: Some(107),
        }),
    }
}
