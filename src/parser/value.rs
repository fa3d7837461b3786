use super::*;

/// Parse `key value` entries until the closing brace, or until end of input
/// when `open` is `None` (the top level).
pub(super) fn parse_entries(parser: &mut Parser, open: Option<Pos>) -> Result<Object, KvError> {
    let mut items = Object::new();

    loop {
        match parser.lexer.next_key()? {
            Token::String(key) | Token::Bare(key) => {
                let value = parse_value(parser)?;
                merge::store(&mut items, key, value, parser.options.merge_duplicates);
            }
            Token::RBrace => {
                if open.is_some() {
                    break;
                }
                let pos = parser.lexer.token_start();
                return Err(KvError::ExpectedEndOfInput {
                    found: '}',
                    line: pos.line,
                    column: pos.column,
                    offset: pos.offset,
                    hint: Some("Unbalanced '}' after the last root object".into()),
                    code: Some(206),
                });
            }
            Token::Eof => {
                let Some(open) = open else {
                    break;
                };
                return Err(KvError::UnexpectedEof {
                    message: format!(
                        "Missing '}}' for object opened at {}:{}",
                        open.line, open.column
                    ),
                    line: parser.lexer.line(),
                    column: parser.lexer.column(),
                    offset: parser.lexer.offset(),
                    hint: None,
                    code: Some(201),
                });
            }
            other => {
                return Err(parser.syntax_error(
                    format!("Unexpected {:?} in key position", other),
                    Some("Expected a key or '}'"),
                    205,
                ));
            }
        }
    }

    Ok(items)
}

pub(super) fn parse_value(parser: &mut Parser) -> Result<Value, KvError> {
    match parser.lexer.next_value()? {
        Token::String(s) | Token::Bare(s) | Token::Bracketed(s) => Ok(Value::String(s)),
        Token::LBrace => {
            let open = parser.lexer.token_start();
            Ok(Value::Object(parse_entries(parser, Some(open))?))
        }
        other => Err(parser.syntax_error(
            format!("Unexpected {:?} in value position", other),
            Some("Expected a string or '{ ... }'"),
            210,
        )),
    }
}
