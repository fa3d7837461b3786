use tracing::trace;

use super::*;

pub(super) fn parse_document(parser: &mut Parser, resolver: &mut Resolver) -> Result<Document, KvError> {
    parser.lexer.skip_trivia()?;

    // #base directives may only precede the first root entry.
    let mut bases = Vec::new();
    while parser.lexer.peek_char() == Some('#') {
        let target = parse_base_directive(parser)?;
        trace!(path = %target, "found #base directive");
        bases.push(resolver.load_base(&parser.base_dir(), &target)?);
        parser.lexer.skip_trivia()?;
    }

    let mut roots = value::parse_entries(parser, None)?;
    crate::resolver::merge_bases(&mut roots, bases, &parser.source_name())?;

    Ok(Document { roots })
}

fn parse_base_directive(parser: &mut Parser) -> Result<String, KvError> {
    for expected in "#base".chars() {
        parser.lexer.expect_char(expected).map_err(|e| match e {
            KvError::UnexpectedCharacter { character, line, column, offset, code, .. } => {
                KvError::UnexpectedCharacter {
                    character,
                    line,
                    column,
                    offset,
                    hint: Some("Only #base directives are supported".into()),
                    code,
                }
            }
            other => other,
        })?;
    }

    match parser.lexer.peek_char() {
        Some(c) if !c.is_whitespace() && c != '"' => Err(KvError::UnexpectedCharacter {
            character: c,
            line: parser.lexer.line(),
            column: parser.lexer.column(),
            offset: parser.lexer.offset(),
            hint: Some("Separate #base from its file path".into()),
            code: Some(104),
        }),
        _ => parser.lexer.next_path(),
    }
}
