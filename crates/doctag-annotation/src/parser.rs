//! Grammar for a single annotation line
//!
//! ```text
//! line       = [ "//" | "///" ] annotation
//! annotation = "@" IDENT [ "(" [ attribute { "," attribute } [ "," ] ] ")" ]
//! attribute  = IDENT "=" STRING
//! ```
//!
//! Whitespace between tokens is insignificant, except that `@` and the kind
//! must be adjacent. Nothing may follow the annotation on the same line.

use crate::error::{AnnotationError, AnnotationResult};
use crate::registry::AnnotationRegistry;
use crate::token::{Lexer, Token, TokenKind};
use doctag_model::Annotation;

/// Parse one documentation line.
///
/// Returns `Ok(None)` when the line is not an annotation: it does not start
/// with `@`, it names a kind the registry does not know, or the kind is
/// followed by something other than `(` or the end of the line. A line that
/// opens the attribute list of a registered kind but breaks the grammar is an
/// error.
pub fn parse_annotation(
    line: &str,
    registry: &AnnotationRegistry,
) -> AnnotationResult<Option<Annotation>> {
    let Some(skip) = annotation_start(line) else {
        return Ok(None);
    };

    let mut lexer = Lexer::new(line, skip);
    // annotation_start guarantees the `@`
    lexer.next_token()?;
    if !lexer.at_ident_start() {
        return Ok(None);
    }

    let kind = match lexer.next_token()? {
        Some(Token {
            kind: TokenKind::Ident(kind),
            ..
        }) => kind,
        _ => return Ok(None),
    };
    if !registry.contains(&kind) {
        return Ok(None);
    }

    let mut annotation = Annotation::new(kind);

    match lexer.peek_char() {
        None => return Ok(Some(annotation)),
        Some('(') => {
            lexer.next_token()?;
        }
        // prose that happens to open with a kind, e.g. `@Event is emitted when...`
        Some(_) => return Ok(None),
    }

    loop {
        let name = match lexer.next_token()? {
            Some(Token {
                kind: TokenKind::RParen,
                ..
            }) => break,
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) => name,
            Some(token) => {
                return Err(AnnotationError::syntax(
                    token.column,
                    "expected attribute name or `)`",
                ));
            }
            None => {
                return Err(AnnotationError::syntax(
                    lexer.column(),
                    "missing closing `)`",
                ));
            }
        };

        expect(&mut lexer, TokenKind::Equals, "`=`")?;

        let value = match lexer.next_token()? {
            Some(Token {
                kind: TokenKind::Str(value),
                ..
            }) => value,
            Some(token) => {
                return Err(AnnotationError::syntax(
                    token.column,
                    format!("expected a quoted string value for `{name}`"),
                ));
            }
            None => {
                return Err(AnnotationError::syntax(
                    lexer.column(),
                    format!("expected a quoted string value for `{name}`"),
                ));
            }
        };

        if annotation.has_attribute(&name) {
            return Err(AnnotationError::DuplicateAttribute {
                kind: annotation.kind,
                attribute: name,
            });
        }
        annotation.attributes.insert(name, value);

        match lexer.next_token()? {
            Some(Token {
                kind: TokenKind::Comma,
                ..
            }) => continue,
            Some(Token {
                kind: TokenKind::RParen,
                ..
            }) => break,
            Some(token) => {
                return Err(AnnotationError::syntax(token.column, "expected `,` or `)`"));
            }
            None => {
                return Err(AnnotationError::syntax(
                    lexer.column(),
                    "missing closing `)`",
                ));
            }
        }
    }

    if let Some(token) = lexer.next_token()? {
        return Err(AnnotationError::syntax(
            token.column,
            "unexpected input after annotation",
        ));
    }

    Ok(Some(annotation))
}

/// Render an annotation back into its line form.
///
/// Attributes are written in key order; parsing the result yields an equal
/// annotation.
pub fn render_annotation(annotation: &Annotation) -> String {
    let mut out = format!("@{}", annotation.kind);
    if annotation.attributes.is_empty() {
        return out;
    }

    let attributes: Vec<String> = annotation
        .attributes
        .iter()
        .map(|(name, value)| format!("{name} = \"{}\"", escape(value)))
        .collect();
    out.push('(');
    out.push_str(&attributes.join(", "));
    out.push(')');
    out
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Character offset of the `@` when the line (minus an optional comment prefix) starts with one
fn annotation_start(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    let body = trimmed
        .strip_prefix("///")
        .or_else(|| trimmed.strip_prefix("//"))
        .unwrap_or(trimmed)
        .trim_start();

    if !body.starts_with('@') {
        return None;
    }
    let byte_offset = line.len() - body.len();
    Some(line[..byte_offset].chars().count())
}

fn expect(lexer: &mut Lexer<'_>, expected: TokenKind, what: &str) -> AnnotationResult<()> {
    match lexer.next_token()? {
        Some(token) if token.kind == expected => Ok(()),
        Some(token) => Err(AnnotationError::syntax(
            token.column,
            format!("expected {what}"),
        )),
        None => Err(AnnotationError::syntax(
            lexer.column(),
            format!("expected {what}"),
        )),
    }
}
