//! Tokenizer for annotation lines
//!
//! The lexer is pulled one token at a time so that a line can be abandoned as
//! soon as it turns out not to be an annotation of a registered kind, without
//! tripping over whatever free text follows.

use crate::error::{AnnotationError, AnnotationResult};
use std::iter::{Enumerate, Peekable};
use std::str::Chars;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    At,
    Ident(String),
    LParen,
    RParen,
    Equals,
    Comma,
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// 1-based character column in the line
    pub column: usize,
}

pub(crate) struct Lexer<'a> {
    chars: Peekable<Enumerate<Chars<'a>>>,
    end_column: usize,
}

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a> Lexer<'a> {
    /// Start lexing `line` after its first `skip` characters
    pub fn new(line: &'a str, skip: usize) -> Self {
        let mut chars = line.chars().enumerate().peekable();
        for _ in 0..skip {
            chars.next();
        }
        Self {
            chars,
            end_column: line.chars().count() + 1,
        }
    }

    /// Column of the next unread character (one past the end when exhausted)
    pub fn column(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(idx, _)| idx + 1)
            .unwrap_or(self.end_column)
    }

    /// Whether the very next character, whitespace included, can start an identifier
    pub fn at_ident_start(&mut self) -> bool {
        matches!(self.chars.peek(), Some((_, c)) if is_ident_start(*c))
    }

    /// The next non-whitespace character, without consuming it
    pub fn peek_char(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.chars.peek().map(|(_, c)| *c)
    }

    /// Read the next token, `None` at end of line
    pub fn next_token(&mut self) -> AnnotationResult<Option<Token>> {
        self.skip_whitespace();

        let Some((idx, c)) = self.chars.next() else {
            return Ok(None);
        };
        let column = idx + 1;

        let kind = match c {
            '@' => TokenKind::At,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '=' => TokenKind::Equals,
            ',' => TokenKind::Comma,
            '"' => TokenKind::Str(self.string(column)?),
            c if is_ident_start(c) => TokenKind::Ident(self.ident(c)),
            other => {
                return Err(AnnotationError::syntax(
                    column,
                    format!("unexpected character `{other}`"),
                ));
            }
        };

        Ok(Some(Token { kind, column }))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn ident(&mut self, first: char) -> String {
        let mut ident = String::from(first);
        while let Some((_, c)) = self.chars.peek() {
            if !is_ident_continue(*c) {
                break;
            }
            ident.push(*c);
            self.chars.next();
        }
        ident
    }

    fn string(&mut self, opening: usize) -> AnnotationResult<String> {
        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some((_, '"')) => return Ok(value),
                Some((idx, '\\')) => match self.chars.next() {
                    Some((_, '"')) => value.push('"'),
                    Some((_, '\\')) => value.push('\\'),
                    Some((_, other)) => {
                        return Err(AnnotationError::syntax(
                            idx + 1,
                            format!("unsupported escape `\\{other}`"),
                        ));
                    }
                    None => break,
                },
                Some((_, c)) => value.push(c),
                None => break,
            }
        }
        Err(AnnotationError::syntax(
            opening,
            "unterminated string literal",
        ))
    }
}
