//! Filter tokenizer.
//!
//! Produces tokens with byte offsets into the filter string. Words cover
//! attribute paths, operators, keywords and bare literals; a `[` inside a word
//! extends it to the matching `]`, so `emails[type eq "work"].value` is one
//! token. Whether a word is a keyword is decided by the parser.

use crate::error::{Expected, FilterSyntaxError};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind<'a> {
    /// Bare word: path, operator, keyword, number, `true`/`false`/`null`
    Word(&'a str),
    /// Decoded JSON string literal
    String(String),
    LParen,
    RParen,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind<'a>,
    /// Byte offset of the first character
    pub start: usize,
}

impl Token<'_> {
    /// Short description for syntax errors.
    pub fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Word(word) => format!("'{word}'"),
            TokenKind::String(_) => "string literal".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Eof => "end of filter".to_string(),
        }
    }
}

/// Split `input` into tokens, ending with a single [`TokenKind::Eof`].
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token<'_>>, FilterSyntaxError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut position = 0;

    while position < bytes.len() {
        let byte = bytes[position];
        if byte.is_ascii_whitespace() {
            position += 1;
            continue;
        }
        let start = position;
        match byte {
            b'(' => {
                tokens.push(Token {
                    kind: TokenKind::LParen,
                    start,
                });
                position += 1;
            }
            b')' => {
                tokens.push(Token {
                    kind: TokenKind::RParen,
                    start,
                });
                position += 1;
            }
            b'"' => {
                let end = scan_string(input, start)?;
                let literal: String = serde_json::from_str(&input[start..end]).map_err(|_| {
                    FilterSyntaxError {
                        position: start,
                        expected: Expected::Literal,
                        found: "malformed string literal".to_string(),
                    }
                })?;
                tokens.push(Token {
                    kind: TokenKind::String(literal),
                    start,
                });
                position = end;
            }
            _ => {
                let end = scan_word(input, start)?;
                tokens.push(Token {
                    kind: TokenKind::Word(&input[start..end]),
                    start,
                });
                position = end;
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        start: input.len(),
    });
    Ok(tokens)
}

/// End offset (exclusive) of the string literal opening at `start`.
fn scan_string(input: &str, start: usize) -> Result<usize, FilterSyntaxError> {
    let bytes = input.as_bytes();
    let mut position = start + 1;
    while position < bytes.len() {
        match bytes[position] {
            b'\\' => position += 2,
            b'"' => return Ok(position + 1),
            _ => position += 1,
        }
    }
    Err(FilterSyntaxError {
        position: input.len(),
        expected: Expected::ClosingQuote,
        found: "end of filter".to_string(),
    })
}

/// End offset (exclusive) of the word starting at `start`.
fn scan_word(input: &str, start: usize) -> Result<usize, FilterSyntaxError> {
    let bytes = input.as_bytes();
    let mut position = start;
    while position < bytes.len() {
        match bytes[position] {
            b'[' => {
                position = skip_bracket(input, position)?;
            }
            b'(' | b')' | b'"' => break,
            byte if byte.is_ascii_whitespace() => break,
            _ => position += 1,
        }
    }
    Ok(position)
}

/// Offset just past the `]` matching the `[` at `open`.
fn skip_bracket(input: &str, open: usize) -> Result<usize, FilterSyntaxError> {
    let bytes = input.as_bytes();
    let mut position = open + 1;
    let mut in_string = false;
    while position < bytes.len() {
        match (in_string, bytes[position]) {
            (true, b'\\') => position += 1,
            (true, b'"') => in_string = false,
            (false, b'"') => in_string = true,
            (false, b']') => return Ok(position + 1),
            _ => {}
        }
        position += 1;
    }
    let expected = if in_string {
        Expected::ClosingQuote
    } else {
        Expected::ClosingBracket
    };
    Err(FilterSyntaxError {
        position: input.len(),
        expected,
        found: "end of filter".to_string(),
    })
}
