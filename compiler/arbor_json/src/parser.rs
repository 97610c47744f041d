//! Recursive descent JSON parser.
//!
//! Strict RFC 8259 input: no comments, no trailing commas, no recovery.
//! The first malformed construct ends the parse with a [`ParseError`]
//! carrying its byte offset.

use std::ops::Range;

use logos::Logos;
use rustc_hash::FxHashSet;

use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::RawToken;
use crate::value::JsonExpr;

/// Parse any JSON value.
pub fn parse(text: &str) -> Result<JsonExpr, ParseError> {
    Parser::new(text)
        .and_then(|mut parser| parser.parse_root(false))
        .inspect_err(|err| tracing::debug!(%err, "json parse failed"))
}

/// Parse a JSON document whose top level is an object or array.
pub fn parse_document(text: &str) -> Result<JsonExpr, ParseError> {
    Parser::new(text)
        .and_then(|mut parser| parser.parse_root(true))
        .inspect_err(|err| tracing::debug!(%err, "json parse failed"))
}

struct Parser<'src> {
    text: &'src str,
    tokens: Vec<(RawToken, Range<usize>)>,
    pos: usize,
}

impl<'src> Parser<'src> {
    fn new(text: &'src str) -> Result<Self, ParseError> {
        let mut tokens = Vec::new();
        let mut lexer = RawToken::lexer(text);
        while let Some(token) = lexer.next() {
            match token {
                Ok(raw) => tokens.push((raw, lexer.span())),
                Err(()) => {
                    return Err(ParseError::new(ParseErrorKind::InvalidToken, lexer.span().start));
                }
            }
        }
        Ok(Self { text, tokens, pos: 0 })
    }

    fn peek(&self) -> Option<RawToken> {
        self.tokens.get(self.pos).map(|(raw, _)| *raw)
    }

    fn bump(&mut self) -> Option<(RawToken, Range<usize>)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Offset of the next token, or the end of input.
    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.text.len(), |(_, span)| span.start)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        match self.peek() {
            None => ParseError::new(ParseErrorKind::UnexpectedEnd, self.text.len()),
            Some(found) => {
                tracing::trace!(found = found.describe(), %kind, "unexpected token");
                ParseError::new(kind, self.offset())
            }
        }
    }

    fn parse_root(&mut self, container_only: bool) -> Result<JsonExpr, ParseError> {
        match self.peek() {
            None => return Err(ParseError::new(ParseErrorKind::EmptyInput, 0)),
            Some(RawToken::LBrace | RawToken::LBracket) => {}
            Some(_) if container_only => {
                return Err(ParseError::new(ParseErrorKind::ExpectedContainer, self.offset()));
            }
            Some(_) => {}
        }
        let value = self.parse_value()?;
        if self.peek().is_some() {
            return Err(ParseError::new(ParseErrorKind::TrailingInput, self.offset()));
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> Result<JsonExpr, ParseError> {
        let Some(raw) = self.peek() else {
            return Err(self.error(ParseErrorKind::ExpectedValue));
        };
        let value = match raw {
            RawToken::LBrace => return arbor_stack::ensure_sufficient_stack(|| self.parse_object()),
            RawToken::LBracket => return arbor_stack::ensure_sufficient_stack(|| self.parse_array()),
            RawToken::Null => JsonExpr::Null,
            RawToken::True => JsonExpr::Bool(true),
            RawToken::False => JsonExpr::Bool(false),
            RawToken::Number => {
                let span = &self.tokens[self.pos].1;
                JsonExpr::number(&self.text[span.clone()])
            }
            RawToken::String => JsonExpr::String(self.cook_string()?),
            RawToken::RBrace | RawToken::RBracket | RawToken::Colon | RawToken::Comma => {
                return Err(self.error(ParseErrorKind::ExpectedValue));
            }
        };
        self.pos += 1;
        Ok(value)
    }

    fn parse_object(&mut self) -> Result<JsonExpr, ParseError> {
        self.bump();
        let mut members = Vec::new();
        let mut seen = FxHashSet::default();
        if self.peek() == Some(RawToken::RBrace) {
            self.bump();
            return Ok(JsonExpr::Object(members));
        }
        loop {
            if self.peek() != Some(RawToken::String) {
                return Err(self.error(ParseErrorKind::ExpectedMember));
            }
            let name = self.cook_string()?;
            if !seen.insert(name.clone()) {
                return Err(self.error(ParseErrorKind::DuplicateKey));
            }
            self.pos += 1;
            if self.peek() != Some(RawToken::Colon) {
                return Err(self.error(ParseErrorKind::ExpectedColon));
            }
            self.bump();
            members.push((name, self.parse_value()?));
            match self.peek() {
                Some(RawToken::Comma) => {
                    self.bump();
                }
                Some(RawToken::RBrace) => {
                    self.bump();
                    return Ok(JsonExpr::Object(members));
                }
                _ => return Err(self.error(ParseErrorKind::ExpectedCommaOrEnd)),
            }
        }
    }

    fn parse_array(&mut self) -> Result<JsonExpr, ParseError> {
        self.bump();
        let mut items = Vec::new();
        if self.peek() == Some(RawToken::RBracket) {
            self.bump();
            return Ok(JsonExpr::Array(items));
        }
        loop {
            items.push(self.parse_value()?);
            match self.peek() {
                Some(RawToken::Comma) => {
                    self.bump();
                }
                Some(RawToken::RBracket) => {
                    self.bump();
                    return Ok(JsonExpr::Array(items));
                }
                _ => return Err(self.error(ParseErrorKind::ExpectedCommaOrEnd)),
            }
        }
    }

    /// Unescape the string token at the cursor without consuming it.
    fn cook_string(&self) -> Result<Box<str>, ParseError> {
        let span = &self.tokens[self.pos].1;
        let start = span.start + 1;
        cook(&self.text[start..span.end - 1], start)
    }
}

/// Resolve escapes in a string body that starts at byte `base` of the input.
fn cook(body: &str, base: usize) -> Result<Box<str>, ParseError> {
    if !body.contains('\\') {
        return Ok(body.into());
    }

    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();
    while let Some((at, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let invalid = || ParseError::new(ParseErrorKind::InvalidEscape, base + at);
        let escaped = match chars.next().map(|(_, e)| e) {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => {
                let high = hex4(&mut chars).ok_or_else(invalid)?;
                let code = if (0xD800..0xDC00).contains(&high) {
                    let (Some((_, '\\')), Some((_, 'u'))) = (chars.next(), chars.next()) else {
                        return Err(invalid());
                    };
                    let low = hex4(&mut chars).ok_or_else(invalid)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(invalid());
                    }
                    0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    high
                };
                char::from_u32(code).ok_or_else(invalid)?
            }
            _ => return Err(invalid()),
        };
        out.push(escaped);
    }
    Ok(out.into_boxed_str())
}

fn hex4(chars: &mut std::str::CharIndices<'_>) -> Option<u32> {
    let mut value = 0;
    for _ in 0..4 {
        let (_, c) = chars.next()?;
        value = value * 16 + c.to_digit(16)?;
    }
    Some(value)
}

#[cfg(test)]
mod tests;
