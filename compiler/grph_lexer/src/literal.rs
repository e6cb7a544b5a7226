//! Decoding of literal payloads.
//!
//! The tokenizer leaves [`Token::value`] empty. Later stages that need the
//! decoded number or string call [`decode`] (or decorate a whole tree with
//! [`Token::with_decoded_values`]).

use crate::classifier::UNIT_SUFFIXES;
use crate::token::{Token, TokenKind, TokenValue};

/// The decoded payload of a literal token, or [`TokenValue::None`]
pub fn decode(token: &Token) -> TokenValue {
    match token.kind {
        TokenKind::NumberLiteral => decode_number(&token.literal),
        TokenKind::StringLiteral => decode_quoted(&token.literal, '"'),
        TokenKind::FileLiteral => decode_quoted(&token.literal, '\''),
        _ => TokenValue::None,
    }
}

fn decode_number(literal: &str) -> TokenValue {
    let (digits, suffixed) = match literal.char_indices().last() {
        Some((index, last)) if UNIT_SUFFIXES.contains(&last) => (&literal[..index], true),
        _ => (literal, false),
    };
    if suffixed || digits.contains('.') {
        digits.parse().map_or(TokenValue::None, TokenValue::Float)
    } else {
        digits.parse().map_or(TokenValue::None, TokenValue::Integer)
    }
}

// Inside a literal every backslash escapes the next character and the only
// unescaped quote is the closing one.
fn decode_quoted(literal: &str, quote: char) -> TokenValue {
    let body = literal.strip_prefix(quote).unwrap_or(literal);
    let mut decoded = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    decoded.push(unescape(escaped));
                }
            }
            ch if ch == quote => break,
            ch => decoded.push(ch),
        }
    }
    TokenValue::String(decoded)
}

fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}

impl Token {
    /// Returns the tree with every literal's value decoded
    pub fn with_decoded_values(mut self) -> Self {
        self.decode_values();
        self
    }

    fn decode_values(&mut self) {
        self.value = decode(self);
        for child in &mut self.children {
            child.decode_values();
        }
    }
}
