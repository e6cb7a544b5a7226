//! Terminal syntax highlighting of token trees.

use std::fmt::Write;

use crossterm::style::{style, Color, Stylize};
use grph_lexer::{Token, TokenKind};

/// Whether highlighted output carries ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Ansi,
    Plain,
}

/// Display color of a token kind. Kinds without one are painted through
/// their children.
pub fn color_for(kind: TokenKind) -> Option<Color> {
    match kind {
        TokenKind::Comment | TokenKind::CommentContent => Some(Color::DarkGreen),
        TokenKind::DocComment => Some(Color::Green),
        TokenKind::StringLiteral | TokenKind::FileLiteral => Some(Color::Red),
        TokenKind::NumberLiteral | TokenKind::PositionLiteral => Some(Color::Blue),
        TokenKind::CommandName | TokenKind::Keyword => Some(Color::Magenta),
        TokenKind::BooleanLiteral | TokenKind::NullLiteral => Some(Color::Magenta),
        TokenKind::Label => Some(Color::DarkYellow),
        TokenKind::Type | TokenKind::Namespace => Some(Color::Cyan),
        TokenKind::Function | TokenKind::Method => Some(Color::Yellow),
        TokenKind::EnumCase => Some(Color::DarkCyan),
        TokenKind::Unresolved => Some(Color::DarkRed),
        _ => None,
    }
}

/// Renders a line token with colors.
///
/// `overlay` holds refined tokens of the same line (typically from
/// semantic analysis). The last overlay token covering a token's whole
/// range decides its color when that overlay kind has one.
pub fn highlighted(token: &Token, overlay: &[Token], mode: ColorMode) -> String {
    let mut out = String::with_capacity(token.literal.len());
    write_highlighted(token, overlay, mode, &mut out);
    out
}

fn write_highlighted(token: &Token, overlay: &[Token], mode: ColorMode, out: &mut String) {
    if token.is_empty() {
        return;
    }
    let covering = overlay
        .iter()
        .rev()
        .find(|sem| sem.start <= token.start && token.end() <= sem.end());
    let color = covering
        .and_then(|sem| color_for(sem.kind))
        .or_else(|| color_for(token.kind));

    if let Some(color) = color {
        paint(&token.literal, color, mode, out);
        return;
    }

    let mut cursor = token.start;
    for child in &token.children {
        if let Some(gap) = gap(token, cursor, child.start) {
            out.push_str(gap);
        }
        write_highlighted(child, overlay, mode, out);
        cursor = child.end();
    }
    if let Some(rest) = gap(token, cursor, token.end()) {
        out.push_str(rest);
    }
}

fn gap(token: &Token, from: usize, to: usize) -> Option<&str> {
    let from = from.checked_sub(token.start)?;
    let to = to.checked_sub(token.start)?;
    token.literal.get(from..to)
}

fn paint(text: &str, color: Color, mode: ColorMode, out: &mut String) {
    match mode {
        ColorMode::Plain => out.push_str(text),
        ColorMode::Ansi => {
            let _ = write!(out, "{}", style(text).with(color));
        }
    }
}
