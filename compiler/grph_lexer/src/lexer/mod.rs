//! Per-line tokenizer.
//!
//! A line is scanned one character at a time. The innermost open token is
//! asked (through [`continuation`]) what the next character does to it, and
//! the answer pushes, pops or retypes entries of an explicit stack of open
//! tokens. When the line ends, every open token is closed and the line
//! token is returned with the finished tree.

use log::{debug, trace};

use crate::classifier::{continuation, start_kind, Action};
use crate::config::DEFAULT_REPORT_UNCLOSED;
use crate::diagnostics::{Diagnostic, DiagnosticSink, NullSink, Severity};
use crate::token::{Token, TokenKind, TokenValue};

/// Tokenizes one line (without its line terminator).
///
/// Never fails: malformed input yields `unresolved` tokens and the
/// diagnostics are dropped. Use [`tokenize_line_with`] to receive them.
pub fn tokenize_line(line: usize, text: &str) -> Token {
    tokenize_line_with(line, text, &mut NullSink)
}

/// Tokenizes one line, reporting recoverable problems to `sink`
pub fn tokenize_line_with(line: usize, text: &str, sink: &mut dyn DiagnosticSink) -> Token {
    scan_line(line, text, DEFAULT_REPORT_UNCLOSED, sink)
}

pub(crate) fn scan_line(
    line: usize,
    text: &str,
    report_unclosed: bool,
    sink: &mut dyn DiagnosticSink,
) -> Token {
    let mut hierarchy = Hierarchy::new(line, text);

    for (index, ch) in text.char_indices() {
        let after = index + ch.len_utf8();
        let current = hierarchy.top_kind();

        match continuation(current, ch) {
            Action::Continue => {}
            Action::Break => {
                hierarchy.close_top(index);
                if let Some(bracket) = TokenKind::closed_by(ch) {
                    if hierarchy.top_kind() == bracket {
                        hierarchy.close_top(after);
                        hierarchy.push(TokenKind::IgnorableWhitespace, after);
                    } else {
                        report(sink, hierarchy.mismatch(ch, index..after));
                        hierarchy.push(TokenKind::Unresolved, index);
                    }
                } else {
                    let kind = start_kind(current, ch);
                    hierarchy.push(kind, index);
                    if kind.is_bracket() {
                        hierarchy.push(TokenKind::IgnorableWhitespace, after);
                    }
                }
            }
            Action::BreakForced => {
                hierarchy.close_top(after);
                hierarchy.push(TokenKind::IgnorableWhitespace, after);
            }
            Action::BreakAndClose => hierarchy.close_top(after),
            Action::OpenChild(kind) => hierarchy.push(kind, index),
            Action::Retype(kind) => hierarchy.retype(kind),
        }
    }

    if report_unclosed {
        for diagnostic in hierarchy.unclosed() {
            report(sink, diagnostic);
        }
    }
    hierarchy.finish()
}

fn report(sink: &mut dyn DiagnosticSink, diagnostic: Diagnostic) {
    debug!("line {}: {}", diagnostic.line + 1, diagnostic.message);
    sink.report(diagnostic);
}

/// A token that is still accepting characters
#[derive(Debug)]
struct OpenToken {
    kind: TokenKind,
    start: usize,
    children: Vec<Token>,
}

/// The stack of open tokens of one line, innermost last.
///
/// The line token sits below the stack and is never popped while scanning,
/// so the stack starts out holding the indent token alone.
struct Hierarchy<'src> {
    line: usize,
    text: &'src str,
    root: Vec<Token>,
    open: Vec<OpenToken>,
}

impl<'src> Hierarchy<'src> {
    fn new(line: usize, text: &'src str) -> Self {
        let mut hierarchy = Self {
            line,
            text,
            root: Vec::new(),
            open: Vec::with_capacity(8),
        };
        hierarchy.push(TokenKind::Indent, 0);
        hierarchy
    }

    fn top_kind(&self) -> TokenKind {
        self.open.last().map_or(TokenKind::Line, |open| open.kind)
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        self.open.push(OpenToken {
            kind,
            start,
            children: Vec::new(),
        });
    }

    fn retype(&mut self, kind: TokenKind) {
        if let Some(top) = self.open.last_mut() {
            top.kind = kind;
        }
    }

    /// Pops the innermost token, ending its text at `end` (exclusive), and
    /// appends it to its parent.
    fn close_top(&mut self, end: usize) {
        let Some(open) = self.open.pop() else {
            return;
        };
        let token = Token {
            line: self.line,
            start: open.start,
            literal: self.text[open.start..end].to_string(),
            kind: open.kind,
            children: open.children,
            value: TokenValue::None,
        };
        trace!(
            "line {}: {} {:?} at {}",
            self.line,
            token.kind,
            token.literal,
            token.start
        );
        match self.open.last_mut() {
            Some(parent) => parent.children.push(token),
            None => self.root.push(token),
        }
    }

    fn innermost_bracket(&self) -> Option<TokenKind> {
        self.open
            .iter()
            .rev()
            .map(|open| open.kind)
            .find(|kind| kind.is_bracket())
    }

    fn mismatch(&self, ch: char, range: std::ops::Range<usize>) -> Diagnostic {
        let diagnostic = Diagnostic::at(self.line, range, format!("mismatched closing '{ch}'"));
        match self.innermost_bracket().and_then(TokenKind::closing_char) {
            Some(expected) => diagnostic.with_hint(format!("expected '{expected}'")),
            None => diagnostic.with_hint(format!("remove this '{ch}'")),
        }
    }

    fn unclosed(&self) -> Vec<Diagnostic> {
        self.open
            .iter()
            .filter_map(|open| {
                let closing = open.kind.closing_char()?;
                let opening = self.text[open.start..].chars().next()?;
                Some(
                    Diagnostic::at(
                        self.line,
                        open.start..open.start + opening.len_utf8(),
                        format!("unclosed '{opening}'"),
                    )
                    .with_severity(Severity::Warning)
                    .with_hint(format!("add '{closing}'")),
                )
            })
            .collect()
    }

    fn finish(mut self) -> Token {
        while !self.open.is_empty() {
            self.close_top(self.text.len());
        }
        Token {
            line: self.line,
            start: 0,
            literal: self.text.to_string(),
            kind: TokenKind::Line,
            children: self.root,
            value: TokenValue::None,
        }
    }
}

#[cfg(test)]
mod tests;
