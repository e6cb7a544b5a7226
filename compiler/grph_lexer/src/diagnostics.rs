//! Recoverable diagnostics reported while tokenizing.
//!
//! The tokenizer never fails. Anything suspicious (a mismatched closing
//! bracket, an unclosed group, an unrecognized character) is reported as a
//! [`Diagnostic`] through a [`DiagnosticSink`] and tokenization carries on.

use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::token::{Token, TokenKind};

/// Severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Stops later stages from producing output
    Error,
    /// Suspicious but usable input
    Warning,
    /// Informational message
    Info,
    /// Editor hint
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Hint => "hint",
        })
    }
}

/// A problem anchored at a byte range of one line
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Diagnostic {
    /// How serious the problem is
    pub severity: Severity,
    /// The 0-based line number
    pub line: usize,
    /// Byte offset of the first offending character
    pub start: usize,
    /// Byte offset just past the offending text
    pub end: usize,
    /// Human readable description
    pub message: String,
    /// Optional fix-it suggestion
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Creates an error diagnostic covering `range` on `line`
    pub fn at<S: Into<String>>(line: usize, range: Range<usize>, message: S) -> Self {
        Self {
            severity: Severity::Error,
            line,
            start: range.start,
            end: range.end,
            message: message.into(),
            hint: None,
        }
    }

    /// Creates an error diagnostic covering a token
    pub fn at_token<S: Into<String>>(token: &Token, message: S) -> Self {
        Self::at(token.line, token.range(), message)
    }

    /// Replaces the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Attaches a fix-it hint
    pub fn with_hint<S: Into<String>>(mut self, hint: S) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Returns true for error severity
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.line + 1,
            self.start,
            self.severity,
            self.message
        )
    }
}

/// Receives diagnostics as the tokenizer finds them.
pub trait DiagnosticSink {
    /// Records one diagnostic
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// A sink that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

/// One error per `unresolved` token in the tree.
///
/// Later stages call this before trusting a tree; the tokenizer itself
/// only reports structural problems.
pub fn unresolved_diagnostics(root: &Token) -> Vec<Diagnostic> {
    root.descendants()
        .filter(|token| token.kind == TokenKind::Unresolved)
        .map(|token| {
            Diagnostic::at_token(token, format!("unrecognized character '{}'", token.literal))
        })
        .collect()
}

/// Renders a diagnostic with the offending line and an underline.
///
/// ```text
/// error: mismatched closing ']'
///  --> line 1, col 3
/// 1 | a ]
///   |   ^
/// help: remove this ']'
/// ```
///
/// Tabs are shown as single spaces so the underline stays aligned.
pub fn render_snippet(diagnostic: &Diagnostic, line_text: &str) -> String {
    let prefix = line_text.get(..diagnostic.start).unwrap_or(line_text);
    let marked = line_text
        .get(diagnostic.start..diagnostic.end.max(diagnostic.start))
        .unwrap_or("");
    let column = prefix.chars().count() + 1;
    let width = marked.chars().count().max(1);

    let number = (diagnostic.line + 1).to_string();
    let gutter = " ".repeat(number.len());

    let mut out = format!(
        "{}: {}\n --> line {}, col {}\n",
        diagnostic.severity, diagnostic.message, number, column
    );
    out.push_str(&format!("{number} | {}\n", line_text.replace('\t', " ")));
    out.push_str(&format!(
        "{gutter} | {}^{}",
        " ".repeat(column - 1),
        "~".repeat(width - 1)
    ));
    if let Some(hint) = &diagnostic.hint {
        out.push_str(&format!("\nhelp: {hint}"));
    }
    out
}
