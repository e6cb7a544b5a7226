//! Document drivers: split text into lines and tokenize each of them.
//!
//! Lines share no state, so a large document is split into contiguous
//! chunks handled by scoped worker threads. The output is index-aligned
//! with the input lines whichever driver is used.

use std::thread;

use log::debug;

use crate::config::LexerConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::lexer::{scan_line, tokenize_line};
use crate::token::Token;

/// Tokenizes every `\n`-separated line of `text`, in order.
///
/// No other line terminator is recognized: a `\r` before the `\n` stays in
/// its line and becomes whitespace.
pub fn tokenize_document(text: &str) -> Vec<Token> {
    text.split('\n')
        .enumerate()
        .map(|(line, content)| tokenize_line(line, content))
        .collect()
}

/// Token trees of a whole document plus the diagnostics found on the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenizedDocument {
    /// One line token per input line
    pub lines: Vec<Token>,
    /// Diagnostics in line order
    pub diagnostics: Vec<Diagnostic>,
}

impl TokenizedDocument {
    /// Returns true if any diagnostic has error severity
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    fn append(&mut self, mut other: TokenizedDocument) {
        self.lines.append(&mut other.lines);
        self.diagnostics.append(&mut other.diagnostics);
    }
}

/// A configured tokenizer
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    config: LexerConfig,
}

impl Lexer {
    /// Creates a lexer with the given configuration
    pub fn new(config: LexerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Tokenizes one line, reporting recoverable problems to `sink`
    pub fn tokenize_line(&self, line: usize, text: &str, sink: &mut dyn DiagnosticSink) -> Token {
        scan_line(line, text, self.config.report_unclosed_brackets, sink)
    }

    /// Tokenizes a whole document, in parallel when it is large enough
    pub fn tokenize_document(&self, text: &str) -> TokenizedDocument {
        let lines: Vec<&str> = text.split('\n').collect();
        let workers = self.config.workers_for(lines.len());
        debug!(
            "tokenizing {} lines ({} bytes) with {} worker(s)",
            lines.len(),
            text.len(),
            workers
        );

        if workers <= 1 {
            return self.tokenize_chunk(&lines, 0);
        }

        let chunk = lines.len().div_ceil(workers);
        let parts: Vec<TokenizedDocument> = thread::scope(|scope| {
            let handles: Vec<_> = lines
                .chunks(chunk)
                .enumerate()
                .map(|(index, part)| scope.spawn(move || self.tokenize_chunk(part, index * chunk)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        });

        let mut document = TokenizedDocument {
            lines: Vec::with_capacity(lines.len()),
            diagnostics: Vec::new(),
        };
        for part in parts {
            document.append(part);
        }
        document
    }

    fn tokenize_chunk(&self, lines: &[&str], first_line: usize) -> TokenizedDocument {
        let mut diagnostics = Vec::new();
        let lines = lines
            .iter()
            .enumerate()
            .map(|(offset, content)| {
                self.tokenize_line(first_line + offset, content, &mut diagnostics)
            })
            .collect();
        TokenizedDocument { lines, diagnostics }
    }
}
