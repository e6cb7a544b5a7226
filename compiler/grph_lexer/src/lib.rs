//! GRPH lexical analyzer
//!
//! This crate turns GRPH source lines into position-exact token trees for
//! the compiler, the highlighter and editor tooling. Every line becomes a
//! single [`TokenKind::Line`] token whose descendants reconstruct the line
//! byte for byte; lines are tokenized independently of each other.
//!
//! ```no_run
//! use grph_lexer::{tokenize_line, TokenKind};
//!
//! let line = tokenize_line(0, "\tpos = 1,2 // start");
//! assert_eq!(line.children[0].kind, TokenKind::Indent);
//! assert_eq!(line.reconstruct(), "\tpos = 1,2 // start");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod classifier;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod lexer;
pub mod literal;
pub mod token;

// Re-export the main types for convenience
pub use classifier::{continuation, start_kind, Action};
pub use config::LexerConfig;
pub use diagnostics::{
    render_snippet, unresolved_diagnostics, Diagnostic, DiagnosticSink, NullSink, Severity,
};
pub use document::{tokenize_document, Lexer, TokenizedDocument};
pub use lexer::{tokenize_line, tokenize_line_with};
pub use token::{Token, TokenKind, TokenValue};
