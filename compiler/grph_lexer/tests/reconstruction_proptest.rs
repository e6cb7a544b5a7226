//! Property-based tests for the line tokenizer
//!
//! Arbitrary lines built from the GRPH alphabet (plus a few characters the
//! tokenizer does not know) must always produce a well-formed tree that
//! reconstructs the input.

use grph_lexer::{
    tokenize_document, tokenize_line, tokenize_line_with, Lexer, LexerConfig, Token, TokenKind,
};
use proptest::prelude::*;

const LINE_PATTERN: &str =
    "[\t\r a-zA-Z0-9_$\"'\\\\/.,:=^#+*%~<>!&|\\-\\[\\](){};é°º≤≥≠]{0,48}";

/// Checks position invariants of `token` and its subtree against `text`
fn check_tree(token: &Token, text: &str) -> Result<(), TestCaseError> {
    prop_assert_eq!(text.get(token.range()), Some(token.literal.as_str()));
    prop_assert!(!token.kind.is_semantic());

    let mut cursor = token.start;
    for child in &token.children {
        prop_assert!(child.kind != TokenKind::Line);
        prop_assert_eq!(child.line, token.line);
        prop_assert!(child.start >= cursor, "{:?} overlaps its sibling", child);
        prop_assert!(child.end() <= token.end(), "{:?} escapes its parent", child);
        // Empty tokens may share their start with the previous sibling
        cursor = child.end();
        check_tree(child, text)?;
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_line_reconstructs(text in LINE_PATTERN) {
        let line = tokenize_line(0, &text);
        prop_assert_eq!(line.kind, TokenKind::Line);
        prop_assert_eq!(&line.literal, &text);
        prop_assert_eq!(line.reconstruct(), text);
    }

    #[test]
    fn test_tree_is_well_formed(text in LINE_PATTERN) {
        let line = tokenize_line(3, &text);
        prop_assert_eq!(
            line.children.first().map(|t| (t.kind, t.start)),
            Some((TokenKind::Indent, 0))
        );
        check_tree(&line, &text)?;
    }

    #[test]
    fn test_tokenizing_is_deterministic(text in LINE_PATTERN) {
        let first = tokenize_line(0, &text);
        let again = tokenize_line(0, &first.reconstruct());
        prop_assert_eq!(first, again);
    }

    #[test]
    fn test_diagnostics_point_into_the_line(text in LINE_PATTERN) {
        let mut diagnostics = Vec::new();
        tokenize_line_with(0, &text, &mut diagnostics);
        for diagnostic in diagnostics {
            prop_assert!(diagnostic.start < diagnostic.end);
            prop_assert!(text.get(diagnostic.start..diagnostic.end).is_some());
        }
    }

    #[test]
    fn test_parallel_matches_sequential(
        lines in prop::collection::vec(LINE_PATTERN, 1..40),
        threads in 2usize..6,
    ) {
        let text = lines.join("\n");
        let config = LexerConfig {
            threads,
            parallel_min_lines: 2,
            report_unclosed_brackets: true,
        };
        let threaded = Lexer::new(config).tokenize_document(&text);
        let sequential = Lexer::new(config.with_threads(1)).tokenize_document(&text);
        prop_assert_eq!(&threaded, &sequential);
        prop_assert_eq!(threaded.lines, tokenize_document(&text));
    }
}
