pub mod highlight;

use std::collections::HashSet;

use grph_lexer::{unresolved_diagnostics, Diagnostic, Lexer};
use log::info;

/// Tokenize a source string and collect every diagnostic worth showing:
/// structural problems found while tokenizing plus one error per
/// unrecognized character, ordered by position.
///
/// A stray closing bracket is already reported as a mismatch and is not
/// reported again as an unrecognized character.
pub fn check_source(lexer: &Lexer, source: &str) -> Vec<Diagnostic> {
    let document = lexer.tokenize_document(source);
    let mut diagnostics = document.diagnostics;
    let reported: HashSet<(usize, usize)> = diagnostics
        .iter()
        .map(|diagnostic| (diagnostic.line, diagnostic.start))
        .collect();
    for line in &document.lines {
        diagnostics.extend(
            unresolved_diagnostics(line)
                .into_iter()
                .filter(|diagnostic| !reported.contains(&(diagnostic.line, diagnostic.start))),
        );
    }
    diagnostics.sort_by_key(|diagnostic| (diagnostic.line, diagnostic.start));
    info!(
        "checked {} lines, {} diagnostic(s)",
        document.lines.len(),
        diagnostics.len()
    );
    diagnostics
}
