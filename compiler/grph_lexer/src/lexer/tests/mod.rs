
use crate::token::{Token, TokenKind};

/// `(kind, literal, start)` of each direct child
fn shape(token: &Token) -> Vec<(TokenKind, &str, usize)> {
    token
        .children
        .iter()
        .map(|child| (child.kind, child.literal.as_str(), child.start))
        .collect()
}
