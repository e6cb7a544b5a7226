//! Character classification for the line tokenizer.
//!
//! Two pure functions drive the state machine: [`continuation`] decides what
//! the next character does to the innermost open token, and [`start_kind`]
//! classifies the first character of a new token.

use crate::token::TokenKind;

/// Characters that terminate a number literal as a unit suffix
pub const UNIT_SUFFIXES: [char; 4] = ['f', 'F', '°', 'º'];

/// What a character does to the innermost open token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The character belongs to the current token
    Continue,
    /// The character starts something new; the current token closes before it
    Break,
    /// The character is the last one of the current token, which is followed
    /// by a forced, possibly empty, whitespace token
    BreakForced,
    /// The character is the last one of the current token, and control
    /// returns to its parent
    BreakAndClose,
    /// The character opens a child token nested under the current one
    OpenChild(TokenKind),
    /// The character belongs to the current token, whose kind changes
    Retype(TokenKind),
}

/// Decides what `ch` does to an open token of the given kind.
pub fn continuation(kind: TokenKind, ch: char) -> Action {
    match kind {
        TokenKind::IgnorableWhitespace => continue_while(ch.is_whitespace()),
        TokenKind::Indent => continue_while(ch == '\t'),
        TokenKind::Identifier | TokenKind::Label => continue_while(is_identifier_char(ch)),
        TokenKind::CommandName => continue_while(ch.is_ascii_alphabetic()),
        TokenKind::NumberLiteral => {
            if UNIT_SUFFIXES.contains(&ch) {
                Action::BreakForced
            } else if ch == ',' {
                Action::Retype(TokenKind::PositionLiteral)
            } else {
                continue_while(is_number_char(ch))
            }
        }
        TokenKind::PositionLiteral => continue_while(is_number_char(ch)),
        TokenKind::StringLiteral => quoted(ch, '"'),
        TokenKind::FileLiteral => quoted(ch, '\''),
        TokenKind::EscapeSequence => Action::BreakAndClose,
        TokenKind::Comment => {
            if ch == '/' {
                Action::Retype(TokenKind::DocComment)
            } else {
                Action::OpenChild(TokenKind::CommentContent)
            }
        }
        TokenKind::DocComment => Action::OpenChild(TokenKind::CommentContent),
        TokenKind::CommentContent => Action::Continue,
        TokenKind::SlashOperator => {
            if ch == '/' {
                Action::Retype(TokenKind::Comment)
            } else {
                Action::Break
            }
        }
        TokenKind::MethodCallOperator => {
            if ch == ':' {
                Action::Retype(TokenKind::LabelPrefixOperator)
            } else {
                Action::Break
            }
        }
        TokenKind::Dot
        | TokenKind::Comma
        | TokenKind::LambdaHatOperator
        | TokenKind::LabelPrefixOperator
        | TokenKind::AssignmentOperator
        | TokenKind::Operator
        | TokenKind::Unresolved => Action::Break,
        // Brackets always have a whitespace child open on top of them, and the
        // line root and semantic kinds are never open while scanning.
        TokenKind::SquareBrackets
        | TokenKind::Parentheses
        | TokenKind::CurlyBraces
        | TokenKind::Line
        | TokenKind::Type
        | TokenKind::Keyword
        | TokenKind::Variable
        | TokenKind::Function
        | TokenKind::Method
        | TokenKind::EnumCase
        | TokenKind::BooleanLiteral
        | TokenKind::NullLiteral
        | TokenKind::AssignmentCompound
        | TokenKind::NamespaceSeparator
        | TokenKind::Namespace => Action::Break,
    }
}

/// Classifies the first character of a new token.
///
/// `previous` is the kind of the token that just closed; it only matters
/// for telling a label (after `::`) from an identifier.
pub fn start_kind(previous: TokenKind, ch: char) -> TokenKind {
    if ch.is_whitespace() {
        return TokenKind::IgnorableWhitespace;
    }
    if ch.is_ascii_digit() {
        return TokenKind::NumberLiteral;
    }
    if ch.is_ascii_alphabetic() || ch == '_' || ch == '$' {
        return if previous == TokenKind::LabelPrefixOperator {
            TokenKind::Label
        } else {
            TokenKind::Identifier
        };
    }
    match ch {
        '/' => TokenKind::SlashOperator,
        '.' => TokenKind::Dot,
        '^' => TokenKind::LambdaHatOperator,
        ':' => TokenKind::MethodCallOperator,
        ',' => TokenKind::Comma,
        '=' => TokenKind::AssignmentOperator,
        '#' => TokenKind::CommandName,
        '"' => TokenKind::StringLiteral,
        '\'' => TokenKind::FileLiteral,
        '+' | '-' | '*' | '%' | '<' | '>' | '≥' | '≤' | '~' | '!' | '&' | '|' | '≠' => {
            TokenKind::Operator
        }
        '[' => TokenKind::SquareBrackets,
        '(' => TokenKind::Parentheses,
        '{' => TokenKind::CurlyBraces,
        _ => TokenKind::Unresolved,
    }
}

/// ASCII letters, digits and underscore
pub fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}

fn continue_while(belongs: bool) -> Action {
    if belongs {
        Action::Continue
    } else {
        Action::Break
    }
}

fn quoted(ch: char, terminator: char) -> Action {
    if ch == '\\' {
        Action::OpenChild(TokenKind::EscapeSequence)
    } else if ch == terminator {
        Action::BreakForced
    } else {
        Action::Continue
    }
}
