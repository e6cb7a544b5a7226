//! Token tree types shared by the tokenizer and its consumers.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// The syntactic role of a token.
///
/// The tokenizer only ever yields the lexical kinds. The kinds listed after
/// [`TokenKind::Unresolved`] are assigned by semantic analysis when it
/// refines an identifier or literal, and never appear in a freshly
/// tokenized tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "kebab-case"))]
pub enum TokenKind {
    /// Root token of a line, covering the whole line
    Line,
    /// Leading tab characters of a line
    Indent,
    /// Whitespace between tokens, possibly empty
    IgnorableWhitespace,
    /// A plain name
    Identifier,
    /// A name following a `::` label prefix
    Label,
    /// A `#command` name
    CommandName,
    /// A numeric literal such as `42`, `3.5` or `90°`
    NumberLiteral,
    /// A position literal such as `1,2`
    PositionLiteral,
    /// A `"string"` literal
    StringLiteral,
    /// A `'file'` literal
    FileLiteral,
    /// A backslash escape inside a string or file literal
    EscapeSequence,
    /// A `//` comment
    Comment,
    /// A `///` documentation comment
    DocComment,
    /// The text of a comment after its opening slashes
    CommentContent,
    /// A single `/`
    SlashOperator,
    /// A single `:`
    MethodCallOperator,
    /// A `::` label prefix
    LabelPrefixOperator,
    /// A `.`
    Dot,
    /// A `,`
    Comma,
    /// A `^` lambda marker
    LambdaHatOperator,
    /// A `=`
    AssignmentOperator,
    /// Any arithmetic, comparison or logic symbol
    Operator,
    /// A `[ ... ]` group
    SquareBrackets,
    /// A `( ... )` group
    Parentheses,
    /// A `{ ... }` group
    CurlyBraces,
    /// A character the tokenizer does not recognize
    Unresolved,
    /// A type name (semantic)
    Type,
    /// A keyword (semantic)
    Keyword,
    /// A variable reference (semantic)
    Variable,
    /// A function reference (semantic)
    Function,
    /// A method reference (semantic)
    Method,
    /// An enum case (semantic)
    EnumCase,
    /// `true` or `false` (semantic)
    BooleanLiteral,
    /// `null` (semantic)
    NullLiteral,
    /// A compound assignment such as `+=` (semantic)
    AssignmentCompound,
    /// A `>` namespace separator (semantic)
    NamespaceSeparator,
    /// A namespace name (semantic)
    Namespace,
}

impl TokenKind {
    /// Returns true for the three bracket group kinds
    pub fn is_bracket(self) -> bool {
        matches!(
            self,
            TokenKind::SquareBrackets | TokenKind::Parentheses | TokenKind::CurlyBraces
        )
    }

    /// Returns true for kinds only assigned after tokenization
    pub fn is_semantic(self) -> bool {
        matches!(
            self,
            TokenKind::Type
                | TokenKind::Keyword
                | TokenKind::Variable
                | TokenKind::Function
                | TokenKind::Method
                | TokenKind::EnumCase
                | TokenKind::BooleanLiteral
                | TokenKind::NullLiteral
                | TokenKind::AssignmentCompound
                | TokenKind::NamespaceSeparator
                | TokenKind::Namespace
        )
    }

    /// The character that closes a bracket kind
    pub fn closing_char(self) -> Option<char> {
        match self {
            TokenKind::SquareBrackets => Some(']'),
            TokenKind::Parentheses => Some(')'),
            TokenKind::CurlyBraces => Some('}'),
            _ => None,
        }
    }

    /// The bracket kind a closing character would close, if it is one
    pub fn closed_by(ch: char) -> Option<TokenKind> {
        match ch {
            ']' => Some(TokenKind::SquareBrackets),
            ')' => Some(TokenKind::Parentheses),
            '}' => Some(TokenKind::CurlyBraces),
            _ => None,
        }
    }

    /// Kebab-case name used in dumps and serialized output
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Line => "line",
            TokenKind::Indent => "indent",
            TokenKind::IgnorableWhitespace => "ignorable-whitespace",
            TokenKind::Identifier => "identifier",
            TokenKind::Label => "label",
            TokenKind::CommandName => "command-name",
            TokenKind::NumberLiteral => "number-literal",
            TokenKind::PositionLiteral => "position-literal",
            TokenKind::StringLiteral => "string-literal",
            TokenKind::FileLiteral => "file-literal",
            TokenKind::EscapeSequence => "escape-sequence",
            TokenKind::Comment => "comment",
            TokenKind::DocComment => "doc-comment",
            TokenKind::CommentContent => "comment-content",
            TokenKind::SlashOperator => "slash-operator",
            TokenKind::MethodCallOperator => "method-call-operator",
            TokenKind::LabelPrefixOperator => "label-prefix-operator",
            TokenKind::Dot => "dot",
            TokenKind::Comma => "comma",
            TokenKind::LambdaHatOperator => "lambda-hat-operator",
            TokenKind::AssignmentOperator => "assignment-operator",
            TokenKind::Operator => "operator",
            TokenKind::SquareBrackets => "square-brackets",
            TokenKind::Parentheses => "parentheses",
            TokenKind::CurlyBraces => "curly-braces",
            TokenKind::Unresolved => "unresolved",
            TokenKind::Type => "type",
            TokenKind::Keyword => "keyword",
            TokenKind::Variable => "variable",
            TokenKind::Function => "function",
            TokenKind::Method => "method",
            TokenKind::EnumCase => "enum-case",
            TokenKind::BooleanLiteral => "boolean-literal",
            TokenKind::NullLiteral => "null-literal",
            TokenKind::AssignmentCompound => "assignment-compound",
            TokenKind::NamespaceSeparator => "namespace-separator",
            TokenKind::Namespace => "namespace",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded payload of a literal token, filled in after tokenization.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum TokenValue {
    /// An integer literal
    Integer(i64),
    /// A floating point literal
    Float(f64),
    /// A string or file literal with escapes decoded
    String(String),
    /// No payload
    #[default]
    None,
}

impl TokenValue {
    /// Returns true when there is no payload
    pub fn is_none(&self) -> bool {
        matches!(self, TokenValue::None)
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Integer(n) => write!(f, "{n}"),
            TokenValue::Float(x) => write!(f, "{x}"),
            TokenValue::String(s) => write!(f, "{s:?}"),
            TokenValue::None => Ok(()),
        }
    }
}

/// A typed, positioned span of one source line.
///
/// Positions are UTF-8 byte offsets within the line. A token's `literal`
/// covers the text of all its descendants; the characters between children
/// belong to the token itself (for example the quotes of a string literal
/// or the brackets of a group).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Token {
    /// The 0-based line number
    pub line: usize,
    /// Byte offset of the first character within the line
    pub start: usize,
    /// The text covered by this token
    pub literal: String,
    /// The syntactic role of this token
    pub kind: TokenKind,
    /// Nested tokens, sorted and non-overlapping
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<Token>,
    /// Literal payload assigned by later stages
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "TokenValue::is_none"))]
    pub value: TokenValue,
}

impl Token {
    /// Creates a childless token without a value payload
    pub fn new<S: Into<String>>(line: usize, start: usize, literal: S, kind: TokenKind) -> Self {
        Self {
            line,
            start,
            literal: literal.into(),
            kind,
            children: Vec::new(),
            value: TokenValue::None,
        }
    }

    /// Byte offset just past the last character of this token
    pub fn end(&self) -> usize {
        self.start + self.literal.len()
    }

    /// The byte range covered by this token within its line
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end()
    }

    /// Returns true if the token covers no text
    pub fn is_empty(&self) -> bool {
        self.literal.is_empty()
    }

    /// Children with the ignorable whitespace removed
    pub fn stripped_children(&self) -> impl Iterator<Item = &Token> {
        self.children
            .iter()
            .filter(|child| child.kind != TokenKind::IgnorableWhitespace)
    }

    /// Removes every whitespace token of the subtree.
    ///
    /// Whitespace separates arguments, so only use this to clean up debug
    /// output.
    pub fn strip_whitespace(&mut self) {
        self.children
            .retain(|child| child.kind != TokenKind::IgnorableWhitespace);
        for child in &mut self.children {
            child.strip_whitespace();
        }
    }

    /// Rebuilds the covered text from the children and the gaps between them
    pub fn reconstruct(&self) -> String {
        let mut out = String::with_capacity(self.literal.len());
        let mut cursor = self.start;
        for child in &self.children {
            if let Some(gap) = self.slice(cursor, child.start) {
                out.push_str(gap);
            }
            out.push_str(&child.reconstruct());
            cursor = child.end();
        }
        if let Some(rest) = self.slice(cursor, self.end()) {
            out.push_str(rest);
        }
        out
    }

    fn slice(&self, from: usize, to: usize) -> Option<&str> {
        let from = from.checked_sub(self.start)?;
        let to = to.checked_sub(self.start)?;
        self.literal.get(from..to)
    }

    /// Pre-order iterator over this token and all of its descendants
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// The innermost token whose text contains the byte offset
    pub fn token_at(&self, offset: usize) -> Option<&Token> {
        if !self.range().contains(&offset) {
            return None;
        }
        self.children
            .iter()
            .find_map(|child| child.token_at(offset))
            .or(Some(self))
    }

    /// The text after the opening slashes of a comment or doc comment
    pub fn comment_text(&self) -> Option<&str> {
        match self.kind {
            TokenKind::Comment | TokenKind::DocComment => Some(
                self.children
                    .iter()
                    .find(|child| child.kind == TokenKind::CommentContent)
                    .map_or("", |content| content.literal.as_str()),
            ),
            _ => None,
        }
    }

    /// An indented, multi-line dump of the subtree.
    ///
    /// Each token is printed as `"literal" kind (line:start) value`, children
    /// indented by four spaces.
    pub fn represent(&self) -> String {
        let mut out = String::new();
        self.represent_into(&mut out, "");
        out
    }

    fn represent_into(&self, out: &mut String, indent: &str) {
        use std::fmt::Write;

        let _ = write!(
            out,
            "{indent}{:?} {} ({}:{})",
            self.literal, self.kind, self.line, self.start
        );
        if !self.value.is_none() {
            let _ = write!(out, " {}", self.value);
        }
        out.push('\n');

        let nested = format!("{indent}    ");
        for child in &self.children {
            child.represent_into(out, &nested);
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

/// Iterator returned by [`Token::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a Token>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.stack.pop()?;
        self.stack.extend(token.children.iter().rev());
        Some(token)
    }
}
