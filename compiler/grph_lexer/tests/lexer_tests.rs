use grph_lexer::{
    render_snippet, tokenize_document, tokenize_line, unresolved_diagnostics, Lexer, LexerConfig,
    Severity, TokenKind, TokenValue,
};
use pretty_assertions::assert_eq;

fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}

const SCRIPT: &str = "\
/// Draws a rotating square
#import shapes
Rectangle rect = Rectangle(10,10 50,50 color.red)
#function void spin[float deg = 90°]
\trect.rotation = deg
\t::loop #while [rect.rotation ≠ 0]
\t\trect:rotate[-1f]
\t\t#break ::loop
log[\"done\\n\" 'out.txt']
";

#[test]
fn test_script_reconstructs() {
    init_test_logger();
    let lines = tokenize_document(SCRIPT);
    assert_eq!(lines.len(), SCRIPT.split('\n').count());
    for (line, text) in lines.iter().zip(SCRIPT.split('\n')) {
        assert_eq!(line.reconstruct(), text);
    }
}

#[test]
fn test_script_has_no_diagnostics() {
    init_test_logger();
    let document = Lexer::default().tokenize_document(SCRIPT);
    assert!(document.diagnostics.is_empty(), "{:?}", document.diagnostics);
    assert!(!document.has_errors());
    for line in &document.lines {
        assert!(unresolved_diagnostics(line).is_empty(), "line {}", line.line);
    }
}

#[test]
fn test_script_token_kinds() {
    let lines = tokenize_document(SCRIPT);

    assert_eq!(lines[0].children[1].kind, TokenKind::DocComment);
    assert_eq!(lines[0].children[1].comment_text(), Some(" Draws a rotating square"));
    assert_eq!(lines[1].children[1].kind, TokenKind::CommandName);

    let positions: Vec<_> = lines[2]
        .descendants()
        .filter(|token| token.kind == TokenKind::PositionLiteral)
        .map(|token| token.literal.as_str())
        .collect();
    assert_eq!(positions, vec!["10,10", "50,50"]);

    let labels: Vec<_> = lines
        .iter()
        .flat_map(|line| line.descendants())
        .filter(|token| token.kind == TokenKind::Label)
        .map(|token| token.literal.as_str())
        .collect();
    assert_eq!(labels, vec!["loop", "loop"]);

    assert_eq!(lines[4].children[0].literal, "\t");
    assert_eq!(lines[6].children[0].literal, "\t\t");
}

#[test]
fn test_decoded_values() {
    let lines: Vec<_> = tokenize_document(SCRIPT)
        .into_iter()
        .map(|line| line.with_decoded_values())
        .collect();
    let values: Vec<_> = lines[8]
        .descendants()
        .filter(|token| !token.value.is_none())
        .map(|token| token.value.clone())
        .collect();
    assert_eq!(
        values,
        vec![
            TokenValue::String("done\n".to_string()),
            TokenValue::String("out.txt".to_string()),
        ]
    );

    let degrees = lines[3]
        .descendants()
        .find(|token| token.kind == TokenKind::NumberLiteral)
        .map(|token| token.value.clone());
    assert_eq!(degrees, Some(TokenValue::Float(90.0)));
}

#[test]
fn test_strip_whitespace_for_display() {
    let mut line = tokenize_line(0, "f[a , b]");
    line.strip_whitespace();
    let kinds: Vec<_> = line.descendants().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Line,
            TokenKind::Indent,
            TokenKind::Identifier,
            TokenKind::SquareBrackets,
            TokenKind::Identifier,
            TokenKind::Comma,
            TokenKind::Identifier,
        ]
    );
    // Gaps keep the text even without whitespace tokens
    assert_eq!(line.reconstruct(), "f[a , b]");
}

#[test]
fn test_broken_document_diagnostics() {
    init_test_logger();
    let text = "ok\n\tcall(a]\n;";
    let document = Lexer::new(LexerConfig::default().with_threads(1)).tokenize_document(text);

    let summary: Vec<_> = document
        .diagnostics
        .iter()
        .map(|d| (d.line, d.severity, d.message.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, Severity::Error, "mismatched closing ']'"),
            (1, Severity::Warning, "unclosed '('"),
        ]
    );

    let unresolved = unresolved_diagnostics(&document.lines[2]);
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].message, "unrecognized character ';'");

    let snippet = render_snippet(&document.diagnostics[0], "\tcall(a]");
    assert_eq!(
        snippet,
        "error: mismatched closing ']'\n --> line 2, col 8\n\
         2 |  call(a]\n  |        ^\nhelp: expected ')'"
    );
}

#[test]
fn test_large_document_in_parallel() {
    init_test_logger();
    let text: String = (0..2_000)
        .map(|n| format!("\tv{n} = [{n}, {n}.5f \"x\\\"{n}\"] // {n}\n"))
        .collect();
    let config = LexerConfig {
        threads: 4,
        parallel_min_lines: 100,
        report_unclosed_brackets: true,
    };
    let document = Lexer::new(config).tokenize_document(&text);
    assert_eq!(document.lines, tokenize_document(&text));
    assert!(document.diagnostics.is_empty());
}
