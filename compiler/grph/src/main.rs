use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use grph::check_source;
use grph::highlight::{highlighted, ColorMode};
use grph_lexer::{render_snippet, Lexer, LexerConfig, Token};
use log::{debug, LevelFilter};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(
    name = "grph",
    version,
    about = "Tokenizer tools for the GRPH programming language",
    long_about = "grph tokenizes GRPH source files line by line.\n\n\
        It can dump the token trees, print the source with syntax highlighting,\n\
        or report bracket and character errors.\n\n\
        EXAMPLES:\n\
        \n  grph tokens script.grph                 Dump the token tree of every line\n\
        \n  grph tokens --json --values script.grph Dump decoded token trees as JSON\n\
        \n  grph highlight script.grph              Print the script with colors\n\
        \n  echo 'log[\"hi\"]' | grph check          Check code from stdin"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Worker threads for large documents (default: GRPH_LEXER_THREADS or the CPU count)
    #[arg(
        long,
        value_name = "N",
        global = true,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    threads: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Dump the token tree of every line
    #[command(about = "Dump the token tree of every line")]
    Tokens(TokensArgs),

    /// Print the source with syntax highlighting
    #[command(about = "Print the source with syntax highlighting")]
    Highlight(HighlightArgs),

    /// Report mismatched brackets and unrecognized characters
    #[command(
        about = "Report mismatched brackets and unrecognized characters",
        long_about = "Tokenizes the source and prints every diagnostic to stderr.\n\n\
            Exits with status 1 when an error was found, 0 otherwise."
    )]
    Check(InputArgs),
}

#[derive(Debug, Args, Clone)]
struct InputArgs {
    /// Input GRPH source file (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
struct TokensArgs {
    #[command(flatten)]
    source: InputArgs,

    /// Print the trees as JSON
    #[arg(long)]
    json: bool,

    /// Leave whitespace tokens out of the dump
    #[arg(long = "strip-whitespace")]
    strip_whitespace: bool,

    /// Decode number and string literal values
    #[arg(long)]
    values: bool,
}

#[derive(Debug, Args, Clone)]
struct HighlightArgs {
    #[command(flatten)]
    source: InputArgs,

    /// Print without ANSI colors
    #[arg(long = "no-color")]
    no_color: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read '{}': {source}", .path.display())]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to read from stdin: {0}")]
    ReadStdin(#[source] io::Error),
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn build_lexer(threads: Option<u32>) -> Lexer {
    let mut config = LexerConfig::from_env();
    if let Some(threads) = threads {
        config = config.with_threads(threads as usize);
    }
    debug!("lexer configuration: {config:?}");
    Lexer::new(config)
}

fn read_source_from_input(input: &Option<PathBuf>) -> Result<String, CliError> {
    if let Some(path) = input {
        fs::read_to_string(path).map_err(|source| CliError::ReadFile {
            path: path.clone(),
            source,
        })
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(CliError::ReadStdin)?;
        Ok(buf)
    }
}

fn run_tokens(
    args: &TokensArgs,
    lexer: &Lexer,
    source: &str,
    out: &mut dyn Write,
) -> Result<i32, CliError> {
    let mut lines = lexer.tokenize_document(source).lines;
    if args.values {
        lines = lines.into_iter().map(Token::with_decoded_values).collect();
    }
    if args.strip_whitespace {
        lines.iter_mut().for_each(Token::strip_whitespace);
    }

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &lines)?;
        writeln!(out)?;
    } else {
        for line in &lines {
            write!(out, "{}", line.represent())?;
        }
    }
    Ok(0)
}

fn run_highlight(
    args: &HighlightArgs,
    lexer: &Lexer,
    source: &str,
    out: &mut dyn Write,
) -> Result<i32, CliError> {
    let mode = if args.no_color {
        ColorMode::Plain
    } else {
        ColorMode::Ansi
    };
    let rendered: Vec<String> = lexer
        .tokenize_document(source)
        .lines
        .iter()
        .map(|line| highlighted(line, &[], mode))
        .collect();
    write!(out, "{}", rendered.join("\n"))?;
    Ok(0)
}

fn run_check(lexer: &Lexer, source: &str, err: &mut dyn Write) -> Result<i32, CliError> {
    let diagnostics = check_source(lexer, source);
    let lines: Vec<&str> = source.split('\n').collect();
    for diagnostic in &diagnostics {
        let text = lines.get(diagnostic.line).copied().unwrap_or("");
        writeln!(err, "{}", render_snippet(diagnostic, text))?;
    }
    if diagnostics.iter().any(|d| d.is_error()) {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn run(cli: &Cli) -> Result<i32, CliError> {
    let lexer = build_lexer(cli.threads);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let rc = match &cli.command {
        Command::Tokens(args) => {
            let source = read_source_from_input(&args.source.input)?;
            run_tokens(args, &lexer, &source, &mut out)?
        }
        Command::Highlight(args) => {
            let source = read_source_from_input(&args.source.input)?;
            run_highlight(args, &lexer, &source, &mut out)?
        }
        Command::Check(args) => {
            let source = read_source_from_input(&args.input)?;
            run_check(&lexer, &source, &mut io::stderr())?
        }
    };
    out.flush()?;
    Ok(rc)
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(rc) => {
            if cli.verbose > 0 {
                eprintln!("note: completed with exit code {rc}");
            }
            rc
        }
        Err(e) => {
            eprintln!("error: {e}");
            2
        }
    }
}

fn main() {
    std::process::exit(run_cli());
}
