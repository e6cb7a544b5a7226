//! Tokenizer configuration.

use log::warn;

/// Environment variable overriding [`LexerConfig::threads`]
pub const THREADS_ENV: &str = "GRPH_LEXER_THREADS";
/// Environment variable overriding [`LexerConfig::parallel_min_lines`]
pub const PARALLEL_MIN_LINES_ENV: &str = "GRPH_LEXER_PARALLEL_MIN_LINES";
/// Environment variable overriding [`LexerConfig::report_unclosed_brackets`]
pub const REPORT_UNCLOSED_ENV: &str = "GRPH_LEXER_REPORT_UNCLOSED";

/// Default of [`LexerConfig::report_unclosed_brackets`]
pub const DEFAULT_REPORT_UNCLOSED: bool = true;

/// Configuration for the document driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    /// Maximum number of worker threads used for one document
    pub threads: usize,
    /// Documents with fewer lines are always tokenized on the calling thread
    pub parallel_min_lines: usize,
    /// Whether a bracket still open at the end of its line is reported
    pub report_unclosed_brackets: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            threads: std::thread::available_parallelism().map_or(1, |n| n.get()),
            parallel_min_lines: 512,
            report_unclosed_brackets: DEFAULT_REPORT_UNCLOSED,
        }
    }
}

impl LexerConfig {
    /// Defaults overlaid with the `GRPH_LEXER_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with the values `lookup` returns for the
    /// `GRPH_LEXER_*` keys. Unparsable values are ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(threads) = parse_var(&lookup, THREADS_ENV) {
            config.threads = threads;
        }
        if let Some(lines) = parse_var(&lookup, PARALLEL_MIN_LINES_ENV) {
            config.parallel_min_lines = lines;
        }
        if let Some(report) = parse_var(&lookup, REPORT_UNCLOSED_ENV) {
            config.report_unclosed_brackets = report;
        }
        config
    }

    /// Sets the worker thread count
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Number of workers to use for a document of `line_count` lines
    pub fn workers_for(&self, line_count: usize) -> usize {
        if self.threads <= 1 || line_count < self.parallel_min_lines.max(2) {
            1
        } else {
            self.threads.min(line_count)
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}
