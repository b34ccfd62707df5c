//! Configuration types and CLI options.

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_CONCURRENCY, DEFAULT_DELAY_MS, DEFAULT_METHOD};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(s)
    }
}

/// Log output format.
///
/// - `Plain`: human-readable format with colors (default)
/// - `Json`: structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogFormat::Plain => "plain",
            LogFormat::Json => "json",
        };
        f.write_str(s)
    }
}

/// Command-line options and configuration.
///
/// URLs are read one per line from stdin; these options shape the request
/// sent for each line, the response filter, and where matches end up.
///
/// # Examples
///
/// ```bash
/// # Summary mode: one CSV-ish line per kept response
/// cat urls.txt | bulkfetch
///
/// # Save matching responses, only statuses 200 and 204
/// cat urls.txt | bulkfetch -o out --mc 200,204
///
/// # POST a body through a proxy, slowly
/// cat urls.txt | bulkfetch -b 'q=test' -x http://127.0.0.1:8080 -d 500
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bulkfetch",
    about = "Requests URLs provided on stdin, filters the responses, and saves the matches."
)]
pub struct Opt {
    /// Request body
    #[arg(short = 'b', long)]
    pub body: Option<String>,

    /// Delay between spawning tasks (ms)
    #[arg(short = 'd', long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay: u64,

    /// Add a header to the request as `name:value` (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Don't keep responses whose body looks like HTML
    #[arg(long)]
    pub ignore_html: bool,

    /// Don't keep responses whose body is empty or whitespace
    #[arg(long)]
    pub ignore_empty: bool,

    /// Use HTTP keep-alive
    #[arg(short = 'k', long)]
    pub keep_alive: bool,

    /// HTTP method to use (a request body promotes the default GET to POST)
    #[arg(short = 'm', long, default_value = DEFAULT_METHOD)]
    pub method: String,

    /// Only keep responses whose body contains this string
    #[arg(short = 's', long, visible_alias = "ms")]
    pub match_string: Option<String>,

    /// Only keep responses with one of these status codes (comma separated)
    #[arg(long, visible_alias = "mc", value_delimiter = ',')]
    pub match_code: Vec<u16>,

    /// Filter out responses with one of these status codes (comma separated)
    #[arg(long, visible_aliases = ["fc", "ex"], value_delimiter = ',')]
    pub exclude_code: Vec<u16>,

    /// Directory to save responses in; omit for a stdout summary
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Route requests through this HTTP proxy
    #[arg(short = 'x', long)]
    pub proxy: Option<String>,

    /// Maximum concurrent in-flight requests
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Opt {
    fn default() -> Self {
        Self {
            body: None,
            delay: DEFAULT_DELAY_MS,
            headers: Vec::new(),
            ignore_html: false,
            ignore_empty: false,
            keep_alive: false,
            method: DEFAULT_METHOD.to_string(),
            match_string: None,
            match_code: Vec::new(),
            exclude_code: Vec::new(),
            output: None,
            proxy: None,
            concurrency: DEFAULT_CONCURRENCY,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
