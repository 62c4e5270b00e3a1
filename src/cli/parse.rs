//! CLI parse: clap types for naivecmp. No behavior; definitions only.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// naivecmp - compare directories by fuzzy-matching file attributes
#[derive(Debug, Parser)]
#[command(name = "naivecmp")]
#[command(about = "Compare directories by fuzzy-matching file attributes without checking contents.")]
pub struct Cli {
    /// Directory A
    pub dir_a: PathBuf,

    /// Directory B
    pub dir_b: PathBuf,

    /// Use file mod time (default true)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true", action = ArgAction::Set)]
    pub use_mod_time: Option<bool>,

    /// Use file size (default true)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true", action = ArgAction::Set)]
    pub use_size: Option<bool>,

    /// Use file mode (default false)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true", action = ArgAction::Set)]
    pub use_mode: Option<bool>,

    /// Use file name even when there is no collision (default false)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true", action = ArgAction::Set)]
    pub use_name: Option<bool>,

    /// Use file directory path (default false)
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true", action = ArgAction::Set)]
    pub use_path: Option<bool>,

    /// Count of parallel workers per directory (default 6)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Print every file with its fingerprint, useful to troubleshoot matches
    #[arg(long)]
    pub debug: bool,

    /// Append a summary table to the text report
    #[arg(long)]
    pub summary: bool,

    /// Disable coloured headers
    #[arg(long)]
    pub no_color: bool,

    /// Print the effective settings as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Configuration file path (layered over the user config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable logging
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Debug-level logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}
