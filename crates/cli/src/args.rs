//! Flags shared by every droidres command

use clap::{ArgAction, Args, ValueEnum};
use std::path::PathBuf;

/// Global command-line flags
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Config file path
    #[arg(short, long, global = true, env = "DROIDRES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print a JSON summary instead of status lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Format of log lines on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl GlobalArgs {
    /// Whether human-readable status lines should be printed
    pub fn show_status(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Apply the color preference to the whole process
    pub fn apply_color(&self) {
        if self.no_color || std::env::var_os("NO_COLOR").is_some() {
            owo_colors::set_override(false);
        }
    }
}
