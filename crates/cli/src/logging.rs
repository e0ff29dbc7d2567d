//! Structured logging setup
//!
//! Logs go to stderr so generated XML on stdout (`--dry-run`) stays clean.

use crate::args::{GlobalArgs, LogFormat};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log subscriber configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of compact text
    pub json: bool,
    /// Include the event target
    pub show_target: bool,
}

impl LogConfig {
    /// Map `-v` count and `--quiet` onto a filter level
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        let level = if quiet {
            "error"
        } else {
            match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };

        Self {
            level: level.to_string(),
            json: false,
            show_target: verbose >= 2,
        }
    }

    /// Build from the global flags, honouring `--log-format`
    pub fn from_args(args: &GlobalArgs) -> Self {
        Self {
            json: args.log_format == LogFormat::Json,
            ..Self::from_verbosity(args.verbose, args.quiet)
        }
    }
}

/// Install the global subscriber
pub fn init(config: &LogConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(config.show_target)
                    .without_time()
                    .compact(),
            )
            .try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        level = %config.level,
        version = env!("CARGO_PKG_VERSION"),
        "logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(LogConfig::from_verbosity(0, false).level, "warn");
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(LogConfig::from_verbosity(1, false).level, "info");
        assert_eq!(LogConfig::from_verbosity(2, false).level, "debug");
        assert_eq!(LogConfig::from_verbosity(9, false).level, "trace");
    }

    #[test]
    fn test_quiet_wins() {
        assert_eq!(LogConfig::from_verbosity(3, true).level, "error");
    }

    #[test]
    fn test_log_format_json_selects_json_layer() {
        let args = GlobalArgs {
            verbose: 1,
            log_format: LogFormat::Json,
            ..GlobalArgs::default()
        };
        let config = LogConfig::from_args(&args);
        assert!(config.json);
        assert_eq!(config.level, "info");

        assert!(!LogConfig::from_args(&GlobalArgs::default()).json);
    }

    #[test]
    fn test_target_shown_at_debug() {
        assert!(!LogConfig::from_verbosity(1, false).show_target);
        assert!(LogConfig::from_verbosity(2, false).show_target);
    }
}
