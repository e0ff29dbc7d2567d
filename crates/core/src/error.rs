//! Structured error handling with context and recovery suggestions
//!
//! This module provides structured error types with:
//! - Detailed error context
//! - Recovery suggestions
//! - Error codes for programmatic handling
//! - Serializable error reports

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    Internal = 1001,

    // IO errors (2xxx)
    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,
    DirectoryNotFound = 2004,

    // Configuration errors (3xxx)
    ConfigNotFound = 3001,
    ConfigParseError = 3002,
    ConfigValidationError = 3003,

    // Input parsing errors (4xxx)
    MalformedLine = 4001,
    EmptyKey = 4002,
    InvalidProject = 4003,
    InvalidEncoding = 4004,

    // Tree walking errors (5xxx)
    WalkError = 5000,
    InvalidPattern = 5001,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            4 => "Parse",
            5 => "Walk",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Process exit code for this error's category
    pub fn exit_code(&self) -> i32 {
        match self.code.code() / 1000 {
            2 | 5 => exit_codes::IO_ERROR,
            3 => exit_codes::CONFIG_ERROR,
            4 => exit_codes::PARSE_ERROR,
            _ => exit_codes::FAILURE,
        }
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    // Convenience constructors

    #[allow(missing_docs)]
    pub fn file_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::FileNotFound,
            format!("File not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Check that the file exists and you have read permissions")
    }

    #[allow(missing_docs)]
    pub fn directory_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::DirectoryNotFound,
            format!("Directory not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Run from the project root or pass --root")
    }

    #[allow(missing_docs)]
    pub fn config_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a .droidres.toml file or drop the --config flag")
    }

    #[allow(missing_docs)]
    pub fn config_invalid(field: &str, message: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ConfigValidationError,
            format!("Invalid value for `{}`: {}", field, message),
        )
    }

    #[allow(missing_docs)]
    pub fn malformed_line(line: usize, content: &str) -> Self {
        Self::new(
            ErrorCode::MalformedLine,
            format!("Line {} is not a key=value pair: {:?}", line, content),
        )
        .with_suggestion("Every non-blank line must contain an '=' separating name and value")
    }

    #[allow(missing_docs)]
    pub fn empty_key(line: usize) -> Self {
        Self::new(
            ErrorCode::EmptyKey,
            format!("Line {} has an empty resource name", line),
        )
    }

    #[allow(missing_docs)]
    pub fn invalid_project(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidProject, message)
            .with_suggestion("Point --project at the .project file Eclipse generated")
    }
}

/// Serializable error report for logging and JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub code_str: String,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
#[allow(missing_docs)]
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const PARSE_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const IO_ERROR: i32 = 4;
}

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            std::io::ErrorKind::InvalidData => ErrorCode::InvalidEncoding,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::Internal, format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        let message = match err.path() {
            Some(path) => format!("Failed to walk {}: {}", path.display(), err),
            None => format!("Failed to walk directory tree: {}", err),
        };
        Error::new(ErrorCode::WalkError, message).with_source(err)
    }
}

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::new(ErrorCode::InvalidPattern, format!("Glob pattern error: {}", err))
            .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Attach context to the error, if any
    fn context(self, context: impl Into<String>) -> Result<T>;
    /// Attach a recovery suggestion to the error, if any
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::FileNotFound.to_string(), "E2001");
        assert_eq!(ErrorCode::MalformedLine.to_string(), "E4001");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::IoError.category(), "IO");
        assert_eq!(ErrorCode::ConfigNotFound.category(), "Configuration");
        assert_eq!(ErrorCode::EmptyKey.category(), "Parse");
        assert_eq!(ErrorCode::WalkError.category(), "Walk");
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::file_not_found("/path/to/file").with_context("While reading properties");

        assert_eq!(err.code, ErrorCode::FileNotFound);
        assert!(err.context.is_some());
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_malformed_line_message() {
        let err = Error::malformed_line(7, "no separator here");
        let rendered = err.to_string();

        assert!(rendered.starts_with("[E4001] Line 7"));
        assert!(rendered.contains("Suggestion:"));
    }

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(Error::malformed_line(1, "x").exit_code(), exit_codes::PARSE_ERROR);
        assert_eq!(
            Error::config_invalid("links.marker", "empty").exit_code(),
            exit_codes::CONFIG_ERROR
        );
        assert_eq!(
            Error::directory_not_found("/missing/src").exit_code(),
            exit_codes::IO_ERROR
        );
        assert_eq!(
            Error::new(ErrorCode::Internal, "bug").exit_code(),
            exit_codes::FAILURE
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();

        assert_eq!(err.code, ErrorCode::FileNotFound);
        assert!(err.source.is_some());
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<()> = Err(Error::new(ErrorCode::IoError, "write failed"));
        let err = result.context("While writing strings.xml").unwrap_err();

        assert_eq!(err.context.as_deref(), Some("While writing strings.xml"));
    }

    #[test]
    fn test_error_report_serialization() {
        let err = Error::empty_key(3).with_context("Parsing app.properties");

        let report = err.to_report();
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("E4002"));
        assert!(json.contains("EMPTY_KEY"));
        assert!(json.contains("Parse"));
        assert!(!json.contains("suggestion"));
    }
}
