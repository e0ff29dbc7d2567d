//! Configuration schema definitions
//!
//! One table per command, every field optional in the file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigSchema {
    /// `droidres strings` settings
    #[serde(default)]
    pub strings: StringsConfig,

    /// `droidres links` settings
    #[serde(default)]
    pub links: LinksConfig,
}

impl ConfigSchema {
    /// Check values that deserialize fine but can't be used
    pub fn validate(&self) -> Result<()> {
        if self.links.marker.is_empty() {
            return Err(Error::config_invalid("links.marker", "must not be empty"));
        }

        for pattern in &self.links.exclude {
            glob::Pattern::new(pattern)
                .map_err(|e| Error::config_invalid("links.exclude", format!("{pattern:?}: {e}")))?;
        }

        if self.strings.indent.chars().any(|c| !matches!(c, ' ' | '\t')) {
            return Err(Error::config_invalid(
                "strings.indent",
                "only spaces and tabs are allowed",
            ));
        }

        Ok(())
    }
}

/// Properties to strings.xml conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringsConfig {
    /// Escape `&`, `'` and stray `<` in values
    #[serde(default = "default_true")]
    pub escape: bool,

    /// Treat lines starting with `#` or `!` as comments
    #[serde(default = "default_true")]
    pub skip_comments: bool,

    /// Indentation used for `<string>` elements
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Output file used when none is given on the command line
    #[serde(default = "default_strings_output")]
    pub output: String,
}

impl Default for StringsConfig {
    fn default() -> Self {
        Self {
            escape: true,
            skip_comments: true,
            indent: default_indent(),
            output: default_strings_output(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_indent() -> String {
    "    ".to_string()
}

fn default_strings_output() -> String {
    "strings.xml".to_string()
}

/// Eclipse linked-resource generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Directory under the project root to walk
    #[serde(default = "default_source_dir")]
    pub source_dir: String,

    /// Descriptor file, relative to the project root
    #[serde(default = "default_links_output")]
    pub output: String,

    /// Leading bytes that mark a `.java` file as a symlink stand-in
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Glob patterns for paths to skip
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output: default_links_output(),
            marker: default_marker(),
            exclude: Vec::new(),
        }
    }
}

fn default_source_dir() -> String {
    "src".to_string()
}

fn default_links_output() -> String {
    "linkedResources.xml".to_string()
}

fn default_marker() -> String {
    "!<symlink>".to_string()
}
