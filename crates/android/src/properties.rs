//! Flat `key=value` properties parsing
//!
//! Every non-blank line is one entry. The first `=` separates the resource
//! name from its value; later `=` characters belong to the value.

use droidres_core::config::StringsConfig;
use droidres_core::error::{Error, Result};
use std::collections::HashSet;
use tracing::{debug, warn};

/// One parsed `key=value` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// 1-based line number in the source file
    pub line: usize,
    /// Resource name, trimmed
    pub key: String,
    /// Raw value with leading whitespace removed
    pub value: String,
}

/// Parser settings
#[derive(Debug, Clone, Copy)]
pub struct PropertiesOptions {
    /// Skip lines whose first non-blank character is `#` or `!`
    pub skip_comments: bool,
}

impl Default for PropertiesOptions {
    fn default() -> Self {
        Self {
            skip_comments: true,
        }
    }
}

impl From<&StringsConfig> for PropertiesOptions {
    fn from(config: &StringsConfig) -> Self {
        Self {
            skip_comments: config.skip_comments,
        }
    }
}

/// Parse properties text into entries, in file order.
///
/// Stops at the first malformed line.
pub fn parse_properties(text: &str, options: &PropertiesOptions) -> Result<Vec<Property>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut properties = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let trimmed = line.trim_start();

        if trimmed.is_empty() {
            continue;
        }
        if options.skip_comments && (trimmed.starts_with('#') || trimmed.starts_with('!')) {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(Error::malformed_line(line_no, line));
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(Error::empty_key(line_no));
        }

        debug!(line = line_no, key, "parsed property");
        properties.push(Property {
            line: line_no,
            key: key.to_string(),
            value: value.trim_start().to_string(),
        });
    }

    for dup in duplicate_keys(&properties) {
        warn!(line = dup.line, key = %dup.key, "duplicate resource name");
    }

    Ok(properties)
}

/// Entries whose key already appeared earlier in the list
pub fn duplicate_keys(properties: &[Property]) -> Vec<&Property> {
    let mut seen = HashSet::new();
    properties
        .iter()
        .filter(|p| !seen.insert(p.key.as_str()))
        .collect()
}
