//! Android `strings.xml` generation from properties files

use crate::properties::{duplicate_keys, parse_properties, Property, PropertiesOptions};
use droidres_core::config::StringsConfig;
use droidres_core::error::{Error, Result, ResultExt};
use droidres_core::xml;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Conversion settings
#[derive(Debug, Clone)]
pub struct StringsOptions {
    /// Escape `&`, `'` and stray `<` in values
    pub escape: bool,
    /// Skip `#` / `!` comment lines in the input
    pub skip_comments: bool,
    /// Indentation before each `<string>` element
    pub indent: String,
}

impl Default for StringsOptions {
    fn default() -> Self {
        Self::from(&StringsConfig::default())
    }
}

impl From<&StringsConfig> for StringsOptions {
    fn from(config: &StringsConfig) -> Self {
        Self {
            escape: config.escape,
            skip_comments: config.skip_comments,
            indent: config.indent.clone(),
        }
    }
}

impl StringsOptions {
    fn properties(&self) -> PropertiesOptions {
        PropertiesOptions {
            skip_comments: self.skip_comments,
        }
    }
}

/// A single `<string>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringResource {
    /// Value of the `name` attribute
    pub name: String,
    /// Element text, already escaped if requested
    pub value: String,
}

impl StringResource {
    /// Build the element for one property
    pub fn from_property(property: &Property, escape: bool) -> Self {
        let value = if escape {
            xml::escape_android_string(&property.value).into_owned()
        } else {
            property.value.clone()
        };

        Self {
            name: property.key.clone(),
            value,
        }
    }

    /// Render as one line of XML, without indentation or newline
    pub fn to_xml(&self) -> String {
        format!(
            r#"<string name="{}">{}</string>"#,
            xml::escape_attr(&self.name),
            self.value
        )
    }
}

/// Render a complete `strings.xml` document
pub fn render_strings_xml(properties: &[Property], options: &StringsOptions) -> String {
    let mut out = String::with_capacity(64 + properties.len() * 48);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str("<resources>\n");

    for property in properties {
        let resource = StringResource::from_property(property, options.escape);
        let _ = writeln!(out, "{}{}", options.indent, resource.to_xml());
    }

    out.push_str("</resources>\n");
    out
}

/// In-memory conversion result
#[derive(Debug, Clone)]
pub struct Converted {
    /// Rendered document
    pub xml: String,
    /// Number of `<string>` elements
    pub strings: usize,
    /// Number of repeated resource names
    pub duplicates: usize,
}

/// Parse and render properties text
pub fn convert_text(text: &str, options: &StringsOptions) -> Result<Converted> {
    let properties = parse_properties(text, &options.properties())?;
    let duplicates = duplicate_keys(&properties).len();

    Ok(Converted {
        xml: render_strings_xml(&properties, options),
        strings: properties.len(),
        duplicates,
    })
}

/// Outcome of a file conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    /// Properties file read
    pub input: PathBuf,
    /// strings.xml written
    pub output: PathBuf,
    /// Number of `<string>` elements
    pub strings: usize,
    /// Number of repeated resource names
    pub duplicates: usize,
    /// Whether values were escaped
    pub escaped: bool,
}

/// Read a properties file
pub fn read_properties_file(input: &Path) -> Result<String> {
    fs::read_to_string(input).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::file_not_found(input),
        _ => Error::from(e).with_context(format!("Reading {}", input.display())),
    })
}

/// Convert `input` into a strings.xml at `output`.
///
/// Nothing is written when parsing fails.
pub fn convert_file(input: &Path, output: &Path, options: &StringsOptions) -> Result<ConversionSummary> {
    let text = read_properties_file(input)?;
    let converted =
        convert_text(&text, options).context(format!("Converting {}", input.display()))?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        debug!(dir = %parent.display(), "creating output directory");
        fs::create_dir_all(parent)?;
    }
    fs::write(output, &converted.xml)
        .map_err(Error::from)
        .context(format!("Writing {}", output.display()))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        strings = converted.strings,
        "wrote string resources"
    );

    Ok(ConversionSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        strings: converted.strings,
        duplicates: converted.duplicates,
        escaped: options.escape,
    })
}
