//! Core utilities for the droidres Android resource tools
//!
//! This crate provides the functionality shared by every droidres command:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **XML escaping**: Text, attribute, and Android string-resource escaping
//!
//! # Example
//!
//! ```rust,no_run
//! use droidres_core::{config::Config, xml};
//!
//! let config = Config::load(None).expect("Failed to load configuration");
//! let value = xml::escape_android_string("Tom's & Jerry's");
//!
//! assert_eq!(value, "Tom\\'s &amp; Jerry\\'s");
//! assert_eq!(config.schema.links.marker, "!<symlink>");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod xml;

pub use error::{Error, ErrorCode, Result, ResultExt};
