//! Android resource tools for droidres
//!
//! This crate provides the work behind each command:
//! - Properties file parsing
//! - strings.xml generation
//! - Eclipse linked-resource discovery for symlink stand-ins
//! - `.project` file updates

#![warn(missing_docs)]

pub mod linked_resources;
pub mod project_file;
pub mod properties;
pub mod strings_xml;
