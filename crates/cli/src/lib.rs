//! CLI utilities for the droidres Android resource tools
//!
//! Provides shared CLI functionality:
//! - Global command-line flags
//! - Terminal output formatting
//! - Log subscriber setup

#![warn(missing_docs)]

pub mod args;
pub mod logging;
pub mod output;
