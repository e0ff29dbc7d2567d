//! Configuration loading and schema definitions
//!
//! Settings shared by the `strings` and `links` commands.

mod loader;
mod schema;

pub use loader::{expand_path, Config};
pub use schema::*;
