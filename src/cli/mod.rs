//! CLI module - Command-line interface for the application.
//!
//! - `serve` - Start the HTTP server
//! - `migrate` - Create or inspect collection indexes

pub mod args;

pub use args::{Cli, Commands};
