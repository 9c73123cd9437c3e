//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `promote` - Role changes from the operator's shell

pub mod args;

pub use args::{Cli, Commands};
