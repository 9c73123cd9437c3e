//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::UserRole;

/// Artistry course marketplace API
#[derive(Parser, Debug)]
#[command(name = "artistry-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Change the role of an existing user (bootstraps the first admin)
    Promote(PromoteArgs),
}

/// Arguments for the serve command.
///
/// Unset values fall back to SERVER_HOST / SERVER_PORT from the configuration.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the promote command
#[derive(Parser, Debug)]
pub struct PromoteArgs {
    /// Email of a user who has already signed up
    #[arg(short, long)]
    pub email: String,

    /// Role to assign
    #[arg(short, long, value_enum, default_value_t = RoleArg::Admin)]
    pub role: RoleArg,
}

/// Role accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleArg {
    Student,
    Instructor,
    Admin,
}

impl From<RoleArg> for UserRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Student => UserRole::Student,
            RoleArg::Instructor => UserRole::Instructor,
            RoleArg::Admin => UserRole::Admin,
        }
    }
}
