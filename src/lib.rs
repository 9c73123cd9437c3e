//! Artistry API - Course marketplace backend
//!
//! REST API over users, courses, carts, the instructor roster, feedback
//! and payments, with bearer-token authentication and a Stripe-compatible
//! payment intent integration.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and outcome types
//! - **services**: Use cases (auth, users and roster, catalog, carts, payments)
//! - **infra**: Database, repositories, unit of work, payment provider client
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve --port 5000
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Course, User, UserRole};
pub use errors::{AppError, AppResult};
