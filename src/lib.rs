//! User API - CRUD service for users backed by MongoDB
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: User entity and operation results
//! - **validation**: Pure payload rules, failures as values
//! - **services**: Persistence use cases
//! - **infra**: MongoDB connection and repositories
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared response envelope
//! - **errors**: Error classification and HTTP mapping
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Create the unique email index
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
pub mod validation;

pub use api::AppState;
pub use config::Config;
pub use domain::User;
pub use errors::{AppError, AppResult};
