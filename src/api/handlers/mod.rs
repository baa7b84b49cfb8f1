//! HTTP request handlers.

pub mod health_handler;
pub mod user_handler;

pub use health_handler::{health, root};
pub use user_handler::user_routes;
