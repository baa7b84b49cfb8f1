//! Application state - Dependency injection container.
//!
//! Built explicitly at startup and handed to the router; handlers reach
//! their collaborators only through it.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, DatabaseHealth, UserStore};
use crate::services::{UserManager, UserService};
use crate::validation::{SchemaValidator, UserValidation};

/// Application state containing all request-time collaborators.
#[derive(Clone)]
pub struct AppState {
    /// Persistence service for users
    pub user_service: Arc<dyn UserService>,
    /// Validation rules applied before any persistence call
    pub validation: Arc<dyn UserValidation>,
    /// Database liveness probe
    pub database: Arc<dyn DatabaseHealth>,
}

impl AppState {
    /// Wire the MongoDB-backed services from a connected database.
    pub fn from_database(database: Arc<Database>, config: &Config) -> Self {
        let repository = Arc::new(UserStore::new(database.users()));

        Self {
            user_service: Arc::new(UserManager::new(repository)),
            validation: Arc::new(SchemaValidator::new(config.unknown_fields)),
            database,
        }
    }

    /// Create application state with manually injected collaborators.
    pub fn new(
        user_service: Arc<dyn UserService>,
        validation: Arc<dyn UserValidation>,
        database: Arc<dyn DatabaseHealth>,
    ) -> Self {
        Self {
            user_service,
            validation,
            database,
        }
    }
}
