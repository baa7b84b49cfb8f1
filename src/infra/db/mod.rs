//! Database connection and initialization.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database as MongoDatabase, IndexModel};

use crate::config::{Config, EMAIL_UNIQUE_INDEX, USERS_COLLECTION};
use crate::domain::User;
use crate::errors::StoreError;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Liveness probe used by the health endpoint
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    /// Round-trip a `ping` command to the server
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    db: MongoDatabase,
}

impl Database {
    /// Connect and make sure the indexes the service relies on exist.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let database = Self::connect_without_indexes(config).await?;
        database.ensure_indexes().await?;

        tracing::info!(
            database = %config.database_name,
            "Database connected and indexes ensured"
        );

        Ok(database)
    }

    /// Connect without touching indexes (for CLI commands).
    pub async fn connect_without_indexes(config: &Config) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(config.mongodb_uri()).await?;
        Ok(Self {
            db: client.database(&config.database_name),
        })
    }

    /// Typed handle on the users collection.
    pub fn users(&self) -> Collection<User> {
        self.db.collection(USERS_COLLECTION)
    }

    /// Create the unique index on `email`. Idempotent.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(EMAIL_UNIQUE_INDEX.to_string())
                    .build(),
            )
            .build();

        self.users().create_index(index).await?;
        Ok(())
    }

    /// Names of the indexes currently defined on the users collection.
    pub async fn index_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.users().list_index_names().await?)
    }
}

#[async_trait]
impl DatabaseHealth for Database {
    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
