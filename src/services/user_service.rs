//! User service - The persistence collaborator behind the user handlers.
//!
//! Delegates to a [`UserRepository`] and lifts storage failures into
//! [`AppError`] so handlers deal with a single error type.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

use crate::domain::{CreateUser, DeleteResult, UpdateResult, UpdateUser, User};
use crate::errors::AppResult;
use crate::infra::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// List every user
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Get a user by ID; `None` when no user matches
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<User>>;

    /// Create a user from a validated payload
    async fn create(&self, input: CreateUser) -> AppResult<User>;

    /// Apply a validated update; zero matches are reported, not raised
    async fn update_by_id(&self, input: UpdateUser) -> AppResult<UpdateResult>;

    /// Remove a user; zero matches are reported, not raised
    async fn delete_by_id(&self, id: ObjectId) -> AppResult<DeleteResult>;
}

/// Concrete implementation of UserService over a repository.
pub struct UserManager {
    repository: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let users = self.repository.find_all().await?;
        tracing::debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<User>> {
        let user = self.repository.find_by_id(id).await?;
        if user.is_none() {
            tracing::debug!(%id, "User not found");
        }
        Ok(user)
    }

    async fn create(&self, input: CreateUser) -> AppResult<User> {
        let user = self.repository.insert(User::from(input)).await?;
        tracing::info!(id = %user.id, "User created");
        Ok(user)
    }

    async fn update_by_id(&self, input: UpdateUser) -> AppResult<UpdateResult> {
        let id = input.id;
        let result = self.repository.update_by_id(input).await?;
        tracing::info!(%id, matched = result.matched_count, "User update applied");
        Ok(result)
    }

    async fn delete_by_id(&self, id: ObjectId) -> AppResult<DeleteResult> {
        let result = self.repository.delete_by_id(id).await?;
        tracing::info!(%id, deleted = result.deleted_users, "User delete applied");
        Ok(result)
    }
}
