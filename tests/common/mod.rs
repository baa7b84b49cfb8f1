//! In-memory stand-ins shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use user_api::api::{create_router, AppState};
use user_api::domain::{DeleteResult, UpdateResult, UpdateUser, User};
use user_api::errors::StoreError;
use user_api::infra::{DatabaseHealth, UserRepository};
use user_api::services::UserManager;
use user_api::validation::{SchemaValidator, Strictness};

/// Repository backed by a map, enforcing the unique email index
#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<HashMap<ObjectId, User>>,
    failing: bool,
}

impl InMemoryUsers {
    /// A repository whose every call fails like an unreachable server
    pub fn failing() -> Self {
        Self {
            users: Mutex::default(),
            failing: true,
        }
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing {
            Err(StoreError::unavailable("connection refused"))
        } else {
            Ok(())
        }
    }
}

fn email_taken(users: &HashMap<ObjectId, User>, email: &str, except: Option<ObjectId>) -> bool {
    users
        .values()
        .any(|u| u.email == email && Some(u.id) != except)
}

fn duplicate(email: &str) -> StoreError {
    StoreError::duplicate_key(format!(
        "E11000 duplicate key error collection: user_api.users index: email_unique dup key: {{ email: \"{}\" }}",
        email
    ))
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        self.check()?;
        let mut users: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, StoreError> {
        self.check()?;
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if email_taken(&users, &user.email, None) {
            return Err(duplicate(&user.email));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_by_id(&self, changes: UpdateUser) -> Result<UpdateResult, StoreError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if let Some(email) = changes.email.as_deref() {
            if email_taken(&users, email, Some(changes.id)) {
                return Err(duplicate(email));
            }
        }

        let Some(user) = users.get_mut(&changes.id) else {
            return Ok(UpdateResult::default());
        };

        let before = user.clone();
        if let Some(full_name) = changes.full_name {
            user.full_name = full_name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }

        Ok(UpdateResult {
            matched_count: 1,
            modified_count: u64::from(*user != before),
        })
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteResult, StoreError> {
        self.check()?;
        let removed = self.users.lock().unwrap().remove(&id);
        Ok(DeleteResult {
            deleted_users: u64::from(removed.is_some()),
        })
    }
}

/// Health probe with a fixed answer
pub struct StaticHealth(pub bool);

#[async_trait]
impl DatabaseHealth for StaticHealth {
    async fn ping(&self) -> Result<(), StoreError> {
        if self.0 {
            Ok(())
        } else {
            Err(StoreError::unavailable("server selection timeout"))
        }
    }
}

/// Application state over an in-memory repository
pub fn test_state(users: Arc<InMemoryUsers>, strictness: Strictness) -> AppState {
    AppState::new(
        Arc::new(UserManager::new(users)),
        Arc::new(SchemaValidator::new(strictness)),
        Arc::new(StaticHealth(true)),
    )
}

pub fn test_app(users: Arc<InMemoryUsers>) -> axum::Router {
    create_router(test_state(users, Strictness::Reject))
}
