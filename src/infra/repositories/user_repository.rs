//! User repository - MongoDB access for the users collection.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::Collection;

use crate::domain::{DeleteResult, UpdateResult, UpdateUser, User};
use crate::errors::StoreError;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persistence operations on users.
///
/// Zero matches are outcomes, not errors: `find_by_id` yields `None`,
/// updates and deletes report a zero count.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, StoreError>;

    /// Insert a new user; a taken email surfaces as `StoreError::DuplicateKey`
    async fn insert(&self, user: User) -> Result<User, StoreError>;

    async fn update_by_id(&self, changes: UpdateUser) -> Result<UpdateResult, StoreError>;

    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteResult, StoreError>;
}

/// MongoDB implementation of [`UserRepository`]
#[derive(Clone)]
pub struct UserStore {
    collection: Collection<User>,
}

impl UserStore {
    pub fn new(collection: Collection<User>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let users = self
            .collection
            .find(doc! {})
            .await?
            .try_collect::<Vec<_>>()
            .await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, StoreError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn insert(&self, user: User) -> Result<User, StoreError> {
        self.collection.insert_one(&user).await?;
        Ok(user)
    }

    async fn update_by_id(&self, changes: UpdateUser) -> Result<UpdateResult, StoreError> {
        let filter = doc! { "_id": changes.id };
        let set = set_document(&changes);

        // `$set` rejects an empty document; report the match without writing.
        if set.is_empty() {
            let matched_count = self.collection.count_documents(filter).await?;
            return Ok(UpdateResult {
                matched_count,
                modified_count: 0,
            });
        }

        let result = self.collection.update_one(filter, doc! { "$set": set }).await?;
        Ok(UpdateResult {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteResult, StoreError> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(DeleteResult {
            deleted_users: result.deleted_count,
        })
    }
}

/// Fields of an update that actually change something
fn set_document(changes: &UpdateUser) -> Document {
    let mut set = Document::new();
    if let Some(full_name) = &changes.full_name {
        set.insert("fullName", full_name.as_str());
    }
    if let Some(email) = &changes.email {
        set.insert("email", email.as_str());
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_document_only_contains_present_fields() {
        let changes = UpdateUser {
            id: ObjectId::new(),
            full_name: Some("updatedName".to_string()),
            email: None,
        };

        let set = set_document(&changes);

        assert_eq!(set, doc! { "fullName": "updatedName" });
    }

    #[test]
    fn set_document_is_empty_without_changes() {
        let changes = UpdateUser {
            id: ObjectId::new(),
            full_name: None,
            email: None,
        };

        assert!(set_document(&changes).is_empty());
    }
}
