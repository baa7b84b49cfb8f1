//! User domain entity and related types.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User document as stored in the `users` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
}

impl User {
    /// Build a new user with a freshly generated identifier
    pub fn new(email: String, full_name: String) -> Self {
        Self {
            id: ObjectId::new(),
            full_name,
            email,
        }
    }
}

impl From<CreateUser> for User {
    fn from(input: CreateUser) -> Self {
        User::new(input.email, input.full_name)
    }
}

/// Validated user creation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    /// User email address
    #[schema(example = "test@gmail.com")]
    pub email: String,
    /// User full name
    #[schema(example = "testName")]
    pub full_name: String,
}

/// Validated user update payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    /// Target user identifier
    #[schema(value_type = String, example = "61f804df5a558fd34f2543fd")]
    pub id: ObjectId,
    /// New full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// New email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "61f804df5a558fd34f2543fd")]
    pub id: String,
    /// User full name
    #[schema(example = "testName")]
    pub full_name: String,
    /// User email address
    #[schema(example = "test@gmail.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            full_name: user.full_name,
            email: user.email,
        }
    }
}

/// Outcome of an update, zero matches included
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    /// Number of users matching the identifier
    pub matched_count: u64,
    /// Number of users actually changed
    pub modified_count: u64,
}

/// Outcome of a delete, zero matches included
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    /// Number of users removed
    pub deleted_users: u64,
}
