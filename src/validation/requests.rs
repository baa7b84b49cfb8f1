//! Request payloads as they arrive on the wire, before validation.
//!
//! Every field is optional at the serde level so that a missing field is
//! reported by the `required` rule instead of a deserialization error.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Payload naming a single user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IdRequest {
    /// User identifier (24 hex characters)
    #[validate(required(message = "id is required"))]
    #[schema(example = "61f804df5a558fd34f2543fd")]
    pub id: Option<String>,
}

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// User email address
    #[validate(
        required(message = "email is required"),
        email(message = "email must be a valid email")
    )]
    #[schema(example = "test@gmail.com")]
    pub email: Option<String>,
    /// User full name
    #[serde(rename = "fullName")]
    #[validate(
        required(message = "fullName is required"),
        length(min = 1, message = "fullName must not be empty")
    )]
    #[schema(example = "testName")]
    pub full_name: Option<String>,
}

/// User update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// User identifier (24 hex characters)
    #[validate(required(message = "id is required"))]
    #[schema(example = "61f804df5a558fd34f2543fd")]
    pub id: Option<String>,
    /// New full name
    #[serde(rename = "fullName")]
    #[validate(length(min = 1, message = "fullName must not be empty"))]
    #[schema(example = "updatedName")]
    pub full_name: Option<String>,
    /// New email address
    #[validate(email(message = "email must be a valid email"))]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    /// Whether the request changes anything besides naming the target
    pub fn has_changes(&self) -> bool {
        self.full_name.is_some() || self.email.is_some()
    }
}
