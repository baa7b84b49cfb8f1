//! Raw JSON body extractor with envelope-shaped rejections.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;

use crate::errors::AppError;

/// JSON request body, left unvalidated.
///
/// Validation belongs to the injected [`UserValidation`] collaborator, so this
/// extractor only guarantees the body parsed as JSON. Any rejection becomes a
/// `400` with the standard `{ message }` envelope.
///
/// [`UserValidation`]: crate::validation::UserValidation
///
/// # Example
///
/// ```rust,ignore
/// use user_api::api::extractors::JsonPayload;
///
/// async fn create_user(JsonPayload(body): JsonPayload) {
///     // body is a serde_json::Value, not yet validated
/// }
/// ```
pub struct JsonPayload(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        Ok(JsonPayload(value))
    }
}
