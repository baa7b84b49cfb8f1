//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion into the
//! `{ message, details? }` envelope.

mod classify;

pub use classify::{classify, Classified, StoreError};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::{INTERNAL_ERROR_MESSAGE, VALIDATION_ERROR_MESSAGE};
use crate::validation::ValidationFailure;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Payload or identifier failed a validation rule
    #[error("{0}")]
    Validation(#[from] ValidationFailure),

    /// Body could not be read as JSON
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(err) => classify(err).status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the client-facing envelope (hides internal details)
    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            AppError::Validation(failure) => ErrorEnvelope::new(VALIDATION_ERROR_MESSAGE)
                .with_details(serde_json::to_value(&failure.violations).unwrap_or(Value::Null)),
            AppError::BadRequest(msg) => ErrorEnvelope::new(msg.clone()),
            AppError::Store(err) => ErrorEnvelope::new(classify(err).message),
            AppError::Internal(_) => ErrorEnvelope::new(INTERNAL_ERROR_MESSAGE),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Store(err) => tracing::error!("Storage error: {}", err),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::Validation(_) | AppError::BadRequest(_) => {}
        }

        (self.status(), Json(self.envelope())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldViolation;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    struct EventCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCounter {
        fn on_event(&self, _event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn count_events(f: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(EventCounter(count.clone()));
        tracing::subscriber::with_default(subscriber, f);
        count.load(Ordering::SeqCst)
    }

    #[test]
    fn validation_failure_is_unprocessable_with_details() {
        let err = AppError::from(ValidationFailure::single(FieldViolation::new(
            "email",
            "required",
            "email is required",
        )));

        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let envelope = err.envelope();
        assert_eq!(envelope.message, "ValidationError");
        assert_eq!(
            envelope.details,
            Some(json!([{ "field": "email", "rule": "required", "message": "email is required" }]))
        );
    }

    #[test]
    fn duplicate_key_surfaces_stable_label() {
        let err = AppError::from(StoreError::duplicate_key("E11000 duplicate key error"));

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.envelope(), ErrorEnvelope::new("MongoServerError"));
    }

    #[test]
    fn internal_errors_hide_their_cause() {
        let err = AppError::internal("connection string leaked");

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.envelope(), ErrorEnvelope::new("Internal Server Error"));
    }

    #[test]
    fn envelope_omits_missing_details() {
        let body = serde_json::to_value(ErrorEnvelope::new("Internal Server Error")).unwrap();

        assert_eq!(body, json!({ "message": "Internal Server Error" }));
    }

    #[test]
    fn into_response_carries_classified_status() {
        let response = AppError::bad_request("Expected request with `Content-Type: application/json`")
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn envelope_does_not_log() {
        let err = AppError::from(StoreError::driver("cursor killed"));

        let events = count_events(|| {
            err.envelope();
        });

        assert_eq!(events, 0);
    }

    #[test]
    fn into_response_logs_server_faults_once() {
        let events = count_events(|| {
            let response = AppError::from(StoreError::driver("cursor killed")).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        });

        assert_eq!(events, 1);
    }
}
