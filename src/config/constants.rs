//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Mount point of the user resource
pub const USERS_BASE_PATH: &str = "/v1/users";

// =============================================================================
// Database
// =============================================================================

/// Default MongoDB connection string (for development)
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";

/// Default MongoDB database name
pub const DEFAULT_MONGODB_DATABASE: &str = "user_api";

/// Collection holding user documents
pub const USERS_COLLECTION: &str = "users";

/// Name of the unique index on `users.email`
pub const EMAIL_UNIQUE_INDEX: &str = "email_unique";

/// Server error code reported by MongoDB for unique index violations
pub const DUPLICATE_KEY_ERROR_CODE: i32 = 11000;

// =============================================================================
// Error Responses
// =============================================================================

/// Stable message returned for duplicate key conflicts.
///
/// Existing clients match on this literal.
pub const DUPLICATE_KEY_MESSAGE: &str = "MongoServerError";

/// Generic message for unclassified failures
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Message carried by validation failure envelopes
pub const VALIDATION_ERROR_MESSAGE: &str = "ValidationError";

// =============================================================================
// Validation
// =============================================================================

/// Pseudo-field used for violations that concern the whole payload
pub const BODY_FIELD: &str = "body";
