//! Success response envelope.

use serde::{Deserialize, Serialize};

/// Standard success wrapper: `{ "data": ... }`.
///
/// `data` is serialized even when it is `null` (missing user) or a zero
/// count, so clients always find the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
