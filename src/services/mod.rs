//! Application services layer.
//!
//! Services sit between the HTTP handlers and the repositories. They
//! depend on abstractions (traits) so handlers can be exercised with
//! fakes or mocks.

mod user_service;

pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
