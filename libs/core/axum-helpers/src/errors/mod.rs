pub mod codes;
pub mod handlers;

pub use codes::ErrorCode;

use serde::Serialize;

/// Standard JSON error body for non-GraphQL routes.
///
/// ```json
/// { "code": 1004, "error": "NOT_FOUND", "message": "The requested resource was not found" }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
}
