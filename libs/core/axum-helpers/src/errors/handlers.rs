use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

/// Fallback handler for unknown routes.
pub async fn not_found() -> Response {
    let code = ErrorCode::NotFound;
    let body = Json(ErrorResponse {
        code: code.code(),
        error: code.as_str().to_string(),
        message: "The requested resource was not found".to_string(),
    });

    (StatusCode::NOT_FOUND, body).into_response()
}
