use async_graphql::ErrorExtensions;
use axum_helpers::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Product '{0}' already exists")]
    AlreadyExists(String),

    #[error("Path '{path}' does not exist in product {key}")]
    PathMismatch { key: String, path: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ProductError::NotFound(_) => ErrorCode::NotFound,
            ProductError::AlreadyExists(_) => ErrorCode::Conflict,
            ProductError::PathMismatch { .. } => ErrorCode::UnprocessableEntity,
            ProductError::Database(_) => ErrorCode::DatabaseError,
            ProductError::Serialization(_) => ErrorCode::InternalError,
        }
    }

    /// Message safe to hand to API clients.
    ///
    /// Store and codec failures only expose the code's default message; the
    /// full error is logged where it is raised.
    pub fn client_message(&self) -> String {
        match self {
            ProductError::NotFound(_)
            | ProductError::AlreadyExists(_)
            | ProductError::PathMismatch { .. } => self.to_string(),
            ProductError::Database(_) | ProductError::Serialization(_) => {
                self.code().default_message().to_string()
            }
        }
    }

    /// Whether this error originates from storage rather than the request.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ProductError::Database(_) | ProductError::Serialization(_)
        )
    }
}

/// Converts into a GraphQL error with `extensions.code` set.
impl ErrorExtensions for ProductError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.client_message())
            .extend_with(|_, extensions| extensions.set("code", code.as_str()))
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for ProductError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ProductError::Serialization(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for ProductError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        ProductError::Serialization(err.to_string())
    }
}
