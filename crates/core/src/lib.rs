//! Shared primitives for all Rust crates in Supplink.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;
/// Success/error envelope returned across the client boundary.
pub mod envelope;

use thiserror::Error;

pub use auth::Principal;
pub use envelope::ResultEnvelope;

/// Result type used across Supplink crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// User is not authenticated or credentials were rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but blocked by policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the message without the category prefix, for in-UI display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::Internal(message) => message.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn user_message_strips_category() {
        let error = AppError::Unauthorized("invalid credentials".to_owned());
        assert_eq!(error.user_message(), "invalid credentials");
        assert_eq!(error.to_string(), "unauthorized: invalid credentials");
    }
}
