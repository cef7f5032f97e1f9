use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Wire shape `{success, data?, error?}` used by the client surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEnvelope<T> {
    /// Whether the call succeeded.
    pub success: bool,
    /// Payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// User-facing error message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ResultEnvelope<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Wraps a failure message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Converts the envelope back into a result.
    pub fn into_result(self) -> AppResult<Option<T>> {
        if self.success {
            return Ok(self.data);
        }

        Err(AppError::Internal(
            self.error
                .unwrap_or_else(|| "request failed without an error message".to_owned()),
        ))
    }
}

impl<T> From<AppResult<T>> for ResultEnvelope<T> {
    fn from(value: AppResult<T>) -> Self {
        match value {
            Ok(data) => Self::ok(data),
            Err(error) => Self::failure(error.user_message()),
        }
    }
}
