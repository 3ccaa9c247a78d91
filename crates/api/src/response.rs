//! Success response envelope.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Envelope wrapping every non-paginated success payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps a payload with the default message.
    pub fn success(data: T) -> Self {
        Self::with_message(data, "operation completed successfully")
    }

    /// Wraps a payload with a specific message.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
