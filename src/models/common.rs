use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body carried inside the `{"success": false, "error": ...}` envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Stable machine-readable code (e.g. INVALID_PRIZE)
    pub code: String,
    pub message: String,
}

/// Plain acknowledgement for deletes and resets
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
