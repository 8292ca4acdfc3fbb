use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::prize_entity as prizes;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreatePrizeRequest {
    /// Prize name; trimmed, must be non-blank
    pub name: String,
    pub description: Option<String>,
    /// Reference path previously returned by the image upload endpoint
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Opaque image reference (served under /uploads)
    pub image: Option<String>,
    /// Already raffled off
    pub drawn: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<prizes::Model> for PrizeResponse {
    fn from(m: prizes::Model) -> Self {
        PrizeResponse {
            id: m.id,
            name: m.name,
            description: m.description,
            image: m.image,
            drawn: m.drawn,
            created_at: m.created_at,
        }
    }
}

/// Result of a successful image upload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadImageResponse {
    /// Stable reference path to attach on prize creation
    pub image: String,
}
