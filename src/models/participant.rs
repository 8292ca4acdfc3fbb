use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::participant_entity as participants;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateParticipantRequest {
    /// Display name; trimmed before insert, must be non-blank and unique
    pub name: String,
}

/// Bulk insert payload; blank entries are skipped, duplicates conflict-skip
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BulkAddParticipantsRequest {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BulkAddParticipantsResponse {
    /// Names actually inserted (new ones only)
    pub inserted: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParticipantResponse {
    pub id: i64,
    pub name: String,
    /// Eligible for the next draw
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<participants::Model> for ParticipantResponse {
    fn from(m: participants::Model) -> Self {
        ParticipantResponse {
            id: m.id,
            name: m.name,
            active: m.active,
            created_at: m.created_at,
        }
    }
}
