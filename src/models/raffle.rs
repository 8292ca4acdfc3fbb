use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::winner_entity as winners;

use super::{ParticipantResponse, PrizeResponse};

/// Draw request body
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DrawRequest {
    /// Prize to raffle off; must still be available
    pub prize_id: i64,
    /// Optional winner hint from the client-side race animation. Untrusted:
    /// matched best-effort against active participants, otherwise the draw
    /// falls back to a uniform random pick.
    pub winner_name: Option<String>,
}

/// Draw result: the selected participant and the prize they won
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResponse {
    pub winner: ParticipantResponse,
    pub prize: PrizeResponse,
}

/// Win record snapshot as listed in the history
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WinnerResponse {
    pub id: i64,
    pub participant_id: i64,
    pub prize_id: i64,
    /// Participant name at draw time
    pub participant_name: String,
    /// Prize name at draw time
    pub prize_name: String,
    pub prize_image: Option<String>,
    pub drawn_at: DateTime<Utc>,
}

impl From<winners::Model> for WinnerResponse {
    fn from(m: winners::Model) -> Self {
        WinnerResponse {
            id: m.id,
            participant_id: m.participant_id,
            prize_id: m.prize_id,
            participant_name: m.participant_name,
            prize_name: m.prize_name,
            prize_image: m.prize_image,
            drawn_at: m.drawn_at.unwrap_or_else(Utc::now),
        }
    }
}
