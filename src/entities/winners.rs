use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Win record entity
/// Notes:
/// - created only by the draw operation, never mutated afterwards
/// - participant_name / prize_name / prize_image are denormalized snapshots
///   taken at draw time so the history reads the same even after edits
/// - rows are removed only by the cascading deletes of their participant or
///   prize, or by a full raffle reset
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "winners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Winning participant (points at participants.id)
    pub participant_id: i64,
    /// Drawn prize (points at prizes.id)
    pub prize_id: i64,
    /// Participant name at draw time
    pub participant_name: String,
    /// Prize name at draw time
    pub prize_name: String,
    /// Prize image reference at draw time
    pub prize_image: Option<String>,
    pub drawn_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
