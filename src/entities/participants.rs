use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Raffle participant entity
/// Notes:
/// - name is unique across the table (exact match); inserts rely on the
///   unique index for conflict detection
/// - active = true means eligible to win; flips to false exactly when the
///   participant wins a prize, and back to true only on a full reset
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "participants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (unique)
    pub name: String,
    /// Eligible for the next draw
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
