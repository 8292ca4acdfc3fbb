use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Prize entity
/// Notes:
/// - image holds an opaque reference path returned by the image store
///   (e.g. /uploads/premio-<uuid>.png); the backend never reads the bytes
/// - drawn = false means still available; flips to true exactly when a win
///   record is created for it
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Reference path to an externally stored image
    pub image: Option<String>,
    /// Already raffled off
    pub drawn: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
