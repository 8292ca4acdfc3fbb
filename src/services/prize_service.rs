use crate::entities::{prize_entity as prizes, winner_entity as winners};
use crate::error::{AppError, AppResult};
use crate::models::{CreatePrizeRequest, PrizeResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

#[derive(Clone)]
pub struct PrizeService {
    pool: DatabaseConnection,
}

impl PrizeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// List every prize, available ones first
    pub async fn list_all(&self) -> AppResult<Vec<PrizeResponse>> {
        let list = prizes::Entity::find()
            .order_by_asc(prizes::Column::Drawn)
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// List prizes still up for drawing
    pub async fn list_available(&self) -> AppResult<Vec<PrizeResponse>> {
        let list = prizes::Entity::find()
            .filter(prizes::Column::Drawn.eq(false))
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// Insert a prize. The image field, if present, is the opaque reference
    /// returned by the image store; it is stored as-is.
    pub async fn add(&self, request: CreatePrizeRequest) -> AppResult<PrizeResponse> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Prize name is required".to_string(),
            ));
        }
        let description = request
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let model = prizes::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description),
            image: Set(request.image.clone()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(model.into())
    }

    /// Delete one prize, its win records first. An unknown id is a silent
    /// no-op.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        winners::Entity::delete_many()
            .filter(winners::Column::PrizeId.eq(id))
            .exec(&txn)
            .await?;
        prizes::Entity::delete_many()
            .filter(prizes::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }

    /// Delete every prize and every win record
    pub async fn clear(&self) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        winners::Entity::delete_many().exec(&txn).await?;
        prizes::Entity::delete_many().exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}
