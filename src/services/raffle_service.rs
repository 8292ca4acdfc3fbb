use crate::entities::{
    participant_entity as participants, prize_entity as prizes, winner_entity as winners,
};
use crate::error::{AppError, AppResult};
use crate::models::{DrawRequest, DrawResponse, WinnerResponse};
use chrono::Utc;
use rand::Rng;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct RaffleService {
    pool: DatabaseConnection,
}

impl RaffleService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Draw a winner for one prize.
    ///
    /// Steps, all inside one transaction:
    /// 1. Load the prize, requiring drawn = false.
    /// 2. Resolve the winner: exact name match on the client hint among active
    ///    participants, then LIKE fallback, then a uniform random pick over
    ///    the active pool as it stands right now.
    /// 3. Flip prize.drawn and participant.active through guarded updates
    ///    (`... WHERE drawn = false` / `... WHERE active = true`, exactly one
    ///    row each) and insert the snapshot win record.
    ///
    /// The guarded updates re-verify both gates at write time, so a concurrent
    /// draw on the same prize or participant makes this one fail and roll
    /// back instead of double-awarding. A prize that was already drawn always
    /// fails fast with no state change.
    pub async fn draw(&self, request: &DrawRequest) -> AppResult<DrawResponse> {
        let txn = self.pool.begin().await?;

        let prize = prizes::Entity::find_by_id(request.prize_id)
            .filter(prizes::Column::Drawn.eq(false))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::InvalidPrize("Prize does not exist or was already drawn".to_string())
            })?;

        let selected = self
            .select_winner(&txn, request.winner_name.as_deref())
            .await?;

        let update = prizes::Entity::update_many()
            .col_expr(prizes::Column::Drawn, Expr::value(true))
            .filter(prizes::Column::Id.eq(prize.id))
            .filter(prizes::Column::Drawn.eq(false))
            .exec(&txn)
            .await?;
        if update.rows_affected != 1 {
            return Err(AppError::InvalidPrize(
                "Prize was already drawn".to_string(),
            ));
        }

        let update = participants::Entity::update_many()
            .col_expr(participants::Column::Active, Expr::value(false))
            .filter(participants::Column::Id.eq(selected.id))
            .filter(participants::Column::Active.eq(true))
            .exec(&txn)
            .await?;
        if update.rows_affected != 1 {
            return Err(AppError::Conflict(
                "Selected participant is no longer eligible".to_string(),
            ));
        }

        winners::ActiveModel {
            participant_id: Set(selected.id),
            prize_id: Set(prize.id),
            participant_name: Set(selected.name.clone()),
            prize_name: Set(prize.name.clone()),
            prize_image: Set(prize.image.clone()),
            drawn_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        // answer from the rows the transaction actually wrote
        let winner = participants::Entity::find_by_id(selected.id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Winner disappeared during draw".to_string())
            })?;
        let prize = prizes::Entity::find_by_id(prize.id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::InternalError("Prize disappeared during draw".to_string()))?;

        txn.commit().await?;

        log::info!("Prize '{}' drawn, winner: '{}'", prize.name, winner.name);

        Ok(DrawResponse {
            winner: winner.into(),
            prize: prize.into(),
        })
    }

    /// Winner history, most recent first
    pub async fn list_winners(&self) -> AppResult<Vec<WinnerResponse>> {
        let list = winners::Entity::find()
            .order_by_desc(winners::Column::DrawnAt)
            .order_by_desc(winners::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// Restore every participant to active, every prize to available, and
    /// drop all win records, as one unit of work. Safe to call repeatedly.
    pub async fn reset(&self) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        participants::Entity::update_many()
            .col_expr(participants::Column::Active, Expr::value(true))
            .exec(&txn)
            .await?;
        prizes::Entity::update_many()
            .col_expr(prizes::Column::Drawn, Expr::value(false))
            .exec(&txn)
            .await?;
        winners::Entity::delete_many().exec(&txn).await?;

        txn.commit().await?;

        log::info!("Raffle reset: all participants active, all prizes available");
        Ok(())
    }

    /// Resolve the winning participant inside the draw transaction.
    ///
    /// The hint is untrusted client input (it comes from a cosmetic animation)
    /// and only ever narrows the choice within the active pool: exact match
    /// first, then `name LIKE %hint%` taking the first row in natural order.
    /// No match, or no hint, means a uniform random pick; an empty pool is a
    /// hard failure.
    async fn select_winner(
        &self,
        txn: &DatabaseTransaction,
        hint: Option<&str>,
    ) -> AppResult<participants::Model> {
        if let Some(hint) = hint {
            let hint = hint.trim();
            if !hint.is_empty() {
                if let Some(found) = participants::Entity::find()
                    .filter(participants::Column::Name.eq(hint))
                    .filter(participants::Column::Active.eq(true))
                    .one(txn)
                    .await?
                {
                    return Ok(found);
                }
                if let Some(found) = participants::Entity::find()
                    .filter(participants::Column::Name.contains(hint))
                    .filter(participants::Column::Active.eq(true))
                    .order_by_asc(participants::Column::Id)
                    .one(txn)
                    .await?
                {
                    return Ok(found);
                }
            }
        }

        let mut eligible = participants::Entity::find()
            .filter(participants::Column::Active.eq(true))
            .order_by_asc(participants::Column::Id)
            .all(txn)
            .await?;
        if eligible.is_empty() {
            return Err(AppError::NoEligibleParticipants);
        }

        // uniform over the current pool, not a precomputed shuffle
        let index = {
            let mut rng = rand::thread_rng();
            rng.gen_range(0..eligible.len())
        };
        Ok(eligible.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BulkAddParticipantsRequest, CreatePrizeRequest};
    use crate::services::{ParticipantService, PrizeService};
    use migration::MigratorTrait;
    use sea_orm::{ConnectOptions, Database, PaginatorTrait};
    use std::collections::HashMap;

    async fn test_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
        // a single connection keeps every query on the same in-memory database
        options.max_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.expect("connect test db");
        migration::Migrator::up(&db, None).await.expect("run migrations");
        // the migration seeds demo rows; raffle tests start from an empty store
        ParticipantService::new(db.clone()).clear().await.unwrap();
        PrizeService::new(db.clone()).clear().await.unwrap();
        db
    }

    async fn add_participants(db: &DatabaseConnection, names: &[&str]) {
        let inserted = ParticipantService::new(db.clone())
            .add_bulk(BulkAddParticipantsRequest {
                names: names.iter().map(|n| n.to_string()).collect(),
            })
            .await
            .unwrap();
        assert_eq!(inserted, names.len() as u64);
    }

    async fn add_prize(db: &DatabaseConnection, name: &str) -> i64 {
        PrizeService::new(db.clone())
            .add(CreatePrizeRequest {
                name: name.to_string(),
                description: None,
                image: None,
            })
            .await
            .unwrap()
            .id
    }

    fn draw_request(prize_id: i64, hint: Option<&str>) -> DrawRequest {
        DrawRequest {
            prize_id,
            winner_name: hint.map(str::to_string),
        }
    }

    async fn active_count(db: &DatabaseConnection) -> u64 {
        participants::Entity::find()
            .filter(participants::Column::Active.eq(true))
            .count(db)
            .await
            .unwrap()
    }

    async fn available_count(db: &DatabaseConnection) -> u64 {
        prizes::Entity::find()
            .filter(prizes::Column::Drawn.eq(false))
            .count(db)
            .await
            .unwrap()
    }

    async fn winner_count(db: &DatabaseConnection) -> u64 {
        winners::Entity::find().count(db).await.unwrap()
    }

    #[tokio::test]
    async fn test_draw_with_exact_hint() {
        let db = test_db().await;
        let service = RaffleService::new(db.clone());

        add_participants(&db, &["Ana", "Luis"]).await;
        let tv = add_prize(&db, "TV").await;

        let result = service.draw(&draw_request(tv, Some("Ana"))).await.unwrap();
        assert_eq!(result.winner.name, "Ana");
        assert!(!result.winner.active);
        assert_eq!(result.prize.id, tv);
        assert!(result.prize.drawn);

        let ana = participants::Entity::find()
            .filter(participants::Column::Name.eq("Ana"))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert!(!ana.active);

        let records = service.list_winners().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].participant_name, "Ana");
        assert_eq!(records[0].prize_name, "TV");
        assert_eq!(records[0].participant_id, ana.id);
        assert_eq!(records[0].prize_id, tv);
    }

    #[tokio::test]
    async fn test_second_draw_on_same_prize_fails_without_side_effects() {
        let db = test_db().await;
        let service = RaffleService::new(db.clone());

        add_participants(&db, &["Ana", "Luis"]).await;
        let tv = add_prize(&db, "TV").await;

        service.draw(&draw_request(tv, Some("Ana"))).await.unwrap();

        let before = (
            active_count(&db).await,
            available_count(&db).await,
            winner_count(&db).await,
        );

        let err = service
            .draw(&draw_request(tv, Some("Luis")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidPrize(_)));

        let after = (
            active_count(&db).await,
            available_count(&db).await,
            winner_count(&db).await,
        );
        assert_eq!(before, after);
        assert_eq!(after, (1, 0, 1));
    }

    #[tokio::test]
    async fn test_unknown_prize_fails() {
        let db = test_db().await;
        let service = RaffleService::new(db.clone());

        add_participants(&db, &["Ana"]).await;

        let err = service.draw(&draw_request(424242, None)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidPrize(_)));
        assert_eq!(active_count(&db).await, 1);
        assert_eq!(winner_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_empty_pool_fails_without_side_effects() {
        let db = test_db().await;
        let service = RaffleService::new(db.clone());

        let tv = add_prize(&db, "TV").await;

        let err = service.draw(&draw_request(tv, None)).await.unwrap_err();
        assert!(matches!(err, AppError::NoEligibleParticipants));

        // the prize must still be available
        assert_eq!(available_count(&db).await, 1);
        assert_eq!(winner_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_unmatched_hint_falls_back_to_random() {
        let db = test_db().await;
        let service = RaffleService::new(db.clone());

        add_participants(&db, &["Ana", "Luis"]).await;
        let tv = add_prize(&db, "TV").await;

        let result = service
            .draw(&draw_request(tv, Some("Carlos")))
            .await
            .unwrap();
        assert!(result.winner.name == "Ana" || result.winner.name == "Luis");
    }

    #[tokio::test]
    async fn test_substring_hint_takes_first_match_in_natural_order() {
        let db = test_db().await;
        let service = RaffleService::new(db.clone());

        add_participants(&db, &["Juan Carlos Pérez", "Carlos Andrés López"]).await;
        let tv = add_prize(&db, "TV").await;

        let result = service
            .draw(&draw_request(tv, Some("Carlos")))
            .await
            .unwrap();
        assert_eq!(result.winner.name, "Juan Carlos Pérez");
    }

    #[tokio::test]
    async fn test_hint_cannot_select_retired_participant() {
        let db = test_db().await;
        let service = RaffleService::new(db.clone());

        add_participants(&db, &["Ana", "Luis"]).await;
        let tv = add_prize(&db, "TV").await;
        let radio = add_prize(&db, "Radio").await;

        service.draw(&draw_request(tv, Some("Ana"))).await.unwrap();

        // Ana already won; the hint must not bring her back
        let result = service
            .draw(&draw_request(radio, Some("Ana")))
            .await
            .unwrap();
        assert_eq!(result.winner.name, "Luis");
    }

    #[tokio::test]
    async fn test_each_draw_reduces_counts_by_one() {
        let db = test_db().await;
        let service = RaffleService::new(db.clone());

        add_participants(&db, &["Ana", "Luis", "Marta"]).await;
        let tv = add_prize(&db, "TV").await;
        let radio = add_prize(&db, "Radio").await;

        assert_eq!(active_count(&db).await, 3);
        assert_eq!(available_count(&db).await, 2);

        service.draw(&draw_request(tv, None)).await.unwrap();
        assert_eq!(active_count(&db).await, 2);
        assert_eq!(available_count(&db).await, 1);
        assert_eq!(winner_count(&db).await, 1);

        service.draw(&draw_request(radio, None)).await.unwrap();
        assert_eq!(active_count(&db).await, 1);
        assert_eq!(available_count(&db).await, 0);
        assert_eq!(winner_count(&db).await, 2);
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let db = test_db().await;
        let service = RaffleService::new(db.clone());

        add_participants(&db, &["Ana", "Luis"]).await;
        let tv = add_prize(&db, "TV").await;
        service.draw(&draw_request(tv, None)).await.unwrap();

        service.reset().await.unwrap();
        let first = (
            active_count(&db).await,
            available_count(&db).await,
            winner_count(&db).await,
        );
        assert_eq!(first, (2, 1, 0));

        service.reset().await.unwrap();
        let second = (
            active_count(&db).await,
            available_count(&db).await,
            winner_count(&db).await,
        );
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_winner_history_is_most_recent_first() {
        let db = test_db().await;
        let service = RaffleService::new(db.clone());

        add_participants(&db, &["Ana", "Luis"]).await;
        let tv = add_prize(&db, "TV").await;
        let radio = add_prize(&db, "Radio").await;

        service.draw(&draw_request(tv, Some("Ana"))).await.unwrap();
        service
            .draw(&draw_request(radio, Some("Luis")))
            .await
            .unwrap();

        let records = service.list_winners().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].prize_name, "Radio");
        assert_eq!(records[1].prize_name, "TV");
    }

    /// The random fallback must stay uniform over the current pool. 200
    /// reset-and-draw rounds between two names make a lopsided pick (or a
    /// bias toward insertion order) fail with overwhelming probability.
    #[tokio::test]
    async fn test_random_fallback_is_roughly_uniform() {
        let db = test_db().await;
        let service = RaffleService::new(db.clone());

        add_participants(&db, &["Ana", "Luis"]).await;
        let tv = add_prize(&db, "TV").await;

        let mut wins: HashMap<String, u32> = HashMap::new();
        for _ in 0..200 {
            let result = service.draw(&draw_request(tv, None)).await.unwrap();
            *wins.entry(result.winner.name).or_insert(0) += 1;
            service.reset().await.unwrap();
        }

        let ana = wins.get("Ana").copied().unwrap_or(0);
        let luis = wins.get("Luis").copied().unwrap_or(0);
        assert_eq!(ana + luis, 200);
        assert!(ana >= 60, "Ana won only {ana} of 200 draws");
        assert!(luis >= 60, "Luis won only {luis} of 200 draws");
    }
}
