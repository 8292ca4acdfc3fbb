use crate::entities::{participant_entity as participants, winner_entity as winners};
use crate::error::{AppError, AppResult};
use crate::models::{BulkAddParticipantsRequest, CreateParticipantRequest, ParticipantResponse};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

#[derive(Clone)]
pub struct ParticipantService {
    pool: DatabaseConnection,
}

impl ParticipantService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// List participants still eligible to win, ordered by name
    pub async fn list_active(&self) -> AppResult<Vec<ParticipantResponse>> {
        let list = participants::Entity::find()
            .filter(participants::Column::Active.eq(true))
            .order_by_asc(participants::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// Insert a single participant. The name is trimmed and must be non-blank;
    /// the unique index decides duplicates, not a pre-read.
    pub async fn add(&self, request: CreateParticipantRequest) -> AppResult<ParticipantResponse> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError("Name is required".to_string()));
        }

        let insert = participants::Entity::insert(participants::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(participants::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec(&self.pool)
        .await;

        let inserted_id = match insert {
            Ok(result) => result.last_insert_id,
            Err(DbErr::RecordNotInserted) => {
                return Err(AppError::Conflict(format!(
                    "Participant '{name}' already exists"
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let model = participants::Entity::find_by_id(inserted_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Participant disappeared after insert".to_string())
            })?;
        Ok(model.into())
    }

    /// Bulk insert. Blank entries are dropped, names already present (or
    /// repeated within the batch) conflict-skip, and the whole batch applies
    /// in one transaction. Returns how many rows were actually inserted, so
    /// re-submitting the same list yields 0.
    pub async fn add_bulk(&self, request: BulkAddParticipantsRequest) -> AppResult<u64> {
        let txn = self.pool.begin().await?;

        let mut inserted = 0u64;
        for raw in &request.names {
            let name = raw.trim();
            if name.is_empty() {
                continue;
            }
            let insert = participants::Entity::insert(participants::ActiveModel {
                name: Set(name.to_string()),
                ..Default::default()
            })
            .on_conflict(
                OnConflict::column(participants::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&txn)
            .await;

            match insert {
                Ok(_) => inserted += 1,
                Err(DbErr::RecordNotInserted) => {}
                Err(e) => return Err(e.into()),
            }
        }

        txn.commit().await?;
        Ok(inserted)
    }

    /// Delete one participant, win records first so no dangling reference
    /// survives. An unknown id is a silent no-op.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        winners::Entity::delete_many()
            .filter(winners::Column::ParticipantId.eq(id))
            .exec(&txn)
            .await?;
        participants::Entity::delete_many()
            .filter(participants::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }

    /// Delete every participant and every win record, same ordering as the
    /// single delete.
    pub async fn clear(&self) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        winners::Entity::delete_many().exec(&txn).await?;
        participants::Entity::delete_many().exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::MigratorTrait;
    use sea_orm::{
        ActiveModelTrait, ConnectOptions, Database, IntoActiveModel, PaginatorTrait,
    };

    async fn test_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
        // a single connection keeps every query on the same in-memory database
        options.max_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.expect("connect test db");
        migration::Migrator::up(&db, None).await.expect("run migrations");
        // the migration seeds demo rows; these tests start from an empty pool
        ParticipantService::new(db.clone()).clear().await.unwrap();
        db
    }

    fn create(name: &str) -> CreateParticipantRequest {
        CreateParticipantRequest {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_trims_name() {
        let db = test_db().await;
        let service = ParticipantService::new(db.clone());

        let added = service.add(create("  Ana  ")).await.unwrap();
        assert_eq!(added.name, "Ana");
        assert!(added.active);
    }

    #[tokio::test]
    async fn test_add_rejects_blank_name() {
        let db = test_db().await;
        let service = ParticipantService::new(db.clone());

        let err = service.add(create("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_duplicate_add_conflicts() {
        let db = test_db().await;
        let service = ParticipantService::new(db.clone());

        service.add(create("Ana")).await.unwrap();
        let err = service.add(create("Ana")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let total = participants::Entity::find().count(&db).await.unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_bulk_add_skips_blanks_and_duplicates() {
        let db = test_db().await;
        let service = ParticipantService::new(db.clone());

        service.add(create("Ana")).await.unwrap();

        let names = vec![
            "Ana".to_string(),
            "  Luis ".to_string(),
            "   ".to_string(),
            "Luis".to_string(),
        ];
        let inserted = service
            .add_bulk(BulkAddParticipantsRequest {
                names: names.clone(),
            })
            .await
            .unwrap();
        assert_eq!(inserted, 1);

        // the same list a second time inserts nothing
        let inserted = service
            .add_bulk(BulkAddParticipantsRequest { names })
            .await
            .unwrap();
        assert_eq!(inserted, 0);

        let total = participants::Entity::find().count(&db).await.unwrap();
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let db = test_db().await;
        let service = ParticipantService::new(db.clone());

        service.delete(424242).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_cascades_win_records() {
        let db = test_db().await;
        let service = ParticipantService::new(db.clone());

        let ana = service.add(create("Ana")).await.unwrap();
        winners::ActiveModel {
            participant_id: Set(ana.id),
            prize_id: Set(1),
            participant_name: Set("Ana".to_string()),
            prize_name: Set("TV".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        service.delete(ana.id).await.unwrap();

        assert_eq!(winners::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(participants::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_removes_participants_and_win_records() {
        let db = test_db().await;
        let service = ParticipantService::new(db.clone());

        let ana = service.add(create("Ana")).await.unwrap();
        service.add(create("Luis")).await.unwrap();
        winners::ActiveModel {
            participant_id: Set(ana.id),
            prize_id: Set(1),
            participant_name: Set("Ana".to_string()),
            prize_name: Set("TV".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        service.clear().await.unwrap();

        assert_eq!(participants::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(winners::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_active_excludes_retired() {
        let db = test_db().await;
        let service = ParticipantService::new(db.clone());

        let ana = service.add(create("Ana")).await.unwrap();
        service.add(create("Luis")).await.unwrap();

        let mut model = participants::Entity::find_by_id(ana.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap()
            .into_active_model();
        model.active = Set(false);
        model.update(&db).await.unwrap();

        let active = service.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Luis");
    }
}
