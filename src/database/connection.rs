use crate::config::DatabaseConfig;
use crate::error::AppResult;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(false);

    let pool = Database::connect(options).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &DatabaseConnection) -> AppResult<()> {
    use migration::MigratorTrait;
    migration::Migrator::up(pool, None).await?;
    Ok(())
}
