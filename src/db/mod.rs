pub mod contracts;
pub mod owners;
pub mod payments;
pub mod properties;
pub mod tenants;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

use crate::config::AppConfig;

/// Create a SeaORM connection pool from the configured `DATABASE_URL`.
pub async fn create_pool(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(!config.is_production());

    Database::connect(options).await
}
