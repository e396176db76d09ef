//! Schema migrations.
//!
//! The API refuses to start until the database is on the latest schema.

use rocket_db_pools::sqlx::{self, PgPool, migrate::Migrator};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply pending migrations. Already-applied migrations are skipped after
/// their checksums are verified.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    log::info!("checking database migration state");
    MIGRATOR.run(pool).await?;
    log::info!("database migrations up to date");
    Ok(())
}
