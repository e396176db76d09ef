use rocket_db_pools::{Database, sqlx};

/// Primary Postgres pool, configured under `databases.formdata_db`.
#[derive(Database)]
#[database("formdata_db")]
pub struct FormDataDb(sqlx::PgPool);
