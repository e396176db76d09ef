//! One-time startup tasks run from ignite fairings.

use std::io;
use std::path::Path;

use rocket_db_pools::sqlx::{self, PgPool};

use crate::config::AppConfig;
use crate::models::Role;

/// Create the admin account unless some user already holds the admin role.
///
/// Returns `true` when an account was created.
pub async fn ensure_admin(pool: &PgPool, config: &AppConfig) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let existing: Option<i32> =
        sqlx::query_scalar("SELECT id FROM users WHERE role = $1 LIMIT 1")
            .bind(Role::Admin.as_str())
            .fetch_optional(&mut *tx)
            .await?;
    if existing.is_some() {
        tx.commit().await?;
        return Ok(false);
    }

    let created: Option<i32> = sqlx::query_scalar(
        r#"INSERT INTO users (username, password, role)
           VALUES ($1, $2, $3)
           ON CONFLICT (username) DO NOTHING
           RETURNING id"#,
    )
    .bind(&config.admin_username)
    .bind(&config.admin_password)
    .bind(Role::Admin.as_str())
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;

    match created {
        Some(id) => {
            log::info!("admin user '{}' created with id {}", config.admin_username, id);
            Ok(true)
        }
        None => {
            log::warn!(
                "no admin user exists and username '{}' is held by a regular account",
                config.admin_username
            );
            Ok(false)
        }
    }
}

/// Make sure the static upload directory exists.
pub fn prepare_uploads_dir(path: &Path) -> io::Result<()> {
    std::fs::create_dir_all(path)?;
    log::info!("uploads directory initialized at: {}", path.display());
    Ok(())
}
