//! Storage seam for the contact importer.
//!
//! The importer only ever talks to a [`ContactSession`], an open unit of work
//! that must end in exactly one `commit` or `rollback`. [`PgContactStore`]
//! backs it with a Postgres transaction; tests substitute in-memory stores.

use std::time::Duration;

use rocket_db_pools::sqlx::{self, PgPool, Postgres, Transaction};
use thiserror::Error;

use crate::contacts::columns::ContactFields;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("storage call timed out after {0:?}")]
    Timeout(Duration),
}

/// Factory for import sessions.
#[rocket::async_trait]
pub trait ContactStore: Send + Sync {
    type Session: ContactSession;

    async fn begin(&self) -> Result<Self::Session, StorageError>;
}

/// One transactional unit of work.
#[rocket::async_trait]
pub trait ContactSession: Send + Sized {
    /// Whether a contact with exactly this email is visible to the session.
    async fn contact_exists(&mut self, email: &str) -> Result<bool, StorageError>;

    async fn insert_contact(&mut self, contact: &ContactFields<'_>) -> Result<(), StorageError>;

    async fn commit(self) -> Result<(), StorageError>;

    async fn rollback(self) -> Result<(), StorageError>;
}

/// Postgres-backed store; every session is a fresh pool transaction.
#[derive(Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub struct PgContactSession {
    tx: Transaction<'static, Postgres>,
}

#[rocket::async_trait]
impl ContactStore for PgContactStore {
    type Session = PgContactSession;

    async fn begin(&self) -> Result<Self::Session, StorageError> {
        let tx = self.pool.begin().await?;
        Ok(PgContactSession { tx })
    }
}

#[rocket::async_trait]
impl ContactSession for PgContactSession {
    async fn contact_exists(&mut self, email: &str) -> Result<bool, StorageError> {
        let existing: Option<String> =
            sqlx::query_scalar("SELECT email FROM contacts WHERE email = $1")
                .bind(email)
                .fetch_optional(&mut *self.tx)
                .await?;
        Ok(existing.is_some())
    }

    async fn insert_contact(&mut self, contact: &ContactFields<'_>) -> Result<(), StorageError> {
        sqlx::query(
            r#"INSERT INTO contacts (email, full_name, timestamp, twitter_profile, linkedin_profile)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(contact.email)
        .bind(contact.full_name)
        .bind(contact.timestamp)
        .bind(contact.twitter_profile)
        .bind(contact.linkedin_profile)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn commit(self) -> Result<(), StorageError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StorageError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
