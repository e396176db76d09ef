//! Transactional CSV contact import.
//!
//! The header row is resolved first; a header missing any required column is
//! rejected before a session is opened. Data rows are then processed strictly
//! in order inside a single session: rows already present (in the store or
//! earlier in the same table) are skipped, short rows are skipped, everything
//! else is inserted. Any storage failure rolls the whole session back.

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::contacts::columns::ColumnMap;
use crate::contacts::store::{ContactSession, ContactStore, StorageError};

/// Outcome of a committed import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImportSummary {
    /// Rows written as new contacts.
    pub inserted: usize,
    /// Rows whose email already existed.
    pub duplicates: usize,
    /// Rows too short to hold the required columns.
    pub malformed: usize,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<&'static str> },
    #[error("contact import aborted: {0}")]
    Storage(#[from] StorageError),
}

pub struct ContactImporter<'s, S> {
    store: &'s S,
    storage_timeout: Option<Duration>,
}

impl<'s, S: ContactStore> ContactImporter<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            storage_timeout: None,
        }
    }

    /// Bound every lookup and insert; an expired call fails the import.
    /// The final commit is never bounded.
    pub fn with_storage_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.storage_timeout = timeout;
        self
    }

    /// Import a decoded table whose first row is the header.
    pub async fn import<R: AsRef<[String]>>(
        &self,
        rows: &[R],
    ) -> Result<ImportSummary, ImportError> {
        let header: &[String] = rows.first().map(|row| row.as_ref()).unwrap_or(&[]);
        let columns = ColumnMap::resolve(header).map_err(|missing| {
            log::warn!("contact import rejected, missing columns: {}", missing.join(", "));
            ImportError::Schema { missing }
        })?;

        let data_rows = rows.get(1..).unwrap_or(&[]);
        let mut session = self.bounded(self.store.begin()).await?;

        match self.process_rows(&mut session, &columns, data_rows).await {
            Ok(summary) => {
                // Unbounded: an expired commit could still have been applied.
                session.commit().await?;
                log::info!(
                    "contact import committed: {} inserted, {} duplicates, {} malformed",
                    summary.inserted,
                    summary.duplicates,
                    summary.malformed
                );
                Ok(summary)
            }
            Err(err) => {
                log::error!("contact import failed, rolling back: {}", err);
                if let Err(rollback_err) = self.bounded(session.rollback()).await {
                    log::warn!("contact import rollback failed: {}", rollback_err);
                }
                Err(err.into())
            }
        }
    }

    async fn process_rows<R: AsRef<[String]>>(
        &self,
        session: &mut S::Session,
        columns: &ColumnMap,
        rows: &[R],
    ) -> Result<ImportSummary, StorageError> {
        let mut summary = ImportSummary::default();
        let mut inserted_emails: HashSet<&str> = HashSet::new();

        for (offset, row) in rows.iter().enumerate() {
            let line = offset + 2;
            let Some(contact) = columns.extract(row.as_ref()) else {
                log::debug!("skipping short row at line {}", line);
                summary.malformed += 1;
                continue;
            };

            if inserted_emails.contains(contact.email)
                || self.bounded(session.contact_exists(contact.email)).await?
            {
                log::debug!(
                    "email {} already exists, skipping row at line {}",
                    contact.email,
                    line
                );
                summary.duplicates += 1;
                continue;
            }

            self.bounded(session.insert_contact(&contact)).await?;
            inserted_emails.insert(contact.email);
            summary.inserted += 1;
        }

        Ok(summary)
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, StorageError>>,
    ) -> Result<T, StorageError> {
        match self.storage_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| StorageError::Timeout(limit))?,
            None => call.await,
        }
    }
}
