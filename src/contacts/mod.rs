//! Contact records and the CSV import pipeline that fills them.
//!
//! 1. **Decoding** (`reader`) - raw upload bytes into string rows
//! 2. **Schema discovery** (`columns`) - header names resolved to positions
//! 3. **Import** (`importer`) - ordered, deduplicating, all-or-nothing insert
//! 4. **Storage** (`store`) - the transactional session the importer writes through

pub mod columns;
pub mod importer;
pub mod reader;
pub mod store;

pub use columns::{ColumnMap, ContactColumn, ContactFields};
pub use importer::{ContactImporter, ImportError, ImportSummary};
pub use reader::{CsvError, read_rows};
pub use store::{ContactSession, ContactStore, PgContactStore, StorageError};
