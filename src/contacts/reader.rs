//! Decoding of uploaded CSV bytes into the row table the importer consumes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("malformed CSV at line {line}: {message}")]
    Malformed { line: u64, message: String },
    #[error("CSV read error: {0}")]
    Read(#[source] csv::Error),
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|pos| pos.line());
        let invalid_utf8 = matches!(err.kind(), csv::ErrorKind::Utf8 { .. });
        match line {
            Some(line) if invalid_utf8 => CsvError::Malformed {
                line,
                message: "field is not valid UTF-8".to_string(),
            },
            _ => CsvError::Read(err),
        }
    }
}

/// Read every record, header included, as raw string fields.
///
/// Records may have differing lengths; short rows are the importer's concern.
pub fn read_rows(content: &[u8]) -> Result<Vec<Vec<String>>, CsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
