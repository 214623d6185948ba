// src/uploads/reader.rs

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;

use crate::errors::ServerError;
use crate::features::TabularRow;

/// Parse a headered CSV upload into one map per data row.
///
/// A UTF-8 byte order mark on the first header is dropped. Rows shorter than
/// the header simply lack the trailing columns, which `derive_many` then
/// reports by name.
pub fn read_rows(bytes: &[u8]) -> Result<Vec<TabularRow>, ServerError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers: StringRecord = reader
        .headers()
        .map_err(|e| ServerError::BadRequest(format!("Unreadable CSV header: {e}")))?
        .clone();
    if headers.iter().all(str::is_empty) {
        return Err(ServerError::BadRequest("CSV upload has no header row".into()));
    }

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| ServerError::BadRequest(format!("Malformed CSV at row {}: {e}", i + 1)))?;
        let row: TabularRow = headers
            .iter()
            .zip(record.iter())
            .map(|(column, cell)| (column.to_string(), cell.to_string()))
            .collect();
        rows.push(row);
    }

    debug!("Read {} CSV rows with {} columns", rows.len(), headers.len());
    Ok(rows)
}
