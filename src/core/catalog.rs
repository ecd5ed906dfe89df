// ARChide - core/catalog.rs
//
// Catalog reader: comma-delimited, header row first, must carry the
// `System`, `Filename` and `Hidden` columns (other columns are ignored).
//
// The whole catalog is buffered once and both passes iterate the buffer.
// A row missing a required field fails the load, so the validation pass
// and the action pass see exactly the same rows.

use crate::core::model::CatalogEntry;
use crate::util::constants;
use crate::util::error::CatalogError;
use std::io::Read;
use std::path::Path;

/// Read every catalog row from `reader`. `path` is only used for error context.
pub fn read_catalog<R: Read>(reader: R, path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| CatalogError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?
        .clone();

    for column in constants::REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(CatalogError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let mut entries = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| match e.position().map(|p| p.line()) {
            Some(line) => CatalogError::MalformedRow {
                path: path.to_path_buf(),
                line,
                reason: e.to_string(),
            },
            None => CatalogError::Csv {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let mut entry: CatalogEntry =
            record
                .deserialize(Some(&headers))
                .map_err(|e| CatalogError::MalformedRow {
                    path: path.to_path_buf(),
                    line,
                    reason: e.to_string(),
                })?;
        entry.line = line;
        entries.push(entry);
    }

    tracing::debug!(
        path = %path.display(),
        rows = entries.len(),
        "Catalog loaded"
    );

    Ok(entries)
}
