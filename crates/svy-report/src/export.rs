//! CSV output of a [`Table`].

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ReportError;
use crate::table::Table;

/// Write the header and every row, verbatim, to `writer`.
///
/// # Errors
///
/// Returns [`ReportError::Csv`] if serialization or the underlying write fails.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<(), ReportError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(&table.columns)?;
    for row in &table.rows {
        out.write_record(row)?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render the table as CSV bytes.
///
/// # Errors
///
/// Returns [`ReportError::Csv`] if serialization fails.
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>, ReportError> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    Ok(buffer)
}

/// Write the table to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the file cannot be created and
/// [`ReportError::Csv`] if writing fails.
pub fn export_csv(table: &Table, path: &Path) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(table, file)?;
    tracing::debug!(path = %path.display(), rows = table.len(), "csv written");
    Ok(())
}
