//! Report error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing an artifact failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A grouping asked for a column the table does not have.
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// The display timezone is not an IANA zone name.
    #[error("invalid timezone '{0}'")]
    InvalidTimezone(String),
}
