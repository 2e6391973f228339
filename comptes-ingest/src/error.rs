use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("required file not found: {0}")]
    MissingFile(PathBuf),

    #[error("more than one {kind} row for statement {statement_id}")]
    DuplicateRow {
        kind: &'static str,
        statement_id: String,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
