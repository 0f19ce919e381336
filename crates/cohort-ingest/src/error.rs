use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("{path} has no header row")]
    MissingHeader { path: PathBuf },

    #[error("{path} has no data rows")]
    Empty { path: PathBuf },

    #[error("{path}: column {column}, row {row}: invalid numeric value {value:?}")]
    InvalidNumeric {
        path: PathBuf,
        column: String,
        row: usize,
        value: String,
    },

    #[error("missing expected source file {name} under {dir}")]
    MissingSource { name: String, dir: PathBuf },

    #[error("dataframe error: {0}")]
    Frame(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
