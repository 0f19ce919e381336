use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsolidateError {
    #[error("unrecognized {column} code {value} in {table}")]
    UnrecognizedCode {
        table: String,
        column: String,
        value: i64,
    },

    #[error("{table} is missing required column {column}")]
    MissingColumn { table: String, column: String },

    #[error("{table} row {row} has no person id")]
    MissingId { table: String, row: usize },

    #[error("{table} has no rows")]
    EmptyTable { table: String },

    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("table store is closed")]
    StoreClosed,

    #[error("{count} attribute build(s) failed: {details}")]
    AttributeFailures { count: usize, details: String },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("dataframe error: {0}")]
    Frame(#[from] polars::prelude::PolarsError),
}

impl ConsolidateError {
    pub fn unrecognized_code(
        table: impl Into<String>,
        column: impl Into<String>,
        value: i64,
    ) -> Self {
        Self::UnrecognizedCode {
            table: table.into(),
            column: column.into(),
            value,
        }
    }

    pub fn missing_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ConsolidateError>;
