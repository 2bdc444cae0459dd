//! Error types for Spendwise

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    MissingInput(String),

    #[error("Transactions data is empty")]
    EmptyDataset,

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error was caused by the caller's input rather than the
    /// environment. Front doors report these back verbatim.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::MissingInput(_) | Error::EmptyDataset | Error::InvalidData(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
