use thiserror::Error;

use common::error::Error as CoreError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse snapshot: {0}")]
    Csv(#[from] csv::Error),

    #[error("snapshot cell ({row}, {col}) is not a number: {value:?}")]
    BadCell {
        row: String,
        col: String,
        value: String,
    },

    #[error("snapshot has no header row of currency codes")]
    MissingHeader,

    #[error("configuration error: {0}")]
    ConfigLoad(String),

    #[error("scan failed: {0}")]
    Scan(#[from] CoreError),
}
