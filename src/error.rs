//! Error type for the gostsum library

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Malformed checksum line {line}: {reason}")]
    ChecksumLine { line: usize, reason: String },

    #[error(transparent)]
    Hash(#[from] streebog_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
