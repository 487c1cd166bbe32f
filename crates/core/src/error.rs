//! Error type for hash context misuse

use thiserror::Error;

/// Errors reported by Streebog contexts
///
/// The hash itself is total over byte strings; every variant describes a
/// caller contract violation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("hash context already finalized; call reset() before reuse")]
    Finalized,

    #[error("output buffer is {actual} bytes, digest needs {expected}")]
    OutputLength { expected: usize, actual: usize },

    #[error("unsupported digest size: {0} bits (expected 256 or 512)")]
    UnsupportedDigestSize(u32),
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, Error>;
