//! gostsum library
//!
//! File and stream hashing with Streebog (GOST R 34.11-2012) on top of
//! [`streebog_core`], plus the configuration and checksum-list handling
//! used by the `gostsum` command-line tool.
//!
//! # Example
//!
//! ```rust
//! use gostsum::algorithm::DigestSize;
//! use gostsum::digest::{format_checksum_line, hash_reader};
//!
//! let data: &[u8] = b"file contents";
//! let digest = hash_reader(DigestSize::Bits256, data, 4096)?;
//! assert_eq!(digest, DigestSize::Bits256.digest(b"file contents"));
//!
//! println!("{}", format_checksum_line(&digest, "contents.txt"));
//! # Ok::<(), gostsum::Error>(())
//! ```

// Re-export the core algorithm
pub use streebog_core as algorithm;

pub mod config;
pub mod digest;
pub mod error;

// Convenience re-exports
pub use algorithm::{DigestSize, DynStreebog, Streebog256, Streebog512};
pub use config::Config;
pub use error::{Error, Result};
