//! # Streebog Core
//!
//! GOST R 34.11-2012 ("Streebog") hash function with 256-bit and 512-bit
//! digests, HMAC on top of it, and a salted prefix hash.
//!
//! ## Algorithm
//!
//! - 512-bit blocks, 512-bit chaining value
//! - Compression: 12-round LPS cipher in Miyaguchi-Preneel mode
//! - Finalization folds the processed bit length `N` and the block sum
//!   `Sigma` into the state
//! - Streebog-256 differs only in its initial value (`0x01` bytes) and
//!   returns the upper half of the final state
//!
//! Output bytes are identical on every host byte order.
//!
//! ## Example
//!
//! ```rust
//! use streebog_core::{Streebog256, Streebog512};
//!
//! // Single-shot hashing
//! let digest = Streebog512::digest(b"input data");
//! assert_eq!(digest.len(), 64);
//!
//! // Streaming
//! let mut hasher = Streebog256::new();
//! hasher.update(b"input ")?.update(b"data")?;
//! let digest = hasher.finalize()?;
//! assert_eq!(digest, Streebog256::digest(b"input data"));
//!
//! // Keyed
//! let tag = Streebog256::hmac(b"message", b"key");
//! assert!(Streebog256::verify_hmac(b"message", b"key", &tag));
//! # Ok::<(), streebog_core::Error>(())
//! ```
//!
//! ## no_std Support
//!
//! This crate supports `no_std` environments with the `alloc` crate:
//!
//! ```toml
//! [dependencies]
//! streebog-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod batch;
mod error;
mod hmac;
mod params;
mod primitives;
mod streebog;
mod tables;
mod variant;

#[cfg(feature = "std")]
pub mod ffi;

pub use batch::{digest_batch, hmac_batch};
pub use error::{Error, Result};
pub use params::*;
pub use primitives::{Words, add512, compress, load_words, store_words};
pub use streebog::{Streebog, Streebog256, Streebog512};
pub use variant::{DigestSize, DynStreebog};

#[cfg(test)]
mod tests;
