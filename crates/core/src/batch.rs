//! Hashing many independent messages
//!
//! Contexts share nothing but the read-only tables, so separate messages
//! hash in parallel without coordination.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::streebog::Streebog;

/// Digest every message, preserving input order
#[cfg(feature = "parallel")]
pub fn digest_batch<const N: usize, T>(messages: &[T]) -> Vec<[u8; N]>
where
    T: AsRef<[u8]> + Sync,
{
    messages
        .par_iter()
        .map(|message| Streebog::<N>::digest(message.as_ref()))
        .collect()
}

/// Digest every message, preserving input order (sequential fallback)
#[cfg(not(feature = "parallel"))]
pub fn digest_batch<const N: usize, T>(messages: &[T]) -> Vec<[u8; N]>
where
    T: AsRef<[u8]> + Sync,
{
    messages
        .iter()
        .map(|message| Streebog::<N>::digest(message.as_ref()))
        .collect()
}

/// HMAC every message under the same key, preserving input order
#[cfg(feature = "parallel")]
pub fn hmac_batch<const N: usize, T>(messages: &[T], key: &[u8]) -> Vec<[u8; N]>
where
    T: AsRef<[u8]> + Sync,
{
    messages
        .par_iter()
        .map(|message| Streebog::<N>::hmac(message.as_ref(), key))
        .collect()
}

/// HMAC every message under the same key (sequential fallback)
#[cfg(not(feature = "parallel"))]
pub fn hmac_batch<const N: usize, T>(messages: &[T], key: &[u8]) -> Vec<[u8; N]>
where
    T: AsRef<[u8]> + Sync,
{
    messages
        .iter()
        .map(|message| Streebog::<N>::hmac(message.as_ref(), key))
        .collect()
}
