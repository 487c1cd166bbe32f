//! Streaming Streebog context
//!
//! The context buffers input into 64-byte blocks, runs each full block
//! through the compression function and keeps the two finalization
//! accumulators of GOST R 34.11-2012:
//! - `n`: number of message bits processed so far (mod 2^512)
//! - `sigma`: sum of all message blocks (mod 2^512)
//!
//! Finalization pads the tail, folds `n` and `sigma` into the state and
//! truncates to the requested digest size.

use core::fmt;

use crate::error::{Error, Result};
use crate::params::*;
use crate::primitives::{Words, ZERO, add512, compress, from_u64, load_words, store_words};

/// Bits contributed to `n` by one full block
const BLOCK_BITS: u64 = (BLOCK_SIZE * 8) as u64;

/// Streebog hash context producing `N`-byte digests
///
/// Only `N = 32` ([`Streebog256`]) and `N = 64` ([`Streebog512`]) exist;
/// any other size fails to compile when the context is constructed.
///
/// A context is single-use: after [`finalize`](Self::finalize) it rejects
/// further input with [`Error::Finalized`] until [`reset`](Self::reset).
#[derive(Clone)]
pub struct Streebog<const N: usize> {
    /// Chaining value
    h: Words,
    /// Processed bit length
    n: Words,
    /// Block checksum
    sigma: Words,
    /// Pending bytes of the current block
    buffer: [u8; BLOCK_SIZE],
    /// Valid bytes in `buffer`, always below `BLOCK_SIZE` between calls
    buffered: usize,
    finalized: bool,
}

/// Streebog with a 256-bit digest
pub type Streebog256 = Streebog<DIGEST_256_SIZE>;

/// Streebog with a 512-bit digest
pub type Streebog512 = Streebog<DIGEST_512_SIZE>;

impl<const N: usize> Streebog<N> {
    const SUPPORTED_SIZE: () = assert!(
        N == DIGEST_256_SIZE || N == DIGEST_512_SIZE,
        "Streebog digests are 32 or 64 bytes"
    );

    /// Digest length in bytes
    pub const DIGEST_SIZE: usize = N;

    /// HMAC block length in bytes (twice the digest length)
    pub const HMAC_BLOCK_SIZE: usize = 2 * N;

    /// Create a fresh context
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::SUPPORTED_SIZE;

        let iv = if N == DIGEST_256_SIZE {
            IV_256_BYTE
        } else {
            IV_512_BYTE
        };

        Self {
            h: load_words(&[iv; BLOCK_SIZE]),
            n: ZERO,
            sigma: ZERO,
            buffer: [0u8; BLOCK_SIZE],
            buffered: 0,
            finalized: false,
        }
    }

    /// Return the context to its initial state
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::new();
        self
    }

    /// Whether the digest has already been produced
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Append `data` to the message
    ///
    /// Any split of a message across calls yields the same digest as a
    /// single call. Empty input is a no-op.
    pub fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        if self.finalized {
            return Err(Error::Finalized);
        }
        self.absorb(data);
        Ok(self)
    }

    /// Close the message and return the digest
    pub fn finalize(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        self.finalize_into(&mut out)?;
        Ok(out)
    }

    /// Close the message and write the digest into `out`
    ///
    /// `out` must be exactly `N` bytes long; a wrong length leaves the
    /// context untouched.
    pub fn finalize_into(&mut self, out: &mut [u8]) -> Result<()> {
        if self.finalized {
            return Err(Error::Finalized);
        }
        if out.len() != N {
            return Err(Error::OutputLength {
                expected: N,
                actual: out.len(),
            });
        }
        out.copy_from_slice(&self.finish()[BLOCK_SIZE - N..]);
        Ok(())
    }

    /// One-shot digest of `data`
    pub fn digest(data: &[u8]) -> [u8; N] {
        let mut ctx = Self::new();
        ctx.absorb(data);
        ctx.output()
    }

    /// Salted digest: `H(salt || source)`, falling back to
    /// [`DEFAULT_SECURE_KEY`] when `salt` is empty
    ///
    /// This is a prefix construction for domain separation. It is not a MAC;
    /// use [`hmac`](Self::hmac) when authenticity matters.
    pub fn make(source: &[u8], salt: &[u8]) -> [u8; N] {
        Self::make_with_default(source, salt, DEFAULT_SECURE_KEY.as_bytes())
    }

    /// [`make`](Self::make) with an explicit fallback prefix
    pub fn make_with_default(source: &[u8], salt: &[u8], default_key: &[u8]) -> [u8; N] {
        let prefix = if salt.is_empty() { default_key } else { salt };

        let mut ctx = Self::new();
        ctx.absorb(prefix);
        ctx.absorb(source);
        ctx.output()
    }

    /// Block processor shared by every entry point
    pub(crate) fn absorb(&mut self, mut data: &[u8]) {
        // Top up a partially filled block first
        if self.buffered > 0 {
            let take = (BLOCK_SIZE - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < BLOCK_SIZE {
                return;
            }
            let block = load_words(&self.buffer);
            self.compress_block(&block);
            self.buffered = 0;
        }

        // Whole blocks straight from the caller's slice
        while let Some((block, rest)) = data.split_first_chunk::<BLOCK_SIZE>() {
            self.compress_block(&load_words(block));
            data = rest;
        }

        self.buffer[..data.len()].copy_from_slice(data);
        self.buffered = data.len();
    }

    /// Finalize and return the truncated digest
    pub(crate) fn output(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.finish()[BLOCK_SIZE - N..]);
        out
    }

    #[inline(always)]
    fn compress_block(&mut self, block: &Words) {
        self.h = compress(&self.h, &self.n, block);
        add512(&mut self.n, &from_u64(BLOCK_BITS));
        add512(&mut self.sigma, block);
    }

    /// Pad the tail, fold in length and checksum, return the full state
    fn finish(&mut self) -> [u8; BLOCK_SIZE] {
        let tail = self.buffered;

        self.buffer[tail..].fill(0);
        self.buffer[tail] = 0x01;

        let block = load_words(&self.buffer);
        self.h = compress(&self.h, &self.n, &block);
        add512(&mut self.sigma, &block);
        add512(&mut self.n, &from_u64(tail as u64 * 8));

        self.h = compress(&self.h, &ZERO, &self.n);
        self.h = compress(&self.h, &ZERO, &self.sigma);

        self.buffered = 0;
        self.finalized = true;

        log::trace!("streebog-{} finalized with {} tail bytes", N * 8, tail);

        store_words(&self.h)
    }
}

impl<const N: usize> Default for Streebog<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for Streebog<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Streebog")
            .field("digest_bits", &(N * 8))
            .field("buffered", &self.buffered)
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}
