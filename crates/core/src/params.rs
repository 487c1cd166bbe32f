//! Streebog Parameters
//!
//! Sizes and constants fixed by GOST R 34.11-2012 and by the keyed
//! constructions layered on top of it.

/// Block size in bytes processed by one call of the compression function
pub const BLOCK_SIZE: usize = 64;

/// Number of 64-bit words in a 512-bit value
pub const WORDS: usize = BLOCK_SIZE / 8;

/// Round keys produced by the key schedule (K1..K12 after the initial key)
pub const ROUNDS: usize = 12;

/// Output size of Streebog-256 in bytes
pub const DIGEST_256_SIZE: usize = 32;

/// Output size of Streebog-512 in bytes
pub const DIGEST_512_SIZE: usize = 64;

/// Initial chaining value byte for Streebog-256 (repeated 64 times)
pub const IV_256_BYTE: u8 = 0x01;

/// Initial chaining value byte for Streebog-512 (repeated 64 times)
pub const IV_512_BYTE: u8 = 0x00;

/// HMAC inner pad byte
pub const HMAC_IPAD: u8 = 0x36;

/// HMAC outer pad byte
pub const HMAC_OPAD: u8 = 0x5c;

/// Largest HMAC block size (Streebog-512 uses twice its digest length)
pub const HMAC_MAX_BLOCK_SIZE: usize = 2 * DIGEST_512_SIZE;

/// Fallback prefix used by `make` when the caller supplies an empty salt
pub const DEFAULT_SECURE_KEY: &str = "streebog-core/make/default-secure-key/v1";
