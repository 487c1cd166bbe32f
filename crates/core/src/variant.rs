//! Runtime digest size selection
//!
//! [`Streebog256`] and [`Streebog512`] fix the variant at compile time.
//! Callers that learn the size at runtime (command line flags, FFI, WASM)
//! go through [`DigestSize`] and [`DynStreebog`] instead.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

use crate::error::{Error, Result};
use crate::params::{DEFAULT_SECURE_KEY, DIGEST_256_SIZE, DIGEST_512_SIZE};
use crate::streebog::{Streebog256, Streebog512};

/// Streebog output size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestSize {
    Bits256,
    Bits512,
}

impl DigestSize {
    /// Digest length in bits
    pub const fn bits(self) -> u32 {
        match self {
            DigestSize::Bits256 => 256,
            DigestSize::Bits512 => 512,
        }
    }

    /// Digest length in bytes
    pub const fn bytes(self) -> usize {
        match self {
            DigestSize::Bits256 => DIGEST_256_SIZE,
            DigestSize::Bits512 => DIGEST_512_SIZE,
        }
    }

    /// Variant matching a digest of `len` bytes, if any
    pub const fn from_bytes(len: usize) -> Option<Self> {
        match len {
            DIGEST_256_SIZE => Some(DigestSize::Bits256),
            DIGEST_512_SIZE => Some(DigestSize::Bits512),
            _ => None,
        }
    }

    /// Fresh streaming context of this size
    pub fn hasher(self) -> DynStreebog {
        DynStreebog::new(self)
    }

    /// One-shot digest
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            DigestSize::Bits256 => Streebog256::digest(data).to_vec(),
            DigestSize::Bits512 => Streebog512::digest(data).to_vec(),
        }
    }

    /// One-shot HMAC
    pub fn hmac(self, data: &[u8], key: &[u8]) -> Vec<u8> {
        match self {
            DigestSize::Bits256 => Streebog256::hmac(data, key).to_vec(),
            DigestSize::Bits512 => Streebog512::hmac(data, key).to_vec(),
        }
    }

    /// Salted prefix digest, falling back to [`DEFAULT_SECURE_KEY`]
    pub fn make(self, source: &[u8], salt: &[u8]) -> Vec<u8> {
        self.make_with_default(source, salt, DEFAULT_SECURE_KEY.as_bytes())
    }

    /// Salted prefix digest with an explicit fallback prefix
    pub fn make_with_default(self, source: &[u8], salt: &[u8], default_key: &[u8]) -> Vec<u8> {
        match self {
            DigestSize::Bits256 => {
                Streebog256::make_with_default(source, salt, default_key).to_vec()
            }
            DigestSize::Bits512 => {
                Streebog512::make_with_default(source, salt, default_key).to_vec()
            }
        }
    }
}

impl TryFrom<u32> for DigestSize {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            256 => Ok(DigestSize::Bits256),
            512 => Ok(DigestSize::Bits512),
            other => Err(Error::UnsupportedDigestSize(other)),
        }
    }
}

impl fmt::Display for DigestSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "streebog{}", self.bits())
    }
}

/// Streebog context whose digest size is chosen at runtime
#[derive(Debug, Clone)]
pub enum DynStreebog {
    Bits256(Streebog256),
    Bits512(Streebog512),
}

impl DynStreebog {
    /// Fresh context of the given size
    pub fn new(size: DigestSize) -> Self {
        match size {
            DigestSize::Bits256 => DynStreebog::Bits256(Streebog256::new()),
            DigestSize::Bits512 => DynStreebog::Bits512(Streebog512::new()),
        }
    }

    /// Fresh context from a bit count (256 or 512)
    pub fn with_bits(bits: u32) -> Result<Self> {
        DigestSize::try_from(bits).map(Self::new)
    }

    pub fn digest_size(&self) -> DigestSize {
        match self {
            DynStreebog::Bits256(_) => DigestSize::Bits256,
            DynStreebog::Bits512(_) => DigestSize::Bits512,
        }
    }

    pub fn is_finalized(&self) -> bool {
        match self {
            DynStreebog::Bits256(ctx) => ctx.is_finalized(),
            DynStreebog::Bits512(ctx) => ctx.is_finalized(),
        }
    }

    pub fn reset(&mut self) -> &mut Self {
        match self {
            DynStreebog::Bits256(ctx) => {
                ctx.reset();
            }
            DynStreebog::Bits512(ctx) => {
                ctx.reset();
            }
        }
        self
    }

    pub fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        match self {
            DynStreebog::Bits256(ctx) => {
                ctx.update(data)?;
            }
            DynStreebog::Bits512(ctx) => {
                ctx.update(data)?;
            }
        }
        Ok(self)
    }

    /// Write the digest into `out`, which must match the digest length
    pub fn finalize_into(&mut self, out: &mut [u8]) -> Result<()> {
        match self {
            DynStreebog::Bits256(ctx) => ctx.finalize_into(out),
            DynStreebog::Bits512(ctx) => ctx.finalize_into(out),
        }
    }

    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.resize(self.digest_size().bytes(), 0);
        self.finalize_into(&mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_round_trip() {
        for size in [DigestSize::Bits256, DigestSize::Bits512] {
            assert_eq!(DigestSize::try_from(size.bits()), Ok(size));
            assert_eq!(DigestSize::from_bytes(size.bytes()), Some(size));
        }
        assert_eq!(
            DigestSize::try_from(384),
            Err(Error::UnsupportedDigestSize(384))
        );
        assert_eq!(DigestSize::from_bytes(48), None);
    }

    #[test]
    fn test_dyn_matches_static() {
        let data = b"runtime selected variant";

        let mut ctx = DigestSize::Bits256.hasher();
        ctx.update(&data[..7]).unwrap().update(&data[7..]).unwrap();
        assert_eq!(ctx.finalize().unwrap(), Streebog256::digest(data).to_vec());

        let mut ctx = DynStreebog::with_bits(512).unwrap();
        ctx.update(data).unwrap();
        assert_eq!(ctx.finalize().unwrap(), Streebog512::digest(data).to_vec());
    }

    #[test]
    fn test_make_helpers_match_static() {
        assert_eq!(
            DigestSize::Bits256.make(b"payload", b""),
            Streebog256::make(b"payload", b"").to_vec()
        );
        assert_eq!(
            DigestSize::Bits512.make(b"payload", b"salt"),
            Streebog512::make(b"payload", b"salt").to_vec()
        );
    }

    #[test]
    fn test_dyn_rejects_reuse_until_reset() {
        let mut ctx = DynStreebog::new(DigestSize::Bits512);
        ctx.finalize().unwrap();
        assert!(ctx.is_finalized());
        assert_eq!(ctx.update(b"late").err(), Some(Error::Finalized));

        ctx.reset();
        assert!(!ctx.is_finalized());
        assert_eq!(ctx.finalize().unwrap(), DigestSize::Bits512.digest(b""));
    }

    #[test]
    fn test_dyn_output_length_checked() {
        let mut ctx = DynStreebog::new(DigestSize::Bits256);
        let mut out = [0u8; 64];
        assert_eq!(
            ctx.finalize_into(&mut out),
            Err(Error::OutputLength {
                expected: 32,
                actual: 64
            })
        );
        assert!(ctx.finalize_into(&mut out[..32]).is_ok());
    }
}
