//! HMAC over Streebog
//!
//! The block size is twice the digest length: 64 bytes for Streebog-256
//! (matching RFC 7836) and 128 bytes for Streebog-512. Keys longer than the
//! block are hashed first; shorter keys are zero-padded.

use subtle::ConstantTimeEq;

use crate::params::{HMAC_IPAD, HMAC_MAX_BLOCK_SIZE, HMAC_OPAD};
use crate::streebog::Streebog;

impl<const N: usize> Streebog<N> {
    /// `H((K ^ opad) || H((K ^ ipad) || data))`
    pub fn hmac(data: &[u8], key: &[u8]) -> [u8; N] {
        let mut storage = [0u8; HMAC_MAX_BLOCK_SIZE];
        let key_block = &mut storage[..Self::HMAC_BLOCK_SIZE];

        if key.len() > Self::HMAC_BLOCK_SIZE {
            log::trace!(
                "hmac key of {} bytes exceeds the {}-byte block, hashing it",
                key.len(),
                Self::HMAC_BLOCK_SIZE
            );
            key_block[..N].copy_from_slice(&Self::digest(key));
        } else {
            key_block[..key.len()].copy_from_slice(key);
        }

        for b in key_block.iter_mut() {
            *b ^= HMAC_IPAD;
        }

        let mut ctx = Self::new();
        ctx.absorb(key_block);
        ctx.absorb(data);
        let inner = ctx.output();

        // K ^ ipad ^ (ipad ^ opad) == K ^ opad
        for b in key_block.iter_mut() {
            *b ^= HMAC_IPAD ^ HMAC_OPAD;
        }

        ctx.reset();
        ctx.absorb(key_block);
        ctx.absorb(&inner);
        let tag = ctx.output();

        storage.fill(0);
        tag
    }

    /// Check `tag` against the HMAC of `data` in constant time
    pub fn verify_hmac(data: &[u8], key: &[u8], tag: &[u8]) -> bool {
        let expected = Self::hmac(data, key);
        expected[..].ct_eq(tag).into()
    }
}

#[cfg(test)]
mod tests {
    use crate::params::{HMAC_IPAD, HMAC_OPAD};
    use crate::{Streebog256, Streebog512};

    /// HMAC written out from its definition, pads computed from the raw key
    fn reference_hmac_256(data: &[u8], key: &[u8]) -> [u8; 32] {
        let mut k = [0u8; 64];
        if key.len() > 64 {
            k[..32].copy_from_slice(&Streebog256::digest(key));
        } else {
            k[..key.len()].copy_from_slice(key);
        }
        let ipad: [u8; 64] = core::array::from_fn(|i| k[i] ^ HMAC_IPAD);
        let opad: [u8; 64] = core::array::from_fn(|i| k[i] ^ HMAC_OPAD);

        let mut inner = Streebog256::new();
        inner.update(&ipad).unwrap().update(data).unwrap();
        let inner = inner.finalize().unwrap();

        let mut outer = Streebog256::new();
        outer.update(&opad).unwrap().update(&inner).unwrap();
        outer.finalize().unwrap()
    }

    #[test]
    fn test_outer_pad_shortcut_matches_recomputed_pad() {
        let data = b"outer pad derivation";
        for key_len in [0usize, 1, 32, 63, 64, 65, 200] {
            let key: [u8; 200] = core::array::from_fn(|i| (i * 13 + 7) as u8);
            let key = &key[..key_len];
            assert_eq!(
                Streebog256::hmac(data, key),
                reference_hmac_256(data, key),
                "key length {}",
                key_len
            );
        }
    }

    #[test]
    fn test_verify_hmac() {
        let tag = Streebog512::hmac(b"message", b"key");
        assert!(Streebog512::verify_hmac(b"message", b"key", &tag));
        assert!(!Streebog512::verify_hmac(b"message", b"other key", &tag));
        assert!(!Streebog512::verify_hmac(b"message", b"key", &tag[..32]));
    }
}
