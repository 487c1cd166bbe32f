//! Tests for Streebog hashing

use hex_literal::hex;
use proptest::prelude::*;

use crate::{
    DEFAULT_SECURE_KEY, DigestSize, Error, Streebog256, Streebog512, digest_batch, hmac_batch,
};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// M1 from GOST R 34.11-2012 appendix A: ASCII digits, 63 bytes
const M1: &[u8] = b"012345678901234567890123456789012345678901234567890123456789012";

/// M2 from GOST R 34.11-2012 appendix A: CP1251 text, 72 bytes
const M2: [u8; 72] = hex!(
    "d1e520e2e5f2f0e82c20d1f2f0e8e1eee6e820e2edf3f6e82c20e2e5fef2fa20"
    "f120eceef0ff20f1f2f0e5ebe0ece820ede020f5f0e0e1f0fbff20efebfaeafb"
    "20c8e3eef0e5e2fb"
);

fn incrementing(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

/// Compare digests, printing both in hex on mismatch
fn assert_digest(actual: &[u8], expected: &[u8]) {
    assert_eq!(
        actual,
        expected,
        "\n  actual: {}\nexpected: {}",
        hex::encode(actual),
        hex::encode(expected)
    );
}

#[test]
fn test_empty_message_vectors() {
    assert_digest(
        &Streebog256::digest(b""),
        &hex!("3f539a213e97c802cc229d474c6aa32a825a360b2a933a949fd925208d9ce1bb")
    );
    assert_digest(
        &Streebog512::digest(b""),
        &hex!(
            "8e945da209aa869f0455928529bcae4679e9873ab707b55315f56ceb98bef0a7"
            "362f715528356ee83cda5f2aac4c6ad2ba3a715c1bcd81cb8e9f90bf4c1c1a8a"
        )
    );
}

#[test]
fn test_m1_vectors() {
    assert_eq!(M1.len(), 63);
    assert_digest(
        &Streebog256::digest(M1),
        &hex!("9d151eefd8590b89daa6ba6cb74af9275dd051026bb149a452fd84e5e57b5500")
    );
    assert_digest(
        &Streebog512::digest(M1),
        &hex!(
            "1b54d01a4af5b9d5cc3d86d68d285462b19abc2475222f35c085122be4ba1ffa"
            "00ad30f8767b3a82384c6574f024c311e2a481332b08ef7f41797891c1646f48"
        )
    );
}

#[test]
fn test_m2_vectors() {
    assert_digest(
        &Streebog256::digest(&M2),
        &hex!("9dd2fe4e90409e5da87f53976d7405b0c0cac628fc669a741d50063c557e8f50")
    );
    assert_digest(
        &Streebog512::digest(&M2),
        &hex!(
            "1e88e62226bfca6f9994f1f2d51569e0daf8475a3b0fe61a5300eee46d961376"
            "035fe83549ada2b8620fcd7c496ce5b33f0cb9dddc2b6460143b03dabac9fb28"
        )
    );
}

#[test]
fn test_text_vectors() {
    let input = b"hello world\n";
    assert_digest(
        &Streebog256::digest(input),
        &hex!("f72018189a5cfb803dbe1f2149cf554c40093d8e7f81c21e08ac5bcd09d9934d")
    );
    assert_digest(
        &Streebog512::digest(input),
        &hex!(
            "9d295fa56ebe77b83db37832685ce874c43a5add7afc5f1aaa94ca21b12a1289"
            "7a48bb3dbbe20cd9cfafa22a6e3c82eb4c6503109bfb0b4514c7bc27e69ec120"
        )
    );
}

#[test]
fn test_streaming_empty_matches_one_shot() {
    let mut ctx = Streebog256::new();
    ctx.update(&[]).unwrap();
    assert_eq!(ctx.finalize().unwrap(), Streebog256::digest(b""));

    let mut ctx = Streebog512::new();
    assert_eq!(ctx.finalize().unwrap(), Streebog512::digest(b""));
}

#[test]
fn test_single_full_zero_block() {
    let zeros = [0u8; 64];
    let expected_256 = hex!("df1fda9ce83191390537358031db2ecaa6aa54cd0eda241dc107105e13636b95");
    let expected_512 = hex!(
        "b0fd29ac1b0df441769ff3fdb8dc564df67721d6ac06fb28ceffb7bbaa7948c6"
        "c014ac999235b58cb26fb60fb112a145d7b4ade9ae566bf2611402c552d20db7"
    );

    assert_eq!(Streebog256::digest(&zeros), expected_256);
    assert_eq!(Streebog512::digest(&zeros), expected_512);

    // Same block arriving one byte at a time goes through the scratch buffer
    let mut ctx = Streebog512::new();
    for byte in zeros.iter() {
        ctx.update(core::slice::from_ref(byte)).unwrap();
    }
    assert_eq!(ctx.finalize().unwrap(), expected_512);
}

#[test]
fn test_uneven_updates_of_incrementing_bytes() {
    let data = incrementing(1000);
    let splits = [1usize, 62, 65, 128, 3, 500, 241];
    assert_eq!(splits.iter().sum::<usize>(), data.len());

    let mut ctx256 = Streebog256::new();
    let mut ctx512 = Streebog512::new();
    let mut offset = 0;
    for len in splits {
        ctx256.update(&data[offset..offset + len]).unwrap();
        ctx512.update(&data[offset..offset + len]).unwrap();
        offset += len;
    }

    let digest256 = ctx256.finalize().unwrap();
    let digest512 = ctx512.finalize().unwrap();

    assert_eq!(digest256, Streebog256::digest(&data));
    assert_eq!(digest512, Streebog512::digest(&data));
    assert_eq!(
        digest256,
        hex!("ac699d1a5e14913174e6361b8c50a683f74a763290d0864f0fe7768f4a431b5f")
    );
    assert_eq!(
        digest512,
        hex!(
            "36361fda766623085b4669b28143bc8e9df65066d806a3fe15dfc66ccef7ea00"
            "f3aa06823279616e601c53f0f10a7bcbc70de55334c6242e520365c886175586"
        )
    );
}

#[test]
fn test_block_boundary_splits() {
    let data = incrementing(200);
    for len in [63usize, 64, 65, 127, 128, 129] {
        let message = &data[..len];
        let expected = Streebog512::digest(message);
        for split in [0usize, 1, 63, 64, 65, len] {
            if split > len {
                continue;
            }
            let mut ctx = Streebog512::new();
            ctx.update(&message[..split])
                .unwrap()
                .update(&message[split..])
                .unwrap();
            assert_eq!(
                ctx.finalize().unwrap(),
                expected,
                "len {} split {}",
                len,
                split
            );
        }
    }
}

#[test]
fn test_determinism_and_sensitivity() {
    let input = b"streebog determinism";
    assert_eq!(Streebog256::digest(input), Streebog256::digest(input));
    assert_eq!(Streebog512::digest(input), Streebog512::digest(input));

    let mut flipped = input.to_vec();
    flipped[0] ^= 1;
    let a = Streebog512::digest(input);
    let b = Streebog512::digest(&flipped);

    let diff_bits: u32 = a.iter().zip(b.iter()).map(|(x, y)| (x ^ y).count_ones()).sum();
    assert!(
        (160..=352).contains(&diff_bits),
        "Avalanche effect: {} of 512 bits differ",
        diff_bits
    );
}

#[test]
fn test_variants_are_not_truncations_of_each_other() {
    let d256 = Streebog256::digest(M1);
    let d512 = Streebog512::digest(M1);
    assert_ne!(&d256[..], &d512[32..]);
    assert_ne!(&d256[..], &d512[..32]);
}

#[test]
fn test_finalized_context_rejects_use() {
    let mut ctx = Streebog256::new();
    ctx.update(b"abc").unwrap();
    let first = ctx.finalize().unwrap();

    assert!(ctx.is_finalized());
    assert_eq!(ctx.update(b"more").err(), Some(Error::Finalized));
    assert_eq!(ctx.finalize(), Err(Error::Finalized));

    ctx.reset();
    ctx.update(b"abc").unwrap();
    assert_eq!(ctx.finalize().unwrap(), first);
}

#[test]
fn test_finalize_into_checks_length() {
    let mut ctx = Streebog512::new();
    let mut short = [0u8; 32];
    assert_eq!(
        ctx.finalize_into(&mut short),
        Err(Error::OutputLength {
            expected: 64,
            actual: 32
        })
    );
    assert!(!ctx.is_finalized());

    let mut out = [0u8; 64];
    ctx.finalize_into(&mut out).unwrap();
    assert_eq!(out, Streebog512::digest(b""));
}

#[test]
fn test_cloned_context_diverges_independently() {
    let mut ctx = Streebog256::new();
    ctx.update(b"shared prefix ").unwrap();
    let mut fork = ctx.clone();

    ctx.update(b"left").unwrap();
    fork.update(b"right").unwrap();

    assert_eq!(
        ctx.finalize().unwrap(),
        Streebog256::digest(b"shared prefix left")
    );
    assert_eq!(
        fork.finalize().unwrap(),
        Streebog256::digest(b"shared prefix right")
    );
}

#[test]
fn test_make_is_salted_prefix_hash() {
    assert_eq!(
        Streebog256::make(b"payload", b"salt"),
        hex!("e92e3009f2ecc468920c46ac057ad647cde3351b09221c537735c61f830e7a24")
    );
    assert_eq!(
        Streebog512::make(b"payload", b"salt"),
        Streebog512::digest(b"saltpayload")
    );

    let mut prefixed = DEFAULT_SECURE_KEY.as_bytes().to_vec();
    prefixed.extend_from_slice(b"payload");
    assert_eq!(
        Streebog256::make(b"payload", b""),
        Streebog256::digest(&prefixed)
    );
    assert_eq!(
        Streebog256::make_with_default(b"payload", b"", b"custom"),
        Streebog256::digest(b"custompayload")
    );

    // Not interchangeable with HMAC
    assert_ne!(
        Streebog256::make(b"payload", b"salt"),
        Streebog256::hmac(b"payload", b"salt")
    );
}

#[test]
fn test_hmac_rfc7836_vector() {
    let key = hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");
    let data = hex!("0126bdb87800af214341456563780100");
    assert_eq!(
        Streebog256::hmac(&data, &key),
        hex!("a1aa5f7de402d7b3d323f2991c8d4534013137010a83754fd0af6d7cd4922ed9")
    );
}

#[test]
fn test_hmac_long_key_is_hashed_first() {
    let data = b"The quick brown fox jumps over the lazy dog";

    // Expected tags are not published vectors: they were computed with this
    // crate. The equality against the pre-hashed key is what this test
    // checks; `test_hmac_256_matches_rustcrypto` pins the tag values.

    let key: Vec<u8> = (0..100u8).collect();
    let tag = Streebog256::hmac(data, &key);
    assert_eq!(
        tag,
        hex!("8a241afc76fb0df8271531c0982c52cf77399d67d425bbae01769dc4ba35f9ce")
    );
    assert_eq!(tag, Streebog256::hmac(data, &Streebog256::digest(&key)));

    let key: Vec<u8> = (0..200usize).map(|i| (i * 7) as u8).collect();
    let tag = Streebog512::hmac(data, &key);
    assert_eq!(
        tag,
        hex!(
            "0dbea9481e2976141d3af40d096c9c6f66ef1e5aab8235c101bcebd96d3fc434"
            "167e8a3c96d2e3daeda038afb6a72508bbf5e23ecfb6fc1fbab5880b3c163ede"
        )
    );
    assert_eq!(tag, Streebog512::hmac(data, &Streebog512::digest(&key)));
}

#[test]
fn test_hmac_512_uses_128_byte_block() {
    // A 100-byte key fits the 128-byte block and is used as-is
    let key: Vec<u8> = (0..100u8).collect();
    let data = b"block size";
    assert_eq!(Streebog512::HMAC_BLOCK_SIZE, 128);
    assert_ne!(
        Streebog512::hmac(data, &key),
        Streebog512::hmac(data, &Streebog512::digest(&key))
    );

    let key = hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");
    let data = hex!("0126bdb87800af214341456563780100");
    assert_eq!(
        Streebog512::hmac(&data, &key),
        hex!(
            "1cde75261648e3ba1846af7492d1d6222d12787e03d721060daebe11a42b81ba"
            "4fcceccfee87ad159560ec0311bf5d634dabe0afcf93c0e44d5a465010ddee64"
        )
    );
}

#[test]
fn test_hmac_key_padding_is_zero_extension() {
    let data = b"padding";
    assert_eq!(
        Streebog256::hmac(data, b"key"),
        Streebog256::hmac(data, b"key\0\0\0")
    );
    assert_ne!(Streebog256::hmac(data, b"key"), Streebog256::hmac(data, b"kez"));
}

#[test]
fn test_batch_matches_individual_digests() {
    let messages: Vec<Vec<u8>> = (0..17).map(|n| incrementing(n * 29)).collect();

    let digests: Vec<[u8; 32]> = digest_batch(&messages);
    assert_eq!(digests.len(), messages.len());
    for (message, digest) in messages.iter().zip(digests.iter()) {
        assert_eq!(*digest, Streebog256::digest(message));
    }

    let tags: Vec<[u8; 64]> = hmac_batch(&messages, b"batch key");
    for (message, tag) in messages.iter().zip(tags.iter()) {
        assert_eq!(*tag, Streebog512::hmac(message, b"batch key"));
    }
}

#[test]
fn test_digest_size_helpers() {
    assert_eq!(DigestSize::Bits256.digest(M1), Streebog256::digest(M1).to_vec());
    assert_eq!(
        DigestSize::Bits512.hmac(M1, b"k"),
        Streebog512::hmac(M1, b"k").to_vec()
    );
    assert_eq!(
        DigestSize::Bits256.make_with_default(M1, b"", b"fallback"),
        Streebog256::make_with_default(M1, b"", b"fallback").to_vec()
    );
    assert_eq!(DigestSize::Bits512.to_string(), "streebog512");
}

/// HMAC-Streebog-256 from the RustCrypto `streebog` and `hmac` crates
///
/// Their Streebog block size is 64 bytes, which is also the HMAC block size
/// of the 256-bit variant here. The 512-bit variant uses 128 bytes and has no
/// counterpart there.
fn rustcrypto_hmac_256(data: &[u8], key: &[u8]) -> [u8; 32] {
    use hmac::{Mac, SimpleHmac};

    let mut mac = SimpleHmac::<::streebog::Streebog256>::new_from_slice(key).unwrap();
    mac.update(data);
    mac.finalize().into_bytes().into()
}

#[test]
fn test_hmac_256_matches_rustcrypto() {
    let data = b"The quick brown fox jumps over the lazy dog";
    for key_len in [0usize, 1, 32, 63, 64, 65, 100, 200] {
        let key: Vec<u8> = (0..key_len).map(|i| i as u8).collect();
        assert_digest(
            &Streebog256::hmac(data, &key),
            &rustcrypto_hmac_256(data, &key),
        );
    }

    let key: Vec<u8> = (0..100u8).collect();
    assert_digest(
        &rustcrypto_hmac_256(data, &key),
        &hex!("8a241afc76fb0df8271531c0982c52cf77399d67d425bbae01769dc4ba35f9ce"),
    );
}

#[test]
fn test_digest_matches_rustcrypto() {
    use ::streebog::Digest;

    for len in [0usize, 1, 63, 64, 65, 1000] {
        let data = incrementing(len);
        assert_digest(
            &Streebog256::digest(&data),
            &::streebog::Streebog256::digest(&data),
        );
        assert_digest(
            &Streebog512::digest(&data),
            &::streebog::Streebog512::digest(&data),
        );
    }
}

proptest! {
    #[test]
    fn prop_hmac_256_matches_rustcrypto(
        data in proptest::collection::vec(any::<u8>(), 0..300),
        key in proptest::collection::vec(any::<u8>(), 0..150),
    ) {
        prop_assert_eq!(Streebog256::hmac(&data, &key), rustcrypto_hmac_256(&data, &key));
    }

    #[test]
    fn prop_streaming_equivalence(
        data in proptest::collection::vec(any::<u8>(), 0..600),
        cuts in proptest::collection::vec(any::<usize>(), 0..8),
    ) {
        let mut points: Vec<usize> = cuts.iter().map(|c| c % (data.len() + 1)).collect();
        points.sort_unstable();

        let mut ctx256 = Streebog256::new();
        let mut ctx512 = Streebog512::new();
        let mut start = 0;
        for end in points.into_iter().chain(core::iter::once(data.len())) {
            ctx256.update(&data[start..end]).unwrap();
            ctx512.update(&data[start..end]).unwrap();
            start = end;
        }

        prop_assert_eq!(ctx256.finalize().unwrap(), Streebog256::digest(&data));
        prop_assert_eq!(ctx512.finalize().unwrap(), Streebog512::digest(&data));
    }
}
