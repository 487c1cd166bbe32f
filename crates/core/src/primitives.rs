//! 512-bit arithmetic and the Streebog compression function
//!
//! A 512-bit value is held as eight 64-bit words, word 0 being the least
//! significant. Blocks are converted with [`load_words`] / [`store_words`]
//! and never reinterpreted in place, so the same code runs on little- and
//! big-endian hosts.

use crate::params::{BLOCK_SIZE, WORDS};
use crate::tables::{AX, C};

/// A 512-bit value as little-endian 64-bit words
pub type Words = [u64; WORDS];

/// All-zero 512-bit value
pub const ZERO: Words = [0; WORDS];

/// Load a 64-byte block into words (little-endian per word)
#[inline(always)]
pub fn load_words(bytes: &[u8; BLOCK_SIZE]) -> Words {
    let mut words = ZERO;
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut le = [0u8; 8];
        le.copy_from_slice(chunk);
        *word = u64::from_le_bytes(le);
    }
    words
}

/// Store words back into their 64-byte representation
#[inline(always)]
pub fn store_words(words: &Words) -> [u8; BLOCK_SIZE] {
    let mut bytes = [0u8; BLOCK_SIZE];
    for (chunk, word) in bytes.chunks_exact_mut(8).zip(words.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    bytes
}

/// Build the 512-bit integer equal to `value`
#[inline(always)]
pub fn from_u64(value: u64) -> Words {
    let mut words = ZERO;
    words[0] = value;
    words
}

/// Word-wise XOR of two 512-bit values
#[inline(always)]
pub fn xor512(x: &Words, y: &Words) -> Words {
    let mut out = ZERO;
    for i in 0..WORDS {
        out[i] = x[i] ^ y[i];
    }
    out
}

/// `x = (x + y) mod 2^512`
///
/// The carry out of the top word is discarded.
#[inline(always)]
pub fn add512(x: &mut Words, y: &Words) {
    let mut carry = false;
    for (xi, &yi) in x.iter_mut().zip(y.iter()) {
        let (sum, c1) = xi.overflowing_add(yi);
        let (sum, c2) = sum.overflowing_add(carry as u64);
        *xi = sum;
        carry = c1 | c2;
    }
}

/// XLPS transform: `L(P(S(x ^ y)))`
///
/// Output word `i` gathers byte `i` of every input word through its row of
/// the combined lookup table.
#[inline(always)]
pub fn xlps(x: &Words, y: &Words) -> Words {
    let r = xor512(x, y);
    let mut out = ZERO;
    for (i, word) in out.iter_mut().enumerate() {
        let shift = i * 8;
        let mut acc = 0u64;
        for (row, &ri) in AX.iter().zip(r.iter()) {
            acc ^= row[((ri >> shift) & 0xff) as usize];
        }
        *word = acc;
    }
    out
}

/// Compression function `g_N(h, m)`
///
/// Runs the 12-round cipher E keyed by `XLPS(h, N)` over `m` and feeds the
/// result back in Miyaguchi-Preneel mode: `h' = E(K, m) ^ h ^ m`.
#[inline(always)]
pub fn compress(h: &Words, n: &Words, m: &Words) -> Words {
    let mut key = xlps(h, n);
    let mut state = xlps(&key, m);

    for c in C.iter().take(C.len() - 1) {
        key = xlps(&key, c);
        state = xlps(&key, &state);
    }

    key = xlps(&key, &C[C.len() - 1]);
    state = xor512(&key, &state);

    xor512(&xor512(&state, h), m)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Byte-at-a-time addition with carry, independent of the word layout
    fn add512_bytes(x: &[u8; BLOCK_SIZE], y: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut out = [0u8; BLOCK_SIZE];
        let mut carry = 0u16;
        for i in 0..BLOCK_SIZE {
            let sum = x[i] as u16 + y[i] as u16 + carry;
            out[i] = sum as u8;
            carry = sum >> 8;
        }
        out
    }

    #[test]
    fn test_load_store_inverse() {
        let mut bytes = [0u8; BLOCK_SIZE];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i * 37 + 11) as u8;
        }
        let words = load_words(&bytes);
        assert_eq!(words[0] & 0xff, bytes[0] as u64);
        assert_eq!(words[7] >> 56, bytes[63] as u64);
        assert_eq!(store_words(&words), bytes);
    }

    #[test]
    fn test_add512_carry_propagates_across_words() {
        let mut x = [u64::MAX, u64::MAX, 0, 0, 0, 0, 0, 0];
        add512(&mut x, &from_u64(1));
        assert_eq!(x, [0, 0, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_add512_wraps_modulo_2_512() {
        let mut x = [u64::MAX; WORDS];
        add512(&mut x, &from_u64(1));
        assert_eq!(x, ZERO);

        let mut y = [u64::MAX; WORDS];
        add512(&mut y, &[u64::MAX; WORDS]);
        let mut expected = [u64::MAX; WORDS];
        expected[0] = u64::MAX - 1;
        assert_eq!(y, expected);
    }

    #[test]
    fn test_add512_matches_bytewise_addition() {
        let mut a = [0u8; BLOCK_SIZE];
        let mut b = [0u8; BLOCK_SIZE];
        for i in 0..BLOCK_SIZE {
            a[i] = (i as u8).wrapping_mul(151).wrapping_add(0xf0);
            b[i] = 0xff - (i as u8).wrapping_mul(29);
        }

        let mut words = load_words(&a);
        add512(&mut words, &load_words(&b));

        assert_eq!(store_words(&words), add512_bytes(&a, &b));
    }

    #[test]
    fn test_xlps_of_zero_is_first_table_column() {
        // Every input byte is zero, so each output word is the XOR of AX[k][0].
        let expected = AX.iter().fold(0u64, |acc, row| acc ^ row[0]);
        let out = xlps(&ZERO, &ZERO);
        assert!(out.iter().all(|&w| w == expected));
    }

    #[test]
    fn test_compress_depends_on_every_input() {
        let h = from_u64(1);
        let n = from_u64(2);
        let m = from_u64(3);
        let base = compress(&h, &n, &m);

        assert_ne!(base, compress(&ZERO, &n, &m));
        assert_ne!(base, compress(&h, &ZERO, &m));
        assert_ne!(base, compress(&h, &n, &ZERO));
        assert_eq!(base, compress(&h, &n, &m));
    }
}
