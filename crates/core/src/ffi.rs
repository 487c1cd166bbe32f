//! C FFI bindings for mobile and native hosts
//!
//! Every function returns a status code: `0` on success, negative on error.

use crate::error::Error;
use crate::variant::{DigestSize, DynStreebog};
use core::slice;

/// Success
pub const STREEBOG_OK: i32 = 0;
/// A required pointer was null
pub const STREEBOG_ERR_NULL: i32 = -1;
/// The context was already finalized
pub const STREEBOG_ERR_FINALIZED: i32 = -2;
/// The output buffer length does not match the digest size
pub const STREEBOG_ERR_OUTPUT_LENGTH: i32 = -3;
/// Digest size other than 256 or 512 bits
pub const STREEBOG_ERR_DIGEST_SIZE: i32 = -4;

/// Opaque hasher handle for FFI
pub struct StreebogHandle {
    inner: DynStreebog,
}

fn status(err: Error) -> i32 {
    match err {
        Error::Finalized => STREEBOG_ERR_FINALIZED,
        Error::OutputLength { .. } => STREEBOG_ERR_OUTPUT_LENGTH,
        Error::UnsupportedDigestSize(_) => STREEBOG_ERR_DIGEST_SIZE,
    }
}

/// Create a hasher for a 256- or 512-bit digest
/// Returns null for any other size (caller must free with streebog_free)
#[unsafe(no_mangle)]
pub extern "C" fn streebog_new(digest_bits: u32) -> *mut StreebogHandle {
    match DynStreebog::with_bits(digest_bits) {
        Ok(inner) => Box::into_raw(Box::new(StreebogHandle { inner })),
        Err(_) => core::ptr::null_mut(),
    }
}

/// Free a hasher instance
#[unsafe(no_mangle)]
pub extern "C" fn streebog_free(hasher: *mut StreebogHandle) {
    if !hasher.is_null() {
        unsafe {
            let _ = Box::from_raw(hasher);
        }
    }
}

/// Digest length in bytes of the hasher, or 0 for a null handle
#[unsafe(no_mangle)]
pub extern "C" fn streebog_digest_size(hasher: *const StreebogHandle) -> usize {
    if hasher.is_null() {
        return 0;
    }
    unsafe { (*hasher).inner.digest_size().bytes() }
}

/// Return the hasher to its initial state
#[unsafe(no_mangle)]
pub extern "C" fn streebog_reset(hasher: *mut StreebogHandle) -> i32 {
    if hasher.is_null() {
        return STREEBOG_ERR_NULL;
    }
    unsafe {
        (*hasher).inner.reset();
    }
    STREEBOG_OK
}

/// Append input bytes
/// - input may be null only when input_len is 0
#[unsafe(no_mangle)]
pub extern "C" fn streebog_update(
    hasher: *mut StreebogHandle,
    input: *const u8,
    input_len: usize,
) -> i32 {
    if hasher.is_null() || (input.is_null() && input_len > 0) {
        return STREEBOG_ERR_NULL;
    }

    unsafe {
        let hasher = &mut *hasher;
        let data = if input_len == 0 {
            &[][..]
        } else {
            slice::from_raw_parts(input, input_len)
        };
        match hasher.inner.update(data) {
            Ok(_) => STREEBOG_OK,
            Err(e) => status(e),
        }
    }
}

/// Write the digest into output (output_len must equal the digest size)
#[unsafe(no_mangle)]
pub extern "C" fn streebog_finalize(
    hasher: *mut StreebogHandle,
    output: *mut u8,
    output_len: usize,
) -> i32 {
    if hasher.is_null() || output.is_null() {
        return STREEBOG_ERR_NULL;
    }

    unsafe {
        let hasher = &mut *hasher;
        let out = slice::from_raw_parts_mut(output, output_len);
        match hasher.inner.finalize_into(out) {
            Ok(()) => STREEBOG_OK,
            Err(e) => status(e),
        }
    }
}

/// One-shot HMAC
/// - output_len must equal digest_bits / 8
#[unsafe(no_mangle)]
pub extern "C" fn streebog_hmac(
    digest_bits: u32,
    data: *const u8,
    data_len: usize,
    key: *const u8,
    key_len: usize,
    output: *mut u8,
    output_len: usize,
) -> i32 {
    let size = match DigestSize::try_from(digest_bits) {
        Ok(size) => size,
        Err(e) => return status(e),
    };
    if output.is_null() || (data.is_null() && data_len > 0) || (key.is_null() && key_len > 0) {
        return STREEBOG_ERR_NULL;
    }
    if output_len != size.bytes() {
        return STREEBOG_ERR_OUTPUT_LENGTH;
    }

    unsafe {
        let data = if data_len == 0 {
            &[][..]
        } else {
            slice::from_raw_parts(data, data_len)
        };
        let key = if key_len == 0 {
            &[][..]
        } else {
            slice::from_raw_parts(key, key_len)
        };
        let out = slice::from_raw_parts_mut(output, output_len);
        out.copy_from_slice(&size.hmac(data, key));
    }
    STREEBOG_OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Streebog256, Streebog512};

    #[test]
    fn test_ffi_streaming_matches_digest() {
        let handle = streebog_new(512);
        assert!(!handle.is_null());
        assert_eq!(streebog_digest_size(handle), 64);

        let data = b"ffi streaming input";
        assert_eq!(streebog_update(handle, data.as_ptr(), 4), STREEBOG_OK);
        assert_eq!(
            streebog_update(handle, data[4..].as_ptr(), data.len() - 4),
            STREEBOG_OK
        );

        let mut out = [0u8; 64];
        assert_eq!(streebog_finalize(handle, out.as_mut_ptr(), out.len()), STREEBOG_OK);
        assert_eq!(out, Streebog512::digest(data));

        assert_eq!(
            streebog_update(handle, data.as_ptr(), data.len()),
            STREEBOG_ERR_FINALIZED
        );
        assert_eq!(streebog_reset(handle), STREEBOG_OK);
        assert_eq!(streebog_update(handle, core::ptr::null(), 0), STREEBOG_OK);

        streebog_free(handle);
    }

    #[test]
    fn test_ffi_rejects_bad_arguments() {
        assert!(streebog_new(384).is_null());
        assert_eq!(streebog_reset(core::ptr::null_mut()), STREEBOG_ERR_NULL);
        assert_eq!(streebog_digest_size(core::ptr::null()), 0);

        let handle = streebog_new(256);
        let mut out = [0u8; 64];
        assert_eq!(
            streebog_finalize(handle, out.as_mut_ptr(), out.len()),
            STREEBOG_ERR_OUTPUT_LENGTH
        );
        streebog_free(handle);
    }

    #[test]
    fn test_ffi_hmac() {
        let key = b"ffi key";
        let data = b"ffi data";
        let mut out = [0u8; 32];
        assert_eq!(
            streebog_hmac(
                256,
                data.as_ptr(),
                data.len(),
                key.as_ptr(),
                key.len(),
                out.as_mut_ptr(),
                out.len()
            ),
            STREEBOG_OK
        );
        assert_eq!(out, Streebog256::hmac(data, key));

        assert_eq!(
            streebog_hmac(128, data.as_ptr(), data.len(), key.as_ptr(), key.len(), out.as_mut_ptr(), 32),
            STREEBOG_ERR_DIGEST_SIZE
        );
    }
}
