use std::hint::black_box;

use streebog_core::{DigestSize, DynStreebog};
use wasm_bindgen::prelude::*;

fn digest_size(bits: u32) -> Result<DigestSize, JsError> {
    DigestSize::try_from(bits).map_err(|e| JsError::new(&e.to_string()))
}

fn now_ms() -> Result<f64, JsError> {
    let performance = web_sys::window()
        .and_then(|w| w.performance())
        .ok_or_else(|| JsError::new("performance timer unavailable"))?;
    Ok(performance.now())
}

/// Digest of `input`, 256 or 512 bits
#[wasm_bindgen]
pub fn digest(input: &[u8], bits: u32) -> Result<Vec<u8>, JsError> {
    Ok(digest_size(bits)?.digest(input))
}

/// Hex digest of a UTF-8 string
#[wasm_bindgen]
pub fn digest_hex(input: &str, bits: u32) -> Result<String, JsError> {
    Ok(hex::encode(digest_size(bits)?.digest(input.as_bytes())))
}

#[wasm_bindgen]
pub fn hmac(data: &[u8], key: &[u8], bits: u32) -> Result<Vec<u8>, JsError> {
    Ok(digest_size(bits)?.hmac(data, key))
}

/// Salted digest `H(salt || source)`; an empty salt uses the built-in key
#[wasm_bindgen]
pub fn make(source: &[u8], salt: &[u8], bits: u32) -> Result<Vec<u8>, JsError> {
    Ok(digest_size(bits)?.make(source, salt))
}

/// Incremental hasher for data that arrives in pieces (file readers,
/// streams)
#[wasm_bindgen]
pub struct Hasher {
    inner: DynStreebog,
}

#[wasm_bindgen]
impl Hasher {
    #[wasm_bindgen(constructor)]
    pub fn new(bits: u32) -> Result<Hasher, JsError> {
        Ok(Hasher {
            inner: DynStreebog::new(digest_size(bits)?),
        })
    }

    pub fn update(&mut self, chunk: &[u8]) -> Result<(), JsError> {
        self.inner
            .update(chunk)
            .map(|_| ())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn finalize(&mut self) -> Result<Vec<u8>, JsError> {
        self.inner
            .finalize()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn bits(&self) -> u32 {
        self.inner.digest_size().bits()
    }
}

#[wasm_bindgen]
pub struct Benchmark {
    input: Vec<u8>,
}

#[wasm_bindgen]
impl Benchmark {
    /// Benchmark over messages of `message_size` bytes
    #[wasm_bindgen(constructor)]
    pub fn new(message_size: usize) -> Self {
        Self {
            input: (0..message_size).map(|i| i as u8).collect(),
        }
    }

    /// Hash the message `count` times
    /// Returns throughput in MiB/s
    pub fn run(&self, count: u32, bits: u32) -> Result<f64, JsError> {
        let size = digest_size(bits)?;
        let start = now_ms()?;

        for _ in 0..count {
            black_box(size.digest(black_box(&self.input)));
        }

        let elapsed_s = (now_ms()? - start) / 1000.0;
        let mib = (self.input.len() as f64 * count as f64) / (1024.0 * 1024.0);
        web_sys::console::log_1(
            &format!(
                "{}: {} x {} bytes in {:.3}s",
                size,
                count,
                self.input.len(),
                elapsed_s
            )
            .into(),
        );

        Ok(mib / elapsed_s)
    }

    /// Algorithm parameters as a JSON string
    pub fn get_params(&self) -> String {
        format!(
            r#"{{"block_size": {}, "rounds": {}, "message_size": {}}}"#,
            streebog_core::BLOCK_SIZE,
            streebog_core::ROUNDS,
            self.input.len()
        )
    }
}
