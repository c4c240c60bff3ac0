//! tests/common.rs
//! Constants and engine drivers shared across test files

use aesstream::{CipherResult, CryptError, StreamCipher};

/// Fast iteration count for tests - performance testing is in benches/
#[allow(dead_code)] // Used across multiple test files
pub const TEST_ITERATIONS: u32 = 5;

/// Password used by the JSON vectors and most password tests
#[allow(dead_code)] // Used across multiple test files
pub const TEST_PASSWORD: &str = "Hello";

/// 48 bytes: three full blocks, so padding adds a fourth
#[allow(dead_code)] // Used across multiple test files
pub const TEST_DATA: &[u8] = b"foobarbazquxdoomfoobarbazquxdoomfoobarbazquxdoom";

#[allow(dead_code)] // Used across multiple test files
pub const TEST_IV: [u8; 16] = [0x42; 16];

#[allow(dead_code)] // Used across multiple test files
pub const TEST_SALT: [u8; 64] = [0x24; 64];

/// Feeds `input` in `chunk`-sized pieces, then finalizes with nothing.
/// Returns the concatenated output and the engine's recorded result.
#[allow(dead_code)] // Used across multiple test files
pub fn run_chunked<E: StreamCipher>(
    engine: &mut E,
    input: &[u8],
    chunk: usize,
) -> Result<(Vec<u8>, CipherResult), CryptError> {
    let mut out = Vec::new();
    for piece in input.chunks(chunk.max(1)) {
        out.extend(engine.process(piece)?);
    }
    out.extend(engine.finalize(&[])?);
    let result = engine.result().cloned().expect("finalize records a result");
    Ok((out, result))
}

/// Hands the whole input to `finalize` without any `process` call.
#[allow(dead_code)] // Used across multiple test files
pub fn run_single_shot<E: StreamCipher>(
    engine: &mut E,
    input: &[u8],
) -> Result<(Vec<u8>, CipherResult), CryptError> {
    let out = engine.finalize(input)?;
    let result = engine.result().cloned().expect("finalize records a result");
    Ok((out, result))
}
