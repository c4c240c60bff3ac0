//! Utility functions used across the library.

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Used by both CBC directions. Callers always pass exact 16-byte slices.
///
/// # Panics (by contract)
///
/// Panics if any of the three slices is shorter than 16 bytes.
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < 16 {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}
