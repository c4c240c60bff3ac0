//! PKCS#7 padding over 16-byte blocks.

use crate::consts::BLOCK_SIZE;
use crate::result::ResultKind;
use subtle::ConstantTimeEq;

/// Appends `16 - len % 16` bytes, each holding that count.
///
/// Block-aligned input gains a full block of `0x10`, so unpadding is never
/// ambiguous.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let n = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut out = Vec::with_capacity(data.len() + n);
    out.extend_from_slice(data);
    out.resize(data.len() + n, n as u8);
    out
}

/// Strips PKCS#7 padding, returning the unpadded prefix.
///
/// The pad-length byte must be in `1..=16` and not exceed the input; the pad
/// bytes themselves are compared in constant time.
pub fn unpad(data: &[u8]) -> Result<&[u8], ResultKind> {
    let n = match data.last() {
        Some(&n) => n as usize,
        None => return Err(ResultKind::InvalidPadding),
    };

    if n == 0 || n > BLOCK_SIZE || n > data.len() {
        return Err(ResultKind::InvalidPadding);
    }

    let start = data.len() - n;
    let expected = [n as u8; BLOCK_SIZE];
    if !bool::from(data[start..].ct_eq(&expected[..n])) {
        return Err(ResultKind::InvalidPadding);
    }

    Ok(&data[..start])
}
