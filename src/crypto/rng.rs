// src/crypto/rng.rs
//! Secure randomness for IVs, salts and generated keys.
//!
//! Backed by `rand`'s thread-local CSPRNG, which is seeded and periodically
//! reseeded from the operating system.

use rand::RngCore;

/// Extension trait: gives `.random()` to fixed-size byte arrays.
pub trait SecureRandomExt {
    /// Generate a cryptographically secure random instance of this type
    fn random() -> Self;
}

impl<const N: usize> SecureRandomExt for [u8; N] {
    #[inline]
    fn random() -> Self {
        let mut bytes = [0u8; N];
        rand::rng().fill_bytes(&mut bytes);
        bytes
    }
}

/// Fresh random buffer of `len` bytes.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rand::rng().fill_bytes(&mut bytes);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_differ_between_calls() {
        let a = <[u8; 16]>::random();
        let b = <[u8; 16]>::random();
        assert_ne!(a, b);
    }

    #[test]
    fn random_bytes_has_requested_len() {
        assert_eq!(random_bytes(0).len(), 0);
        assert_eq!(random_bytes(48).len(), 48);
    }
}
