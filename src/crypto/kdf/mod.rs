// src/crypto/kdf/mod.rs

//! Password-based key derivation.
//!
//! PBKDF2-HMAC-SHA512 produces 64 bytes: the first 32 become the AES-256
//! encryption secret, the last 32 the HMAC-SHA256 authentication secret.

pub mod pbkdf2;

pub use self::pbkdf2::{derive_key_from_password, KeyDeriver};
