// src/crypto/mod.rs

//! Crypto primitives composed by the engines.
//!
//! - [`block`]: AES key-size selection and CBC chaining
//! - [`hmac`]: HMAC over the SHA-2 width chosen by the authentication secret
//! - [`kdf`]: PBKDF2-HMAC-SHA512 password derivation
//! - [`rng`]: OS-seeded randomness for IVs, salts and generated keys

pub mod block;
pub mod hmac;
pub mod kdf;
pub mod rng;
