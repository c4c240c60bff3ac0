// src/decryptor/mod.rs

//! Decrypting engines.
//!
//! Both decryptors accept input in chunks of any size and produce the same
//! bytes and the same [`CipherResult`](crate::CipherResult) however the
//! envelope is split. Plaintext returned by `process` is unauthenticated until
//! `finalize` reports success.

pub(crate) mod password;
pub(crate) mod raw;
pub(crate) mod stream;

pub use password::PasswordDecryptor;
pub use raw::RawDecryptor;
