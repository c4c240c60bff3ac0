// src/encryptor/mod.rs

//! Encrypting engines.
//!
//! [`RawEncryptor`] seals under a [`Key`](crate::Key); [`PasswordEncryptor`]
//! derives a key with PBKDF2 and writes the KDF parameters into its header.
//! Both share the block+tag sealing in `stream`.

pub(crate) mod password;
pub(crate) mod raw;
pub(crate) mod stream;

pub use password::PasswordEncryptor;
pub use raw::RawEncryptor;
