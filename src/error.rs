//! # Error Types
//!
//! [`CryptError`] covers programmer and configuration errors only: using an
//! engine out of order, handing it the wrong parameters, or building keys and
//! salts of the wrong size.
//!
//! Anything that depends on untrusted ciphertext (bad MACs, bad padding,
//! truncated envelopes, ...) is **never** an `Err`. Those outcomes are reported
//! through [`CipherResult`](crate::CipherResult).

use thiserror::Error;

/// The error type for misuse of the cipher engines and key material.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptError {
    /// `process`, `finalize` or `reset` was called before `initialize`.
    #[error("cipher engine is not initialized")]
    NotInitialized,

    /// `process` or `finalize` was called after `finalize`.
    #[error("cipher engine is already finalized")]
    AlreadyFinalized,

    /// The engine received a [`CipherParameters`](crate::CipherParameters)
    /// variant meant for another mode.
    #[error("parameter mismatch: {0}")]
    ParameterMismatch(&'static str),

    /// A secret had a length outside its allowed set.
    ///
    /// `secret` names which half of the key was rejected.
    #[error("invalid {secret} secret length: {len} bytes")]
    InvalidKeyLength { secret: &'static str, len: usize },

    /// A caller-supplied salt was not exactly 64 bytes.
    #[error("invalid salt length: {0} bytes (expected 64)")]
    InvalidSaltLength(usize),

    /// PBKDF2 iteration count outside the accepted range.
    #[error("invalid KDF iterations: {0}")]
    InvalidIterations(u32),

    /// Key derivation failed inside the PBKDF2 primitive.
    #[error("KDF error: {0}")]
    Kdf(String),

    /// A block cipher or MAC primitive refused its key.
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// A header handed to the inspection helpers was malformed.
    #[error("Header error: {0}")]
    Header(String),
}
