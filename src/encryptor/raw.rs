//! src/encryptor/raw.rs
//! Key-based encryption: 18-byte header, MAC width from the key.

use crate::consts::IV_LEN;
use crate::crypto::rng::SecureRandomExt;
use crate::encryptor::stream::{EncryptContext, EncryptEngine};
use crate::engine::{CipherParameters, StreamCipher};
use crate::error::CryptError;
use crate::header::RawHeader;
use crate::key::Key;
use crate::result::CipherResult;
use std::fmt;

/// Streaming encryptor bound to a [`Key`].
///
/// # Example
///
/// ```
/// use aesstream::{Key, RawEncryptor, StreamCipher};
///
/// let key = Key::generate(32, 32)?;
/// let mut enc = RawEncryptor::with_key(&key)?;
/// let mut envelope = enc.process(b"hello ")?;
/// envelope.extend(enc.finalize(b"world")?);
/// // header(18) + one block+tag(18) + SHA-256 MAC(32)
/// assert_eq!(envelope.len(), 68);
/// assert!(enc.result().unwrap().is_success());
/// # Ok::<(), aesstream::CryptError>(())
/// ```
#[derive(Default)]
pub struct RawEncryptor {
    engine: EncryptEngine,
}

impl RawEncryptor {
    /// Uninitialized encryptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encryptor initialized under `key` with a fresh random IV.
    pub fn with_key(key: &Key) -> Result<Self, CryptError> {
        let mut enc = Self::new();
        enc.initialize_with(key, None)?;
        Ok(enc)
    }

    /// Encryptor initialized under `key` with a caller-chosen IV.
    ///
    /// Reusing an IV under the same key leaks whether two messages share a
    /// prefix; only use this for test vectors or externally managed IVs.
    pub fn with_key_and_iv(key: &Key, iv: [u8; IV_LEN]) -> Result<Self, CryptError> {
        let mut enc = Self::new();
        enc.initialize_with(key, Some(iv))?;
        Ok(enc)
    }

    fn initialize_with(&mut self, key: &Key, iv: Option<[u8; IV_LEN]>) -> Result<(), CryptError> {
        let iv = iv.unwrap_or_else(<[u8; IV_LEN]>::random);
        let header = RawHeader::new(iv).to_bytes().to_vec();
        let context = EncryptContext::new(header, iv, key)?;
        tracing::debug!(
            key_bits = context.key_bits(),
            mac_len = context.mac_len(),
            "raw encryptor initialized"
        );
        self.engine.install(context);
        Ok(())
    }

    /// Header bytes this encryptor emits, once initialized.
    pub fn header(&self) -> Option<&[u8]> {
        self.engine.context().map(EncryptContext::header)
    }
}

impl StreamCipher for RawEncryptor {
    fn initialize(&mut self, params: CipherParameters<'_>) -> Result<(), CryptError> {
        match params {
            CipherParameters::Key { key, iv } => self.initialize_with(key, iv),
            _ => Err(CryptError::ParameterMismatch(
                "raw encryptor expects key parameters",
            )),
        }
    }

    fn process(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptError> {
        self.engine.process(input)
    }

    fn finalize(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptError> {
        self.engine.finalize(input)
    }

    fn is_initialized(&self) -> bool {
        self.engine.is_initialized()
    }

    fn is_finalized(&self) -> bool {
        self.engine.is_finalized()
    }

    fn result(&self) -> Option<&CipherResult> {
        self.engine.result()
    }

    fn reset(&mut self) -> Result<(), CryptError> {
        self.engine.reset()
    }

    fn deinitialize(&mut self) {
        self.engine.deinitialize()
    }
}

impl fmt::Debug for RawEncryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawEncryptor")
            .field("initialized", &self.engine.is_initialized())
            .field("finalized", &self.engine.is_finalized())
            .field("result", &self.engine.result())
            .finish()
    }
}
