//! src/decryptor/raw.rs
//! Key-based decryption of 18-byte-header envelopes.

use crate::decryptor::stream::{DecryptEngine, KeyMaterial, KeySource};
use crate::engine::{CipherParameters, StreamCipher};
use crate::error::CryptError;
use crate::header::EnvelopeType;
use crate::key::Key;
use crate::result::CipherResult;
use std::fmt;

/// Streaming decryptor bound to a [`Key`].
///
/// # Example
///
/// ```
/// use aesstream::{Key, RawDecryptor, RawEncryptor, ResultKind, StreamCipher};
///
/// let key = Key::generate(16, 28)?;
/// let envelope = RawEncryptor::with_key(&key)?.finalize(b"attack at dawn")?;
///
/// let mut dec = RawDecryptor::with_key(&key)?;
/// let plaintext = dec.finalize(&envelope)?;
/// assert_eq!(plaintext, b"attack at dawn");
/// assert_eq!(dec.result().unwrap().kind(), ResultKind::Success);
/// # Ok::<(), aesstream::CryptError>(())
/// ```
pub struct RawDecryptor {
    engine: DecryptEngine,
}

impl RawDecryptor {
    pub fn new() -> Self {
        Self {
            engine: DecryptEngine::new(EnvelopeType::Key),
        }
    }

    pub fn with_key(key: &Key) -> Result<Self, CryptError> {
        let mut dec = Self::new();
        dec.initialize_with(key)?;
        Ok(dec)
    }

    fn initialize_with(&mut self, key: &Key) -> Result<(), CryptError> {
        let material = KeyMaterial::from_key(key)?;
        self.engine
            .install(KeySource::Key(material), key.authentication_secret_bytes());
        tracing::debug!(
            key_bits = key.encryption_secret_bytes() * 8,
            mac_len = key.authentication_secret_bytes(),
            "raw decryptor initialized"
        );
        Ok(())
    }
}

impl Default for RawDecryptor {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamCipher for RawDecryptor {
    fn initialize(&mut self, params: CipherParameters<'_>) -> Result<(), CryptError> {
        match params {
            CipherParameters::Key { key, .. } => self.initialize_with(key),
            _ => Err(CryptError::ParameterMismatch(
                "raw decryptor expects key parameters",
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

impl fmt::Debug for RawDecryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawDecryptor")
            .field("initialized", &self.engine.is_initialized())
            .field("finalized", &self.engine.is_finalized())
            .field("result", &self.engine.result())
            .finish()
    }
}
