//! src/encryptor/password.rs
//! Password-based encryption: PBKDF2 parameters travel in an 86-byte header.

use crate::consts::{IV_LEN, PBKDF2_MAX_ITER, PBKDF2_MIN_ITER, SALT_LEN};
use crate::crypto::kdf::pbkdf2::derive_key;
use crate::crypto::rng::SecureRandomExt;
use crate::encryptor::stream::{EncryptContext, EncryptEngine};
use crate::engine::{CipherParameters, StreamCipher};
use crate::error::CryptError;
use crate::header::PasswordHeader;
use crate::key::Password;
use crate::result::CipherResult;
use std::fmt;

/// Streaming encryptor keyed by a password.
///
/// The key is derived once, at initialize time; the derived key is always
/// AES-256 + HMAC-SHA256, so envelopes end in a 32-byte MAC.
#[derive(Default)]
pub struct PasswordEncryptor {
    engine: EncryptEngine,
    iterations: Option<u32>,
}

impl PasswordEncryptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encryptor with random salt and IV.
    pub fn with_password(password: &Password, iterations: u32) -> Result<Self, CryptError> {
        let mut enc = Self::new();
        enc.initialize_with(password, iterations, None, None)?;
        Ok(enc)
    }

    /// Encryptor with caller-chosen salt and IV, for reproducible output.
    pub fn with_salt_and_iv(
        password: &Password,
        iterations: u32,
        salt: [u8; SALT_LEN],
        iv: [u8; IV_LEN],
    ) -> Result<Self, CryptError> {
        let mut enc = Self::new();
        enc.initialize_with(password, iterations, Some(salt), Some(iv))?;
        Ok(enc)
    }

    fn initialize_with(
        &mut self,
        password: &Password,
        iterations: u32,
        salt: Option<[u8; SALT_LEN]>,
        iv: Option<[u8; IV_LEN]>,
    ) -> Result<(), CryptError> {
        if !(PBKDF2_MIN_ITER..=PBKDF2_MAX_ITER).contains(&iterations) {
            return Err(CryptError::InvalidIterations(iterations));
        }

        let salt = salt.unwrap_or_else(<[u8; SALT_LEN]>::random);
        let iv = iv.unwrap_or_else(<[u8; IV_LEN]>::random);

        let key = derive_key(password.expose_secret(), &salt, iterations)?;
        let header = PasswordHeader::new(iterations, salt, iv).to_bytes().to_vec();
        let context = EncryptContext::new(header, iv, &key)?;

        tracing::debug!(iterations, "password encryptor initialized");
        self.engine.install(context);
        self.iterations = Some(iterations);
        Ok(())
    }

    /// PBKDF2 iteration count written into the header.
    pub fn iterations(&self) -> Option<u32> {
        self.iterations
    }

    pub fn header(&self) -> Option<&[u8]> {
        self.engine.context().map(EncryptContext::header)
    }
}

impl StreamCipher for PasswordEncryptor {
    fn initialize(&mut self, params: CipherParameters<'_>) -> Result<(), CryptError> {
        match params {
            CipherParameters::PasswordEncrypt {
                password,
                iterations,
                salt,
                iv,
            } => self.initialize_with(password, iterations, salt, iv),
            _ => Err(CryptError::ParameterMismatch(
                "password encryptor expects password-encrypt parameters",
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
        self.engine.deinitialize();
        self.iterations = None;
    }
}

impl fmt::Debug for PasswordEncryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordEncryptor")
            .field("iterations", &self.iterations)
            .field("initialized", &self.engine.is_initialized())
            .field("finalized", &self.engine.is_finalized())
            .field("result", &self.engine.result())
            .finish()
    }
}
