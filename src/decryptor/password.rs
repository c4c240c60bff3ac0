//! src/decryptor/password.rs
//! Password-based decryption with an iteration ceiling.

use crate::consts::{DEFAULT_MAX_ITERATIONS, PASSWORD_MAC_LEN};
use crate::decryptor::stream::{DecryptEngine, KeySource};
use crate::engine::{CipherParameters, StreamCipher};
use crate::error::CryptError;
use crate::header::EnvelopeType;
use crate::key::Password;
use crate::result::CipherResult;
use std::fmt;
use zeroize::Zeroizing;

/// Streaming decryptor keyed by a password.
///
/// Salt, IV and iteration count are read from the 86-byte header, so no key
/// exists until the whole header has arrived. A header asking for more than
/// [`max_iterations`](Self::max_iterations) PBKDF2 rounds is rejected with
/// [`ResultKind::TooManyIterations`](crate::ResultKind::TooManyIterations)
/// without running the KDF.
pub struct PasswordDecryptor {
    engine: DecryptEngine,
    max_iterations: u32,
}

impl PasswordDecryptor {
    /// Uninitialized decryptor with the default ceiling
    /// ([`DEFAULT_MAX_ITERATIONS`]).
    pub fn new() -> Self {
        Self {
            engine: DecryptEngine::new(EnvelopeType::Password),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_password(password: &Password) -> Result<Self, CryptError> {
        let mut dec = Self::new();
        dec.initialize_with(password);
        Ok(dec)
    }

    /// Sets the iteration ceiling. Applies to the current password, if one is
    /// installed, and to every later `initialize`.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self.engine.set_max_iterations(max_iterations);
        self
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Iteration count read from the header, once it has been parsed and was
    /// within the ceiling.
    pub fn iterations(&self) -> Option<u32> {
        self.engine.iterations()
    }

    fn initialize_with(&mut self, password: &Password) {
        let source = KeySource::Password {
            password: Zeroizing::new(password.expose_secret().to_vec()),
            max_iterations: self.max_iterations,
        };
        self.engine.install(source, PASSWORD_MAC_LEN);
        tracing::debug!(
            max_iterations = self.max_iterations,
            "password decryptor initialized"
        );
    }
}

impl Default for PasswordDecryptor {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamCipher for PasswordDecryptor {
    fn initialize(&mut self, params: CipherParameters<'_>) -> Result<(), CryptError> {
        match params {
            CipherParameters::PasswordDecrypt { password } => {
                self.initialize_with(password);
                Ok(())
            }
            _ => Err(CryptError::ParameterMismatch(
                "password decryptor expects password-decrypt parameters",
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

impl fmt::Debug for PasswordDecryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDecryptor")
            .field("max_iterations", &self.max_iterations)
            .field("initialized", &self.engine.is_initialized())
            .field("finalized", &self.engine.is_finalized())
            .field("result", &self.engine.result())
            .finish()
    }
}
