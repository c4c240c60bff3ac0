//! # Engine Interface
//!
//! Every engine follows the same lifecycle:
//!
//! ```text
//! new ──initialize──► initialized ──process*──► ──finalize──► finalized
//!                         ▲                                       │
//!                         └──────────────── reset ────────────────┘
//! ```
//!
//! Misuse (`process`/`finalize` before `initialize` or after `finalize`)
//! returns a [`CryptError`]. Data and authenticity failures never do; they are
//! recorded in the engine's [`CipherResult`].
//!
//! [`Engine`] selects one of the four concrete engines from a [`Mode`] tag for
//! callers that pick the direction at runtime.

use crate::consts::{IV_LEN, SALT_LEN};
use crate::decryptor::{PasswordDecryptor, RawDecryptor};
use crate::encryptor::{PasswordEncryptor, RawEncryptor};
use crate::error::CryptError;
use crate::key::{Key, Password};
use crate::result::CipherResult;

/// Parameters bound to an engine by [`StreamCipher::initialize`].
///
/// `None` for an IV or salt means "generate a fresh random one".
#[derive(Debug, Clone, Copy)]
pub enum CipherParameters<'a> {
    /// Raw encrypt or decrypt. `iv` is ignored when decrypting (it is read
    /// from the envelope).
    Key {
        key: &'a Key,
        iv: Option<[u8; IV_LEN]>,
    },
    PasswordEncrypt {
        password: &'a Password,
        iterations: u32,
        salt: Option<[u8; SALT_LEN]>,
        iv: Option<[u8; IV_LEN]>,
    },
    /// KDF parameters come from the envelope header.
    PasswordDecrypt { password: &'a Password },
}

impl<'a> CipherParameters<'a> {
    /// Key parameters with a random IV.
    pub fn key(key: &'a Key) -> Self {
        CipherParameters::Key { key, iv: None }
    }

    /// Password-encrypt parameters with random salt and IV.
    pub fn password_encrypt(password: &'a Password, iterations: u32) -> Self {
        CipherParameters::PasswordEncrypt {
            password,
            iterations,
            salt: None,
            iv: None,
        }
    }

    pub fn password_decrypt(password: &'a Password) -> Self {
        CipherParameters::PasswordDecrypt { password }
    }
}

/// Incremental cipher state machine.
pub trait StreamCipher {
    /// Binds key material and allocates the cipher and MAC contexts.
    ///
    /// Re-initializing an engine discards any previous message state.
    fn initialize(&mut self, params: CipherParameters<'_>) -> Result<(), CryptError>;

    /// Feeds the next chunk of input and returns whatever output is ready.
    fn process(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptError>;

    /// Feeds the final chunk (possibly empty) and completes the message.
    fn finalize(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptError>;

    fn is_initialized(&self) -> bool;

    fn is_finalized(&self) -> bool;

    /// First recorded outcome, or `None` while nothing has been decided.
    fn result(&self) -> Option<&CipherResult>;

    fn has_result(&self) -> bool {
        self.result().is_some()
    }

    /// Re-arms the engine for another message under the same parameters.
    ///
    /// Encryptors reuse the same IV (and salt); call `initialize` again when a
    /// fresh IV is needed.
    fn reset(&mut self) -> Result<(), CryptError>;

    /// Drops all contexts and zeroes buffered data.
    fn deinitialize(&mut self);
}

/// Engine selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    RawEncrypt,
    RawDecrypt,
    PasswordEncrypt,
    PasswordDecrypt,
}

/// One of the four concrete engines, chosen by [`Mode`].
#[derive(Debug)]
pub enum Engine {
    RawEncrypt(RawEncryptor),
    RawDecrypt(RawDecryptor),
    PasswordEncrypt(PasswordEncryptor),
    PasswordDecrypt(PasswordDecryptor),
}

impl Engine {
    /// Uninitialized engine for `mode`.
    pub fn new(mode: Mode) -> Self {
        match mode {
            Mode::RawEncrypt => Engine::RawEncrypt(RawEncryptor::new()),
            Mode::RawDecrypt => Engine::RawDecrypt(RawDecryptor::new()),
            Mode::PasswordEncrypt => Engine::PasswordEncrypt(PasswordEncryptor::new()),
            Mode::PasswordDecrypt => Engine::PasswordDecrypt(PasswordDecryptor::new()),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Engine::RawEncrypt(_) => Mode::RawEncrypt,
            Engine::RawDecrypt(_) => Mode::RawDecrypt,
            Engine::PasswordEncrypt(_) => Mode::PasswordEncrypt,
            Engine::PasswordDecrypt(_) => Mode::PasswordDecrypt,
        }
    }

    fn inner(&self) -> &dyn StreamCipher {
        match self {
            Engine::RawEncrypt(e) => e,
            Engine::RawDecrypt(e) => e,
            Engine::PasswordEncrypt(e) => e,
            Engine::PasswordDecrypt(e) => e,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn StreamCipher {
        match self {
            Engine::RawEncrypt(e) => e,
            Engine::RawDecrypt(e) => e,
            Engine::PasswordEncrypt(e) => e,
            Engine::PasswordDecrypt(e) => e,
        }
    }
}

impl StreamCipher for Engine {
    fn initialize(&mut self, params: CipherParameters<'_>) -> Result<(), CryptError> {
        self.inner_mut().initialize(params)
    }

    fn process(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptError> {
        self.inner_mut().process(input)
    }

    fn finalize(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptError> {
        self.inner_mut().finalize(input)
    }

    fn is_initialized(&self) -> bool {
        self.inner().is_initialized()
    }

    fn is_finalized(&self) -> bool {
        self.inner().is_finalized()
    }

    fn result(&self) -> Option<&CipherResult> {
        self.inner().result()
    }

    fn reset(&mut self) -> Result<(), CryptError> {
        self.inner_mut().reset()
    }

    fn deinitialize(&mut self) {
        self.inner_mut().deinitialize()
    }
}
