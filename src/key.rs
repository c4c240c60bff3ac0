//! # Key Material
//!
//! [`Key`] pairs an AES encryption secret with an HMAC authentication secret.
//! [`Password`] wraps raw password bytes for the password engines.
//!
//! Both hold their bytes in `secure-gate` wrappers: zeroized on drop, and only
//! readable through an explicit `expose_*` call.

use crate::aliases::{PasswordBytes, SecretBytes};
use secure_gate::{RevealSecret, RevealSecretMut};
use crate::consts::ENCRYPTION_SECRET_LENGTHS;
use crate::crypto::hmac::HashWidth;
use crate::crypto::rng::random_bytes;
use crate::error::CryptError;
use std::fmt;
use zeroize::Zeroize;

/// Immutable encryption + authentication secret pair.
///
/// - encryption secret: 16, 24 or 32 bytes (AES-128/192/256)
/// - authentication secret: 28, 32, 48 or 64 bytes, which also selects
///   HMAC-SHA224/256/384/512 for both per-block tags and the final MAC
pub struct Key {
    encryption_secret: SecretBytes,
    authentication_secret: SecretBytes,
    hash_width: HashWidth,
    name: Option<String>,
    description: Option<String>,
}

impl Key {
    /// Builds a key after validating both secret lengths.
    pub fn new(encryption_secret: &[u8], authentication_secret: &[u8]) -> Result<Self, CryptError> {
        if !ENCRYPTION_SECRET_LENGTHS.contains(&encryption_secret.len()) {
            return Err(CryptError::InvalidKeyLength {
                secret: "encryption",
                len: encryption_secret.len(),
            });
        }
        let hash_width = HashWidth::from_secret_len(authentication_secret.len()).ok_or(
            CryptError::InvalidKeyLength {
                secret: "authentication",
                len: authentication_secret.len(),
            },
        )?;

        Ok(Self {
            encryption_secret: SecretBytes::new(encryption_secret.to_vec()),
            authentication_secret: SecretBytes::new(authentication_secret.to_vec()),
            hash_width,
            name: None,
            description: None,
        })
    }

    /// Fresh random key with the requested secret lengths.
    pub fn generate(
        encryption_secret_bytes: usize,
        authentication_secret_bytes: usize,
    ) -> Result<Self, CryptError> {
        let mut enc = random_bytes(encryption_secret_bytes);
        let mut auth = random_bytes(authentication_secret_bytes);
        let key = Self::new(&enc, &auth);
        enc.zeroize();
        auth.zeroize();
        key
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn expose_encryption_secret(&self) -> &[u8] {
        self.encryption_secret.expose_secret()
    }

    pub fn expose_authentication_secret(&self) -> &[u8] {
        self.authentication_secret.expose_secret()
    }

    pub fn encryption_secret_bytes(&self) -> usize {
        self.encryption_secret.expose_secret().len()
    }

    /// Also the whole-message MAC length for envelopes under this key.
    pub fn authentication_secret_bytes(&self) -> usize {
        self.authentication_secret.expose_secret().len()
    }

    pub fn hash_width(&self) -> HashWidth {
        self.hash_width
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("encryption_secret_bytes", &self.encryption_secret_bytes())
            .field("authentication_secret_bytes", &self.authentication_secret_bytes())
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Raw password bytes. No encoding is imposed.
pub struct Password {
    bytes: PasswordBytes,
}

impl Password {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: PasswordBytes::new(bytes.into()),
        }
    }

    pub fn expose_secret(&self) -> &[u8] {
        self.bytes.expose_secret()
    }

    /// Zeroes the password in place and truncates it to empty.
    pub fn erase(&mut self) {
        let bytes = self.bytes.expose_secret_mut();
        bytes.zeroize();
        bytes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.expose_secret().is_empty()
    }
}

impl From<&str> for Password {
    fn from(s: &str) -> Self {
        Password::new(s.as_bytes())
    }
}

impl From<String> for Password {
    fn from(s: String) -> Self {
        Password::new(s.into_bytes())
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}
