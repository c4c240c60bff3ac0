//! src/crypto/kdf/pbkdf2.rs

use crate::aliases::{DerivedKey64, HmacSha512};
use crate::consts::{DEFAULT_PBKDF2_ITERATIONS, DERIVED_KEY_LEN, PBKDF2_MIN_ITER, SALT_LEN};
use crate::crypto::rng::SecureRandomExt;
use crate::error::CryptError;
use crate::key::{Key, Password};
use secure_gate::{RevealSecret, RevealSecretMut};

/// Derive a [`Key`] from raw password bytes.
///
/// Deterministic for fixed inputs. Rejects zero iterations.
#[inline]
pub(crate) fn derive_key(
    password: &[u8],
    salt: &[u8; SALT_LEN],
    iterations: u32,
) -> Result<Key, CryptError> {
    if iterations < PBKDF2_MIN_ITER {
        return Err(CryptError::InvalidIterations(iterations));
    }

    let mut derived = DerivedKey64::new([0u8; DERIVED_KEY_LEN]);
    ::pbkdf2::pbkdf2::<HmacSha512>(password, salt, iterations, derived.expose_secret_mut())
        .map_err(|e| CryptError::Kdf(format!("PBKDF2 failed: {e}")))?;

    let (encryption, authentication) = derived.expose_secret().split_at(DERIVED_KEY_LEN / 2);
    Key::new(encryption, authentication)
}

/// Derive a key from `password`, generating a random 64-byte salt when none
/// is supplied. Returns the key together with the salt that was used.
pub fn derive_key_from_password(
    password: &Password,
    iterations: u32,
    salt: Option<&[u8]>,
) -> Result<(Key, [u8; SALT_LEN]), CryptError> {
    let mut deriver = KeyDeriver::new().with_iterations(iterations);
    if let Some(salt) = salt {
        deriver = deriver.with_salt_slice(salt)?;
    }
    let key = deriver.derive(password)?;
    Ok((key, *deriver.salt()))
}

/// PBKDF2-HMAC-SHA512 key derivation builder
///
/// Strong defaults: 64-byte random salt + [`DEFAULT_PBKDF2_ITERATIONS`].
#[derive(Debug, Clone)]
pub struct KeyDeriver {
    iterations: u32,
    salt: [u8; SALT_LEN],
}

impl KeyDeriver {
    /// Create builder with strong defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            iterations: DEFAULT_PBKDF2_ITERATIONS,
            salt: <[u8; SALT_LEN]>::random(),
        }
    }

    /// Set custom iteration count. Zero is rejected at derive time.
    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_salt(mut self, salt: [u8; SALT_LEN]) -> Self {
        self.salt = salt;
        self
    }

    /// Set the salt from a slice, which must be exactly 64 bytes.
    pub fn with_salt_slice(self, salt: &[u8]) -> Result<Self, CryptError> {
        let salt: [u8; SALT_LEN] = salt
            .try_into()
            .map_err(|_| CryptError::InvalidSaltLength(salt.len()))?;
        Ok(self.with_salt(salt))
    }

    #[must_use]
    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn derive(&self, password: &Password) -> Result<Key, CryptError> {
        derive_key(password.expose_secret(), &self.salt, self.iterations)
    }
}

impl Default for KeyDeriver {
    fn default() -> Self {
        Self::new()
    }
}
