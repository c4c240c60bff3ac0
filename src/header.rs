//! # Envelope Headers
//!
//! Two header layouts share their first two bytes:
//!
//! | Type | Length | Layout |
//! |---|---|---|
//! | key (raw) | 18 | `version(1)=1, type(1)=1, iv(16)` |
//! | password | 86 | `version(1)=1, type(1)=2, iterations(4, BE), salt(64), iv(16)` |
//!
//! Header bytes are fed into the whole-message MAC, so every field is
//! authenticated even though it is sent in the clear.

use crate::consts::{
    FORMAT_VERSION, IV_LEN, PASSWORD_HEADER_LEN, RAW_HEADER_LEN, SALT_LEN, TYPE_KEY,
    TYPE_PASSWORD,
};
use crate::error::CryptError;

/// Which secret an envelope was sealed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvelopeType {
    Key,
    Password,
}

impl EnvelopeType {
    pub const fn type_byte(self) -> u8 {
        match self {
            EnvelopeType::Key => TYPE_KEY,
            EnvelopeType::Password => TYPE_PASSWORD,
        }
    }

    pub const fn header_len(self) -> usize {
        match self {
            EnvelopeType::Key => RAW_HEADER_LEN,
            EnvelopeType::Password => PASSWORD_HEADER_LEN,
        }
    }
}

/// Header of a key-encrypted envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeader {
    pub version: u8,
    pub envelope_type: u8,
    pub iv: [u8; IV_LEN],
}

impl RawHeader {
    pub fn new(iv: [u8; IV_LEN]) -> Self {
        Self {
            version: FORMAT_VERSION,
            envelope_type: TYPE_KEY,
            iv,
        }
    }

    pub fn to_bytes(&self) -> [u8; RAW_HEADER_LEN] {
        let mut out = [0u8; RAW_HEADER_LEN];
        out[0] = self.version;
        out[1] = self.envelope_type;
        out[2..].copy_from_slice(&self.iv);
        out
    }

    /// Splits the fields without validating version or type; the decryptor
    /// records those as results instead of failing the parse.
    pub fn from_bytes(bytes: &[u8; RAW_HEADER_LEN]) -> Self {
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&bytes[2..]);
        Self {
            version: bytes[0],
            envelope_type: bytes[1],
            iv,
        }
    }
}

/// Header of a password-encrypted envelope, carrying the KDF parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHeader {
    pub version: u8,
    pub envelope_type: u8,
    pub iterations: u32,
    pub salt: [u8; SALT_LEN],
    pub iv: [u8; IV_LEN],
}

impl PasswordHeader {
    pub fn new(iterations: u32, salt: [u8; SALT_LEN], iv: [u8; IV_LEN]) -> Self {
        Self {
            version: FORMAT_VERSION,
            envelope_type: TYPE_PASSWORD,
            iterations,
            salt,
            iv,
        }
    }

    pub fn to_bytes(&self) -> [u8; PASSWORD_HEADER_LEN] {
        let mut out = [0u8; PASSWORD_HEADER_LEN];
        out[0] = self.version;
        out[1] = self.envelope_type;
        out[2..6].copy_from_slice(&self.iterations.to_be_bytes());
        out[6..6 + SALT_LEN].copy_from_slice(&self.salt);
        out[6 + SALT_LEN..].copy_from_slice(&self.iv);
        out
    }

    pub fn from_bytes(bytes: &[u8; PASSWORD_HEADER_LEN]) -> Self {
        let mut iterations = [0u8; 4];
        iterations.copy_from_slice(&bytes[2..6]);
        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&bytes[6..6 + SALT_LEN]);
        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&bytes[6 + SALT_LEN..]);
        Self {
            version: bytes[0],
            envelope_type: bytes[1],
            iterations: u32::from_be_bytes(iterations),
            salt,
            iv,
        }
    }
}

/// Read the envelope type from the first two bytes of an envelope.
///
/// Lets an outer layer pick the right decryptor (or surface the KDF cost of a
/// password envelope via [`PasswordHeader::from_bytes`]) before decrypting.
///
/// # Errors
///
/// [`CryptError::Header`] if fewer than two bytes are given, the version is
/// not [`FORMAT_VERSION`], or the type byte is unknown.
///
/// # Example
///
/// ```
/// use aesstream::header::{read_envelope_type, EnvelopeType};
///
/// assert_eq!(read_envelope_type(&[1, 2])?, EnvelopeType::Password);
/// assert!(read_envelope_type(&[2, 1]).is_err());
/// # Ok::<(), aesstream::CryptError>(())
/// ```
pub fn read_envelope_type(bytes: &[u8]) -> Result<EnvelopeType, CryptError> {
    let [version, envelope_type, ..] = bytes else {
        return Err(CryptError::Header("envelope shorter than 2 bytes".into()));
    };
    if *version != FORMAT_VERSION {
        return Err(CryptError::Header(format!("Unsupported version: {version}")));
    }
    match *envelope_type {
        TYPE_KEY => Ok(EnvelopeType::Key),
        TYPE_PASSWORD => Ok(EnvelopeType::Password),
        other => Err(CryptError::Header(format!("Unsupported type: {other}"))),
    }
}
