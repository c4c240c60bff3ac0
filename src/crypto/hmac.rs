// src/crypto/hmac.rs

//! HMAC-SHA2 selected by authentication secret length.
//!
//! The same [`MacState`] type serves both the running whole-message MAC and,
//! via a keyed template that is cloned per block, the truncated per-block tags.

use crate::aliases::{HmacSha224, HmacSha256, HmacSha384, HmacSha512};
use crate::consts::TAG_LEN;
use crate::error::CryptError;
use hmac::Mac;

/// SHA-2 width backing the HMAC. Chosen so the digest size equals the
/// authentication secret length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashWidth {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl HashWidth {
    /// Width for an authentication secret of `len` bytes, if valid.
    pub const fn from_secret_len(len: usize) -> Option<Self> {
        match len {
            28 => Some(HashWidth::Sha224),
            32 => Some(HashWidth::Sha256),
            48 => Some(HashWidth::Sha384),
            64 => Some(HashWidth::Sha512),
            _ => None,
        }
    }

    /// Digest length in bytes; also the whole-message MAC length.
    pub const fn output_len(self) -> usize {
        match self {
            HashWidth::Sha224 => 28,
            HashWidth::Sha256 => 32,
            HashWidth::Sha384 => 48,
            HashWidth::Sha512 => 64,
        }
    }
}

/// A keyed HMAC context of one of the four widths.
#[derive(Clone)]
pub enum MacState {
    Sha224(HmacSha224),
    Sha256(HmacSha256),
    Sha384(HmacSha384),
    Sha512(HmacSha512),
}

macro_rules! with_mac {
    ($state:expr, $mac:ident => $body:expr) => {
        match $state {
            MacState::Sha224($mac) => $body,
            MacState::Sha256($mac) => $body,
            MacState::Sha384($mac) => $body,
            MacState::Sha512($mac) => $body,
        }
    };
}

impl MacState {
    pub fn new(width: HashWidth, key: &[u8]) -> Result<Self, CryptError> {
        let state = match width {
            HashWidth::Sha224 => <HmacSha224 as Mac>::new_from_slice(key).map(MacState::Sha224),
            HashWidth::Sha256 => <HmacSha256 as Mac>::new_from_slice(key).map(MacState::Sha256),
            HashWidth::Sha384 => <HmacSha384 as Mac>::new_from_slice(key).map(MacState::Sha384),
            HashWidth::Sha512 => <HmacSha512 as Mac>::new_from_slice(key).map(MacState::Sha512),
        };
        state.map_err(|e| CryptError::Crypto(format!("HMAC key setup failed: {e}")))
    }

    /// Context whose width follows the secret's own length.
    pub fn for_secret(secret: &[u8]) -> Result<Self, CryptError> {
        let width = HashWidth::from_secret_len(secret.len()).ok_or(
            CryptError::InvalidKeyLength {
                secret: "authentication",
                len: secret.len(),
            },
        )?;
        Self::new(width, secret)
    }

    pub fn width(&self) -> HashWidth {
        match self {
            MacState::Sha224(_) => HashWidth::Sha224,
            MacState::Sha256(_) => HashWidth::Sha256,
            MacState::Sha384(_) => HashWidth::Sha384,
            MacState::Sha512(_) => HashWidth::Sha512,
        }
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        with_mac!(self, mac => mac.update(data))
    }

    pub fn finalize(self) -> Vec<u8> {
        with_mac!(self, mac => mac.finalize().into_bytes().to_vec())
    }

    /// Constant-time comparison of the full digest against `tag`.
    pub fn verify(self, tag: &[u8]) -> bool {
        with_mac!(self, mac => mac.verify_slice(tag).is_ok())
    }

    /// Per-block tag: leading bytes of the HMAC of `block` alone.
    ///
    /// `self` must be a freshly keyed context; it is cloned, not consumed.
    pub fn block_tag(&self, block: &[u8]) -> [u8; TAG_LEN] {
        let mut fresh = self.clone();
        fresh.update(block);
        let digest = fresh.finalize();
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&digest[..TAG_LEN]);
        tag
    }

    /// Constant-time check of a per-block tag.
    pub fn verify_block_tag(&self, block: &[u8], tag: &[u8]) -> bool {
        let mut fresh = self.clone();
        fresh.update(block);
        with_mac!(fresh, mac => mac.verify_truncated_left(tag).is_ok())
    }
}
