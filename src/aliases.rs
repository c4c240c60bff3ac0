//! # Secure-Gate Type Aliases
//!
//! Secret material lives in [`secure-gate`](https://github.com/Slurp9187/secure-gate)
//! wrappers so it is zeroized on drop and never printed by accident. Reaching
//! the bytes always takes an explicit `.expose_secret()`.
//!
//! ## HMAC Primitives
//! - [`HmacSha224`], [`HmacSha256`], [`HmacSha384`] - per-block tags and the whole-message MAC
//! - [`HmacSha512`] - PBKDF2 pseudo-random function
//!
//! ## Secrets
//! - [`SecretBytes`] - variable-length key half (encryption or authentication secret)
//! - [`PasswordBytes`] - raw password bytes
//! - [`DerivedKey64`] - PBKDF2 output before it is split into a [`Key`](crate::Key)

use hmac::Hmac;
use sha2::{Sha224, Sha256, Sha384, Sha512};

pub type HmacSha224 = Hmac<Sha224>;
pub type HmacSha256 = Hmac<Sha256>;
pub type HmacSha384 = Hmac<Sha384>;
pub type HmacSha512 = Hmac<Sha512>;

// Key halves have several valid sizes, so they sit on the heap.
pub type SecretBytes = secure_gate::Dynamic<Vec<u8>>;
pub type PasswordBytes = secure_gate::Dynamic<Vec<u8>>;

pub type SpanBuffer<const N: usize> = secure_gate::Fixed<[u8; N]>;

pub type DerivedKey64 = SpanBuffer<64>;
