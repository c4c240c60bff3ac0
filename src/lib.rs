// src/lib.rs

//! Authenticated AES-CBC streaming envelopes under a [`Key`] or a [`Password`].
//!
//! Envelope layout: `header ‖ (ciphertext(16) ‖ tag(2))* ‖ mac`. Each block
//! carries a 2-byte HMAC tag for early tamper detection, and a full-width HMAC
//! over header and all blocks closes the message. Engines accept input in
//! chunks of any size (down to one byte) and produce identical output either
//! way.
//!
//! ```
//! use aesstream::{Password, PasswordDecryptor, PasswordEncryptor, StreamCipher};
//!
//! let password = Password::from("correct horse battery staple");
//! let mut enc = PasswordEncryptor::with_password(&password, 1_000)?;
//! let mut envelope = enc.process(b"first chunk, ")?;
//! envelope.extend(enc.finalize(b"last chunk")?);
//!
//! let mut dec = PasswordDecryptor::with_password(&password)?;
//! let mut plaintext = Vec::new();
//! for chunk in envelope.chunks(7) {
//!     plaintext.extend(dec.process(chunk)?);
//! }
//! plaintext.extend(dec.finalize(&[])?);
//!
//! let result = dec.result().unwrap();
//! assert!(result.is_success());
//! assert_eq!(result.iterations(), Some(1_000));
//! assert_eq!(plaintext, b"first chunk, last chunk");
//! # Ok::<(), aesstream::CryptError>(())
//! ```

pub mod aliases;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod encryptor;
pub mod engine;
pub mod error;
pub mod header;
pub mod key;
pub mod padding;
pub mod result;
pub mod utils;

// High-level API
pub use decryptor::{PasswordDecryptor, RawDecryptor};
pub use encryptor::{PasswordEncryptor, RawEncryptor};
pub use engine::{CipherParameters, Engine, Mode, StreamCipher};
pub use error::CryptError;
pub use key::{Key, Password};
pub use result::{CipherResult, ResultKind};

pub use crypto::hmac::HashWidth;
pub use crypto::kdf::{derive_key_from_password, KeyDeriver};
pub use header::{read_envelope_type, EnvelopeType};
pub use padding::{pad, unpad};
