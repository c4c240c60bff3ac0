//! # Constants
//!
//! Wire-format constants for both envelope types, plus the PBKDF2 iteration
//! bounds used by encryption and the default decrypt-side ceiling.

/// Envelope format version written into byte 0 of every header.
pub const FORMAT_VERSION: u8 = 1;

/// Envelope type byte for key-encrypted (raw) envelopes.
pub const TYPE_KEY: u8 = 1;

/// Envelope type byte for password-encrypted envelopes.
pub const TYPE_PASSWORD: u8 = 2;

/// AES block size.
pub const BLOCK_SIZE: usize = 16;

/// Length of the truncated per-block HMAC tag.
pub const TAG_LEN: usize = 2;

/// One body unit: ciphertext block followed by its tag.
pub const UNIT_LEN: usize = BLOCK_SIZE + TAG_LEN;

/// CBC initialization vector length.
pub const IV_LEN: usize = 16;

/// PBKDF2 salt length carried in password headers.
pub const SALT_LEN: usize = 64;

/// `version(1) + type(1) + iv(16)`
pub const RAW_HEADER_LEN: usize = 2 + IV_LEN;

/// `version(1) + type(1) + iterations(4) + salt(64) + iv(16)`
pub const PASSWORD_HEADER_LEN: usize = 2 + 4 + SALT_LEN + IV_LEN;

/// Whole-message MAC length in password mode (HMAC-SHA256).
pub const PASSWORD_MAC_LEN: usize = 32;

/// Output length of the PBKDF2-HMAC-SHA512 derivation (encryption half + authentication half).
pub const DERIVED_KEY_LEN: usize = 64;

/// Minimum allowed PBKDF2 iteration count.
pub const PBKDF2_MIN_ITER: u32 = 1;

/// Maximum PBKDF2 iteration count accepted when encrypting.
///
/// Set to `5_000_000` to keep derivation times bounded while still allowing
/// high-security configurations.
pub const PBKDF2_MAX_ITER: u32 = 5_000_000;

/// Default PBKDF2 iteration count for password encryption.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 300_000;

/// Default ceiling a password decryptor enforces before deriving a key from
/// an untrusted header.
pub const DEFAULT_MAX_ITERATIONS: u32 = PBKDF2_MAX_ITER;

/// Valid encryption secret lengths (AES-128/192/256).
pub const ENCRYPTION_SECRET_LENGTHS: [usize; 3] = [16, 24, 32];

/// Valid authentication secret lengths (HMAC-SHA224/256/384/512).
pub const AUTHENTICATION_SECRET_LENGTHS: [usize; 4] = [28, 32, 48, 64];
