//! # Cipher Results
//!
//! Every data-dependent outcome of an engine is a [`CipherResult`]. The
//! decrypted payload is only ever attached to a [`ResultKind::Success`], so a
//! caller that forgets to check the kind still cannot read unauthenticated
//! plaintext out of the result.

use std::fmt;

/// Outcome classification for a cipher operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    Success,
    /// Total length is inconsistent with the envelope layout.
    InvalidSize,
    /// Not even a complete header ever arrived.
    InsufficientData,
    UnsupportedVersion,
    UnsupportedType,
    /// A per-block tag or the whole-message MAC did not match.
    InvalidMac,
    InvalidPadding,
    /// Password header requested more PBKDF2 iterations than allowed.
    TooManyIterations,
    /// Reserved for outer transcoding layers; never produced by the engines.
    InvalidEncoding,
}

impl ResultKind {
    /// Stable upper-case name, e.g. `INVALID_MAC`.
    pub const fn as_str(self) -> &'static str {
        match self {
            ResultKind::Success => "SUCCESS",
            ResultKind::InvalidSize => "INVALID_SIZE",
            ResultKind::InsufficientData => "INSUFFICIENT_DATA",
            ResultKind::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ResultKind::UnsupportedType => "UNSUPPORTED_TYPE",
            ResultKind::InvalidMac => "INVALID_MAC",
            ResultKind::InvalidPadding => "INVALID_PADDING",
            ResultKind::TooManyIterations => "TOO_MANY_ITERATIONS",
            ResultKind::InvalidEncoding => "INVALID_ENCODING",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged outcome: kind, payload on success, recovered iteration count for
/// password decryption.
#[derive(Clone, PartialEq, Eq)]
pub struct CipherResult {
    kind: ResultKind,
    payload: Option<Vec<u8>>,
    iterations: Option<u32>,
}

impl CipherResult {
    /// Successful outcome without payload (encryption).
    pub fn success() -> Self {
        Self {
            kind: ResultKind::Success,
            payload: None,
            iterations: None,
        }
    }

    /// Successful decryption carrying the full plaintext.
    pub fn success_with_payload(payload: Vec<u8>, iterations: Option<u32>) -> Self {
        Self {
            kind: ResultKind::Success,
            payload: Some(payload),
            iterations,
        }
    }

    /// Failed outcome. Failures never carry a payload.
    pub fn failure(kind: ResultKind) -> Self {
        debug_assert!(kind != ResultKind::Success);
        Self {
            kind,
            payload: None,
            iterations: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.kind == ResultKind::Success
    }

    /// Decrypted plaintext, present only on a successful decryption.
    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    pub fn into_payload(self) -> Option<Vec<u8>> {
        self.payload
    }

    /// PBKDF2 iteration count read from a password envelope, on success only.
    ///
    /// Lets callers notice envelopes written with weaker parameters than they
    /// currently require.
    pub fn iterations(&self) -> Option<u32> {
        self.iterations
    }
}

impl fmt::Debug for CipherResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherResult")
            .field("kind", &self.kind)
            .field("payload_len", &self.payload.as_ref().map(Vec::len))
            .field("iterations", &self.iterations)
            .finish()
    }
}

impl From<ResultKind> for CipherResult {
    fn from(kind: ResultKind) -> Self {
        match kind {
            ResultKind::Success => CipherResult::success(),
            other => CipherResult::failure(other),
        }
    }
}
