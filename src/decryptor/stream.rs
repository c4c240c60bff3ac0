//! src/decryptor/stream.rs
//! Incremental envelope parser shared by both decryptors.
//!
//! Stages, each firing once enough bytes are buffered:
//!
//! 1. header: version/type are checked and recorded (never thrown) so byte
//!    accounting continues; the CBC and running MAC contexts are opened and
//!    the MAC is primed with the header bytes.
//! 2. units of `ciphertext(16) ‖ tag(2)`: consumed only while the whole-message
//!    MAC plus one more unit remain buffered, so the trailer is never taken for
//!    ciphertext mid-stream.
//! 3. finalize: size check, optional single-shot MAC pre-check, last units,
//!    trailer MAC, PKCS#7 unpadding.
//!
//! The first failure recorded wins; later stages still run to completion.

use crate::consts::{
    BLOCK_SIZE, FORMAT_VERSION, IV_LEN, PASSWORD_HEADER_LEN, RAW_HEADER_LEN, UNIT_LEN,
};
use crate::crypto::block::{AesCipher, CbcDecryptor};
use crate::crypto::hmac::MacState;
use crate::crypto::kdf::pbkdf2::derive_key;
use crate::error::CryptError;
use crate::header::{EnvelopeType, PasswordHeader, RawHeader};
use crate::key::Key;
use crate::padding::unpad;
use crate::result::{CipherResult, ResultKind};
use zeroize::{Zeroize, Zeroizing};

/// Cipher and keyed MAC template derived from a [`Key`].
#[derive(Clone)]
pub(crate) struct KeyMaterial {
    cipher: AesCipher,
    tag_template: MacState,
}

impl KeyMaterial {
    pub(crate) fn from_key(key: &Key) -> Result<Self, CryptError> {
        Ok(Self {
            cipher: AesCipher::new(key.expose_encryption_secret())?,
            tag_template: MacState::for_secret(key.expose_authentication_secret())?,
        })
    }
}

/// Where the decryption key comes from.
pub(crate) enum KeySource {
    Key(KeyMaterial),
    /// Derived once the header delivers salt and iteration count.
    Password {
        password: Zeroizing<Vec<u8>>,
        max_iterations: u32,
    },
}

/// Opened per-message contexts.
struct BlockOpener {
    cbc: CbcDecryptor,
    tag_template: MacState,
    running: MacState,
}

impl BlockOpener {
    fn new(material: &KeyMaterial, iv: &[u8; IV_LEN], header: &[u8]) -> Self {
        let mut running = material.tag_template.clone();
        running.update(header);
        Self {
            cbc: CbcDecryptor::new(material.cipher.clone(), iv),
            tag_template: material.tag_template.clone(),
            running,
        }
    }

    /// Checks the unit's tag, feeds the running MAC and decrypts. Returns
    /// whether the tag matched; the block is decrypted either way.
    #[inline]
    fn open(&mut self, unit: &[u8], out: &mut Vec<u8>) -> bool {
        let (block, tag) = unit.split_at(BLOCK_SIZE);
        let tag_ok = self.tag_template.verify_block_tag(block, tag);
        self.running.update(block);
        out.extend_from_slice(&self.cbc.decrypt_block(block));
        tag_ok
    }

    /// Whole-message MAC recomputed straight from buffered units, before any
    /// decryption.
    fn precheck(&self, units: &[u8], mac: &[u8]) -> bool {
        let mut expected = self.running.clone();
        for unit in units.chunks_exact(UNIT_LEN) {
            expected.update(&unit[..BLOCK_SIZE]);
        }
        expected.verify(mac)
    }

    fn verify_trailer(self, mac: &[u8]) -> bool {
        self.running.verify(mac)
    }
}

/// Decrypt state machine. The wrappers only differ in the [`KeySource`] they
/// install and the envelope type they expect.
pub(crate) struct DecryptEngine {
    envelope: EnvelopeType,
    source: Option<KeySource>,
    mac_len: usize,
    buffer: Vec<u8>,
    header_parsed: bool,
    opener: Option<BlockOpener>,
    streamed: bool,
    plaintext: Zeroizing<Vec<u8>>,
    iterations: Option<u32>,
    finalized: bool,
    result: Option<CipherResult>,
}

impl DecryptEngine {
    pub(crate) fn new(envelope: EnvelopeType) -> Self {
        Self {
            envelope,
            source: None,
            mac_len: 0,
            buffer: Vec::new(),
            header_parsed: false,
            opener: None,
            streamed: false,
            plaintext: Zeroizing::new(Vec::new()),
            iterations: None,
            finalized: false,
            result: None,
        }
    }

    pub(crate) fn install(&mut self, source: KeySource, mac_len: usize) {
        self.source = Some(source);
        self.mac_len = mac_len;
        self.clear_message();
    }

    /// Updates the ceiling of an installed password source.
    pub(crate) fn set_max_iterations(&mut self, ceiling: u32) {
        if let Some(KeySource::Password { max_iterations, .. }) = self.source.as_mut() {
            *max_iterations = ceiling;
        }
    }

    fn clear_message(&mut self) {
        self.buffer.clear();
        self.header_parsed = false;
        self.opener = None;
        self.streamed = false;
        self.plaintext.zeroize();
        self.iterations = None;
        self.finalized = false;
        self.result = None;
    }

    fn record(&mut self, kind: ResultKind) {
        if self.result.is_none() {
            tracing::debug!(%kind, "decryption failure recorded");
            self.result = Some(CipherResult::failure(kind));
        }
    }

    fn check_active(&self) -> Result<(), CryptError> {
        if self.source.is_none() {
            return Err(CryptError::NotInitialized);
        }
        if self.finalized {
            return Err(CryptError::AlreadyFinalized);
        }
        Ok(())
    }

    fn parse_header(&mut self) -> Result<(), CryptError> {
        let header_len = self.envelope.header_len();
        if self.header_parsed || self.buffer.len() < header_len {
            return Ok(());
        }
        let header: Vec<u8> = self.buffer.drain(..header_len).collect();
        self.header_parsed = true;

        tracing::trace!(version = header[0], envelope_type = header[1], "header parsed");
        if header[0] != FORMAT_VERSION {
            self.record(ResultKind::UnsupportedVersion);
        }
        if header[1] != self.envelope.type_byte() {
            self.record(ResultKind::UnsupportedType);
        }

        let mut failure = None;
        match self.source.as_ref().ok_or(CryptError::NotInitialized)? {
            KeySource::Key(material) => {
                let mut bytes = [0u8; RAW_HEADER_LEN];
                bytes.copy_from_slice(&header);
                let parsed = RawHeader::from_bytes(&bytes);
                self.opener = Some(BlockOpener::new(material, &parsed.iv, &header));
            }
            KeySource::Password {
                password,
                max_iterations,
            } => {
                let mut bytes = [0u8; PASSWORD_HEADER_LEN];
                bytes.copy_from_slice(&header);
                let parsed = PasswordHeader::from_bytes(&bytes);

                if parsed.iterations > *max_iterations {
                    tracing::warn!(
                        iterations = parsed.iterations,
                        max_iterations = *max_iterations,
                        "password header exceeds iteration ceiling; key derivation skipped"
                    );
                    failure = Some(ResultKind::TooManyIterations);
                } else if parsed.iterations == 0 {
                    failure = Some(ResultKind::InvalidMac);
                } else {
                    let key = derive_key(password, &parsed.salt, parsed.iterations)?;
                    let material = KeyMaterial::from_key(&key)?;
                    self.opener = Some(BlockOpener::new(&material, &parsed.iv, &header));
                    self.iterations = Some(parsed.iterations);
                }
            }
        }
        if let Some(kind) = failure {
            self.record(kind);
        }
        Ok(())
    }

    /// Consumes every complete unit that leaves at least `reserve` bytes
    /// buffered. Without opened contexts units are dropped unread.
    fn consume_units(&mut self, reserve: usize) -> Vec<u8> {
        let available = self.buffer.len().saturating_sub(reserve);
        let take = available - available % UNIT_LEN;
        if take == 0 {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(take / UNIT_LEN * BLOCK_SIZE);
        let mut tags_ok = true;
        if let Some(opener) = self.opener.as_mut() {
            for unit in self.buffer[..take].chunks_exact(UNIT_LEN) {
                tags_ok &= opener.open(unit, &mut out);
            }
        }
        self.buffer.drain(..take);

        if !tags_ok {
            self.record(ResultKind::InvalidMac);
        }
        out
    }

    pub(crate) fn process(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptError> {
        self.check_active()?;
        self.streamed = true;
        self.buffer.extend_from_slice(input);
        self.parse_header()?;
        if !self.header_parsed {
            return Ok(Vec::new());
        }

        let out = self.consume_units(self.mac_len + UNIT_LEN);
        self.plaintext.extend_from_slice(&out);
        Ok(out)
    }

    pub(crate) fn finalize(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptError> {
        self.check_active()?;
        self.buffer.extend_from_slice(input);
        self.parse_header()?;
        self.finalized = true;

        let out = self.finish();
        tracing::debug!(
            output_len = out.len(),
            result = ?self.result.as_ref().map(CipherResult::kind),
            "decryptor finalized"
        );
        Ok(out)
    }

    fn finish(&mut self) -> Vec<u8> {
        if !self.header_parsed {
            self.record(ResultKind::InsufficientData);
            return self.discard();
        }

        let body = self.buffer.len();
        if body < UNIT_LEN + self.mac_len || (body - self.mac_len) % UNIT_LEN != 0 {
            self.record(ResultKind::InvalidSize);
            return self.discard();
        }

        let mac_start = body - self.mac_len;
        if !self.streamed {
            let precheck_ok = match &self.opener {
                Some(opener) => {
                    opener.precheck(&self.buffer[..mac_start], &self.buffer[mac_start..])
                }
                None => true,
            };
            if !precheck_ok {
                self.record(ResultKind::InvalidMac);
                return self.discard();
            }
        }

        let mut tail = Zeroizing::new(self.consume_units(self.mac_len));
        let trailer_ok = match self.opener.take() {
            Some(opener) => opener.verify_trailer(&self.buffer),
            None => true,
        };
        self.buffer.clear();
        if !trailer_ok {
            self.record(ResultKind::InvalidMac);
        }

        match unpad(&tail).map(<[u8]>::len) {
            Ok(len) => tail.truncate(len),
            Err(kind) => self.record(kind),
        }

        if self.result.is_some() {
            self.plaintext.zeroize();
            return Vec::new();
        }

        self.plaintext.extend_from_slice(&tail);
        let payload = std::mem::take(&mut *self.plaintext);
        self.result = Some(CipherResult::success_with_payload(payload, self.iterations));
        std::mem::take(&mut *tail)
    }

    fn discard(&mut self) -> Vec<u8> {
        self.buffer.clear();
        self.opener = None;
        self.plaintext.zeroize();
        Vec::new()
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.source.is_some()
    }

    pub(crate) fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub(crate) fn result(&self) -> Option<&CipherResult> {
        self.result.as_ref()
    }

    pub(crate) fn iterations(&self) -> Option<u32> {
        self.iterations
    }

    pub(crate) fn reset(&mut self) -> Result<(), CryptError> {
        if self.source.is_none() {
            return Err(CryptError::NotInitialized);
        }
        self.clear_message();
        Ok(())
    }

    pub(crate) fn deinitialize(&mut self) {
        self.source = None;
        self.mac_len = 0;
        self.clear_message();
    }
}
