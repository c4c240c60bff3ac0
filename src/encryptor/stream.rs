//! src/encryptor/stream.rs
//! Incremental block+tag sealing shared by both encryptors.
//!
//! Output layout: `header ‖ (ciphertext(16) ‖ tag(2))* ‖ mac`. The header goes
//! out in front of the first output, every complete plaintext block is sealed
//! as soon as it is buffered, and `finalize` pads the remainder and appends the
//! whole-message MAC.

use crate::consts::{BLOCK_SIZE, IV_LEN, UNIT_LEN};
use crate::crypto::block::{AesCipher, CbcEncryptor};
use crate::crypto::hmac::MacState;
use crate::error::CryptError;
use crate::key::Key;
use crate::padding::pad;
use crate::result::CipherResult;
use zeroize::{Zeroize, Zeroizing};

/// CBC chain plus the two MAC contexts: the keyed template for per-block tags
/// and the running whole-message MAC.
struct BlockSealer {
    cbc: CbcEncryptor,
    tag_template: MacState,
    running: MacState,
}

impl BlockSealer {
    #[inline]
    fn seal(&mut self, plaintext: &[u8], out: &mut Vec<u8>) {
        let ciphertext = self.cbc.encrypt_block(plaintext);
        // Tag covers this block alone; the running MAC covers everything.
        let tag = self.tag_template.block_tag(&ciphertext);
        self.running.update(&ciphertext);
        out.extend_from_slice(&ciphertext);
        out.extend_from_slice(&tag);
    }
}

/// Per-message encryption state.
pub(crate) struct EncryptContext {
    header: Vec<u8>,
    iv: [u8; IV_LEN],
    cipher: AesCipher,
    sealer: BlockSealer,
    buffer: Zeroizing<Vec<u8>>,
    header_emitted: bool,
    mac_len: usize,
}

impl EncryptContext {
    /// Opens the CBC context under `key`/`iv` and primes the running MAC with
    /// the header bytes.
    pub(crate) fn new(header: Vec<u8>, iv: [u8; IV_LEN], key: &Key) -> Result<Self, CryptError> {
        let cipher = AesCipher::new(key.expose_encryption_secret())?;
        let tag_template = MacState::for_secret(key.expose_authentication_secret())?;
        let mut running = tag_template.clone();
        running.update(&header);

        Ok(Self {
            sealer: BlockSealer {
                cbc: CbcEncryptor::new(cipher.clone(), &iv),
                tag_template,
                running,
            },
            header,
            iv,
            cipher,
            buffer: Zeroizing::new(Vec::new()),
            header_emitted: false,
            mac_len: key.authentication_secret_bytes(),
        })
    }

    pub(crate) fn header(&self) -> &[u8] {
        &self.header
    }

    pub(crate) fn key_bits(&self) -> usize {
        self.cipher.key_bits()
    }

    pub(crate) fn mac_len(&self) -> usize {
        self.mac_len
    }

    /// Back to the state right after construction: same key, same IV.
    pub(crate) fn rewind(&mut self) {
        let mut running = self.sealer.tag_template.clone();
        running.update(&self.header);
        self.sealer.cbc = CbcEncryptor::new(self.cipher.clone(), &self.iv);
        self.sealer.running = running;
        self.buffer.zeroize();
        self.header_emitted = false;
    }

    fn emit_header(&mut self, out: &mut Vec<u8>) {
        if !self.header_emitted {
            out.extend_from_slice(&self.header);
            self.header_emitted = true;
        }
    }

    pub(crate) fn process(&mut self, input: &[u8]) -> Vec<u8> {
        self.buffer.extend_from_slice(input);
        let full = self.buffer.len() - self.buffer.len() % BLOCK_SIZE;

        let mut out = Vec::with_capacity(self.header.len() + full / BLOCK_SIZE * UNIT_LEN);
        self.emit_header(&mut out);

        for block in self.buffer[..full].chunks_exact(BLOCK_SIZE) {
            self.sealer.seal(block, &mut out);
        }
        self.buffer.drain(..full);
        out
    }

    pub(crate) fn finalize(&mut self, input: &[u8]) -> Vec<u8> {
        self.buffer.extend_from_slice(input);
        let padded = Zeroizing::new(pad(&self.buffer));
        self.buffer.zeroize();

        let mut out = Vec::with_capacity(
            self.header.len() + padded.len() / BLOCK_SIZE * UNIT_LEN + self.mac_len,
        );
        self.emit_header(&mut out);

        for block in padded.chunks_exact(BLOCK_SIZE) {
            self.sealer.seal(block, &mut out);
        }
        out.extend_from_slice(&self.sealer.running.clone().finalize());
        out
    }
}

/// Lifecycle bookkeeping shared by [`RawEncryptor`](super::RawEncryptor) and
/// [`PasswordEncryptor`](super::PasswordEncryptor).
#[derive(Default)]
pub(crate) struct EncryptEngine {
    context: Option<EncryptContext>,
    finalized: bool,
    result: Option<CipherResult>,
}

impl EncryptEngine {
    pub(crate) fn install(&mut self, context: EncryptContext) {
        self.context = Some(context);
        self.finalized = false;
        self.result = None;
    }

    fn active(&mut self) -> Result<&mut EncryptContext, CryptError> {
        let context = self.context.as_mut().ok_or(CryptError::NotInitialized)?;
        if self.finalized {
            return Err(CryptError::AlreadyFinalized);
        }
        Ok(context)
    }

    pub(crate) fn context(&self) -> Option<&EncryptContext> {
        self.context.as_ref()
    }

    pub(crate) fn process(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptError> {
        Ok(self.active()?.process(input))
    }

    pub(crate) fn finalize(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptError> {
        let out = self.active()?.finalize(input);
        self.finalized = true;
        self.result = Some(CipherResult::success());
        tracing::debug!(output_len = out.len(), "encryptor finalized");
        Ok(out)
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.context.is_some()
    }

    pub(crate) fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub(crate) fn result(&self) -> Option<&CipherResult> {
        self.result.as_ref()
    }

    pub(crate) fn reset(&mut self) -> Result<(), CryptError> {
        let context = self.context.as_mut().ok_or(CryptError::NotInitialized)?;
        context.rewind();
        self.finalized = false;
        self.result = None;
        Ok(())
    }

    pub(crate) fn deinitialize(&mut self) {
        // Dropping the context zeroes its buffer.
        self.context = None;
        self.finalized = false;
        self.result = None;
    }
}
