//! src/crypto/block.rs
//! AES block cipher with the key size picked from the encryption secret, and
//! the CBC chaining both engine directions share.
//!
//! CBC is done by hand over single-block AES so the chain survives across any
//! number of partial `process` calls without buffering more than one block.

use crate::consts::BLOCK_SIZE;
use crate::error::CryptError;
use crate::utils::xor_blocks;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block as AesBlock};

/// AES keyed with a 16, 24 or 32 byte secret.
#[derive(Clone)]
pub enum AesCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl AesCipher {
    pub fn new(key: &[u8]) -> Result<Self, CryptError> {
        let cipher = match key.len() {
            16 => Aes128::new_from_slice(key).map(AesCipher::Aes128),
            24 => Aes192::new_from_slice(key).map(AesCipher::Aes192),
            32 => Aes256::new_from_slice(key).map(AesCipher::Aes256),
            len => {
                return Err(CryptError::InvalidKeyLength {
                    secret: "encryption",
                    len,
                })
            }
        };
        cipher.map_err(|e| CryptError::Crypto(format!("AES key setup failed: {e}")))
    }

    /// Key size in bits.
    pub fn key_bits(&self) -> usize {
        match self {
            AesCipher::Aes128(_) => 128,
            AesCipher::Aes192(_) => 192,
            AesCipher::Aes256(_) => 256,
        }
    }

    #[inline(always)]
    fn encrypt_block(&self, block: &mut AesBlock) {
        match self {
            AesCipher::Aes128(c) => c.encrypt_block(block),
            AesCipher::Aes192(c) => c.encrypt_block(block),
            AesCipher::Aes256(c) => c.encrypt_block(block),
        }
    }

    #[inline(always)]
    fn decrypt_block(&self, block: &mut AesBlock) {
        match self {
            AesCipher::Aes128(c) => c.decrypt_block(block),
            AesCipher::Aes192(c) => c.decrypt_block(block),
            AesCipher::Aes256(c) => c.decrypt_block(block),
        }
    }
}

/// CBC encryption state: the cipher plus the previous ciphertext block.
#[derive(Clone)]
pub struct CbcEncryptor {
    cipher: AesCipher,
    chain: [u8; BLOCK_SIZE],
}

impl CbcEncryptor {
    pub fn new(cipher: AesCipher, iv: &[u8; BLOCK_SIZE]) -> Self {
        Self { cipher, chain: *iv }
    }

    /// Encrypts one 16-byte plaintext block and advances the chain.
    #[inline]
    pub fn encrypt_block(&mut self, plaintext: &[u8]) -> [u8; BLOCK_SIZE] {
        let mut xored = [0u8; BLOCK_SIZE];
        xor_blocks(plaintext, &self.chain, &mut xored);
        let mut aes_block = AesBlock::from(xored);
        self.cipher.encrypt_block(&mut aes_block);
        self.chain.copy_from_slice(aes_block.as_slice());
        self.chain
    }
}

/// CBC decryption state.
#[derive(Clone)]
pub struct CbcDecryptor {
    cipher: AesCipher,
    chain: [u8; BLOCK_SIZE],
}

impl CbcDecryptor {
    pub fn new(cipher: AesCipher, iv: &[u8; BLOCK_SIZE]) -> Self {
        Self { cipher, chain: *iv }
    }

    /// Decrypts one 16-byte ciphertext block and advances the chain.
    #[inline]
    pub fn decrypt_block(&mut self, ciphertext: &[u8]) -> [u8; BLOCK_SIZE] {
        let mut aes_block = AesBlock::clone_from_slice(ciphertext);
        self.cipher.decrypt_block(&mut aes_block);
        let mut plaintext = [0u8; BLOCK_SIZE];
        xor_blocks(aes_block.as_slice(), &self.chain, &mut plaintext);
        self.chain.copy_from_slice(ciphertext);
        plaintext
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_sizes() {
        assert_eq!(AesCipher::new(&[0u8; 16]).unwrap().key_bits(), 128);
        assert_eq!(AesCipher::new(&[0u8; 24]).unwrap().key_bits(), 192);
        assert_eq!(AesCipher::new(&[0u8; 32]).unwrap().key_bits(), 256);
        assert_eq!(
            AesCipher::new(&[0u8; 20]).err(),
            Some(CryptError::InvalidKeyLength {
                secret: "encryption",
                len: 20
            })
        );
    }

    // NIST SP 800-38A F.2.1 CBC-AES128.Encrypt, first two blocks.
    #[test]
    fn nist_cbc_aes128_vector() {
        let key = hex::decode("2b7e151628aed2a6abf7158809cf4f3c").unwrap();
        let iv: [u8; 16] = hex::decode("000102030405060708090a0b0c0d0e0f")
            .unwrap()
            .try_into()
            .unwrap();
        let pt = hex::decode(
            "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51",
        )
        .unwrap();
        let expected = hex::decode(
            "7649abac8119b246cee98e9b12e9197d5086cb9b507219ee95db113a917678b2",
        )
        .unwrap();

        let cipher = AesCipher::new(&key).unwrap();
        let mut enc = CbcEncryptor::new(cipher.clone(), &iv);
        let mut ct = Vec::new();
        for block in pt.chunks_exact(16) {
            ct.extend_from_slice(&enc.encrypt_block(block));
        }
        assert_eq!(ct, expected);

        let mut dec = CbcDecryptor::new(cipher, &iv);
        let mut back = Vec::new();
        for block in ct.chunks_exact(16) {
            back.extend_from_slice(&dec.decrypt_block(block));
        }
        assert_eq!(back, pt);
    }
}
