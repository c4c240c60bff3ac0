//! tests/vector_tests.rs
//! Known-answer vectors from tests/vector/data/: exact envelope bytes for fixed
//! keys, passwords, salts and IVs, decrypted back in several chunkings

mod common;

use aesstream::header::{read_envelope_type, EnvelopeType};
use aesstream::{
    Key, Password, PasswordDecryptor, PasswordEncryptor, RawDecryptor, RawEncryptor, StreamCipher,
};
use common::{run_chunked, run_single_shot};
use hex::decode;
use serde::Deserialize;
use std::path::Path;

fn load_json<T>(filename: &str) -> Vec<T>
where
    T: for<'de> Deserialize<'de>,
{
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("vector")
        .join("data")
        .join(filename);

    let content =
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {filename}: {e}"));

    serde_json::from_str(&content).unwrap_or_else(|e| panic!("Failed to parse {filename}: {e}"))
}

fn array<const N: usize>(hex: &str) -> [u8; N] {
    decode(hex)
        .unwrap()
        .try_into()
        .unwrap_or_else(|v: Vec<u8>| panic!("expected {N} bytes, got {}", v.len()))
}

#[derive(Debug, Deserialize)]
struct RawVector {
    description: String,
    encryption_secret_hex: String,
    authentication_secret_hex: String,
    iv_hex: String,
    plaintext_hex: String,
    ciphertext_hex: String,
}

#[derive(Debug, Deserialize)]
struct PasswordVector {
    description: String,
    password: String,
    iterations: u32,
    salt_hex: String,
    iv_hex: String,
    plaintext_hex: String,
    ciphertext_hex: String,
}

#[test]
fn raw_vectors() {
    let vectors: Vec<RawVector> = load_json("raw_vectors.json");
    assert!(!vectors.is_empty());

    for v in vectors {
        let key = Key::new(
            &decode(&v.encryption_secret_hex).unwrap(),
            &decode(&v.authentication_secret_hex).unwrap(),
        )
        .unwrap();
        let iv = array::<16>(&v.iv_hex);
        let plaintext = decode(&v.plaintext_hex).unwrap();
        let expected = decode(&v.ciphertext_hex).unwrap();

        let mut enc = RawEncryptor::with_key_and_iv(&key, iv).unwrap();
        let (envelope, _) = run_chunked(&mut enc, &plaintext, 16).unwrap();
        assert_eq!(hex::encode(&envelope), v.ciphertext_hex, "{}", v.description);
        assert_eq!(read_envelope_type(&envelope).unwrap(), EnvelopeType::Key);

        for chunk in [1usize, 17, 18, 19, expected.len()] {
            let mut dec = RawDecryptor::with_key(&key).unwrap();
            let (decrypted, result) = run_chunked(&mut dec, &expected, chunk).unwrap();
            assert!(result.is_success(), "{} (chunk {chunk}): {result:?}", v.description);
            assert_eq!(decrypted, plaintext, "{} (chunk {chunk})", v.description);
        }

        let mut dec = RawDecryptor::with_key(&key).unwrap();
        let (decrypted, result) = run_single_shot(&mut dec, &expected).unwrap();
        assert!(result.is_success(), "{}", v.description);
        assert_eq!(decrypted, plaintext, "{}", v.description);
    }
}

#[test]
fn password_vectors() {
    let vectors: Vec<PasswordVector> = load_json("password_vectors.json");
    assert!(!vectors.is_empty());

    for v in vectors {
        let password = Password::from(v.password.as_str());
        let salt = array::<64>(&v.salt_hex);
        let iv = array::<16>(&v.iv_hex);
        let plaintext = decode(&v.plaintext_hex).unwrap();
        let expected = decode(&v.ciphertext_hex).unwrap();

        let mut enc = PasswordEncryptor::with_salt_and_iv(&password, v.iterations, salt, iv).unwrap();
        let envelope = enc.finalize(&plaintext).unwrap();
        assert_eq!(hex::encode(&envelope), v.ciphertext_hex, "{}", v.description);
        assert_eq!(read_envelope_type(&envelope).unwrap(), EnvelopeType::Password);

        for chunk in [1usize, 86, 100] {
            let mut dec = PasswordDecryptor::with_password(&password).unwrap();
            let (decrypted, result) = run_chunked(&mut dec, &expected, chunk).unwrap();
            assert!(result.is_success(), "{} (chunk {chunk}): {result:?}", v.description);
            assert_eq!(result.iterations(), Some(v.iterations));
            assert_eq!(decrypted, plaintext, "{} (chunk {chunk})", v.description);
        }
    }
}
