//! tests/password_tests.rs
//! Password envelopes: header layout, KDF parameters and the iteration ceiling

mod common;

use aesstream::consts::{
    DEFAULT_MAX_ITERATIONS, PASSWORD_HEADER_LEN, PBKDF2_MAX_ITER, UNIT_LEN,
};
use aesstream::header::PasswordHeader;
use aesstream::{
    derive_key_from_password, CryptError, KeyDeriver, Password, PasswordDecryptor,
    PasswordEncryptor, RawEncryptor, ResultKind, StreamCipher,
};
use common::{
    run_chunked, run_single_shot, TEST_DATA, TEST_ITERATIONS, TEST_IV, TEST_PASSWORD, TEST_SALT,
};

fn seal(password: &str, iterations: u32, plaintext: &[u8]) -> Vec<u8> {
    let mut enc = PasswordEncryptor::with_salt_and_iv(
        &Password::from(password),
        iterations,
        TEST_SALT,
        TEST_IV,
    )
    .unwrap();
    enc.finalize(plaintext).unwrap()
}

#[test]
fn forty_eight_bytes_is_190_bytes() {
    let envelope = seal(TEST_PASSWORD, TEST_ITERATIONS, TEST_DATA);
    assert_eq!(envelope.len(), 190);

    let mut header = [0u8; PASSWORD_HEADER_LEN];
    header.copy_from_slice(&envelope[..PASSWORD_HEADER_LEN]);
    assert_eq!(
        PasswordHeader::from_bytes(&header),
        PasswordHeader::new(TEST_ITERATIONS, TEST_SALT, TEST_IV)
    );
    assert_eq!(&envelope[..6], &[1, 2, 0, 0, 0, 5]);
}

#[test]
fn roundtrip_reports_iterations() {
    let password = Password::from(TEST_PASSWORD);

    for chunk in [1usize, 7, 18, 85, 86, 87, 1024] {
        let mut enc = PasswordEncryptor::with_password(&password, TEST_ITERATIONS).unwrap();
        assert_eq!(enc.iterations(), Some(TEST_ITERATIONS));
        let (envelope, _) = run_chunked(&mut enc, TEST_DATA, chunk).unwrap();

        let mut dec = PasswordDecryptor::with_password(&password).unwrap();
        let (decrypted, result) = run_chunked(&mut dec, &envelope, chunk).unwrap();
        assert!(result.is_success(), "chunk {chunk}: {result:?}");
        assert_eq!(decrypted, TEST_DATA, "chunk {chunk}");
        assert_eq!(result.iterations(), Some(TEST_ITERATIONS));
        assert_eq!(dec.iterations(), Some(TEST_ITERATIONS));
    }
}

#[test]
fn empty_password_and_empty_plaintext() {
    let envelope = seal("", 1, b"");
    assert_eq!(envelope.len(), PASSWORD_HEADER_LEN + UNIT_LEN + 32);

    let mut dec = PasswordDecryptor::with_password(&Password::new(Vec::new())).unwrap();
    let (decrypted, result) = run_single_shot(&mut dec, &envelope).unwrap();
    assert!(result.is_success());
    assert!(decrypted.is_empty());
    assert_eq!(result.payload(), Some(&[][..]));
}

#[test]
fn non_utf8_password_bytes() {
    let password = Password::new(vec![0xFF, 0x00, 0xFE, 0x80]);
    let mut enc = PasswordEncryptor::with_password(&password, 2).unwrap();
    let envelope = enc.finalize(b"binary password").unwrap();

    let mut dec = PasswordDecryptor::with_password(&password).unwrap();
    let (decrypted, result) = run_chunked(&mut dec, &envelope, 3).unwrap();
    assert!(result.is_success());
    assert_eq!(decrypted, b"binary password");
}

#[test]
fn wrong_password_is_invalid_mac() {
    let envelope = seal(TEST_PASSWORD, TEST_ITERATIONS, TEST_DATA);

    let mut dec = PasswordDecryptor::with_password(&Password::from("hello")).unwrap();
    let (_, result) = run_chunked(&mut dec, &envelope, 16).unwrap();
    assert_eq!(result.kind(), ResultKind::InvalidMac);
    assert_eq!(result.payload(), None);

    let mut dec = PasswordDecryptor::with_password(&Password::from("hello")).unwrap();
    let (single, result) = run_single_shot(&mut dec, &envelope).unwrap();
    assert_eq!(result.kind(), ResultKind::InvalidMac);
    assert!(single.is_empty());
}

#[test]
fn iteration_ceiling_rejects_before_deriving() {
    let envelope = seal(TEST_PASSWORD, 10, TEST_DATA);
    let password = Password::from(TEST_PASSWORD);

    let mut dec = PasswordDecryptor::with_password(&password)
        .unwrap()
        .with_max_iterations(9);
    assert_eq!(dec.max_iterations(), 9);
    let (decrypted, result) = run_chunked(&mut dec, &envelope, 20).unwrap();
    assert_eq!(result.kind(), ResultKind::TooManyIterations);
    assert!(decrypted.is_empty());
    assert_eq!(dec.iterations(), None);

    let mut dec = PasswordDecryptor::new().with_max_iterations(10);
    dec.initialize(aesstream::CipherParameters::password_decrypt(&password))
        .unwrap();
    let (decrypted, result) = run_single_shot(&mut dec, &envelope).unwrap();
    assert!(result.is_success(), "ceiling is inclusive: {result:?}");
    assert_eq!(decrypted, TEST_DATA);
}

#[test]
fn oversized_iteration_header_is_rejected_without_deriving() {
    let password = Password::from(TEST_PASSWORD);
    let sealed = seal(TEST_PASSWORD, TEST_ITERATIONS, TEST_DATA);

    // Deriving either count would take far longer than the test suite.
    for iterations in [u32::MAX, PBKDF2_MAX_ITER + 1] {
        let mut envelope = sealed.clone();
        envelope[2..6].copy_from_slice(&iterations.to_be_bytes());

        let mut dec = PasswordDecryptor::with_password(&password).unwrap();
        assert_eq!(dec.max_iterations(), DEFAULT_MAX_ITERATIONS);
        let (decrypted, result) = run_chunked(&mut dec, &envelope, 7).unwrap();
        assert_eq!(result.kind(), ResultKind::TooManyIterations, "{iterations}");
        assert!(decrypted.is_empty(), "{iterations}");
        assert_eq!(dec.iterations(), None, "{iterations}");

        let mut dec = PasswordDecryptor::with_password(&password).unwrap();
        let (decrypted, result) = run_single_shot(&mut dec, &envelope).unwrap();
        assert_eq!(result.kind(), ResultKind::TooManyIterations, "{iterations}");
        assert!(decrypted.is_empty(), "{iterations}");
        assert_eq!(dec.iterations(), None, "{iterations}");
    }
}

#[test]
fn zero_iterations_in_header_is_invalid_mac() {
    let mut envelope = seal(TEST_PASSWORD, TEST_ITERATIONS, TEST_DATA);
    envelope[2..6].copy_from_slice(&0u32.to_be_bytes());

    let mut dec = PasswordDecryptor::with_password(&Password::from(TEST_PASSWORD)).unwrap();
    let (decrypted, result) = run_chunked(&mut dec, &envelope, 32).unwrap();
    assert_eq!(result.kind(), ResultKind::InvalidMac);
    assert!(decrypted.is_empty());
}

#[test]
fn encryptor_validates_iterations() {
    let password = Password::from(TEST_PASSWORD);
    assert_eq!(
        PasswordEncryptor::with_password(&password, 0).unwrap_err(),
        CryptError::InvalidIterations(0)
    );
    assert_eq!(
        PasswordEncryptor::with_password(&password, PBKDF2_MAX_ITER + 1).unwrap_err(),
        CryptError::InvalidIterations(PBKDF2_MAX_ITER + 1)
    );
}

#[test]
fn password_envelope_body_matches_derived_key_envelope() {
    let password = Password::from(TEST_PASSWORD);
    let key = KeyDeriver::new()
        .with_iterations(TEST_ITERATIONS)
        .with_salt(TEST_SALT)
        .derive(&password)
        .unwrap();
    assert_eq!(key.encryption_secret_bytes(), 32);
    assert_eq!(key.authentication_secret_bytes(), 32);

    let raw = RawEncryptor::with_key_and_iv(&key, TEST_IV)
        .unwrap()
        .finalize(TEST_DATA)
        .unwrap();
    let sealed = seal(TEST_PASSWORD, TEST_ITERATIONS, TEST_DATA);

    // Same blocks and tags; only the header (and so the trailer MAC) differs.
    let units = 4 * UNIT_LEN;
    assert_eq!(
        &sealed[PASSWORD_HEADER_LEN..PASSWORD_HEADER_LEN + units],
        &raw[18..18 + units]
    );
    assert_ne!(&sealed[sealed.len() - 32..], &raw[raw.len() - 32..]);
}

#[test]
fn derive_key_from_password_returns_salt() {
    let password = Password::from(TEST_PASSWORD);
    let (key, salt) = derive_key_from_password(&password, 1, Some(&TEST_SALT[..])).unwrap();
    assert_eq!(salt, TEST_SALT);

    let (again, _) = derive_key_from_password(&password, 1, Some(&salt[..])).unwrap();
    assert_eq!(
        key.expose_encryption_secret(),
        again.expose_encryption_secret()
    );

    let (_, random_salt) = derive_key_from_password(&password, 1, None).unwrap();
    assert_ne!(random_salt, TEST_SALT);

    assert_eq!(
        derive_key_from_password(&password, 1, Some(&[0u8; 16][..])).unwrap_err(),
        CryptError::InvalidSaltLength(16)
    );
}
