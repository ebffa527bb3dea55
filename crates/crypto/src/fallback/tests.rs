// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

fn aes() -> AlgorithmInfo {
    Registry::standard()
        .algorithm(Algorithm::Aes)
        .expect("AES registered")
        .clone()
}

fn triple_des() -> AlgorithmInfo {
    Registry::standard()
        .algorithm(Algorithm::TripleDes)
        .expect("TripleDES registered")
        .clone()
}

fn key(len: usize) -> SecretKey {
    let bytes: Vec<u8> = (0..len as u8).collect();
    SecretKey::from_bytes(&bytes).expect("key import")
}

#[test]
fn test_counter_for_offset() {
    let nonce = hex::decode("0011223344550001").expect("valid hex");
    assert_eq!(CounterFallback::counter_for_offset(&nonce, 0), nonce);
    assert_eq!(
        hex::encode(CounterFallback::counter_for_offset(&nonce, 8)),
        "0011223344550009"
    );
    assert_eq!(
        hex::encode(CounterFallback::counter_for_offset(&nonce, 0x100)),
        "0011223344550101"
    );
}

#[test]
fn test_counter_wraps_modulo_16_bits() {
    let nonce = hex::decode("aabbfffe").expect("valid hex");
    assert_eq!(
        hex::encode(CounterFallback::counter_for_offset(&nonce, 4)),
        "aabb0002"
    );
    assert_eq!(
        hex::encode(CounterFallback::counter_for_offset(&nonce, 0x10000)),
        "aabbfffe"
    );
}

#[test]
fn test_keystream_matches_block_encryption() {
    let info = triple_des();
    let key = key(24);
    let nonce = hex::decode("0102030405060708").expect("valid hex");

    // Two chunks of zeros expose the keystream of offsets 0 and 8
    let output = CounterFallback::apply(&OsslPrimitives, &info, &key, &nonce, &[0u8; 16])
        .expect("Failed to apply fallback");

    let mut expected = Vec::new();
    for offset in [0, 8] {
        let counter = CounterFallback::counter_for_offset(&nonce, offset);
        let mut keystream = [0u8; 8];
        OsslPrimitives
            .encrypt_block(Algorithm::TripleDes, &key, &counter, &mut keystream)
            .expect("Failed to encrypt block");
        expected.extend_from_slice(&keystream);
    }
    assert_eq!(output, expected);
}

#[test]
fn test_short_nonce_is_zero_extended() {
    let info = aes();
    let key = key(16);
    let nonce = hex::decode("0102030405060708").expect("valid hex");

    let output = CounterFallback::apply(&OsslPrimitives, &info, &key, &nonce, &[0u8; 5])
        .expect("Failed to apply fallback");

    let mut block = nonce.clone();
    block.resize(16, 0);
    let mut keystream = [0u8; 16];
    OsslPrimitives
        .encrypt_block(Algorithm::Aes, &key, &block, &mut keystream)
        .expect("Failed to encrypt block");
    assert_eq!(output, keystream[..5].to_vec());
}

#[test]
fn test_roundtrip_one_and_two_chunks() {
    let info = triple_des();
    let key = key(24);
    let nonce = [0x11u8; 8];

    for len in [nonce.len(), 2 * nonce.len(), 2 * nonce.len() + 3] {
        let plaintext: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let ciphertext = CounterFallback::apply(&OsslPrimitives, &info, &key, &nonce, &plaintext)
            .expect("Failed to encrypt");
        assert_eq!(ciphertext.len(), plaintext.len());
        assert_ne!(ciphertext, plaintext);

        let decrypted = CounterFallback::apply(&OsslPrimitives, &info, &key, &nonce, &ciphertext)
            .expect("Failed to decrypt");
        assert_eq!(decrypted, plaintext);
    }
}

#[test]
fn test_empty_input() {
    let output = CounterFallback::apply(&OsslPrimitives, &aes(), &key(16), &[0u8; 8], &[])
        .expect("Failed to apply fallback");
    assert!(output.is_empty());
}

#[test]
fn test_nonce_length_bounds() {
    let info = triple_des();
    let key = key(24);

    for nonce in [&[0u8; 1][..], &[0u8; 9][..]] {
        let result = CounterFallback::apply(&OsslPrimitives, &info, &key, nonce, b"data");
        assert_eq!(
            result,
            Err(CryptoError::InvalidIVLength {
                expected: 8,
                actual: nonce.len()
            })
        );
    }

    assert!(CounterFallback::apply(&OsslPrimitives, &info, &key, &[0u8; 2], b"data").is_ok());
}

#[test]
fn test_length_ceiling() {
    let info = triple_des();
    let key = key(24);
    let nonce = [0u8; 8];

    let at_limit = vec![0u8; CounterFallback::MAX_INPUT_LEN];
    assert!(CounterFallback::apply(&OsslPrimitives, &info, &key, &nonce, &at_limit).is_ok());

    let over_limit = vec![0u8; CounterFallback::MAX_INPUT_LEN + 1];
    assert_eq!(
        CounterFallback::apply(&OsslPrimitives, &info, &key, &nonce, &over_limit),
        Err(CryptoError::FallbackLengthExceeded {
            len: CounterFallback::MAX_INPUT_LEN + 1,
            max: CounterFallback::MAX_INPUT_LEN,
        })
    );
}
