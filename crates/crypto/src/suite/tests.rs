// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

#[test]
fn test_parse_and_display() {
    let suite: CipherSuite = "AES-256-CBC".parse().expect("valid suite");
    assert_eq!(suite, CipherSuite::new(Algorithm::Aes, Mode::Cbc, 256));
    assert_eq!(suite.key_len(), 32);
    assert_eq!(suite.to_string(), "AES-256-CBC");

    let suite: CipherSuite = "tripledes-128-ofb".parse().expect("valid suite");
    assert_eq!(suite, CipherSuite::new(Algorithm::TripleDes, Mode::Ofb, 128));
    assert_eq!(suite.to_string(), "TripleDES-128-OFB");
}

#[test]
fn test_parse_dashed_algorithm_alias() {
    let suite: CipherSuite = "DES-EDE3-192-CBC".parse().expect("valid suite");
    assert_eq!(suite.algorithm(), Algorithm::TripleDes);
    assert_eq!(suite.key_bits(), 192);
    assert_eq!(suite.mode(), Mode::Cbc);
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        "AES-CBC".parse::<CipherSuite>(),
        Err(CryptoError::InvalidSuite("AES-CBC".to_string()))
    );
    assert_eq!(
        "AES-abc-CBC".parse::<CipherSuite>(),
        Err(CryptoError::InvalidSuite("AES-abc-CBC".to_string()))
    );
    assert_eq!(
        "Serpent-256-CBC".parse::<CipherSuite>(),
        Err(CryptoError::UnsupportedAlgorithm("Serpent".to_string()))
    );
    assert_eq!(
        "AES-256-XTS".parse::<CipherSuite>(),
        Err(CryptoError::UnsupportedMode("XTS".to_string()))
    );
}

#[test]
fn test_from_names() {
    let registry = Registry::standard();
    let suite =
        CipherSuite::from_names(&registry, "aes", "gcm", 128).expect("names should resolve");
    assert_eq!(suite, CipherSuite::new(Algorithm::Aes, Mode::Gcm, 128));

    assert!(matches!(
        CipherSuite::from_names(&registry, "aes", "pcbc", 128),
        Err(CryptoError::UnsupportedMode(_))
    ));
}
