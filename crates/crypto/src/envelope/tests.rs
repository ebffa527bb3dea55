// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

#[test]
fn test_pack_layout() {
    let gcm = Mode::Gcm.info();
    let iv = [1u8; 12];
    let tag = [2u8; 16];
    let envelope = EnvelopePacker::pack(&gcm, 16, Some(&iv[..]), Some(&tag[..]), b"ct")
        .expect("Failed to pack");
    assert_eq!(envelope.len(), 12 + 16 + 2);
    assert_eq!(&envelope[..12], &iv);
    assert_eq!(&envelope[12..28], &tag);
    assert_eq!(&envelope[28..], b"ct");

    let ecb = Mode::Ecb.info();
    let envelope = EnvelopePacker::pack(&ecb, 16, None, None, &[9u8; 16])
        .expect("Failed to pack");
    assert_eq!(envelope, [9u8; 16]);
}

#[test]
fn test_unpack_splits_parts() {
    let cbc = Mode::Cbc.info();
    let envelope: Vec<u8> = (0..24).collect();
    let parts = EnvelopePacker::unpack(&envelope, &cbc, 8).expect("Failed to unpack");
    assert_eq!(parts.iv, Some(&envelope[..8]));
    assert_eq!(parts.tag, None);
    assert_eq!(parts.ciphertext, &envelope[8..]);

    let gcm = Mode::Gcm.info();
    let envelope: Vec<u8> = (0..40).collect();
    let parts = EnvelopePacker::unpack(&envelope, &gcm, 16).expect("Failed to unpack");
    assert_eq!(parts.iv, Some(&envelope[..12]));
    assert_eq!(parts.tag, Some(&envelope[12..28]));
    assert_eq!(parts.ciphertext, &envelope[28..]);
}

#[test]
fn test_unpack_prefix_only() {
    let ctr = Mode::Ctr.info();
    let envelope = [5u8; 8];
    let parts = EnvelopePacker::unpack(&envelope, &ctr, 16).expect("Failed to unpack");
    assert_eq!(parts.iv, Some(&envelope[..]));
    assert!(parts.ciphertext.is_empty());
}

#[test]
fn test_unpack_truncated() {
    let gcm = Mode::Gcm.info();
    let result = EnvelopePacker::unpack(&[0u8; 27], &gcm, 16);
    assert_eq!(
        result,
        Err(CryptoError::TruncatedEnvelope {
            required: 28,
            actual: 27
        })
    );

    let ofb = Mode::Ofb.info();
    let result = EnvelopePacker::unpack(&[0u8; 15], &ofb, 16);
    assert!(matches!(
        result,
        Err(CryptoError::TruncatedEnvelope { required: 16, .. })
    ));
}

#[test]
fn test_pack_rejects_mismatched_iv() {
    let cbc = Mode::Cbc.info();
    let result = EnvelopePacker::pack(&cbc, 16, None, None, b"");
    assert_eq!(
        result,
        Err(CryptoError::InvalidIVLength {
            expected: 16,
            actual: 0
        })
    );

    let result = EnvelopePacker::pack(&cbc, 16, Some(&[0u8; 8][..]), None, b"");
    assert_eq!(
        result,
        Err(CryptoError::InvalidIVLength {
            expected: 16,
            actual: 8
        })
    );

    let ecb = Mode::Ecb.info();
    let result = EnvelopePacker::pack(&ecb, 16, Some(&[][..]), None, b"");
    assert!(matches!(result, Err(CryptoError::InvalidIVLength { .. })));
}

#[test]
fn test_pack_rejects_mismatched_tag() {
    let gcm = Mode::Gcm.info();
    let iv = [0u8; 12];
    let result = EnvelopePacker::pack(&gcm, 16, Some(&iv[..]), None, b"");
    assert_eq!(
        result,
        Err(CryptoError::InvalidTagLength {
            expected: 16,
            actual: 0
        })
    );

    let ctr = Mode::Ctr.info();
    let result = EnvelopePacker::pack(&ctr, 16, Some(&[0u8; 8][..]), Some(&[0u8; 16][..]), b"");
    assert_eq!(
        result,
        Err(CryptoError::InvalidTagLength {
            expected: 0,
            actual: 16
        })
    );
}

#[test]
fn test_prefix_len() {
    assert_eq!(EnvelopePacker::prefix_len(&Mode::Ecb.info(), 16), 0);
    assert_eq!(EnvelopePacker::prefix_len(&Mode::Cbc.info(), 8), 8);
    assert_eq!(EnvelopePacker::prefix_len(&Mode::Cfb.info(), 16), 16);
    assert_eq!(EnvelopePacker::prefix_len(&Mode::Ctr.info(), 8), 8);
    assert_eq!(EnvelopePacker::prefix_len(&Mode::Gcm.info(), 16), 28);
}
