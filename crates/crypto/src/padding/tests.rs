// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

#[test]
fn test_pad_partial_block() {
    let padded = Pkcs7Padding::pad(b"YELLOW SUBMARINE!", 16);
    assert_eq!(padded.len(), 32);
    assert_eq!(&padded[..17], b"YELLOW SUBMARINE!");
    assert!(padded[17..].iter().all(|&b| b == 15));

    let padded = Pkcs7Padding::pad(b"abcde", 8);
    assert_eq!(padded, b"abcde\x03\x03\x03");
}

#[test]
fn test_pad_aligned_input_gets_full_block() {
    let padded = Pkcs7Padding::pad(&[0x11; 16], 16);
    assert_eq!(padded.len(), 32);
    assert_eq!(&padded[16..], &[16u8; 16]);

    let padded = Pkcs7Padding::pad(&[], 8);
    assert_eq!(padded, vec![8u8; 8]);
}

#[test]
fn test_unpad_recovers_input() {
    for len in [0usize, 1, 7, 8, 9, 15, 16, 17, 33] {
        let data: Vec<u8> = (0..len as u8).collect();
        for block_size in [8usize, 16] {
            let padded = Pkcs7Padding::pad(&data, block_size);
            assert!(padded.len().is_multiple_of(block_size));
            let unpadded = Pkcs7Padding::unpad(&padded, block_size).expect("valid padding");
            assert_eq!(unpadded, data.as_slice(), "len {len} block {block_size}");
        }
    }
}

#[test]
fn test_unpad_rejects_inconsistent_bytes() {
    let mut padded = Pkcs7Padding::pad(b"hello", 16);
    padded[12] ^= 0x01;
    assert_eq!(
        Pkcs7Padding::unpad(&padded, 16),
        Err(CryptoError::InvalidPadding)
    );
}

#[test]
fn test_unpad_rejects_zero_and_oversized_pad() {
    let mut block = [0x41u8; 16];
    block[15] = 0;
    assert_eq!(Pkcs7Padding::unpad(&block, 16), Err(CryptoError::InvalidPadding));

    block[15] = 17;
    assert_eq!(Pkcs7Padding::unpad(&block, 16), Err(CryptoError::InvalidPadding));

    let block = [9u8; 8];
    assert_eq!(Pkcs7Padding::unpad(&block, 8), Err(CryptoError::InvalidPadding));
}

#[test]
fn test_unpad_rejects_misaligned_or_empty() {
    assert_eq!(Pkcs7Padding::unpad(&[], 16), Err(CryptoError::InvalidPadding));
    assert_eq!(
        Pkcs7Padding::unpad(&[1u8; 15], 16),
        Err(CryptoError::InvalidPadding)
    );
}

#[test]
fn test_unpad_full_padding_block() {
    let padded = [16u8; 16];
    assert_eq!(Pkcs7Padding::unpad(&padded, 16), Ok(&[][..]));
}
