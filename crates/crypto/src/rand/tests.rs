// Copyright (C) Microsoft Corporation. All rights reserved.

use test_with_tracing::test;

use super::*;

/// The generator fills a buffer and the output is not all zeros.
#[test]
fn test_rand_bytes() {
    let mut buf = [0u8; 1024];
    assert!(Rng::rand_bytes(&mut buf).is_ok());
    assert_ne!(buf, [0u8; 1024]);
}

/// Vectors have the requested length; a zero-length request is empty.
#[test]
fn test_rand_vec() {
    let vec = Rng::rand_vec(1024).expect("Failed to generate random vector");
    assert_eq!(vec.len(), 1024);
    assert_ne!(vec, vec![0u8; 1024]);

    let empty = Rng::rand_vec(0).expect("Failed to generate random vector");
    assert!(empty.is_empty());
}

#[test]
fn test_rand_vec_distinct() {
    let a = Rng::rand_vec(16).expect("Failed to generate random vector");
    let b = Rng::rand_vec(16).expect("Failed to generate random vector");
    assert_ne!(a, b);
}
