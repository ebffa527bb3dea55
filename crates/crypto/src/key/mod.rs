// Copyright (C) Microsoft Corporation. All rights reserved.

//! Key material and key management.
//!
//! [`SecretKey`] holds raw key bytes in memory that is zeroed on drop. Its
//! `Debug` output shows only the length so keys never reach logs.
//!
//! [`KeyManager`] checks a supplied key against the algorithm's allowed key
//! sizes, or generates a fresh key of the requested size.

use std::fmt;

use zeroize::Zeroizing;

use super::*;

/// Symmetric key material.
pub struct SecretKey {
    key: Zeroizing<Vec<u8>>,
}

impl SecretKey {
    /// Raw key bytes, for use by primitive backends.
    pub fn bytes(&self) -> &[u8] {
        &self.key
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(len={})", self.key.len())
    }
}

impl Key for SecretKey {
    fn size(&self) -> usize {
        self.key.len()
    }
}

/// Imports any byte string; the size is checked by [`KeyManager`].
impl ImportableKey for SecretKey {
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self {
            key: Zeroizing::new(bytes.to_vec()),
        })
    }
}

impl ExportableKey for SecretKey {
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError> {
        let key_len = self.key.len();
        if let Some(bytes) = bytes {
            if bytes.len() < key_len {
                return Err(CryptoError::InvalidKeyLength {
                    expected: key_len,
                    actual: bytes.len(),
                });
            }
            bytes[..key_len].copy_from_slice(&self.key);
        }
        Ok(key_len)
    }
}

impl KeyGenerationOp for SecretKey {
    type Key = Self;

    fn generate(size: usize) -> Result<Self::Key, CryptoError> {
        let mut key = Zeroizing::new(vec![0u8; size]);
        Rng::rand_bytes(&mut key)?;
        Ok(Self { key })
    }
}

/// Validates or generates engine keys.
pub struct KeyManager;

impl KeyManager {
    /// Returns a key of `key_bits` bits for `algorithm`.
    ///
    /// If `key` is supplied it is checked and copied; otherwise a new key is
    /// drawn from the secure random source.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidKeySize`] if `key_bits` is not allowed for the
    ///   algorithm
    /// - [`CryptoError::InvalidKeyLength`] if the supplied key is not exactly
    ///   `key_bits / 8` bytes
    /// - [`CryptoError::RngError`] if key generation fails
    pub fn validate_or_generate(
        algorithm: &AlgorithmInfo,
        key_bits: usize,
        key: Option<&[u8]>,
    ) -> Result<SecretKey, CryptoError> {
        if !algorithm.allows_key_size(key_bits) {
            tracing::error!(
                algorithm = %algorithm.algorithm(),
                key_bits,
                "Key size not allowed for algorithm"
            );
            return Err(CryptoError::InvalidKeySize(key_bits));
        }

        let expected = key_bits / 8;
        match key {
            Some(bytes) if bytes.len() != expected => {
                tracing::error!(expected, actual = bytes.len(), "Supplied key has wrong length");
                Err(CryptoError::InvalidKeyLength {
                    expected,
                    actual: bytes.len(),
                })
            }
            Some(bytes) => SecretKey::from_bytes(bytes),
            None => {
                tracing::debug!(key_bits, "Generating random key");
                SecretKey::generate(expected)
            }
        }
    }
}
