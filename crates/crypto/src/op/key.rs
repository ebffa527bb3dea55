// Copyright (C) Microsoft Corporation. All rights reserved.

//! Key traits.
//!
//! - [`Key`]: size queries shared by every key type
//! - [`ImportableKey`]: construction from raw bytes
//! - [`ExportableKey`]: copying raw bytes out with the size-query pattern
//! - [`KeyGenerationOp`]: generation from the secure random source

use super::*;

/// Base trait for keys.
pub trait Key {
    /// Returns the length of the key in bytes.
    fn size(&self) -> usize;

    /// Returns the length of the key in bits.
    fn bits(&self) -> usize {
        self.size() * 8
    }
}

/// Keys that can be created from raw bytes.
pub trait ImportableKey: Key + Sized {
    /// Imports a key from its raw byte representation.
    ///
    /// # Errors
    ///
    /// Implementations reject byte strings that cannot form a valid key.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError>;
}

/// Keys whose raw bytes can be exported.
pub trait ExportableKey: Key {
    /// Exports the key.
    ///
    /// Call with `None` to query the required buffer size, then again with a
    /// buffer of at least that size.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyLength`] if the buffer is too small.
    fn to_bytes(&self, bytes: Option<&mut [u8]>) -> Result<usize, CryptoError>;

    /// Exports the key into a new vector.
    fn to_vec(&self) -> Result<Vec<u8>, CryptoError> {
        let len = self.to_bytes(None)?;
        let mut bytes = vec![0u8; len];
        let written = self.to_bytes(Some(&mut bytes))?;
        bytes.truncate(written);
        Ok(bytes)
    }
}

/// Generation of fresh keys.
pub trait KeyGenerationOp {
    /// The generated key type.
    type Key: Key;

    /// Generates a key of `size` bytes from the secure random source.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RngError`] if random generation fails.
    fn generate(size: usize) -> Result<Self::Key, CryptoError>;
}
