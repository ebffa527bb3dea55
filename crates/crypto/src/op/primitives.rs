// Copyright (C) Microsoft Corporation. All rights reserved.

//! Block cipher primitives.
//!
//! [`PrimitivesOp`] is the contract between the engine and a cryptographic
//! library. A backend provides:
//!
//! - Raw single-block encryption and decryption
//! - Mode-aware encryption and decryption for the modes it implements
//! - A capability query, [`PrimitivesOp::supports`], that tells the engine
//!   ahead of time whether a mode runs natively or must use the counter
//!   fallback
//!
//! Padding is never applied by a backend; inputs to ECB and CBC are already
//! block aligned.

use super::*;

/// Parameters of a single mode-aware operation.
#[derive(Debug, Clone, Copy)]
pub struct CipherParams<'a> {
    /// Block cipher to run.
    pub algorithm: Algorithm,
    /// Mode of operation.
    pub mode: Mode,
    /// Key material.
    pub key: &'a SecretKey,
    /// IV or nonce, for modes that take one.
    pub iv: Option<&'a [u8]>,
    /// Associated data, for AEAD modes.
    pub aad: Option<&'a [u8]>,
}

/// Output of a mode-aware encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedOutput {
    /// The ciphertext, as long as the input.
    pub ciphertext: Vec<u8>,
    /// The authentication tag, for AEAD modes.
    pub tag: Option<Vec<u8>>,
}

/// Cryptographic primitives used by the engine.
///
/// Implementations must be safe to share between threads; the engine calls
/// them concurrently through `&self`.
pub trait PrimitivesOp: Send + Sync {
    /// Returns `true` if `mode` can run natively for `algorithm`.
    fn supports(&self, algorithm: Algorithm, mode: Mode) -> bool;

    /// Encrypts exactly one block without any mode.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidKeyLength`] if the key does not fit the algorithm
    /// - [`CryptoError::EncryptError`] if `block` or `output` is not one block
    ///   or the library fails
    fn encrypt_block(
        &self,
        algorithm: Algorithm,
        key: &SecretKey,
        block: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError>;

    /// Encrypts a run of whole blocks independently, as ECB without padding.
    ///
    /// The default implementation calls [`PrimitivesOp::encrypt_block`] once
    /// per block; backends override it to reuse one keyed context.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidKeyLength`] if the key does not fit the algorithm
    /// - [`CryptoError::EncryptError`] if `blocks` is not block aligned, if
    ///   `output` differs in length, or if the library fails
    fn encrypt_blocks(
        &self,
        algorithm: Algorithm,
        key: &SecretKey,
        blocks: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        let block_size = algorithm.block_size();
        if blocks.len() % block_size != 0 || output.len() != blocks.len() {
            return Err(CryptoError::EncryptError);
        }
        for (block, out) in blocks
            .chunks_exact(block_size)
            .zip(output.chunks_exact_mut(block_size))
        {
            self.encrypt_block(algorithm, key, block, out)?;
        }
        Ok(())
    }

    /// Decrypts exactly one block without any mode.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidKeyLength`] if the key does not fit the algorithm
    /// - [`CryptoError::DecryptError`] if `block` or `output` is not one block
    ///   or the library fails
    fn decrypt_block(
        &self,
        algorithm: Algorithm,
        key: &SecretKey,
        block: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError>;

    /// Encrypts `input` with a natively supported mode.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UnsupportedMode`] if the mode is not native
    /// - [`CryptoError::InvalidIVLength`] if the IV does not fit the mode
    /// - [`CryptoError::EncryptError`] if the library fails
    fn encrypt(&self, params: &CipherParams<'_>, input: &[u8])
        -> Result<SealedOutput, CryptoError>;

    /// Decrypts `input` with a natively supported mode, verifying `tag` for
    /// AEAD modes.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UnsupportedMode`] if the mode is not native
    /// - [`CryptoError::InvalidIVLength`] if the IV does not fit the mode
    /// - [`CryptoError::InvalidTagLength`] if the tag is missing or malformed
    /// - [`CryptoError::AuthenticationFailure`] if the tag does not verify
    /// - [`CryptoError::DecryptError`] if the library fails
    fn decrypt(
        &self,
        params: &CipherParams<'_>,
        tag: Option<&[u8]>,
        input: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;
}
