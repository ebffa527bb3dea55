// Copyright (C) Microsoft Corporation. All rights reserved.

//! Counter-mode stream construction from raw block encryption.
//!
//! Used for stream modes (OFB, CFB, CTR) that the primitives cannot run
//! natively for an algorithm. The data is cut into chunks as long as the
//! nonce. For the chunk starting at byte offset `o`, the counter is the nonce
//! with its trailing two bytes replaced by
//! `(big-endian u16 of those bytes + o) mod 2^16`. The counter, zero-extended
//! to one cipher block, is encrypted and the result XORed over the chunk.
//!
//! Encryption and decryption are the same operation.
//!
//! Because only two counter bytes vary, offsets that differ by a multiple of
//! 65536 reuse a keystream block. Inputs longer than
//! [`CounterFallback::MAX_INPUT_LEN`] are therefore refused.

use super::*;

/// Manual counter-mode construction.
pub struct CounterFallback;

impl CounterFallback {
    /// Longest input whose chunk counters are all distinct.
    pub const MAX_INPUT_LEN: usize = 1 << 16;

    /// Number of trailing nonce bytes that carry the counter.
    const COUNTER_BYTES: usize = 2;

    /// Returns the counter for the chunk starting at byte `offset`.
    ///
    /// The result has the nonce's length.
    pub fn counter_for_offset(nonce: &[u8], offset: usize) -> Vec<u8> {
        let mut counter = nonce.to_vec();
        Self::write_counter(nonce, offset, &mut counter);
        counter
    }

    /// Encrypts or decrypts `input` under `nonce`.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidIVLength`] if the nonce is shorter than the
    ///   counter or longer than one block
    /// - [`CryptoError::FallbackLengthExceeded`] if the input is longer than
    ///   [`Self::MAX_INPUT_LEN`]
    /// - Any error of [`PrimitivesOp::encrypt_blocks`]
    #[tracing::instrument(skip_all, fields(algorithm = %algorithm.algorithm(), len = input.len()))]
    pub fn apply<P: PrimitivesOp + ?Sized>(
        primitives: &P,
        algorithm: &AlgorithmInfo,
        key: &SecretKey,
        nonce: &[u8],
        input: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let block_size = algorithm.block_size();
        if nonce.len() < Self::COUNTER_BYTES || nonce.len() > block_size {
            tracing::error!(nonce_len = nonce.len(), block_size, "Nonce unusable for counter fallback");
            return Err(CryptoError::InvalidIVLength {
                expected: block_size,
                actual: nonce.len(),
            });
        }
        if input.len() > Self::MAX_INPUT_LEN {
            tracing::error!("Input would wrap the fallback counter");
            return Err(CryptoError::FallbackLengthExceeded {
                len: input.len(),
                max: Self::MAX_INPUT_LEN,
            });
        }

        if input.is_empty() {
            return Ok(Vec::new());
        }

        let chunk_len = nonce.len();
        let chunks = input.len().div_ceil(chunk_len);

        // One zero-extended counter block per chunk, encrypted in a single call.
        let mut counters = vec![0u8; chunks * block_size];
        for (index, counter_block) in counters.chunks_exact_mut(block_size).enumerate() {
            Self::write_counter(nonce, index * chunk_len, &mut counter_block[..chunk_len]);
        }
        let mut keystream = vec![0u8; counters.len()];
        primitives.encrypt_blocks(algorithm.algorithm(), key, &counters, &mut keystream)?;

        let output = input
            .chunks(chunk_len)
            .zip(keystream.chunks_exact(block_size))
            .flat_map(|(chunk, block)| chunk.iter().zip(block).map(|(byte, key)| byte ^ key))
            .collect();

        Ok(output)
    }

    fn write_counter(nonce: &[u8], offset: usize, counter: &mut [u8]) {
        let split = nonce.len() - Self::COUNTER_BYTES;
        let base = u16::from_be_bytes([nonce[split], nonce[split + 1]]);
        let value = ((base as usize + offset) & 0xFFFF) as u16;

        counter[..split].copy_from_slice(&nonce[..split]);
        counter[split..].copy_from_slice(&value.to_be_bytes());
    }
}

#[cfg(test)]
mod tests;
