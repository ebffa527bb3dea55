// Copyright (C) Microsoft Corporation. All rights reserved.

//! Envelope wire format.
//!
//! An envelope is the concatenation `IV ‖ tag ‖ ciphertext` with no length
//! prefixes. Which parts are present, and how long they are, follows from the
//! mode and the cipher's block size:
//!
//! | Mode | IV | Tag |
//! |---|---|---|
//! | ECB | none | none |
//! | CBC, OFB, CFB | one block | none |
//! | CTR | 8 bytes | none |
//! | GCM | 12 bytes | 16 bytes |

use super::*;

/// Borrowed parts of an unpacked envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeParts<'a> {
    /// IV or nonce, for modes that take one.
    pub iv: Option<&'a [u8]>,
    /// Authentication tag, for AEAD modes.
    pub tag: Option<&'a [u8]>,
    /// The ciphertext.
    pub ciphertext: &'a [u8],
}

/// Packs and unpacks envelopes.
pub struct EnvelopePacker;

impl EnvelopePacker {
    /// Length of the IV and tag prefix for a mode.
    pub fn prefix_len(mode: &ModeInfo, block_size: usize) -> usize {
        mode.iv_length(block_size) + mode.tag_length().unwrap_or(0)
    }

    /// Builds an envelope.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidIVLength`] if the IV is missing, unexpected or
    ///   of the wrong length
    /// - [`CryptoError::InvalidTagLength`] if the tag is missing, unexpected or
    ///   of the wrong length
    pub fn pack(
        mode: &ModeInfo,
        block_size: usize,
        iv: Option<&[u8]>,
        tag: Option<&[u8]>,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let iv_len = mode.iv_length(block_size);
        let actual_iv = iv.map_or(0, <[u8]>::len);
        if iv.is_some() != mode.requires_iv() || actual_iv != iv_len {
            return Err(CryptoError::InvalidIVLength {
                expected: iv_len,
                actual: actual_iv,
            });
        }

        let tag_len = mode.tag_length().unwrap_or(0);
        let actual_tag = tag.map_or(0, <[u8]>::len);
        if tag.is_some() != mode.is_aead() || actual_tag != tag_len {
            return Err(CryptoError::InvalidTagLength {
                expected: tag_len,
                actual: actual_tag,
            });
        }

        let mut envelope = Vec::with_capacity(iv_len + tag_len + ciphertext.len());
        envelope.extend_from_slice(iv.unwrap_or_default());
        envelope.extend_from_slice(tag.unwrap_or_default());
        envelope.extend_from_slice(ciphertext);
        Ok(envelope)
    }

    /// Splits an envelope into its parts.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::TruncatedEnvelope`] if the envelope is shorter
    /// than the mode's IV and tag prefix.
    pub fn unpack<'a>(
        envelope: &'a [u8],
        mode: &ModeInfo,
        block_size: usize,
    ) -> Result<EnvelopeParts<'a>, CryptoError> {
        let required = Self::prefix_len(mode, block_size);
        if envelope.len() < required {
            tracing::error!(required, actual = envelope.len(), "Envelope truncated");
            return Err(CryptoError::TruncatedEnvelope {
                required,
                actual: envelope.len(),
            });
        }

        let (iv, rest) = envelope.split_at(mode.iv_length(block_size));
        let (tag, ciphertext) = rest.split_at(mode.tag_length().unwrap_or(0));

        Ok(EnvelopeParts {
            iv: mode.requires_iv().then_some(iv),
            tag: mode.is_aead().then_some(tag),
            ciphertext,
        })
    }
}

#[cfg(test)]
mod tests;
