// Copyright (C) Microsoft Corporation. All rights reserved.

//! PKCS#7 padding for block-aligned modes.
//!
//! Padding always adds between 1 and `block_size` bytes, each holding the
//! number of bytes added. Input that is already block aligned gains a full
//! block of padding, so removal can always tell padding from data.

use super::*;

/// PKCS#7 padding codec.
pub struct Pkcs7Padding;

impl Pkcs7Padding {
    /// Returns `data` followed by its padding.
    pub fn pad(data: &[u8], block_size: usize) -> Vec<u8> {
        debug_assert!((1..=255).contains(&block_size));
        let pad_len = block_size - data.len() % block_size;
        let mut padded = Vec::with_capacity(data.len() + pad_len);
        padded.extend_from_slice(data);
        padded.resize(data.len() + pad_len, pad_len as u8);
        padded
    }

    /// Returns `padded` without its padding.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPadding`] if the input is empty or not
    /// block aligned, if the pad length is zero or larger than a block, or if
    /// any pad byte disagrees with the pad length.
    pub fn unpad(padded: &[u8], block_size: usize) -> Result<&[u8], CryptoError> {
        if padded.is_empty() || padded.len() % block_size != 0 {
            return Err(CryptoError::InvalidPadding);
        }

        let pad_len = padded[padded.len() - 1] as usize;
        if pad_len == 0 || pad_len > block_size || pad_len > padded.len() {
            return Err(CryptoError::InvalidPadding);
        }

        let (data, pad) = padded.split_at(padded.len() - pad_len);
        // Every pad byte is inspected before deciding.
        let mismatch = pad.iter().fold(0u8, |acc, &b| acc | (b ^ pad_len as u8));
        if mismatch != 0 {
            return Err(CryptoError::InvalidPadding);
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests;
