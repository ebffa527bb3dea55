// Copyright (C) Microsoft Corporation. All rights reserved.

//! Cipher suite descriptions.
//!
//! A [`CipherSuite`] names an algorithm, a mode and a key size. Its textual
//! form is `ALGORITHM-BITS-MODE`, for example `AES-256-GCM` or
//! `TripleDES-192-CBC`.

use std::fmt;
use std::str::FromStr;

use super::*;

/// Algorithm, mode and key size of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CipherSuite {
    algorithm: Algorithm,
    mode: Mode,
    key_bits: usize,
}

impl CipherSuite {
    /// Creates a suite description.
    ///
    /// The key size is checked against the algorithm when an engine is built
    /// from the suite, not here.
    pub fn new(algorithm: Algorithm, mode: Mode, key_bits: usize) -> Self {
        Self {
            algorithm,
            mode,
            key_bits,
        }
    }

    /// Creates a suite from algorithm and mode names resolved through the
    /// registry.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UnsupportedAlgorithm`] if the algorithm is unknown
    /// - [`CryptoError::UnsupportedMode`] if the mode is unknown
    pub fn from_names(
        registry: &Registry,
        algorithm: &str,
        mode: &str,
        key_bits: usize,
    ) -> Result<Self, CryptoError> {
        let algorithm = registry.lookup_algorithm(algorithm)?.algorithm();
        let mode = registry.lookup_mode(mode)?.mode();
        Ok(Self::new(algorithm, mode, key_bits))
    }

    /// The block cipher.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The mode of operation.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Key size in bits.
    pub fn key_bits(&self) -> usize {
        self.key_bits
    }

    /// Key size in bytes.
    pub fn key_len(&self) -> usize {
        self.key_bits / 8
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.algorithm, self.key_bits, self.mode)
    }
}

impl FromStr for CipherSuite {
    type Err = CryptoError;

    /// Parses `ALGORITHM-BITS-MODE`. The algorithm part may itself contain
    /// dashes (`DES-EDE3-192-CBC`), so the string is split from the right.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().rsplitn(3, '-');
        let (Some(mode), Some(bits), Some(algorithm)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(CryptoError::InvalidSuite(s.to_string()));
        };

        let key_bits = bits
            .parse::<usize>()
            .map_err(|_| CryptoError::InvalidSuite(s.to_string()))?;
        let algorithm = Algorithm::from_name(algorithm)
            .ok_or_else(|| CryptoError::UnsupportedAlgorithm(algorithm.to_string()))?;
        let mode =
            Mode::from_name(mode).ok_or_else(|| CryptoError::UnsupportedMode(mode.to_string()))?;

        Ok(Self::new(algorithm, mode, key_bits))
    }
}

#[cfg(test)]
mod tests;
