// Copyright (C) Microsoft Corporation. All rights reserved.

//! Engine configuration.

use std::fmt;

use zeroize::Zeroizing;

use super::*;

/// Suite and optional key used to build an [`EncryptionEngine`].
///
/// Without a key the engine generates one of the suite's size.
#[derive(Clone)]
pub struct EngineConfig {
    suite: CipherSuite,
    key: Option<Zeroizing<Vec<u8>>>,
}

impl EngineConfig {
    /// Configuration with a generated key.
    pub fn new(suite: CipherSuite) -> Self {
        Self { suite, key: None }
    }

    /// Configuration from algorithm and mode names.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UnsupportedAlgorithm`] if the algorithm name is unknown
    /// - [`CryptoError::UnsupportedMode`] if the mode name is unknown
    pub fn from_names(algorithm: &str, mode: &str, key_bits: usize) -> Result<Self, CryptoError> {
        let algorithm = Algorithm::from_name(algorithm)
            .ok_or_else(|| CryptoError::UnsupportedAlgorithm(algorithm.to_string()))?;
        let mode =
            Mode::from_name(mode).ok_or_else(|| CryptoError::UnsupportedMode(mode.to_string()))?;
        Ok(Self::new(CipherSuite::new(algorithm, mode, key_bits)))
    }

    /// Uses `key` instead of generating one.
    ///
    /// The length is checked when the engine is built.
    pub fn with_key(mut self, key: &[u8]) -> Self {
        self.key = Some(Zeroizing::new(key.to_vec()));
        self
    }

    /// The configured suite.
    pub fn suite(&self) -> CipherSuite {
        self.suite
    }

    /// The supplied key, if any.
    pub fn key(&self) -> Option<&[u8]> {
        self.key.as_deref().map(Vec::as_slice)
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("suite", &self.suite)
            .field("key_supplied", &self.key.is_some())
            .finish()
    }
}
