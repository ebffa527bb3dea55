// Copyright (C) Microsoft Corporation. All rights reserved.

//! Algorithm and mode registries.
//!
//! The [`Registry`] is the single source of truth for cipher and mode
//! properties. It is built once, never mutated, and handed by reference to
//! every engine that is constructed from it.
//!
//! # Lookups
//!
//! - [`Registry::lookup_algorithm`]: allowed key sizes and block size
//! - [`Registry::lookup_mode`]: IV length, AEAD tag length and padding policy
//!
//! Names are matched without regard to case.

mod algorithm;
mod mode;

use std::fmt;

pub use algorithm::*;
pub use mode::*;

use super::*;

/// Immutable table of supported algorithms and modes.
#[derive(Debug, Clone)]
pub struct Registry {
    algorithms: Vec<AlgorithmInfo>,
    modes: Vec<ModeInfo>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

impl Registry {
    /// Builds the registry of AES and TripleDES with the six supported modes.
    pub fn standard() -> Self {
        Self {
            algorithms: vec![AlgorithmInfo::aes(), AlgorithmInfo::triple_des()],
            modes: Mode::ALL.iter().map(Mode::info).collect(),
        }
    }

    /// Looks up an algorithm by name.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedAlgorithm`] if the name is unknown.
    pub fn lookup_algorithm(&self, name: &str) -> Result<&AlgorithmInfo, CryptoError> {
        Algorithm::from_name(name)
            .and_then(|algorithm| self.find_algorithm(algorithm))
            .ok_or_else(|| CryptoError::UnsupportedAlgorithm(name.to_string()))
    }

    /// Looks up a mode by name.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedMode`] if the name is unknown.
    pub fn lookup_mode(&self, name: &str) -> Result<&ModeInfo, CryptoError> {
        Mode::from_name(name)
            .and_then(|mode| self.find_mode(mode))
            .ok_or_else(|| CryptoError::UnsupportedMode(name.to_string()))
    }

    /// Returns the entry for an algorithm.
    pub fn algorithm(&self, algorithm: Algorithm) -> Result<&AlgorithmInfo, CryptoError> {
        self.find_algorithm(algorithm)
            .ok_or_else(|| CryptoError::UnsupportedAlgorithm(algorithm.to_string()))
    }

    /// Returns the entry for a mode.
    pub fn mode(&self, mode: Mode) -> Result<&ModeInfo, CryptoError> {
        self.find_mode(mode)
            .ok_or_else(|| CryptoError::UnsupportedMode(mode.to_string()))
    }

    /// All registered algorithms.
    pub fn algorithms(&self) -> impl Iterator<Item = &AlgorithmInfo> {
        self.algorithms.iter()
    }

    /// All registered modes.
    pub fn modes(&self) -> impl Iterator<Item = &ModeInfo> {
        self.modes.iter()
    }

    fn find_algorithm(&self, algorithm: Algorithm) -> Option<&AlgorithmInfo> {
        self.algorithms
            .iter()
            .find(|info| info.algorithm() == algorithm)
    }

    fn find_mode(&self, mode: Mode) -> Option<&ModeInfo> {
        self.modes.iter().find(|info| info.mode() == mode)
    }
}
