// Copyright (C) Microsoft Corporation. All rights reserved.

//! Supported block ciphers.

use super::*;

/// Block cipher algorithms known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// AES with a 128-bit block.
    Aes,
    /// Triple DES (EDE) with a 64-bit block.
    TripleDes,
}

impl Algorithm {
    /// Canonical name used in cipher suite strings.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Aes => "AES",
            Algorithm::TripleDes => "TripleDES",
        }
    }

    /// Block size in bytes.
    pub fn block_size(&self) -> usize {
        match self {
            Algorithm::Aes => 16,
            Algorithm::TripleDes => 8,
        }
    }

    /// Resolves an algorithm name, ignoring case and accepting the common
    /// aliases for Triple DES.
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "AES" => Some(Algorithm::Aes),
            "TRIPLEDES" | "3DES" | "DES3" | "TDES" | "DES-EDE3" => Some(Algorithm::TripleDes),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static properties of a block cipher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmInfo {
    algorithm: Algorithm,
    key_sizes: &'static [usize],
    block_size: usize,
}

impl AlgorithmInfo {
    const AES_KEY_SIZES: &'static [usize] = &[128, 192, 256];
    const TDES_KEY_SIZES: &'static [usize] = &[64, 128, 192];

    pub(crate) fn aes() -> Self {
        Self {
            algorithm: Algorithm::Aes,
            key_sizes: Self::AES_KEY_SIZES,
            block_size: Algorithm::Aes.block_size(),
        }
    }

    pub(crate) fn triple_des() -> Self {
        Self {
            algorithm: Algorithm::TripleDes,
            key_sizes: Self::TDES_KEY_SIZES,
            block_size: Algorithm::TripleDes.block_size(),
        }
    }

    /// The algorithm described by this entry.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Allowed key sizes in bits.
    pub fn allowed_key_sizes(&self) -> &'static [usize] {
        self.key_sizes
    }

    /// Block size in bytes.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns `true` if `bits` is one of the allowed key sizes.
    pub fn allows_key_size(&self, bits: usize) -> bool {
        self.key_sizes.contains(&bits)
    }
}
