// Copyright (C) Microsoft Corporation. All rights reserved.

//! Symmetric encryption engine.
//!
//! This crate turns a cipher suite description (algorithm, mode of operation and
//! key size) and a key into an engine that produces and consumes self-describing
//! encrypted envelopes. It covers:
//!
//! - **Registry**: Supported block ciphers (AES, TripleDES) and modes (ECB, CBC,
//!   OFB, CFB, CTR, GCM) with their key sizes, IV lengths and tag lengths
//! - **Keys**: Validation of supplied keys and generation of fresh random keys
//! - **Padding**: PKCS#7 padding for the block-aligned modes
//! - **Fallback**: A counter-mode stream construction built from raw block
//!   encryption, used when the primitives cannot run a mode natively
//! - **Envelope**: Packing and unpacking of `IV ‖ tag ‖ ciphertext`
//! - **Engine**: The orchestrator exposing `encrypt` and `decrypt`
//!
//! # Platform Support
//!
//! Primitive operations are provided by OpenSSL on unix targets.
//!
//! # Example
//!
//! ```
//! use symkit_crypto::{CipherSuite, EncryptionEngine, EngineConfig, Registry};
//!
//! let registry = Registry::standard();
//! let suite: CipherSuite = "AES-256-CBC".parse().expect("valid suite");
//! let engine = EncryptionEngine::new(&registry, EngineConfig::new(suite)).expect("engine");
//!
//! let envelope = engine.encrypt(b"This is a secret message.").expect("encrypt");
//! assert_eq!(engine.decrypt(&envelope).expect("decrypt"), b"This is a secret message.");
//! ```

#![forbid(unsafe_code)]

mod engine;
mod envelope;
mod fallback;
mod key;
mod op;
mod padding;
mod primitives;
mod rand;
mod registry;
mod suite;

pub use engine::*;
pub use envelope::*;
pub use fallback::*;
pub use key::*;
pub use op::*;
pub use padding::*;
pub use primitives::*;
pub use rand::*;
pub use registry::*;
pub use suite::*;
use thiserror::Error;

/// Error type for every operation of the engine and its components.
///
/// Configuration errors (`UnsupportedAlgorithm`, `UnsupportedMode`,
/// `InvalidKeySize`, `InvalidKeyLength`, `InvalidSuite`) are only produced while
/// an engine is being constructed. The remaining variants are reported per call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    // Configuration errors
    /// The algorithm name is not in the registry.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// The mode name is not in the registry, or the mode cannot be used with
    /// the chosen algorithm.
    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),
    /// The key size in bits is not allowed for the algorithm.
    #[error("invalid key size: {0} bits")]
    InvalidKeySize(usize),
    /// The supplied key does not have the byte length implied by the key size.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Required key length in bytes.
        expected: usize,
        /// Length of the supplied key in bytes.
        actual: usize,
    },
    /// A cipher suite string could not be parsed.
    #[error("invalid cipher suite: {0}")]
    InvalidSuite(String),

    // Per-call errors
    /// The IV or nonce length does not match the mode.
    #[error("invalid IV length: expected {expected} bytes, got {actual}")]
    InvalidIVLength {
        /// Length required by the mode.
        expected: usize,
        /// Length that was provided.
        actual: usize,
    },
    /// The authentication tag length does not match the mode.
    #[error("invalid tag length: expected {expected} bytes, got {actual}")]
    InvalidTagLength {
        /// Length required by the mode.
        expected: usize,
        /// Length that was provided.
        actual: usize,
    },
    /// The envelope is shorter than the IV and tag prefix of the mode.
    #[error("truncated envelope: need at least {required} bytes, got {actual}")]
    TruncatedEnvelope {
        /// Minimum envelope length for the mode.
        required: usize,
        /// Actual envelope length.
        actual: usize,
    },
    /// The ciphertext of a block-aligned mode is empty or not a multiple of the
    /// block size.
    #[error("invalid ciphertext length {0}")]
    InvalidCiphertextLength(usize),
    /// The trailing padding bytes are inconsistent.
    #[error("invalid padding")]
    InvalidPadding,
    /// The authentication tag did not verify.
    #[error("authentication failure")]
    AuthenticationFailure,
    /// Associated data was supplied for a mode without authentication.
    #[error("associated data requires an AEAD mode")]
    AadNotSupported,
    /// The input is too long for the counter fallback: its 16-bit counters
    /// would repeat.
    #[error("input of {len} bytes exceeds the counter fallback limit of {max} bytes")]
    FallbackLengthExceeded {
        /// Input length in bytes.
        len: usize,
        /// Maximum supported input length in bytes.
        max: usize,
    },

    // Primitive errors
    /// Random number generation failed.
    #[error("random number generation failed")]
    RngError,
    /// The underlying primitive failed to encrypt.
    #[error("encryption failed")]
    EncryptError,
    /// The underlying primitive failed to decrypt.
    #[error("decryption failed")]
    DecryptError,
}
