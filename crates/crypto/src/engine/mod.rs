// Copyright (C) Microsoft Corporation. All rights reserved.

//! The encryption engine.
//!
//! An [`EncryptionEngine`] is built once from a [`Registry`] and an
//! [`EngineConfig`]. Construction resolves the suite, confirms or generates the
//! key and decides whether the mode runs natively or through
//! [`CounterFallback`]. Nothing is validated lazily: an engine that exists can
//! run every call its suite allows.
//!
//! # Encryption
//!
//! 1. Pad the plaintext (ECB, CBC)
//! 2. Draw a fresh IV or nonce
//! 3. Encrypt natively or with the counter fallback
//! 4. Pack `IV ‖ tag ‖ ciphertext`
//!
//! # Decryption
//!
//! The reverse. For GCM the tag is verified before any plaintext is returned,
//! and padding is checked before it is removed.
//!
//! # Threading
//!
//! The engine holds no mutable state. `encrypt` and `decrypt` take `&self` and
//! may run concurrently from several threads.

mod config;

use std::fmt;

pub use config::*;
use tracing::instrument;
use zeroize::Zeroizing;

use super::*;

/// Symmetric encryption engine for one cipher suite and key.
pub struct EncryptionEngine<P: PrimitivesOp = Primitives> {
    suite: CipherSuite,
    algorithm: AlgorithmInfo,
    mode: ModeInfo,
    key: SecretKey,
    primitives: P,
    fallback: bool,
}

impl EncryptionEngine<Primitives> {
    /// Builds an engine on the platform's default primitives.
    ///
    /// # Errors
    ///
    /// See [`EncryptionEngine::with_primitives`].
    pub fn new(registry: &Registry, config: EngineConfig) -> Result<Self, CryptoError> {
        Self::with_primitives(registry, config, Primitives::default())
    }
}

impl<P: PrimitivesOp> EncryptionEngine<P> {
    /// Builds an engine on the given primitives.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::UnsupportedAlgorithm`] if the algorithm is not registered
    /// - [`CryptoError::UnsupportedMode`] if the mode is not registered, cannot
    ///   drive the algorithm's block size, or is neither native nor a stream
    ///   mode the fallback can provide
    /// - [`CryptoError::InvalidKeySize`] if the key size is not allowed
    /// - [`CryptoError::InvalidKeyLength`] if the supplied key has the wrong
    ///   length
    /// - [`CryptoError::RngError`] if key generation fails
    #[instrument(skip_all, fields(suite = %config.suite()))]
    pub fn with_primitives(
        registry: &Registry,
        config: EngineConfig,
        primitives: P,
    ) -> Result<Self, CryptoError> {
        let suite = config.suite();
        let algorithm = registry.algorithm(suite.algorithm())?.clone();
        let mode = registry.mode(suite.mode())?.clone();

        if !mode.is_compatible(algorithm.block_size()) {
            tracing::error!(block_size = algorithm.block_size(), "Mode incompatible with block size");
            return Err(CryptoError::UnsupportedMode(suite.to_string()));
        }

        let key = KeyManager::validate_or_generate(&algorithm, suite.key_bits(), config.key())?;

        let fallback = if primitives.supports(suite.algorithm(), suite.mode()) {
            false
        } else if mode.is_stream() {
            true
        } else {
            tracing::error!("Mode is not native and has no fallback");
            return Err(CryptoError::UnsupportedMode(suite.to_string()));
        };

        tracing::debug!(fallback, "Engine configured");

        Ok(Self {
            suite,
            algorithm,
            mode,
            key,
            primitives,
            fallback,
        })
    }

    /// The engine's cipher suite.
    pub fn suite(&self) -> CipherSuite {
        self.suite
    }

    /// Registry entry of the block cipher.
    pub fn algorithm_info(&self) -> &AlgorithmInfo {
        &self.algorithm
    }

    /// Registry entry of the mode.
    pub fn mode_info(&self) -> &ModeInfo {
        &self.mode
    }

    /// The engine's key.
    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    /// Returns `true` if the mode runs through the counter fallback.
    pub fn uses_fallback(&self) -> bool {
        self.fallback
    }

    /// Envelope length for a plaintext of `plaintext_len` bytes.
    pub fn envelope_len(&self, plaintext_len: usize) -> usize {
        let block_size = self.algorithm.block_size();
        let body = if self.mode.is_padded() {
            (plaintext_len / block_size + 1) * block_size
        } else {
            plaintext_len
        };
        EnvelopePacker::prefix_len(&self.mode, block_size) + body
    }

    /// Encrypts `plaintext` into a new envelope.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::FallbackLengthExceeded`] if the counter fallback is in
    ///   use and the plaintext is too long for it
    /// - [`CryptoError::RngError`] if no IV could be generated
    /// - [`CryptoError::EncryptError`] if the primitives fail
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.seal(plaintext, None)
    }

    /// Encrypts `plaintext` and authenticates `aad` alongside it.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::AadNotSupported`] if `aad` is not empty and the mode is
    ///   not authenticated
    /// - Any error of [`EncryptionEngine::encrypt`]
    pub fn encrypt_with_aad(&self, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let aad = self.check_aad(aad)?;
        self.seal(plaintext, aad)
    }

    /// Decrypts an envelope produced by [`EncryptionEngine::encrypt`].
    ///
    /// # Errors
    ///
    /// - [`CryptoError::TruncatedEnvelope`] if the envelope is shorter than the
    ///   IV and tag
    /// - [`CryptoError::InvalidCiphertextLength`] if a padded mode's ciphertext
    ///   is empty or not block aligned
    /// - [`CryptoError::AuthenticationFailure`] if the GCM tag does not verify
    /// - [`CryptoError::InvalidPadding`] if the padding is malformed
    /// - [`CryptoError::FallbackLengthExceeded`] if the counter fallback is in
    ///   use and the ciphertext is too long for it
    /// - [`CryptoError::DecryptError`] if the primitives fail
    pub fn decrypt(&self, envelope: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.open(envelope, None)
    }

    /// Decrypts an envelope produced by [`EncryptionEngine::encrypt_with_aad`].
    ///
    /// # Errors
    ///
    /// - [`CryptoError::AadNotSupported`] if `aad` is not empty and the mode is
    ///   not authenticated
    /// - Any error of [`EncryptionEngine::decrypt`]
    pub fn decrypt_with_aad(&self, envelope: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let aad = self.check_aad(aad)?;
        self.open(envelope, aad)
    }

    fn check_aad<'a>(&self, aad: &'a [u8]) -> Result<Option<&'a [u8]>, CryptoError> {
        match (self.mode.is_aead(), aad.is_empty()) {
            (_, true) => Ok(None),
            (true, false) => Ok(Some(aad)),
            (false, false) => {
                tracing::error!(suite = %self.suite, "Associated data given to a mode without authentication");
                Err(CryptoError::AadNotSupported)
            }
        }
    }

    fn params<'a>(&'a self, iv: Option<&'a [u8]>, aad: Option<&'a [u8]>) -> CipherParams<'a> {
        CipherParams {
            algorithm: self.suite.algorithm(),
            mode: self.suite.mode(),
            key: &self.key,
            iv,
            aad,
        }
    }

    #[instrument(skip_all, fields(suite = %self.suite, len = plaintext.len()))]
    fn seal(&self, plaintext: &[u8], aad: Option<&[u8]>) -> Result<Vec<u8>, CryptoError> {
        let block_size = self.algorithm.block_size();

        let padded;
        let input = if self.mode.is_padded() {
            padded = Zeroizing::new(Pkcs7Padding::pad(plaintext, block_size));
            padded.as_slice()
        } else {
            plaintext
        };

        let iv = if self.mode.requires_iv() {
            Some(Rng::rand_vec(self.mode.iv_length(block_size))?)
        } else {
            None
        };

        let sealed = if self.fallback {
            tracing::debug!("Encrypting with counter fallback");
            let nonce = iv.as_deref().unwrap_or_default();
            SealedOutput {
                ciphertext: CounterFallback::apply(
                    &self.primitives,
                    &self.algorithm,
                    &self.key,
                    nonce,
                    input,
                )?,
                tag: None,
            }
        } else {
            self.primitives
                .encrypt(&self.params(iv.as_deref(), aad), input)
                .map_err(|err| {
                    tracing::error!(?err, "Native encryption failed");
                    err
                })?
        };

        EnvelopePacker::pack(
            &self.mode,
            block_size,
            iv.as_deref(),
            sealed.tag.as_deref(),
            &sealed.ciphertext,
        )
    }

    #[instrument(skip_all, fields(suite = %self.suite, len = envelope.len()))]
    fn open(&self, envelope: &[u8], aad: Option<&[u8]>) -> Result<Vec<u8>, CryptoError> {
        let block_size = self.algorithm.block_size();
        let parts = EnvelopePacker::unpack(envelope, &self.mode, block_size)?;

        if self.mode.is_padded()
            && (parts.ciphertext.is_empty() || parts.ciphertext.len() % block_size != 0)
        {
            tracing::error!(len = parts.ciphertext.len(), "Ciphertext not block aligned");
            return Err(CryptoError::InvalidCiphertextLength(parts.ciphertext.len()));
        }

        let plaintext = if self.fallback {
            tracing::debug!("Decrypting with counter fallback");
            CounterFallback::apply(
                &self.primitives,
                &self.algorithm,
                &self.key,
                parts.iv.unwrap_or_default(),
                parts.ciphertext,
            )?
        } else {
            self.primitives
                .decrypt(&self.params(parts.iv, aad), parts.tag, parts.ciphertext)?
        };

        if !self.mode.is_padded() {
            return Ok(plaintext);
        }

        let padded = Zeroizing::new(plaintext);
        Pkcs7Padding::unpad(&padded, block_size).map(<[u8]>::to_vec)
    }
}

impl<P: PrimitivesOp> fmt::Debug for EncryptionEngine<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionEngine")
            .field("suite", &self.suite)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}
