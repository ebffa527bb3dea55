// Copyright (C) Microsoft Corporation. All rights reserved.

//! OpenSSL-based cipher primitives.
//!
//! # Native Modes
//!
//! | Algorithm | ECB | CBC | OFB | CFB | CTR | GCM |
//! |---|---|---|---|---|---|---|
//! | AES | yes | yes | yes | yes (128-bit segments) | yes | yes |
//! | TripleDES | yes | yes | yes | yes (64-bit segments) | no | no |
//!
//! TripleDES CTR is left to the counter fallback, and GCM is undefined for a
//! 64-bit block.
//!
//! # Keys
//!
//! TripleDES accepts 8, 16 and 24 byte keys. Shorter keys are expanded to the
//! three-key form OpenSSL expects: `K` becomes `K ‖ K ‖ K` and `K1 ‖ K2`
//! becomes `K1 ‖ K2 ‖ K1`.
//!
//! # Counter Blocks
//!
//! The 8-byte CTR nonce is followed by a 64-bit big-endian block counter
//! starting at zero to form the 16-byte AES counter block.

use openssl::cipher::*;
use openssl::cipher_ctx::*;
use zeroize::Zeroizing;

use super::*;

/// OpenSSL cipher primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsslPrimitives;

impl OsslPrimitives {
    const GCM_TAG_SIZE: usize = 16;

    /// Selects the OpenSSL cipher for an algorithm, mode and expanded key
    /// length.
    fn cipher(
        algorithm: Algorithm,
        mode: Mode,
        key_len: usize,
    ) -> Result<&'static CipherRef, CryptoError> {
        match (algorithm, mode, key_len) {
            (Algorithm::Aes, Mode::Ecb, 16) => Ok(Cipher::aes_128_ecb()),
            (Algorithm::Aes, Mode::Ecb, 24) => Ok(Cipher::aes_192_ecb()),
            (Algorithm::Aes, Mode::Ecb, 32) => Ok(Cipher::aes_256_ecb()),
            (Algorithm::Aes, Mode::Cbc, 16) => Ok(Cipher::aes_128_cbc()),
            (Algorithm::Aes, Mode::Cbc, 24) => Ok(Cipher::aes_192_cbc()),
            (Algorithm::Aes, Mode::Cbc, 32) => Ok(Cipher::aes_256_cbc()),
            (Algorithm::Aes, Mode::Ofb, 16) => Ok(Cipher::aes_128_ofb()),
            (Algorithm::Aes, Mode::Ofb, 24) => Ok(Cipher::aes_192_ofb()),
            (Algorithm::Aes, Mode::Ofb, 32) => Ok(Cipher::aes_256_ofb()),
            (Algorithm::Aes, Mode::Cfb, 16) => Ok(Cipher::aes_128_cfb128()),
            (Algorithm::Aes, Mode::Cfb, 24) => Ok(Cipher::aes_192_cfb128()),
            (Algorithm::Aes, Mode::Cfb, 32) => Ok(Cipher::aes_256_cfb128()),
            (Algorithm::Aes, Mode::Ctr, 16) => Ok(Cipher::aes_128_ctr()),
            (Algorithm::Aes, Mode::Ctr, 24) => Ok(Cipher::aes_192_ctr()),
            (Algorithm::Aes, Mode::Ctr, 32) => Ok(Cipher::aes_256_ctr()),
            (Algorithm::Aes, Mode::Gcm, 16) => Ok(Cipher::aes_128_gcm()),
            (Algorithm::Aes, Mode::Gcm, 24) => Ok(Cipher::aes_192_gcm()),
            (Algorithm::Aes, Mode::Gcm, 32) => Ok(Cipher::aes_256_gcm()),
            (Algorithm::TripleDes, Mode::Ecb, 24) => Ok(Cipher::des_ede3()),
            (Algorithm::TripleDes, Mode::Cbc, 24) => Ok(Cipher::des_ede3_cbc()),
            (Algorithm::TripleDes, Mode::Ofb, 24) => Ok(Cipher::des_ede3_ofb()),
            (Algorithm::TripleDes, Mode::Cfb, 24) => Ok(Cipher::des_ede3_cfb64()),
            (Algorithm::Aes, _, _)
            | (Algorithm::TripleDes, Mode::Ecb | Mode::Cbc | Mode::Ofb | Mode::Cfb, _) => {
                Err(CryptoError::InvalidKeyLength {
                    expected: Self::expected_key_len(algorithm),
                    actual: key_len,
                })
            }
            (Algorithm::TripleDes, _, _) => Err(CryptoError::UnsupportedMode(mode.to_string())),
        }
    }

    fn expected_key_len(algorithm: Algorithm) -> usize {
        match algorithm {
            Algorithm::Aes => 32,
            Algorithm::TripleDes => 24,
        }
    }

    /// Returns the key bytes in the form OpenSSL expects.
    fn key_bytes(algorithm: Algorithm, key: &SecretKey) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        let bytes = key.bytes();
        match (algorithm, bytes.len()) {
            (Algorithm::Aes, 16 | 24 | 32) | (Algorithm::TripleDes, 24) => {
                Ok(Zeroizing::new(bytes.to_vec()))
            }
            (Algorithm::TripleDes, 8) => Ok(Zeroizing::new(bytes.repeat(3))),
            (Algorithm::TripleDes, 16) => {
                let mut expanded = Zeroizing::new(Vec::with_capacity(24));
                expanded.extend_from_slice(bytes);
                expanded.extend_from_slice(&bytes[..8]);
                Ok(expanded)
            }
            _ => Err(CryptoError::InvalidKeyLength {
                expected: Self::expected_key_len(algorithm),
                actual: bytes.len(),
            }),
        }
    }

    /// Returns the IV handed to OpenSSL, checking its length against the
    /// cipher.
    fn iv_bytes(
        params: &CipherParams<'_>,
        cipher: &CipherRef,
    ) -> Result<Option<Vec<u8>>, CryptoError> {
        let expected = params
            .mode
            .info()
            .iv_length(params.algorithm.block_size());
        let actual = params.iv.map_or(0, <[u8]>::len);
        if actual != expected {
            return Err(CryptoError::InvalidIVLength { expected, actual });
        }

        Ok(params.iv.map(|iv| match params.mode {
            Mode::Ctr => {
                let mut counter_block = iv.to_vec();
                counter_block.resize(cipher.iv_length(), 0);
                counter_block
            }
            _ => iv.to_vec(),
        }))
    }

    fn ecb_cipher(algorithm: Algorithm, key_len: usize) -> Result<&'static CipherRef, CryptoError> {
        Self::cipher(algorithm, Mode::Ecb, key_len)
    }

    fn check_native(&self, params: &CipherParams<'_>) -> Result<(), CryptoError> {
        if self.supports(params.algorithm, params.mode) {
            Ok(())
        } else {
            Err(CryptoError::UnsupportedMode(format!(
                "{}-{}",
                params.algorithm, params.mode
            )))
        }
    }

    fn check_block(algorithm: Algorithm, input: &[u8], output: &[u8]) -> bool {
        let block_size = algorithm.block_size();
        input.len() == block_size && output.len() == block_size
    }

    /// Runs raw ECB over whole blocks with a single cipher context.
    fn ecb(
        algorithm: Algorithm,
        key: &SecretKey,
        input: &[u8],
        output: &mut [u8],
        encrypt: bool,
    ) -> Result<(), CryptoError> {
        let error = if encrypt {
            CryptoError::EncryptError
        } else {
            CryptoError::DecryptError
        };
        let block_size = algorithm.block_size();
        if input.len() % block_size != 0 || output.len() != input.len() {
            return Err(error);
        }
        let key = Self::key_bytes(algorithm, key)?;
        let cipher = Self::ecb_cipher(algorithm, key.len())?;

        let mut ctx = CipherCtx::new().map_err(|_| error.clone())?;
        let init = if encrypt {
            ctx.encrypt_init(Some(cipher), Some(&key), None)
        } else {
            ctx.decrypt_init(Some(cipher), Some(&key), None)
        };
        init.map_err(|_| error.clone())?;
        ctx.set_padding(false);

        let mut buf = vec![0u8; input.len() + cipher.block_size()];
        let mut count = ctx
            .cipher_update(input, Some(&mut buf))
            .map_err(|_| error.clone())?;
        count += ctx
            .cipher_final(&mut buf[count..])
            .map_err(|_| error.clone())?;
        if count != input.len() {
            return Err(error);
        }

        output.copy_from_slice(&buf[..count]);
        Ok(())
    }
}

impl PrimitivesOp for OsslPrimitives {
    fn supports(&self, algorithm: Algorithm, mode: Mode) -> bool {
        match algorithm {
            Algorithm::Aes => true,
            Algorithm::TripleDes => !matches!(mode, Mode::Ctr | Mode::Gcm),
        }
    }

    fn encrypt_block(
        &self,
        algorithm: Algorithm,
        key: &SecretKey,
        block: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        if !Self::check_block(algorithm, block, output) {
            return Err(CryptoError::EncryptError);
        }
        Self::ecb(algorithm, key, block, output, true)
    }

    fn encrypt_blocks(
        &self,
        algorithm: Algorithm,
        key: &SecretKey,
        blocks: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        Self::ecb(algorithm, key, blocks, output, true)
    }

    fn decrypt_block(
        &self,
        algorithm: Algorithm,
        key: &SecretKey,
        block: &[u8],
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        if !Self::check_block(algorithm, block, output) {
            return Err(CryptoError::DecryptError);
        }
        Self::ecb(algorithm, key, block, output, false)
    }

    fn encrypt(
        &self,
        params: &CipherParams<'_>,
        input: &[u8],
    ) -> Result<SealedOutput, CryptoError> {
        self.check_native(params)?;
        let key = Self::key_bytes(params.algorithm, params.key)?;
        let cipher = Self::cipher(params.algorithm, params.mode, key.len())?;
        let iv = Self::iv_bytes(params, cipher)?;

        let mut ctx = CipherCtx::new().map_err(|_| CryptoError::EncryptError)?;
        ctx.encrypt_init(Some(cipher), Some(&key), iv.as_deref())
            .map_err(|_| CryptoError::EncryptError)?;
        ctx.set_padding(false);

        let is_gcm = params.mode == Mode::Gcm;
        if let (true, Some(aad)) = (is_gcm, params.aad) {
            ctx.cipher_update(aad, None)
                .map_err(|_| CryptoError::EncryptError)?;
        }

        let mut ciphertext = vec![0u8; input.len() + cipher.block_size()];
        let mut count = ctx
            .cipher_update(input, Some(&mut ciphertext))
            .map_err(|err| {
                tracing::error!(?err, mode = %params.mode, "Cipher update failed");
                CryptoError::EncryptError
            })?;
        count += ctx
            .cipher_final(&mut ciphertext[count..])
            .map_err(|err| {
                tracing::error!(?err, mode = %params.mode, "Cipher finalization failed");
                CryptoError::EncryptError
            })?;
        ciphertext.truncate(count);

        let tag = if is_gcm {
            let mut tag = vec![0u8; Self::GCM_TAG_SIZE];
            ctx.tag(&mut tag).map_err(|_| CryptoError::EncryptError)?;
            Some(tag)
        } else {
            None
        };

        Ok(SealedOutput { ciphertext, tag })
    }

    fn decrypt(
        &self,
        params: &CipherParams<'_>,
        tag: Option<&[u8]>,
        input: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        self.check_native(params)?;
        let key = Self::key_bytes(params.algorithm, params.key)?;
        let cipher = Self::cipher(params.algorithm, params.mode, key.len())?;
        let iv = Self::iv_bytes(params, cipher)?;

        let mut ctx = CipherCtx::new().map_err(|_| CryptoError::DecryptError)?;
        ctx.decrypt_init(Some(cipher), Some(&key), iv.as_deref())
            .map_err(|_| CryptoError::DecryptError)?;
        ctx.set_padding(false);

        let is_gcm = params.mode == Mode::Gcm;
        if is_gcm {
            let tag = tag.unwrap_or_default();
            if tag.len() != Self::GCM_TAG_SIZE {
                return Err(CryptoError::InvalidTagLength {
                    expected: Self::GCM_TAG_SIZE,
                    actual: tag.len(),
                });
            }
            // The tag must be set before any data is processed
            ctx.set_tag(tag).map_err(|_| CryptoError::DecryptError)?;
            if let Some(aad) = params.aad {
                ctx.cipher_update(aad, None)
                    .map_err(|_| CryptoError::DecryptError)?;
            }
        }

        let mut plaintext = vec![0u8; input.len() + cipher.block_size()];
        let mut count = ctx
            .cipher_update(input, Some(&mut plaintext))
            .map_err(|_| CryptoError::DecryptError)?;
        count += ctx.cipher_final(&mut plaintext[count..]).map_err(|_| {
            if is_gcm {
                tracing::error!("GCM tag verification failed");
                CryptoError::AuthenticationFailure
            } else {
                CryptoError::DecryptError
            }
        })?;
        plaintext.truncate(count);

        Ok(plaintext)
    }
}
