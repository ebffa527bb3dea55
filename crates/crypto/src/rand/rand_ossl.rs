// Copyright (C) Microsoft Corporation. All rights reserved.

//! OpenSSL random number generator.
//!
//! Backed by `RAND_bytes`, which OpenSSL seeds from the operating system and
//! which is safe for concurrent use.

use super::*;

/// OpenSSL-based cryptographically secure random number generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsslRng;

impl RngOp for OsslRng {
    fn rand_bytes(buf: &mut [u8]) -> Result<(), CryptoError> {
        if buf.is_empty() {
            return Ok(());
        }
        openssl::rand::rand_bytes(buf).map_err(|err| {
            tracing::error!(?err, "RAND_bytes failed");
            CryptoError::RngError
        })
    }
}
