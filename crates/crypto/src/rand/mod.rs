// Copyright (C) Microsoft Corporation. All rights reserved.

//! Cryptographically secure random number generation.
//!
//! IVs, nonces and generated keys are all drawn from [`Rng`]. The generator is
//! stateless from the caller's point of view and safe to call from several
//! threads at once.

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        mod rand_ossl;
        pub use rand_ossl::OsslRng as Rng;
    } else {
        compile_error!("Unsupported target OS for random number generation");
    }
}

use super::*;

/// Random byte generation.
pub trait RngOp {
    /// Fills `buf` with cryptographically secure random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RngError`] if the generator fails.
    fn rand_bytes(buf: &mut [u8]) -> Result<(), CryptoError>;

    /// Returns `len` cryptographically secure random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RngError`] if the generator fails.
    fn rand_vec(len: usize) -> Result<Vec<u8>, CryptoError> {
        let mut buf = vec![0u8; len];
        Self::rand_bytes(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests;
