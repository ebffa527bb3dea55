// Copyright (C) Microsoft Corporation. All rights reserved.

//! Primitive backends.
//!
//! The backend is selected per target:
//!
//! - **Unix**: OpenSSL via [`OsslPrimitives`]
//!
//! [`Primitives`] names the backend for the current target and is what
//! [`EncryptionEngine::new`] uses.

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        mod ossl;
        pub use ossl::OsslPrimitives;

        /// Default primitives backend for the current platform.
        pub type Primitives = OsslPrimitives;
    } else {
        compile_error!("Unsupported target OS for cipher primitives");
    }
}

use super::*;
