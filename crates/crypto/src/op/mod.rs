// Copyright (C) Microsoft Corporation. All rights reserved.

//! Core operation traits.
//!
//! - [`key`]: key size queries, import, export and generation
//! - [`primitives`]: the block cipher primitives the engine is built on
//!
//! The engine never calls a cryptographic library directly; it goes through
//! [`PrimitivesOp`], which lets tests substitute a backend with a narrower
//! set of native modes.
mod key;
mod primitives;

pub use key::*;
pub use primitives::*;

use super::*;
