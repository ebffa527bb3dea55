// Copyright (C) Microsoft Corporation. All rights reserved.

//! Supported modes of operation and their IV, tag and padding policies.

use super::*;

/// Modes of operation known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Electronic codebook.
    Ecb,
    /// Cipher block chaining.
    Cbc,
    /// Output feedback.
    Ofb,
    /// Cipher feedback (full block segments).
    Cfb,
    /// Counter mode with an 8-byte nonce.
    Ctr,
    /// Galois/counter mode (AEAD).
    Gcm,
}

impl Mode {
    /// Every mode, in registry order.
    pub const ALL: [Mode; 6] = [
        Mode::Ecb,
        Mode::Cbc,
        Mode::Ofb,
        Mode::Cfb,
        Mode::Ctr,
        Mode::Gcm,
    ];

    /// Canonical name used in cipher suite strings.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Ecb => "ECB",
            Mode::Cbc => "CBC",
            Mode::Ofb => "OFB",
            Mode::Cfb => "CFB",
            Mode::Ctr => "CTR",
            Mode::Gcm => "GCM",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name))
    }

    /// The IV, tag and padding policy of this mode.
    pub fn info(&self) -> ModeInfo {
        match self {
            Mode::Ecb => ModeInfo {
                mode: *self,
                iv: IvLen::None,
                tag_len: None,
                padded: true,
            },
            Mode::Cbc => ModeInfo {
                mode: *self,
                iv: IvLen::Block,
                tag_len: None,
                padded: true,
            },
            Mode::Ofb | Mode::Cfb => ModeInfo {
                mode: *self,
                iv: IvLen::Block,
                tag_len: None,
                padded: false,
            },
            Mode::Ctr => ModeInfo {
                mode: *self,
                iv: IvLen::Fixed(ModeInfo::CTR_NONCE_SIZE),
                tag_len: None,
                padded: false,
            },
            Mode::Gcm => ModeInfo {
                mode: *self,
                iv: IvLen::Fixed(ModeInfo::GCM_NONCE_SIZE),
                tag_len: Some(ModeInfo::GCM_TAG_SIZE),
                padded: false,
            },
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How long the IV or nonce of a mode is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IvLen {
    /// The mode takes no IV.
    None,
    /// One cipher block.
    Block,
    /// A fixed number of bytes regardless of the cipher.
    Fixed(usize),
}

/// Static properties of a mode of operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeInfo {
    mode: Mode,
    iv: IvLen,
    tag_len: Option<usize>,
    padded: bool,
}

impl ModeInfo {
    const CTR_NONCE_SIZE: usize = 8;
    const GCM_NONCE_SIZE: usize = 12;
    const GCM_TAG_SIZE: usize = 16;

    /// The mode described by this entry.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// IV policy of the mode.
    pub fn iv_len(&self) -> IvLen {
        self.iv
    }

    /// Returns `true` if every encryption needs a fresh IV or nonce.
    pub fn requires_iv(&self) -> bool {
        self.iv != IvLen::None
    }

    /// IV length in bytes for a cipher with the given block size.
    pub fn iv_length(&self, block_size: usize) -> usize {
        match self.iv {
            IvLen::None => 0,
            IvLen::Block => block_size,
            IvLen::Fixed(len) => len,
        }
    }

    /// Returns `true` for authenticated modes.
    pub fn is_aead(&self) -> bool {
        self.tag_len.is_some()
    }

    /// Authentication tag length in bytes, for AEAD modes.
    pub fn tag_length(&self) -> Option<usize> {
        self.tag_len
    }

    /// Returns `true` if plaintext is padded to whole blocks.
    pub fn is_padded(&self) -> bool {
        self.padded
    }

    /// Returns `true` for unauthenticated keystream modes, the only ones the
    /// counter fallback can stand in for.
    pub fn is_stream(&self) -> bool {
        !self.padded && !self.is_aead()
    }

    /// Returns `true` if the mode can drive a cipher with this block size.
    pub fn is_compatible(&self, block_size: usize) -> bool {
        // GHASH is defined over 128-bit blocks only
        !(self.is_aead() && block_size != 16)
    }
}
