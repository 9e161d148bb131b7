// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for palisade_key.

use thiserror::Error;

use palisade_buffer::BufferError;
use palisade_num::NumError;

/// Errors from key construction, signing, and derivation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    /// The supplied private scalar is malformed or outside `[1, n-1]`.
    #[error("private key out of range")]
    InvalidPrivateKey,

    /// The supplied public point encoding is malformed or off-curve.
    #[error("public key malformed or not on the curve")]
    InvalidPublicKey,

    /// Signing requires exactly a 256-bit hash.
    #[error("hash must be exactly 32 bytes")]
    InvalidHashLength,

    /// The operation needs a private scalar this key does not hold.
    #[error("key holds no private scalar")]
    MissingPrivateKey,

    /// The platform entropy source could not be read.
    #[error("platform entropy source unavailable")]
    RandomSourceUnavailable,

    /// Derivation produced a degenerate scalar or point; retry with a
    /// different index (or seed).
    #[error("derived key is degenerate")]
    InvalidDerivedKey,

    /// Hardened derivation commits to the parent's private scalar.
    #[error("hardened derivation requires a private key")]
    HardenedDerivationRequiresPrivateKey,

    /// A chain code must be exactly 32 bytes.
    #[error("chain code must be exactly 32 bytes")]
    InvalidChainCode,

    /// Big-integer failure in scalar handling.
    #[error("{0}")]
    Num(#[from] NumError),

    /// Secure storage could not be allocated.
    #[error("{0}")]
    Buffer(#[from] BufferError),
}
