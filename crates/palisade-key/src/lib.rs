// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! secp256k1 key pairs with ECDSA signing and hierarchical derivation.
//!
//! # Types
//!
//! ## EcKey
//!
//! A key pair over secp256k1. The private scalar, when present, lives in
//! secure storage ([`SecureBigInt`](palisade_num::SecureBigInt)); the
//! public point is public by definition and is kept in both canonical
//! encodings (33-byte compressed, 65-byte uncompressed). A key built from
//! only a public point can verify but never sign.
//!
//! Signatures are ECDSA with deterministic RFC 6979 nonces and the low-s
//! canonical form, DER-encoded.
//!
//! ## ChainKey
//!
//! An [`EcKey`] paired with a 32-byte chain code, supporting parent-to-
//! child derivation: non-hardened children commit to the parent's
//! compressed public key, hardened children (index >= 2^31) to the parent's
//! private scalar. Both halves of the single HMAC-SHA512 step stay in
//! secure storage until they become the child's key and chain code.
//!
//! The curve arithmetic itself is an owned module over
//! [`BigInt`](palisade_num::BigInt): affine point operations, modular
//! inversion, and point (de)compression - no third-party bignum
//! representation is assumed.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod chain_key;
mod curve;
mod der;
mod ec_key;
mod error;
mod hashes;
mod nonce;

pub use chain_key::{ChainKey, KeyForm, Network, HARDENED_OFFSET};
pub use ec_key::EcKey;
pub use error::KeyError;
