// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # Palisade
//!
//! Key-management core for Bitcoin-style wallets: private key material
//! lives in page-locked, wipe-on-release memory from birth to death, curve
//! math is an owned module, and hierarchical derivation produces child
//! keys without ever parking a scalar in pageable memory.
//!
//! This crate re-exports the public surface of the stack:
//!
//! - [`SecureBytes`]: growable buffer over the budgeted page-locked
//!   allocator ([`palisade_alloc`], 64 KiB process-wide ceiling)
//! - [`BigInt`] / [`SecureBigInt`]: arbitrary-precision integers, plain
//!   and secure-storage variants
//! - [`EcKey`]: secp256k1 key pair, ECDSA sign/verify (RFC 6979 nonces,
//!   low-s, DER)
//! - [`ChainKey`]: chain-code-carrying key with hardened and non-hardened
//!   child derivation
//!
//! # Example
//!
//! ```rust
//! use palisade::{ChainKey, EcKey, SecureBytes};
//!
//! fn example() -> Result<(), Box<dyn core::error::Error>> {
//!     // A fresh keypair; the scalar never leaves secure memory.
//!     let key = EcKey::generate()?;
//!     let hash = [0x42u8; 32];
//!     let signature = key.sign(&hash)?;
//!     assert!(key.verify(&signature, &hash));
//!
//!     // A derivation tree rooted in a seed.
//!     let master = ChainKey::master_from_seed(&[0x00, 0x01, 0x02, 0x03])?;
//!     let child = master.derive_hardened(0)?.derive_child(1)?;
//!     assert!(child.key().has_private_key());
//!
//!     let _ = SecureBytes::from_slice(&[0u8; 32])?;
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

#[cfg(test)]
mod tests;

pub use palisade_alloc::{allocate, locked_bytes, AllocError, SecureAlloc, SECURE_MEMORY_CEILING};
pub use palisade_buffer::{BufferError, SecureBytes};
pub use palisade_guard::{harden_process, HardenStatus};
pub use palisade_key::{ChainKey, EcKey, KeyError, KeyForm, Network, HARDENED_OFFSET};
pub use palisade_num::{BigInt, NumError, SecureBigInt};
pub use palisade_rand::{EntropyError, EntropySource, SystemEntropySource};
