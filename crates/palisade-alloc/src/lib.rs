// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Budgeted page-locked allocator with guaranteed release-time wiping.
//!
//! Every [`SecureAlloc`] block is zero-initialized, its page span is locked
//! in RAM via `mlock`, and its bytes are overwritten with zeros before the
//! memory returns to the system allocator. A process-wide ledger reference
//! counts locked pages (blocks from the system allocator may share pages)
//! and meters them against [`SECURE_MEMORY_CEILING`].
//!
//! # Budget
//!
//! The ceiling meters whole locked pages, not requested bytes: partial-page
//! locks do not exist, so a one-byte block still pins a full page. An
//! allocation whose page span would push the locked total over the ceiling
//! fails with [`AllocError::OutOfSecureMemory`] before anything is locked.
//!
//! # Process-wide state
//!
//! The page ledger and the locked-byte counter are the only mutable shared
//! state in the stack, guarded by a single internal spin lock. The counter
//! must read zero at shutdown for a clean exit; [`locked_bytes`] exposes it.
//!
//! # Example
//!
//! ```rust
//! use palisade_alloc::{allocate, AllocError};
//!
//! fn example() -> Result<(), AllocError> {
//!     let mut block = allocate(32)?;
//!
//!     block.as_mut_slice()[0] = 0x42;
//!     assert_eq!(block.as_slice()[0], 0x42);
//!
//!     // Dropping the block wipes it, unlocks its pages, and frees it.
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod error;
mod ledger;
mod secure_alloc;
mod spin;

pub use error::AllocError;
pub use ledger::{locked_bytes, SECURE_MEMORY_CEILING};
pub use secure_alloc::{allocate, SecureAlloc};
