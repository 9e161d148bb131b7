// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable byte buffer backed by page-locked, wipe-on-release memory.
//!
//! [`SecureBytes`] owns exactly one [`SecureAlloc`](palisade_alloc::SecureAlloc)
//! sized to its current length. Growth allocates a new block at the new
//! length, copies the old content across, and releases the old block
//! through the wiping path - appending never leaves a stale copy of secret
//! bytes in freed, unlocked memory.
//!
//! The raw `as_slice`/`as_mut_slice` views exist strictly for the
//! big-integer and EC-key internals built on top of this crate; nothing
//! here copies buffer contents into non-secure memory implicitly.
//!
//! # Example
//!
//! ```rust
//! use palisade_buffer::{BufferError, SecureBytes};
//!
//! fn example() -> Result<(), BufferError> {
//!     let mut key = SecureBytes::from_slice(&[0x01, 0x02])?;
//!     key.append_slice(&[0x03])?;
//!
//!     assert_eq!(key.len(), 3);
//!     assert_eq!(key.as_slice(), &[0x01, 0x02, 0x03]);
//!
//!     // Dropping the buffer wipes and unlocks its backing block.
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
mod secure_bytes;

pub use error::BufferError;
pub use secure_bytes::SecureBytes;
