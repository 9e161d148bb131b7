// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Arbitrary-precision integers for curve math, with a secure-storage
//! variant for private scalars.
//!
//! # Types
//!
//! ## BigInt
//!
//! Sign-and-magnitude arbitrary-precision integer over ordinary memory.
//! Immutable value semantics: every operation returns a new value. Carries
//! the two wire encodings curve code needs:
//!
//! - canonical bytes: big-endian, minimal length, signed-magnitude (a
//!   leading `0x00` pads non-negative values whose top bit is set; negative
//!   values carry `0x80` in the top bit of the first byte)
//! - compact form: `[exponent][3-byte mantissa]` difficulty-style packing
//!
//! ## SecureBigInt
//!
//! A non-negative value whose magnitude lives in page-locked, wiped-on-
//! release storage ([`SecureBytes`](palisade_buffer::SecureBytes)). The
//! operation set is deliberately restricted to what private-scalar handling
//! needs: modular addition against a public modulus and comparisons against
//! public bounds. Intermediates stay in secure scratch buffers.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod big_int;
mod error;
mod secure_big_int;

pub use big_int::BigInt;
pub use error::NumError;
pub use secure_big_int::SecureBigInt;
