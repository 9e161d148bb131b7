// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! SecureBigInt - a non-negative integer whose magnitude lives in secure
//! storage.
//!
//! The operation set is deliberately the minimum private-scalar handling
//! needs: modular addition against a public modulus, comparisons against
//! public bounds, and the explicitly documented material exports that EC
//! internals require. Every extra operation on a secret scalar would be
//! extra surface for timing or memory-retention bugs.

use core::cmp::Ordering;

use subtle::{Choice, ConstantTimeEq, ConstantTimeGreater};

use palisade_buffer::SecureBytes;

use crate::big_int::BigInt;
use crate::error::NumError;

/// A non-negative arbitrary-precision integer stored as big-endian bytes in
/// page-locked, wiped-on-release memory.
///
/// Leading zero bytes are permitted and numerically irrelevant; widths are
/// treated as public, values as secret.
pub struct SecureBigInt {
    magnitude: SecureBytes,
}

impl SecureBigInt {
    /// Zero, with no storage.
    pub fn zero() -> Result<Self, NumError> {
        Ok(Self {
            magnitude: SecureBytes::new()?,
        })
    }

    /// Wraps an existing secure buffer as a big-endian magnitude.
    ///
    /// Ownership transfers; nothing is copied.
    pub fn from_secure_bytes(magnitude: SecureBytes) -> Self {
        Self { magnitude }
    }

    /// Copies a [`BigInt`]'s magnitude into fresh secure storage.
    ///
    /// Fails with [`NumError::NegativeSecureValue`] for negative input; the
    /// caller owns the hygiene of the non-secure source value.
    pub fn from_big_int(value: &BigInt) -> Result<Self, NumError> {
        if value.is_negative() {
            return Err(NumError::NegativeSecureValue);
        }
        Ok(Self {
            magnitude: SecureBytes::from_slice(&value.magnitude_bytes())?,
        })
    }

    /// `(self + other) mod modulus`, computed in secure scratch storage.
    ///
    /// The modulus is public; its magnitude is used. Fails with
    /// [`NumError::DivisionByZero`] on a zero modulus. The sum and the
    /// running remainder only ever exist in secure buffers.
    pub fn add_mod(&self, other: &SecureBigInt, modulus: &BigInt) -> Result<Self, NumError> {
        if modulus.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        let modulus_bytes = modulus.magnitude_bytes();

        // Sum into secure scratch, one byte wider than the widest operand.
        let width = self.magnitude.len().max(other.magnitude.len()) + 1;
        let mut sum = SecureBytes::with_len(width)?;
        be_add(
            self.magnitude.as_slice(),
            other.magnitude.as_slice(),
            sum.as_mut_slice(),
        );

        // Bit-serial restoring reduction; the remainder stays < modulus and
        // needs one spare high byte for the shift-in step.
        let mut remainder = SecureBytes::with_len(modulus_bytes.len() + 1)?;
        for index in 0..sum.len() * 8 {
            let bit = be_bit(sum.as_slice(), index);
            be_shl1_in(remainder.as_mut_slice(), bit);
            if be_cmp(remainder.as_slice(), &modulus_bytes) != Ordering::Less {
                be_sub_in_place(remainder.as_mut_slice(), &modulus_bytes);
            }
        }

        // The spare high byte is zero again once the remainder is reduced.
        let reduced = remainder.subrange(1..remainder.len())?;
        Ok(Self { magnitude: reduced })
    }

    /// Numeric comparison against a public bound.
    ///
    /// The secure magnitude is scanned in constant time; a negative bound
    /// is always smaller than this (non-negative) value.
    pub fn cmp_value(&self, bound: &BigInt) -> Ordering {
        if bound.is_negative() {
            return Ordering::Greater;
        }
        ct_cmp_be(self.magnitude.as_slice(), &bound.magnitude_bytes())
    }

    /// `self == bound`.
    pub fn eq_value(&self, bound: &BigInt) -> bool {
        self.cmp_value(bound) == Ordering::Equal
    }

    /// `self > bound`.
    pub fn gt_value(&self, bound: &BigInt) -> bool {
        self.cmp_value(bound) == Ordering::Greater
    }

    /// `self >= bound`.
    pub fn ge_value(&self, bound: &BigInt) -> bool {
        self.cmp_value(bound) != Ordering::Less
    }

    /// `self < bound`.
    pub fn lt_value(&self, bound: &BigInt) -> bool {
        self.cmp_value(bound) == Ordering::Less
    }

    /// `self <= bound`.
    pub fn le_value(&self, bound: &BigInt) -> bool {
        self.cmp_value(bound) != Ordering::Greater
    }

    /// Returns `true` if the value is zero, scanning in constant time.
    pub fn is_zero(&self) -> bool {
        let mut nonzero = Choice::from(0u8);
        for byte in self.magnitude.as_slice() {
            nonzero |= !byte.ct_eq(&0u8);
        }
        !bool::from(nonzero)
    }

    /// Material export: read-only view of the big-endian magnitude.
    ///
    /// The view still points into secure storage; copying it elsewhere is a
    /// deliberate act by EC-key internals, not something this type does.
    pub fn as_bytes(&self) -> &[u8] {
        self.magnitude.as_slice()
    }

    /// Material export: the magnitude left-padded with zeros to `len`
    /// bytes, in fresh secure storage (canonical fixed-width scalar form).
    ///
    /// Fails with [`NumError::ValueTooWide`] when the significant bytes do
    /// not fit.
    pub fn to_padded(&self, len: usize) -> Result<SecureBytes, NumError> {
        let bytes = self.magnitude.as_slice();
        let leading = bytes.iter().take_while(|&&b| b == 0).count();
        let significant = &bytes[leading..];

        if significant.len() > len {
            return Err(NumError::ValueTooWide);
        }

        let mut padded = SecureBytes::with_len(len)?;
        padded.as_mut_slice()[len - significant.len()..].copy_from_slice(significant);
        Ok(padded)
    }
}

impl core::fmt::Debug for SecureBigInt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SecureBigInt {{ len: {}, .. }}", self.magnitude.len())
    }
}

// =============================================================================
// Big-endian byte-slice arithmetic (secure scratch helpers)
// =============================================================================

/// `out = a + b`; `out` must be at least one byte wider than the operands.
fn be_add(a: &[u8], b: &[u8], out: &mut [u8]) {
    debug_assert!(out.len() > a.len().max(b.len()));

    let mut carry = 0u16;
    for i in 0..out.len() {
        let x = be_byte_from_end(a, i) as u16;
        let y = be_byte_from_end(b, i) as u16;
        let sum = x + y + carry;
        let position = out.len() - 1 - i;
        out[position] = sum as u8;
        carry = sum >> 8;
    }
    debug_assert_eq!(carry, 0);
}

/// Byte `i` counted from the least-significant end, zero beyond the slice.
fn be_byte_from_end(slice: &[u8], i: usize) -> u8 {
    if i < slice.len() {
        slice[slice.len() - 1 - i]
    } else {
        0
    }
}

/// Bit `index` counted from the most-significant end.
fn be_bit(slice: &[u8], index: usize) -> bool {
    let byte = slice[index / 8];
    byte & (0x80 >> (index % 8)) != 0
}

/// Shifts left one bit in place, feeding `bit` into the bottom.
fn be_shl1_in(slice: &mut [u8], bit: bool) {
    let mut carry = bit as u8;
    for byte in slice.iter_mut().rev() {
        let next_carry = *byte >> 7;
        *byte = (*byte << 1) | carry;
        carry = next_carry;
    }
    debug_assert_eq!(carry, 0, "shift overflowed the scratch width");
}

/// Numeric comparison; lengths may differ, leading zeros are ignored.
fn be_cmp(a: &[u8], b: &[u8]) -> Ordering {
    let width = a.len().max(b.len());
    for i in (0..width).rev() {
        let x = be_byte_from_end(a, i);
        let y = be_byte_from_end(b, i);
        match x.cmp(&y) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
    }
    Ordering::Equal
}

/// `a -= b` in place; requires `a >= b` numerically.
fn be_sub_in_place(a: &mut [u8], b: &[u8]) {
    let mut borrow = 0i16;
    for i in 0..a.len() {
        let position = a.len() - 1 - i;
        let x = a[position] as i16;
        let y = be_byte_from_end(b, i) as i16;
        let mut diff = x - y - borrow;
        if diff < 0 {
            diff += 256;
            borrow = 1;
        } else {
            borrow = 0;
        }
        a[position] = diff as u8;
    }
    debug_assert_eq!(borrow, 0, "secure subtraction underflow");
}

/// Constant-time numeric comparison of big-endian magnitudes.
fn ct_cmp_be(a: &[u8], b: &[u8]) -> Ordering {
    let width = a.len().max(b.len());
    let mut gt = Choice::from(0u8);
    let mut lt = Choice::from(0u8);

    for i in (0..width).rev() {
        let x = be_byte_from_end(a, i);
        let y = be_byte_from_end(b, i);
        let undecided = !(gt | lt);
        gt |= undecided & x.ct_gt(&y);
        lt |= undecided & y.ct_gt(&x);
    }

    if bool::from(gt) {
        Ordering::Greater
    } else if bool::from(lt) {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}
