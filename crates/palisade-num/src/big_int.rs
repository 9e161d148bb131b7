// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! BigInt - sign-and-magnitude arbitrary-precision integer.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::{Add, Mul, Neg, Shl, Shr, Sub};

use crate::error::NumError;

/// Arbitrary-precision signed integer.
///
/// Sign and magnitude are tracked separately; the magnitude is a
/// little-endian `u32` limb vector with no trailing zero limbs, and zero is
/// the empty vector with a non-negative sign. Every operation returns a new
/// value; operands are never mutated.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BigInt {
    negative: bool,
    limbs: Vec<u32>,
}

impl BigInt {
    /// Zero.
    pub fn zero() -> Self {
        Self {
            negative: false,
            limbs: Vec::new(),
        }
    }

    /// One.
    pub fn one() -> Self {
        Self {
            negative: false,
            limbs: vec![1],
        }
    }

    /// Returns `true` if the value is zero.
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Returns `true` if the value is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Magnitude bit length (zero for zero).
    pub fn bits(&self) -> usize {
        mag_bits(&self.limbs)
    }

    /// Returns bit `index` of the magnitude, least-significant first.
    pub fn bit(&self, index: usize) -> bool {
        mag_bit(&self.limbs, index)
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Self {
            negative: false,
            limbs: self.limbs.clone(),
        }
    }

    /// `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        if self.negative == other.negative {
            return Self::from_parts(self.negative, mag_add(&self.limbs, &other.limbs));
        }

        // Opposite signs: subtract the smaller magnitude from the larger;
        // the result takes the larger operand's sign.
        match mag_cmp(&self.limbs, &other.limbs) {
            Ordering::Equal => Self::zero(),
            Ordering::Greater => {
                Self::from_parts(self.negative, mag_sub(&self.limbs, &other.limbs))
            }
            Ordering::Less => Self::from_parts(other.negative, mag_sub(&other.limbs, &self.limbs)),
        }
    }

    /// `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// `-self`.
    pub fn neg(&self) -> Self {
        Self::from_parts(!self.negative, self.limbs.clone())
    }

    /// `self * other`.
    pub fn mul(&self, other: &Self) -> Self {
        Self::from_parts(
            self.negative != other.negative,
            mag_mul(&self.limbs, &other.limbs),
        )
    }

    /// Truncating division. Fails with [`NumError::DivisionByZero`].
    pub fn div(&self, other: &Self) -> Result<Self, NumError> {
        let (quotient, _) = self.divrem(other)?;
        Ok(quotient)
    }

    /// Remainder of truncating division; takes the dividend's sign.
    /// Fails with [`NumError::DivisionByZero`].
    pub fn rem(&self, other: &Self) -> Result<Self, NumError> {
        let (_, remainder) = self.divrem(other)?;
        Ok(remainder)
    }

    /// `(self + other) mod modulus`, always reduced into `[0, |modulus|)`.
    /// Fails with [`NumError::DivisionByZero`] on a zero modulus.
    pub fn add_mod(&self, other: &Self, modulus: &Self) -> Result<Self, NumError> {
        let reduced = self.add(other).rem(modulus)?;
        if reduced.negative {
            Ok(reduced.add(&modulus.abs()))
        } else {
            Ok(reduced)
        }
    }

    /// Magnitude shift left by `bits`; the sign is preserved.
    pub fn shl(&self, bits: u32) -> Self {
        Self::from_parts(self.negative, mag_shl(&self.limbs, bits))
    }

    /// Magnitude shift right by `bits`; the sign is preserved.
    pub fn shr(&self, bits: u32) -> Self {
        Self::from_parts(self.negative, mag_shr(&self.limbs, bits))
    }

    /// Returns the value as `u64` when it is non-negative and fits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.negative || self.limbs.len() > 2 {
            return None;
        }
        let low = self.limbs.first().copied().unwrap_or(0) as u64;
        let high = self.limbs.get(1).copied().unwrap_or(0) as u64;
        Some((high << 32) | low)
    }

    /// Consumes the value, overwriting its limbs with zeros.
    ///
    /// For transient secret intermediates (nonces, scalar products) that
    /// must not outlive their use. Note that earlier arithmetic may have
    /// left reallocation copies behind; keep secret intermediates few and
    /// short-lived.
    pub fn wipe(mut self) {
        for limb in self.limbs.iter_mut() {
            // Safety: valid, aligned, exclusive reference.
            unsafe { core::ptr::write_volatile(limb, 0) };
        }
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Encodings
    // -------------------------------------------------------------------------

    /// Minimal big-endian magnitude bytes, without sign. Zero is empty.
    pub fn magnitude_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.limbs.len() * 4);
        for limb in self.limbs.iter().rev() {
            bytes.extend_from_slice(&limb.to_be_bytes());
        }
        let first_significant = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        bytes.split_off(first_significant)
    }

    /// Parses big-endian unsigned magnitude bytes. Leading zeros are fine.
    pub fn from_unsigned_bytes(bytes: &[u8]) -> Self {
        let mut limbs = Vec::with_capacity(bytes.len() / 4 + 1);
        for chunk in bytes.rchunks(4) {
            let mut limb = [0u8; 4];
            limb[4 - chunk.len()..].copy_from_slice(chunk);
            limbs.push(u32::from_be_bytes(limb));
        }
        Self::from_parts(false, limbs)
    }

    /// Canonical signed-magnitude bytes: big-endian, minimal length.
    ///
    /// A non-negative value whose top magnitude bit is set gains a leading
    /// `0x00`; a negative value carries `0x80` in the top bit of its first
    /// byte (prepended when the magnitude already uses that bit). Zero is
    /// empty. Round-trips through [`from_bytes`](Self::from_bytes).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.magnitude_bytes();
        if bytes.is_empty() {
            return bytes;
        }

        let top_bit_used = bytes[0] & 0x80 != 0;
        match (self.negative, top_bit_used) {
            (false, true) => bytes.insert(0, 0x00),
            (false, false) => {}
            (true, true) => bytes.insert(0, 0x80),
            (true, false) => bytes[0] |= 0x80,
        }
        bytes
    }

    /// Parses canonical signed-magnitude bytes (see [`to_bytes`](Self::to_bytes)).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::zero();
        }

        let negative = bytes[0] & 0x80 != 0;
        let mut magnitude = bytes.to_vec();
        magnitude[0] &= 0x7F;

        let value = Self::from_unsigned_bytes(&magnitude);
        Self::from_parts(negative, value.limbs)
    }

    /// Difficulty-style compact form: `[exponent][3-byte mantissa]`.
    ///
    /// The exponent is the length in bytes of the canonical signed
    /// representation and the mantissa its three leading bytes, so the sign
    /// travels in the mantissa's top bit. Values with more than three
    /// significant bytes lose the truncated tail; values longer than 255
    /// bytes are not representable and saturate the exponent.
    pub fn to_compact(&self) -> [u8; 4] {
        let bytes = self.to_bytes();
        let exponent = bytes.len().min(255) as u8;

        let mut compact = [exponent, 0, 0, 0];
        for i in 0..3.min(bytes.len()) {
            compact[1 + i] = bytes[i];
        }
        compact
    }

    /// Parses the compact form: reconstructs `exponent` canonical bytes
    /// with the mantissa as the leading bytes and zeros beyond it.
    pub fn from_compact(compact: &[u8; 4]) -> Self {
        let exponent = compact[0] as usize;
        let mut bytes = vec![0u8; exponent];
        for i in 0..3.min(exponent) {
            bytes[i] = compact[1 + i];
        }
        Self::from_bytes(&bytes)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn from_parts(negative: bool, limbs: Vec<u32>) -> Self {
        let limbs = mag_trim(limbs);
        Self {
            negative: negative && !limbs.is_empty(),
            limbs,
        }
    }

    fn divrem(&self, other: &Self) -> Result<(Self, Self), NumError> {
        if other.is_zero() {
            return Err(NumError::DivisionByZero);
        }

        let (quotient, remainder) = mag_divrem(&self.limbs, &other.limbs);
        Ok((
            Self::from_parts(self.negative != other.negative, quotient),
            Self::from_parts(self.negative, remainder),
        ))
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        Self::from_parts(false, vec![value as u32, (value >> 32) as u32])
    }
}

impl From<i64> for BigInt {
    fn from(value: i64) -> Self {
        let magnitude = BigInt::from(value.unsigned_abs());
        Self::from_parts(value < 0, magnitude.limbs)
    }
}

impl From<u32> for BigInt {
    fn from(value: u32) -> Self {
        Self::from(value as u64)
    }
}

impl From<i32> for BigInt {
    fn from(value: i32) -> Self {
        Self::from(value as i64)
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => mag_cmp(&self.limbs, &other.limbs),
            (true, true) => mag_cmp(&other.limbs, &self.limbs),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for &BigInt {
    type Output = BigInt;

    fn add(self, other: &BigInt) -> BigInt {
        BigInt::add(self, other)
    }
}

impl Sub for &BigInt {
    type Output = BigInt;

    fn sub(self, other: &BigInt) -> BigInt {
        BigInt::sub(self, other)
    }
}

impl Mul for &BigInt {
    type Output = BigInt;

    fn mul(self, other: &BigInt) -> BigInt {
        BigInt::mul(self, other)
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        BigInt::neg(self)
    }
}

impl Shl<u32> for &BigInt {
    type Output = BigInt;

    fn shl(self, bits: u32) -> BigInt {
        BigInt::shl(self, bits)
    }
}

impl Shr<u32> for &BigInt {
    type Output = BigInt;

    fn shr(self, bits: u32) -> BigInt {
        BigInt::shr(self, bits)
    }
}

// =============================================================================
// Magnitude arithmetic (little-endian u32 limbs, no trailing zeros)
// =============================================================================

fn mag_trim(mut limbs: Vec<u32>) -> Vec<u32> {
    while limbs.last() == Some(&0) {
        limbs.pop();
    }
    limbs
}

fn mag_cmp(a: &[u32], b: &[u32]) -> Ordering {
    if a.len() != b.len() {
        return a.len().cmp(&b.len());
    }
    for (x, y) in a.iter().rev().zip(b.iter().rev()) {
        match x.cmp(y) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
    }
    Ordering::Equal
}

fn mag_bits(limbs: &[u32]) -> usize {
    match limbs.last() {
        None => 0,
        Some(top) => limbs.len() * 32 - top.leading_zeros() as usize,
    }
}

fn mag_bit(limbs: &[u32], index: usize) -> bool {
    match limbs.get(index / 32) {
        None => false,
        Some(limb) => limb & (1 << (index % 32)) != 0,
    }
}

fn mag_add(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len().max(b.len()) + 1);
    let mut carry = 0u64;
    for i in 0..a.len().max(b.len()) {
        let x = a.get(i).copied().unwrap_or(0) as u64;
        let y = b.get(i).copied().unwrap_or(0) as u64;
        let sum = x + y + carry;
        out.push(sum as u32);
        carry = sum >> 32;
    }
    if carry != 0 {
        out.push(carry as u32);
    }
    out
}

/// `a - b`; requires `a >= b`.
fn mag_sub(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = 0i64;
    for i in 0..a.len() {
        let x = a[i] as i64;
        let y = b.get(i).copied().unwrap_or(0) as i64;
        let mut diff = x - y - borrow;
        if diff < 0 {
            diff += 1 << 32;
            borrow = 1;
        } else {
            borrow = 0;
        }
        out.push(diff as u32);
    }
    debug_assert_eq!(borrow, 0, "magnitude subtraction underflow");
    out
}

fn mag_mul(a: &[u32], b: &[u32]) -> Vec<u32> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut out = vec![0u32; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        let mut carry = 0u64;
        for (j, &y) in b.iter().enumerate() {
            let acc = out[i + j] as u64 + x as u64 * y as u64 + carry;
            out[i + j] = acc as u32;
            carry = acc >> 32;
        }
        out[i + b.len()] = carry as u32;
    }
    out
}

fn mag_shl(limbs: &[u32], bits: u32) -> Vec<u32> {
    if limbs.is_empty() {
        return Vec::new();
    }

    let limb_shift = (bits / 32) as usize;
    let bit_shift = bits % 32;

    let mut out = vec![0u32; limbs.len() + limb_shift + 1];
    for (i, &limb) in limbs.iter().enumerate() {
        let shifted = (limb as u64) << bit_shift;
        out[i + limb_shift] |= shifted as u32;
        out[i + limb_shift + 1] |= (shifted >> 32) as u32;
    }
    out
}

fn mag_shr(limbs: &[u32], bits: u32) -> Vec<u32> {
    let limb_shift = (bits / 32) as usize;
    if limb_shift >= limbs.len() {
        return Vec::new();
    }
    let bit_shift = bits % 32;

    let remaining = &limbs[limb_shift..];
    let mut out = Vec::with_capacity(remaining.len());
    for (i, &limb) in remaining.iter().enumerate() {
        let mut value = limb >> bit_shift;
        if bit_shift != 0 {
            if let Some(&next) = remaining.get(i + 1) {
                value |= next << (32 - bit_shift);
            }
        }
        out.push(value);
    }
    out
}

/// Restoring bit-serial long division on magnitudes.
fn mag_divrem(a: &[u32], b: &[u32]) -> (Vec<u32>, Vec<u32>) {
    debug_assert!(!b.is_empty());

    if mag_cmp(a, b) == Ordering::Less {
        return (Vec::new(), a.to_vec());
    }

    let mut quotient = vec![0u32; a.len()];
    let mut remainder: Vec<u32> = Vec::new();

    for index in (0..mag_bits(a)).rev() {
        mag_shl1_in(&mut remainder, mag_bit(a, index));
        if mag_cmp(&remainder, b) != Ordering::Less {
            mag_sub_in_place(&mut remainder, b);
            quotient[index / 32] |= 1 << (index % 32);
        }
    }

    (quotient, remainder)
}

/// Shifts the magnitude left one bit, feeding `bit` into the bottom.
fn mag_shl1_in(limbs: &mut Vec<u32>, bit: bool) {
    let mut carry = bit as u32;
    for limb in limbs.iter_mut() {
        let next_carry = *limb >> 31;
        *limb = (*limb << 1) | carry;
        carry = next_carry;
    }
    if carry != 0 {
        limbs.push(carry);
    }
    while limbs.last() == Some(&0) {
        limbs.pop();
    }
}

/// `a -= b` in place; requires `a >= b`.
fn mag_sub_in_place(a: &mut Vec<u32>, b: &[u32]) {
    let mut borrow = 0i64;
    for i in 0..a.len() {
        let x = a[i] as i64;
        let y = b.get(i).copied().unwrap_or(0) as i64;
        let mut diff = x - y - borrow;
        if diff < 0 {
            diff += 1 << 32;
            borrow = 1;
        } else {
            borrow = 0;
        }
        a[i] = diff as u32;
    }
    debug_assert_eq!(borrow, 0, "magnitude subtraction underflow");
    while a.last() == Some(&0) {
        a.pop();
    }
}
