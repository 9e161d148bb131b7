// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Owned secp256k1 arithmetic over BigInt.
//!
//! Affine point operations with modular inversion by extended Euclid. The
//! curve is `y^2 = x^3 + 7` over F_p; all scalars are taken modulo the
//! group order `n`.

use palisade_num::BigInt;

use crate::error::KeyError;

/// secp256k1 field prime p.
const P_BYTES: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF,
    0xFC, 0x2F,
];

/// secp256k1 group order n.
const N_BYTES: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// Generator x-coordinate.
const GX_BYTES: [u8; 32] = [
    0x79, 0xBE, 0x66, 0x7E, 0xF9, 0xDC, 0xBB, 0xAC, 0x55, 0xA0, 0x62, 0x95, 0xCE, 0x87, 0x0B,
    0x07, 0x02, 0x9B, 0xFC, 0xDB, 0x2D, 0xCE, 0x28, 0xD9, 0x59, 0xF2, 0x81, 0x5B, 0x16, 0xF8,
    0x17, 0x98,
];

/// Generator y-coordinate.
const GY_BYTES: [u8; 32] = [
    0x48, 0x3A, 0xDA, 0x77, 0x26, 0xA3, 0xC4, 0x65, 0x5D, 0xA4, 0xFB, 0xFC, 0x0E, 0x11, 0x08,
    0xA8, 0xFD, 0x17, 0xB4, 0x48, 0xA6, 0x85, 0x54, 0x19, 0x9C, 0x47, 0xD0, 0x8F, 0xFB, 0x10,
    0xD4, 0xB8,
];

/// A point on the curve, affine or the group identity.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) enum Point {
    Infinity,
    Affine { x: BigInt, y: BigInt },
}

impl Point {
    pub(crate) fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }
}

/// Curve parameters plus the arithmetic the key types need.
pub(crate) struct Secp256k1 {
    pub(crate) p: BigInt,
    pub(crate) n: BigInt,
    pub(crate) g: Point,
}

impl Secp256k1 {
    pub(crate) fn new() -> Self {
        Self {
            p: BigInt::from_unsigned_bytes(&P_BYTES),
            n: BigInt::from_unsigned_bytes(&N_BYTES),
            g: Point::Affine {
                x: BigInt::from_unsigned_bytes(&GX_BYTES),
                y: BigInt::from_unsigned_bytes(&GY_BYTES),
            },
        }
    }

    /// Reduces into `[0, m)`.
    pub(crate) fn reduce(value: &BigInt, modulus: &BigInt) -> BigInt {
        let r = value.rem(modulus).expect("modulus is nonzero");
        if r.is_negative() {
            r.add(modulus)
        } else {
            r
        }
    }

    /// Modular inverse by extended Euclid; `None` when no inverse exists.
    pub(crate) fn mod_inv(value: &BigInt, modulus: &BigInt) -> Option<BigInt> {
        let mut r0 = modulus.clone();
        let mut r1 = Self::reduce(value, modulus);
        let mut t0 = BigInt::zero();
        let mut t1 = BigInt::one();

        while !r1.is_zero() {
            let q = r0.div(&r1).expect("loop guard keeps divisor nonzero");
            let r2 = r0.sub(&q.mul(&r1));
            let t2 = t0.sub(&q.mul(&t1));
            r0 = r1;
            r1 = r2;
            t0 = t1;
            t1 = t2;
        }

        if r0 != BigInt::one() {
            return None;
        }
        Some(Self::reduce(&t0, modulus))
    }

    /// `base^exponent mod modulus` by square-and-multiply.
    pub(crate) fn mod_pow(base: &BigInt, exponent: &BigInt, modulus: &BigInt) -> BigInt {
        let mut acc = BigInt::one();
        let base = Self::reduce(base, modulus);

        for index in (0..exponent.bits()).rev() {
            acc = Self::reduce(&acc.mul(&acc), modulus);
            if exponent.bit(index) {
                acc = Self::reduce(&acc.mul(&base), modulus);
            }
        }
        acc
    }

    /// Point addition, handling identity and inverse cases.
    pub(crate) fn add(&self, a: &Point, b: &Point) -> Point {
        let (x1, y1) = match a {
            Point::Infinity => return b.clone(),
            Point::Affine { x, y } => (x, y),
        };
        let (x2, y2) = match b {
            Point::Infinity => return a.clone(),
            Point::Affine { x, y } => (x, y),
        };

        if x1 == x2 {
            if Self::reduce(&y1.add(y2), &self.p).is_zero() {
                // Mirror points: P + (-P) = identity.
                return Point::Infinity;
            }
            return self.double(a);
        }

        // lambda = (y2 - y1) / (x2 - x1)
        let dx = Self::reduce(&x2.sub(x1), &self.p);
        let dy = Self::reduce(&y2.sub(y1), &self.p);
        let lambda = Self::reduce(
            &dy.mul(&Self::mod_inv(&dx, &self.p).expect("nonzero element of a prime field")),
            &self.p,
        );

        self.chord_point(&lambda, x1, x2, y1)
    }

    /// Point doubling.
    pub(crate) fn double(&self, point: &Point) -> Point {
        let (x, y) = match point {
            Point::Infinity => return Point::Infinity,
            Point::Affine { x, y } => (x, y),
        };
        if y.is_zero() {
            return Point::Infinity;
        }

        // lambda = 3x^2 / 2y
        let three_x2 = BigInt::from(3u64).mul(&x.mul(x));
        let two_y = y.shl(1);
        let lambda = Self::reduce(
            &three_x2.mul(&Self::mod_inv(&two_y, &self.p).expect("nonzero element of a prime field")),
            &self.p,
        );

        self.chord_point(&lambda, x, x, y)
    }

    /// Completes the chord-and-tangent construction:
    /// `x3 = lambda^2 - x1 - x2`, `y3 = lambda (x1 - x3) - y1`.
    fn chord_point(&self, lambda: &BigInt, x1: &BigInt, x2: &BigInt, y1: &BigInt) -> Point {
        let x3 = Self::reduce(&lambda.mul(lambda).sub(x1).sub(x2), &self.p);
        let y3 = Self::reduce(&lambda.mul(&x1.sub(&x3)).sub(y1), &self.p);
        Point::Affine { x: x3, y: y3 }
    }

    /// Scalar multiplication by double-and-add, most-significant bit first.
    pub(crate) fn mul(&self, scalar: &BigInt, point: &Point) -> Point {
        let mut acc = Point::Infinity;
        for index in (0..scalar.bits()).rev() {
            acc = self.double(&acc);
            if scalar.bit(index) {
                acc = self.add(&acc, point);
            }
        }
        acc
    }

    pub(crate) fn on_curve(&self, point: &Point) -> bool {
        let (x, y) = match point {
            Point::Infinity => return false,
            Point::Affine { x, y } => (x, y),
        };

        let lhs = Self::reduce(&y.mul(y), &self.p);
        let rhs = Self::reduce(&x.mul(x).mul(x).add(&BigInt::from(7u64)), &self.p);
        lhs == rhs
    }

    /// Recovers the affine point for `x` with the requested y parity.
    ///
    /// `p = 3 (mod 4)`, so the square root (when it exists) is
    /// `(x^3 + 7)^((p+1)/4)`. Fails with [`KeyError::InvalidPublicKey`]
    /// when `x` has no point on the curve.
    pub(crate) fn lift_x(&self, x: &BigInt, odd_y: bool) -> Result<Point, KeyError> {
        if x.is_negative() || *x >= self.p {
            return Err(KeyError::InvalidPublicKey);
        }

        let y_squared = Self::reduce(&x.mul(x).mul(x).add(&BigInt::from(7u64)), &self.p);
        let sqrt_exp = self.p.add(&BigInt::one()).shr(2);
        let y = Self::mod_pow(&y_squared, &sqrt_exp, &self.p);

        if Self::reduce(&y.mul(&y), &self.p) != y_squared {
            return Err(KeyError::InvalidPublicKey);
        }

        let y = if y.bit(0) == odd_y { y } else { self.p.sub(&y) };
        Ok(Point::Affine { x: x.clone(), y })
    }

    // -------------------------------------------------------------------------
    // Canonical point encodings
    // -------------------------------------------------------------------------

    /// 33-byte compressed encoding: parity prefix plus the x-coordinate.
    pub(crate) fn encode_compressed(point: &Point) -> [u8; 33] {
        let Point::Affine { x, y } = point else {
            unreachable!("the identity is never encoded");
        };

        let mut out = [0u8; 33];
        out[0] = if y.bit(0) { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&coord32(x));
        out
    }

    /// 65-byte uncompressed encoding: `0x04 || x || y`.
    pub(crate) fn encode_uncompressed(point: &Point) -> [u8; 65] {
        let Point::Affine { x, y } = point else {
            unreachable!("the identity is never encoded");
        };

        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&coord32(x));
        out[33..].copy_from_slice(&coord32(y));
        out
    }

    /// Parses either canonical encoding, validating the point is on the
    /// curve. Malformed or off-curve input fails with
    /// [`KeyError::InvalidPublicKey`].
    pub(crate) fn decode_point(&self, bytes: &[u8]) -> Result<Point, KeyError> {
        match bytes {
            [0x02, x_bytes @ ..] if x_bytes.len() == 32 => {
                self.lift_x(&BigInt::from_unsigned_bytes(x_bytes), false)
            }
            [0x03, x_bytes @ ..] if x_bytes.len() == 32 => {
                self.lift_x(&BigInt::from_unsigned_bytes(x_bytes), true)
            }
            [0x04, coords @ ..] if coords.len() == 64 => {
                let x = BigInt::from_unsigned_bytes(&coords[..32]);
                let y = BigInt::from_unsigned_bytes(&coords[32..]);
                if x >= self.p || y >= self.p {
                    return Err(KeyError::InvalidPublicKey);
                }
                let point = Point::Affine { x, y };
                if !self.on_curve(&point) {
                    return Err(KeyError::InvalidPublicKey);
                }
                Ok(point)
            }
            _ => Err(KeyError::InvalidPublicKey),
        }
    }
}

/// 32-byte big-endian zero-padded coordinate.
pub(crate) fn coord32(value: &BigInt) -> [u8; 32] {
    let bytes = value.magnitude_bytes();
    debug_assert!(bytes.len() <= 32, "field element wider than 32 bytes");

    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}
