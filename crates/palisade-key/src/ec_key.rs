// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! EcKey - a secp256k1 key pair.

use alloc::vec::Vec;

use palisade_buffer::SecureBytes;
use palisade_num::{BigInt, SecureBigInt};
use palisade_rand::{EntropySource, SystemEntropySource};

use crate::curve::{Point, Secp256k1};
use crate::der;
use crate::error::KeyError;
use crate::nonce::NonceDrbg;

/// A secp256k1 key pair.
///
/// The private scalar, when present, lives in secure storage; the public
/// point is held in both canonical encodings. The stored point is always
/// exactly the scalar times the generator. A key constructed from only a
/// public point can verify signatures but never produce them.
///
/// Values are immutable after construction and freely shareable across
/// threads.
pub struct EcKey {
    private: Option<SecureBigInt>,
    point: Point,
    compressed: [u8; 33],
    uncompressed: [u8; 65],
}

impl EcKey {
    /// Generates a fresh key pair from the platform entropy source.
    ///
    /// Fails with [`KeyError::RandomSourceUnavailable`] when the source
    /// cannot be read; the read is not retried.
    pub fn generate() -> Result<Self, KeyError> {
        Self::generate_with(&SystemEntropySource)
    }

    /// Generates a fresh key pair from the given entropy source.
    ///
    /// Rejection-samples 32-byte candidates (read directly into secure
    /// storage) until one lands in `[1, n-1]`.
    pub fn generate_with(entropy: &dyn EntropySource) -> Result<Self, KeyError> {
        let curve = Secp256k1::new();

        loop {
            let mut candidate = SecureBytes::with_len(32)?;
            entropy
                .fill_bytes(candidate.as_mut_slice())
                .map_err(|_| KeyError::RandomSourceUnavailable)?;

            let scalar = SecureBigInt::from_secure_bytes(candidate);
            if scalar.is_zero() || scalar.ge_value(&curve.n) {
                continue;
            }
            return Self::from_scalar(scalar);
        }
    }

    /// Builds a key pair from an existing private scalar (big-endian).
    ///
    /// Ownership of the secure buffer transfers. Fails with
    /// [`KeyError::InvalidPrivateKey`] when the value is zero or not
    /// below the curve order.
    pub fn from_private_key(secret: SecureBytes) -> Result<Self, KeyError> {
        Self::from_scalar(SecureBigInt::from_secure_bytes(secret))
    }

    /// Builds a verify-only key from a compressed (33-byte) or
    /// uncompressed (65-byte) public point encoding.
    ///
    /// Fails with [`KeyError::InvalidPublicKey`] on malformed or off-curve
    /// input.
    pub fn from_public_key(bytes: &[u8]) -> Result<Self, KeyError> {
        let curve = Secp256k1::new();
        let point = curve.decode_point(bytes)?;
        Ok(Self::from_point(point))
    }

    pub(crate) fn from_scalar(scalar: SecureBigInt) -> Result<Self, KeyError> {
        let curve = Secp256k1::new();
        if scalar.is_zero() || scalar.ge_value(&curve.n) {
            return Err(KeyError::InvalidPrivateKey);
        }

        // Deliberate export: deriving the public point needs the scalar in
        // plain bignum arithmetic for the duration of one multiplication.
        let d = BigInt::from_unsigned_bytes(scalar.as_bytes());
        let point = curve.mul(&d, &curve.g);
        d.wipe();

        let compressed = Secp256k1::encode_compressed(&point);
        let uncompressed = Secp256k1::encode_uncompressed(&point);
        Ok(Self {
            private: Some(scalar),
            point,
            compressed,
            uncompressed,
        })
    }

    pub(crate) fn from_point(point: Point) -> Self {
        let compressed = Secp256k1::encode_compressed(&point);
        let uncompressed = Secp256k1::encode_uncompressed(&point);
        Self {
            private: None,
            point,
            compressed,
            uncompressed,
        }
    }

    /// The 33-byte compressed public key (`02`/`03` y-parity prefix).
    pub fn public_key(&self) -> &[u8; 33] {
        &self.compressed
    }

    /// The 65-byte uncompressed public key (`04 || x || y`).
    pub fn public_key_uncompressed(&self) -> &[u8; 65] {
        &self.uncompressed
    }

    /// The private scalar, when present.
    pub fn private_key(&self) -> Option<&SecureBigInt> {
        self.private.as_ref()
    }

    /// Returns `true` if this key can sign.
    pub fn has_private_key(&self) -> bool {
        self.private.is_some()
    }

    /// Material export: the canonical 32-byte zero-padded private scalar,
    /// in fresh secure storage.
    ///
    /// Fails with [`KeyError::MissingPrivateKey`] on a verify-only key.
    pub fn export_private_key(&self) -> Result<SecureBytes, KeyError> {
        let scalar = self.private.as_ref().ok_or(KeyError::MissingPrivateKey)?;
        Ok(scalar.to_padded(32)?)
    }

    pub(crate) fn point(&self) -> &Point {
        &self.point
    }

    /// Signs a 256-bit hash, returning the DER-encoded ECDSA signature.
    ///
    /// Nonces are deterministic per RFC 6979, so a (key, hash) pair always
    /// produces the same signature and can never reuse a nonce across
    /// distinct hashes. `s` is canonicalized to the low half of the order.
    ///
    /// Fails with [`KeyError::InvalidHashLength`] unless the hash is
    /// exactly 32 bytes, and [`KeyError::MissingPrivateKey`] on a
    /// verify-only key.
    pub fn sign(&self, hash: &[u8]) -> Result<Vec<u8>, KeyError> {
        if hash.len() != 32 {
            return Err(KeyError::InvalidHashLength);
        }
        let scalar = self.private.as_ref().ok_or(KeyError::MissingPrivateKey)?;

        let curve = Secp256k1::new();
        let secret = scalar.to_padded(32)?;
        let mut drbg = NonceDrbg::new(secret.as_slice(), hash, &curve.n);

        // Deliberate export: the scalar enters plain bignum arithmetic for
        // the signing computation and is wiped on every exit path.
        let d = BigInt::from_unsigned_bytes(secret.as_slice());
        let z = BigInt::from_unsigned_bytes(hash);

        let (r, s) = loop {
            let k = drbg.next_nonce(&curve.n);

            let r_point = curve.mul(&k, &curve.g);
            let Point::Affine { x, .. } = r_point else {
                k.wipe();
                drbg.step();
                continue;
            };
            let r = Secp256k1::reduce(&x, &curve.n);
            if r.is_zero() {
                k.wipe();
                drbg.step();
                continue;
            }

            // s = k^-1 (z + r d) mod n
            let k_inv = Secp256k1::mod_inv(&k, &curve.n).expect("nonce is in [1, n-1]");
            let rd = r.mul(&d);
            let s = Secp256k1::reduce(&k_inv.mul(&z.add(&rd)), &curve.n);
            rd.wipe();
            k_inv.wipe();
            k.wipe();

            if s.is_zero() {
                drbg.step();
                continue;
            }
            break (r, s);
        };
        d.wipe();

        // Low-s canonical form kills the (r, n - s) malleability twin.
        let half_order = curve.n.shr(1);
        let s = if s > half_order { curve.n.sub(&s) } else { s };

        Ok(der::encode(&r, &s))
    }

    /// Verifies a DER-encoded ECDSA signature over `hash`.
    ///
    /// Malformed encodings, out-of-range `(r, s)`, and wrong-length hashes
    /// verify as `false` rather than erroring.
    pub fn verify(&self, signature: &[u8], hash: &[u8]) -> bool {
        if hash.len() != 32 {
            return false;
        }
        let Some((r, s)) = der::decode(signature) else {
            return false;
        };

        let curve = Secp256k1::new();
        let one = BigInt::one();
        if r < one || r >= curve.n || s < one || s >= curve.n {
            return false;
        }

        let Some(w) = Secp256k1::mod_inv(&s, &curve.n) else {
            return false;
        };
        let z = BigInt::from_unsigned_bytes(hash);
        let u1 = Secp256k1::reduce(&z.mul(&w), &curve.n);
        let u2 = Secp256k1::reduce(&r.mul(&w), &curve.n);

        let candidate = curve.add(&curve.mul(&u1, &curve.g), &curve.mul(&u2, &self.point));
        let Point::Affine { x, .. } = candidate else {
            return false;
        };

        Secp256k1::reduce(&x, &curve.n) == r
    }
}

impl core::fmt::Debug for EcKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EcKey")
            .field("compressed", &self.compressed)
            .field("has_private", &self.has_private_key())
            .finish()
    }
}
