// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Deterministic ECDSA nonces per RFC 6979 (HMAC-SHA256 DRBG).
//!
//! The nonce is a pure function of the private scalar and the message
//! hash, so a given (key, hash) pair can never see two different nonces -
//! the classic nonce-reuse key-leak is ruled out by construction, and
//! signatures are reproducible.

use palisade_num::BigInt;
use palisade_util::wipe_slice;

use crate::hashes::hmac_sha256;

/// HMAC-SHA256 DRBG seeded with the scalar and message hash.
///
/// `next_nonce` steps the generator until it lands in `[1, n-1]`; callers
/// continue stepping in the (vanishing) event a candidate produces a
/// degenerate signature.
pub(crate) struct NonceDrbg {
    k: [u8; 32],
    v: [u8; 32],
}

impl NonceDrbg {
    /// Seeds from the 32-byte scalar and 32-byte message hash.
    pub(crate) fn new(scalar: &[u8], hash: &[u8], order: &BigInt) -> Self {
        debug_assert_eq!(scalar.len(), 32);
        debug_assert_eq!(hash.len(), 32);

        // bits2octets: the hash interpreted as an integer, reduced mod n.
        let reduced = BigInt::from_unsigned_bytes(hash)
            .rem(order)
            .expect("order is nonzero");
        let mut hash_octets = [0u8; 32];
        let reduced_bytes = reduced.magnitude_bytes();
        hash_octets[32 - reduced_bytes.len()..].copy_from_slice(&reduced_bytes);

        let mut drbg = Self {
            k: [0u8; 32],
            v: [0x01u8; 32],
        };

        drbg.k = hmac_sha256(&drbg.k, &[&drbg.v, &[0x00], scalar, &hash_octets]);
        drbg.v = hmac_sha256(&drbg.k, &[&drbg.v]);
        drbg.k = hmac_sha256(&drbg.k, &[&drbg.v, &[0x01], scalar, &hash_octets]);
        drbg.v = hmac_sha256(&drbg.k, &[&drbg.v]);

        wipe_slice(&mut hash_octets);
        drbg
    }

    /// Produces the next candidate nonce in `[1, n-1]`.
    pub(crate) fn next_nonce(&mut self, order: &BigInt) -> BigInt {
        loop {
            self.v = hmac_sha256(&self.k, &[&self.v]);
            let candidate = BigInt::from_unsigned_bytes(&self.v);

            if !candidate.is_zero() && candidate < *order {
                return candidate;
            }

            candidate.wipe();
            self.step();
        }
    }

    /// Re-keys after a rejected candidate (RFC 6979 step H retry).
    pub(crate) fn step(&mut self) {
        self.k = hmac_sha256(&self.k, &[&self.v, &[0x00]]);
        self.v = hmac_sha256(&self.k, &[&self.v]);
    }
}

impl Drop for NonceDrbg {
    fn drop(&mut self) {
        // DRBG state is derived from the private scalar.
        wipe_slice(&mut self.k);
        wipe_slice(&mut self.v);
    }
}
