// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! ChainKey - hierarchical deterministic keys.
//!
//! An [`EcKey`] paired with a 32-byte chain code. Child derivation is a
//! single HMAC-SHA512 step keyed by the chain code: the left half offsets
//! the parent scalar modulo the curve order, the right half becomes the
//! child chain code. Hardened indexes (>= 2^31) commit to the parent's
//! private scalar instead of its public point, so a leaked child private
//! key plus the parent public key cannot recover the parent.

use alloc::vec::Vec;

use palisade_buffer::SecureBytes;
use palisade_num::{BigInt, SecureBigInt};
use palisade_util::wipe_slice;

use crate::curve::Secp256k1;
use crate::ec_key::EcKey;
use crate::error::KeyError;
use crate::hashes::{hash160, hmac_sha512};

/// First hardened child index.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// HMAC key for master-key derivation from a seed.
const MASTER_SEED_KEY: &[u8] = b"Bitcoin seed";

/// Version words for the 78-byte extended-key serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// Main network (`xpub`/`xprv` version words).
    Main,
    /// Test network (`tpub`/`tprv` version words).
    Test,
}

/// Which half of the pair an extended serialization carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyForm {
    /// Chain code plus compressed public key.
    Public,
    /// Chain code plus `0x00`-prefixed private scalar.
    Private,
}

impl Network {
    fn version(self, form: KeyForm) -> u32 {
        match (self, form) {
            (Network::Main, KeyForm::Public) => 0x0488_B21E,
            (Network::Main, KeyForm::Private) => 0x0488_ADE4,
            (Network::Test, KeyForm::Public) => 0x0435_87CF,
            (Network::Test, KeyForm::Private) => 0x0435_8394,
        }
    }
}

/// A key pair plus chain code at a fixed position in a derivation tree.
///
/// Immutable once constructed: derivation returns a new `ChainKey` and
/// never mutates the parent.
pub struct ChainKey {
    key: EcKey,
    chain_code: SecureBytes,
    index: u32,
    depth: u8,
    parent_fingerprint: [u8; 4],
}

impl ChainKey {
    /// Root construction from a private scalar and a chain code.
    ///
    /// The scalar is validated like any private key; the chain code is
    /// stored directly and must be exactly 32 bytes.
    pub fn new(secret: SecureBytes, chain_code: SecureBytes) -> Result<Self, KeyError> {
        if chain_code.len() != 32 {
            return Err(KeyError::InvalidChainCode);
        }
        Ok(Self {
            key: EcKey::from_private_key(secret)?,
            chain_code,
            index: 0,
            depth: 0,
            parent_fingerprint: [0u8; 4],
        })
    }

    /// Verify-only root from a public point encoding and a chain code.
    ///
    /// Supports non-hardened derivation of public child keys; hardened
    /// derivation and signing are unavailable.
    pub fn from_public_key(public_key: &[u8], chain_code: SecureBytes) -> Result<Self, KeyError> {
        if chain_code.len() != 32 {
            return Err(KeyError::InvalidChainCode);
        }
        Ok(Self {
            key: EcKey::from_public_key(public_key)?,
            chain_code,
            index: 0,
            depth: 0,
            parent_fingerprint: [0u8; 4],
        })
    }

    /// Derives the master key from a seed:
    /// `HMAC-SHA512(key = "Bitcoin seed", data = seed)`, left half scalar,
    /// right half chain code.
    ///
    /// Fails with [`KeyError::InvalidDerivedKey`] for the degenerate left
    /// halves (zero or >= n); retry with a different seed.
    pub fn master_from_seed(seed: &[u8]) -> Result<Self, KeyError> {
        let mut digest = hmac_sha512(MASTER_SEED_KEY, seed);
        let split = SecureBytes::from_slice(&digest);
        wipe_slice(&mut digest);
        let split = split?;

        let secret = split.subrange(0..32)?;
        let chain_code = split.subrange(32..64)?;

        match Self::new(secret, chain_code) {
            Err(KeyError::InvalidPrivateKey) => Err(KeyError::InvalidDerivedKey),
            other => other,
        }
    }

    /// Derives the child at `index`.
    ///
    /// Non-hardened derivation (`index < 2^31`) commits to the parent's
    /// compressed public key and works on verify-only parents, yielding a
    /// verify-only child. Hardened derivation commits to the parent's
    /// private scalar and fails with
    /// [`KeyError::HardenedDerivationRequiresPrivateKey`] without one.
    ///
    /// Fails with [`KeyError::InvalidDerivedKey`] when the HMAC left half
    /// falls outside `[1, n-1]` after offsetting (retry with the next
    /// index).
    pub fn derive_child(&self, index: u32) -> Result<ChainKey, KeyError> {
        let mut data = SecureBytes::new()?;
        if index >= HARDENED_OFFSET {
            if !self.key.has_private_key() {
                return Err(KeyError::HardenedDerivationRequiresPrivateKey);
            }
            data.append_slice(&[0x00])?;
            data.append(&self.key.export_private_key()?)?;
        } else {
            data.append_slice(self.key.public_key())?;
        }
        data.append_slice(&index.to_be_bytes())?;

        let mut digest = hmac_sha512(self.chain_code.as_slice(), data.as_slice());
        let split = SecureBytes::from_slice(&digest);
        wipe_slice(&mut digest);
        let split = split?;

        let left = SecureBigInt::from_secure_bytes(split.subrange(0..32)?);
        let chain_code = split.subrange(32..64)?;

        let curve = Secp256k1::new();
        if left.ge_value(&curve.n) {
            return Err(KeyError::InvalidDerivedKey);
        }

        let key = match self.key.private_key() {
            Some(parent_scalar) => {
                // child scalar = (IL + parent) mod n, entirely in secure
                // storage.
                let child_scalar = left.add_mod(parent_scalar, &curve.n)?;
                if child_scalar.is_zero() {
                    return Err(KeyError::InvalidDerivedKey);
                }
                EcKey::from_scalar(child_scalar)?
            }
            None => {
                // Public derivation: child point = IL*G + parent point.
                // IL is computable from the extended public key alone, so
                // it is not secret on this path.
                let offset = BigInt::from_unsigned_bytes(left.as_bytes());
                let child_point = curve.add(&curve.mul(&offset, &curve.g), self.key.point());
                if child_point.is_infinity() {
                    return Err(KeyError::InvalidDerivedKey);
                }
                EcKey::from_point(child_point)
            }
        };

        Ok(ChainKey {
            key,
            chain_code,
            index,
            depth: self.depth.wrapping_add(1),
            parent_fingerprint: self.fingerprint(),
        })
    }

    /// Derives the hardened child at `index` (adds the 2^31 offset).
    ///
    /// Fails with [`KeyError::InvalidDerivedKey`] when the index already
    /// carries the hardened bit.
    pub fn derive_hardened(&self, index: u32) -> Result<ChainKey, KeyError> {
        let offset_index = index
            .checked_add(HARDENED_OFFSET)
            .filter(|_| index < HARDENED_OFFSET)
            .ok_or(KeyError::InvalidDerivedKey)?;
        self.derive_child(offset_index)
    }

    /// The underlying key pair.
    pub fn key(&self) -> &EcKey {
        &self.key
    }

    /// The 32-byte chain code.
    pub fn chain_code(&self) -> &SecureBytes {
        &self.chain_code
    }

    /// The index this key was derived at (0 for a root).
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Distance from the root (0 for a root).
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// First four bytes of the parent's identifier; zero for a root.
    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// Returns `true` if this key was derived at a hardened index.
    pub fn is_hardened(&self) -> bool {
        self.index >= HARDENED_OFFSET
    }

    /// The index without the hardened bit, when hardened.
    pub fn hardened_index(&self) -> Option<u32> {
        if self.is_hardened() {
            Some(self.index - HARDENED_OFFSET)
        } else {
            None
        }
    }

    /// `RIPEMD160(SHA256(compressed public key))`, the key identifier.
    pub fn identifier(&self) -> [u8; 20] {
        hash160(self.key.public_key())
    }

    /// First four bytes of the identifier.
    pub fn fingerprint(&self) -> [u8; 4] {
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.identifier()[..4]);
        out
    }

    /// The 78-byte extended-key serialization:
    /// `version || depth || parent_fingerprint || index || chain_code ||
    /// key_data`.
    ///
    /// The private form's key data is `0x00 || scalar32` - a deliberate
    /// material export into plain memory for the caller's encoder
    /// (Base58Check stays with callers). Fails with
    /// [`KeyError::MissingPrivateKey`] when serializing the private form
    /// of a verify-only key.
    pub fn serialize_extended(&self, form: KeyForm, network: Network) -> Result<Vec<u8>, KeyError> {
        let mut out = Vec::with_capacity(78);
        out.extend_from_slice(&network.version(form).to_be_bytes());
        out.push(self.depth);
        out.extend_from_slice(&self.parent_fingerprint);
        out.extend_from_slice(&self.index.to_be_bytes());
        out.extend_from_slice(self.chain_code.as_slice());

        match form {
            KeyForm::Public => out.extend_from_slice(self.key.public_key()),
            KeyForm::Private => {
                out.push(0x00);
                out.extend_from_slice(self.key.export_private_key()?.as_slice());
            }
        }
        Ok(out)
    }
}

impl core::fmt::Debug for ChainKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChainKey")
            .field("depth", &self.depth)
            .field("index", &self.index)
            .field("has_private", &self.key.has_private_key())
            .finish_non_exhaustive()
    }
}
