// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! SecureBytes - the growable secure buffer.

use core::ops::Range;

use subtle::ConstantTimeEq;

use palisade_alloc::{allocate, SecureAlloc};

use crate::error::BufferError;

/// A growable byte buffer whose backing storage is always page-locked and
/// wiped on release.
///
/// The buffer owns its [`SecureAlloc`] exclusively; there is no sharing and
/// no implicit copying into non-secure memory. Copies are explicit via
/// [`try_clone`](SecureBytes::try_clone) and land in fresh secure storage.
pub struct SecureBytes {
    block: SecureAlloc,
}

impl SecureBytes {
    /// Creates an empty buffer. Allocates nothing.
    pub fn new() -> Result<Self, BufferError> {
        Ok(Self { block: allocate(0)? })
    }

    /// Creates a zero-filled buffer of `len` bytes.
    pub fn with_len(len: usize) -> Result<Self, BufferError> {
        Ok(Self {
            block: allocate(len)?,
        })
    }

    /// Creates a buffer holding a copy of `bytes`.
    ///
    /// The source slice is left untouched; its own hygiene stays the
    /// caller's responsibility.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, BufferError> {
        let mut block = allocate(bytes.len())?;
        block.as_mut_slice().copy_from_slice(bytes);
        Ok(Self { block })
    }

    /// Returns the buffer length in bytes.
    pub fn len(&self) -> usize {
        self.block.len()
    }

    /// Returns `true` if the buffer has zero length.
    pub fn is_empty(&self) -> bool {
        self.block.is_empty()
    }

    /// Read-only view of the contents, for big-integer/EC-key internals.
    pub fn as_slice(&self) -> &[u8] {
        self.block.as_slice()
    }

    /// Mutable view of the contents, for big-integer/EC-key internals.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.block.as_mut_slice()
    }

    /// Appends raw bytes, regrowing the backing block.
    ///
    /// Growth allocates a new block sized to the new length, copies the old
    /// content, and releases the old block through the wiping path.
    pub fn append_slice(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        if bytes.is_empty() {
            return Ok(());
        }

        let old_len = self.len();
        let mut grown = allocate(old_len + bytes.len())?;
        grown.as_mut_slice()[..old_len].copy_from_slice(self.as_slice());
        grown.as_mut_slice()[old_len..].copy_from_slice(bytes);

        // The old block is wiped and unlocked by its Drop.
        self.block = grown;
        Ok(())
    }

    /// Appends another secure buffer's contents.
    pub fn append(&mut self, other: &SecureBytes) -> Result<(), BufferError> {
        self.append_slice(other.as_slice())
    }

    /// Copies `range` into a fresh secure buffer.
    ///
    /// Fails with [`BufferError::OutOfRange`] when the range exceeds the
    /// buffer bounds.
    pub fn subrange(&self, range: Range<usize>) -> Result<SecureBytes, BufferError> {
        if range.start > range.end || range.end > self.len() {
            return Err(BufferError::OutOfRange);
        }
        SecureBytes::from_slice(&self.as_slice()[range])
    }

    /// Explicit copy into fresh secure storage.
    pub fn try_clone(&self) -> Result<SecureBytes, BufferError> {
        SecureBytes::from_slice(self.as_slice())
    }
}

impl core::fmt::Debug for SecureBytes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SecureBytes {{ len: {}, .. }}", self.len())
    }
}

impl PartialEq for SecureBytes {
    fn eq(&self, other: &Self) -> bool {
        // Length is not secret; contents are compared in constant time.
        self.len() == other.len() && bool::from(self.as_slice().ct_eq(other.as_slice()))
    }
}

impl Eq for SecureBytes {}
