// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! SecureAlloc - an owned, page-locked, wipe-on-release block.

use alloc::alloc::{alloc_zeroed, dealloc, Layout};
use core::ptr::NonNull;

use palisade_util::wipe_slice;

use crate::error::AllocError;
use crate::ledger;

/// An owned block of zero-initialized, page-locked memory.
///
/// Dropping the block overwrites its bytes with zeros, releases its page
/// references (unlocking pages no other live block shares), and returns the
/// memory to the system allocator. Exactly one owner exists per block; the
/// type is deliberately neither `Clone` nor `Copy`.
pub struct SecureAlloc {
    ptr: NonNull<u8>,
    len: usize,
}

// Safety: SecureAlloc owns its block exclusively and never aliases it.
unsafe impl Send for SecureAlloc {}
unsafe impl Sync for SecureAlloc {}

/// Allocates a zero-initialized, page-locked block of `len` bytes.
///
/// Hardens the process (core dumps off) before the first byte of secure
/// data can exist. Fails with [`AllocError::OutOfSecureMemory`] when the
/// block's page span would exceed the budget, or
/// [`AllocError::LockFailed`] when the OS refuses to pin a page. A
/// zero-length block is valid, owns no pages, and costs no budget.
pub fn allocate(len: usize) -> Result<SecureAlloc, AllocError> {
    palisade_guard::harden_process();

    if len == 0 {
        return Ok(SecureAlloc {
            ptr: NonNull::dangling(),
            len: 0,
        });
    }

    // A block larger than the ceiling can never be granted; rejecting it
    // here also keeps the layout arithmetic trivially in range.
    if len > ledger::SECURE_MEMORY_CEILING {
        return Err(AllocError::OutOfSecureMemory);
    }

    let layout = block_layout(len);
    let raw = unsafe { alloc_zeroed(layout) };
    let Some(ptr) = NonNull::new(raw) else {
        return Err(AllocError::HostAllocFailed);
    };

    // Nothing secret has been written yet, so a plain dealloc is fine on
    // the failure path.
    if let Err(error) = ledger::register_range(ptr.as_ptr() as usize, len) {
        unsafe { dealloc(ptr.as_ptr(), layout) };
        return Err(error);
    }

    Ok(SecureAlloc { ptr, len })
}

impl SecureAlloc {
    /// Returns the block length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the block has zero length.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read-only view of the block.
    pub fn as_slice(&self) -> &[u8] {
        if self.len == 0 {
            return &[];
        }
        // Safety: ptr/len describe a live allocation owned by self.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Mutable view of the block.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        if self.len == 0 {
            return &mut [];
        }
        // Safety: ptr/len describe a live allocation owned exclusively by self.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Releases the block, returning whether its bytes read as zero after
    /// the wipe and before the memory returns to the system allocator.
    ///
    /// Test backdoor for the zeroing invariant; the release path itself is
    /// identical to `Drop`.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn release_with_witness(mut self) -> bool {
        if self.len == 0 {
            return true;
        }
        wipe_slice(self.as_mut_slice());
        let wiped = palisade_util::is_slice_wiped(self.as_slice());
        drop(self); // wipes again (idempotent), unlocks, frees
        wiped
    }
}

impl core::fmt::Debug for SecureAlloc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecureAlloc")
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

impl Drop for SecureAlloc {
    fn drop(&mut self) {
        if self.len == 0 {
            return;
        }

        wipe_slice(self.as_mut_slice());
        ledger::release_range(self.ptr.as_ptr() as usize, self.len);
        unsafe { dealloc(self.ptr.as_ptr(), block_layout(self.len)) };
    }
}

fn block_layout(len: usize) -> Layout {
    // Infallible: len is non-zero and bounded by the ceiling check.
    Layout::from_size_align(len, 1).expect("block length within ceiling")
}
