// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for palisade_alloc.

use thiserror::Error;

/// Errors from the secure allocator.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// Granting the allocation would push the locked-page total over
    /// [`SECURE_MEMORY_CEILING`](crate::SECURE_MEMORY_CEILING).
    ///
    /// Unrecoverable for this allocation; release other secure data first.
    #[error("secure memory budget exhausted")]
    OutOfSecureMemory,

    /// `mlock` refused to pin a page (e.g. `RLIMIT_MEMLOCK`).
    #[error("failed to lock page in RAM")]
    LockFailed,

    /// The system allocator returned no memory.
    #[error("host allocation failed")]
    HostAllocFailed,
}
