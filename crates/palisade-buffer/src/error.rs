// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for palisade_buffer.

use thiserror::Error;

use palisade_alloc::AllocError;

/// Errors from secure buffer operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// The secure allocator refused the backing block.
    #[error("{0}")]
    Alloc(#[from] AllocError),

    /// A subrange fell outside the buffer bounds.
    #[error("range out of buffer bounds")]
    OutOfRange,
}
