// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for palisade_num.

use thiserror::Error;

use palisade_buffer::BufferError;

/// Errors from big-integer operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NumError {
    /// Division or reduction by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A negative value cannot enter secure scalar storage.
    #[error("secure integers are non-negative")]
    NegativeSecureValue,

    /// A value does not fit the requested fixed width.
    #[error("value too wide for requested length")]
    ValueTooWide,

    /// Secure scratch storage could not be allocated.
    #[error("{0}")]
    Buffer(#[from] BufferError),
}
