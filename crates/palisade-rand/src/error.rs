// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for palisade_rand.

use thiserror::Error;

/// Errors from entropy sources.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EntropyError {
    /// The platform entropy source could not be read.
    #[error("platform entropy source unavailable")]
    SourceUnavailable,
}
