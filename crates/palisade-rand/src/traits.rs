// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::EntropyError;

/// Trait for cryptographically secure random byte sources.
///
/// Implementations must provide randomness suitable for private-key
/// generation; typically backed by the OS CSPRNG.
pub trait EntropySource {
    /// Fills `dest` with cryptographically secure random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EntropyError::SourceUnavailable`] if the platform source
    /// cannot be read. The operation is not retried internally.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError>;
}
