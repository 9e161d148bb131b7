// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::EntropyError;
use crate::traits::EntropySource;

/// OS-level CSPRNG via `getrandom`.
///
/// Linux/Android use the `getrandom` syscall, macOS/iOS `getentropy`,
/// Windows `BCryptGenRandom`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEntropySource;

impl EntropySource for SystemEntropySource {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        getrandom::fill(dest).map_err(|_| EntropyError::SourceUnavailable)
    }
}
