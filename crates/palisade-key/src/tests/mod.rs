// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

mod ec_key;

use palisade_util::hex_to_bytes;

pub(crate) fn hex(hex_str: &str) -> Vec<u8> {
    hex_to_bytes(hex_str).expect("Failed to decode test vector hex")
}
