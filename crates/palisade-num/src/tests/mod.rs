// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.


use crate::big_int::BigInt;

/// Reference conversion for property tests.
pub(crate) fn big_from_i128(value: i128) -> BigInt {
    let magnitude = BigInt::from_unsigned_bytes(&value.unsigned_abs().to_be_bytes());
    if value < 0 {
        magnitude.neg()
    } else {
        magnitude
    }
}
