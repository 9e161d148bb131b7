// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{hex_to_bytes, is_slice_wiped, wipe_slice};

// =============================================================================
// wipe_slice()
// =============================================================================

#[test]
fn test_wipe_slice_zeros_all_bytes() {
    let mut data = vec![0xABu8; 1024];

    wipe_slice(&mut data);

    assert!(is_slice_wiped(&data));
}

#[test]
fn test_wipe_slice_empty_slice() {
    let mut data: Vec<u8> = vec![];

    wipe_slice(&mut data); // should not panic

    assert!(data.is_empty());
}

#[test]
fn test_wipe_slice_single_byte() {
    let mut data = vec![0xFFu8];

    wipe_slice(&mut data);

    assert_eq!(data, vec![0]);
}

// =============================================================================
// is_slice_wiped()
// =============================================================================

#[test]
fn test_is_slice_wiped_detects_nonzero() {
    let mut data = vec![0u8; 32];

    assert!(is_slice_wiped(&data));

    data[31] = 1;

    assert!(!is_slice_wiped(&data));
}

#[test]
fn test_is_slice_wiped_empty_slice() {
    assert!(is_slice_wiped(&[]));
}

// =============================================================================
// hex_to_bytes()
// =============================================================================

#[test]
fn test_hex_to_bytes_decodes_mixed_case() {
    let bytes = hex_to_bytes("00ffAb10").expect("Failed to decode hex");

    assert_eq!(bytes, vec![0x00, 0xFF, 0xAB, 0x10]);
}

#[test]
fn test_hex_to_bytes_empty_string() {
    let bytes = hex_to_bytes("").expect("Failed to decode hex");

    assert!(bytes.is_empty());
}

#[test]
fn test_hex_to_bytes_rejects_odd_length() {
    assert!(hex_to_bytes("abc").is_none());
}

#[test]
fn test_hex_to_bytes_rejects_non_hex() {
    assert!(hex_to_bytes("zz").is_none());
}
